use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Lowest intake-timing score
pub const MIN_TIMING_SCORE: u32 = 5;
/// Highest intake-timing score
pub const MAX_TIMING_SCORE: u32 = 10;

/// Months between consecutive generated intakes
const INTAKE_SPACING_MONTHS: u32 = 4;
const INTAKE_COUNT: u32 = 3;

/// Source of the time-dependent inputs to scoring
///
/// The intake-timing sub-score and the generated intake dates are the only
/// parts of enrichment that are not a function of the profile and the
/// university record.
pub trait TimingSource: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Intake-timing sub-score, within `MIN_TIMING_SCORE..=MAX_TIMING_SCORE`
    fn intake_score(&self) -> u32;
}

/// Wall clock with a random intake-timing score
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTiming;

impl TimingSource for SystemTiming {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn intake_score(&self) -> u32 {
        loop {
            if let Some(score) = score_from_bytes(uuid::Uuid::new_v4().as_bytes()) {
                return score;
            }
        }
    }
}

const SCORE_SPAN: u32 = MAX_TIMING_SCORE - MIN_TIMING_SCORE + 1;
/// Largest multiple of `SCORE_SPAN` that fits in a byte; bytes at or above it are rejected
const UNBIASED_LIMIT: u32 = 256 - 256 % SCORE_SPAN;

/// Uniform score from the first usable random byte, or `None` if every byte is rejected
///
/// Bytes 6 and 8 of a v4 UUID hold the version and variant bits and are skipped.
fn score_from_bytes(bytes: &[u8]) -> Option<u32> {
    bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 6 && *i != 8)
        .map(|(_, b)| u32::from(*b))
        .find(|b| *b < UNBIASED_LIMIT)
        .map(|b| MIN_TIMING_SCORE + b % SCORE_SPAN)
}

/// Fixed instant and score, for reproducible scoring
#[derive(Debug, Clone, Copy)]
pub struct FixedTiming {
    pub now: DateTime<Utc>,
    pub score: u32,
}

impl FixedTiming {
    pub fn new(now: DateTime<Utc>, score: u32) -> Self {
        Self {
            now,
            score: score.clamp(MIN_TIMING_SCORE, MAX_TIMING_SCORE),
        }
    }
}

impl TimingSource for FixedTiming {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn intake_score(&self) -> u32 {
        self.score
    }
}

/// Upcoming intakes as "Month Year" strings, starting from the current month
pub fn next_intakes(now: DateTime<Utc>) -> Vec<String> {
    let start = now.month0();

    (0..INTAKE_COUNT)
        .filter_map(|i| {
            let offset = start + i * INTAKE_SPACING_MONTHS;
            let year = now.year() + (offset / 12) as i32;
            let month = offset % 12 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
        })
        .map(|date| date.format("%B %Y").to_string())
        .collect()
}
