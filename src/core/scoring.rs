use crate::models::{EnglishTest, Qualification, StudentProfile};

pub const MAX_ACADEMIC_SCORE: u32 = 40;
pub const MAX_FINANCIAL_SCORE: u32 = 25;
pub const MAX_LANGUAGE_SCORE: u32 = 15;

/// Language score when no test was declared
const NO_TEST_LANGUAGE_SCORE: u32 = 8;
/// Language score for tests without a threshold table
const UNKNOWN_TEST_LANGUAGE_SCORE: u32 = 10;
/// Language score below the lowest threshold
const BELOW_THRESHOLD_LANGUAGE_SCORE: u32 = 7;

const IELTS_BANDS: [(f64, u32); 4] = [(7.5, 15), (7.0, 13), (6.5, 11), (6.0, 9)];
const TOEFL_BANDS: [(f64, u32); 4] = [(100.0, 15), (90.0, 13), (80.0, 11), (70.0, 9)];

/// Budget ratio bands: cost / budget midpoint
const FINANCIAL_BANDS: [(f64, u32); 4] = [(1.0, 25), (1.2, 20), (1.5, 15), (2.0, 10)];
const OVER_BUDGET_FINANCIAL_SCORE: u32 = 5;

/// Academic sub-score (0-40)
///
/// Marks tier plus qualification bonus, minus up to 5 points for gap years.
pub fn academic_score(profile: &StudentProfile) -> u32 {
    let marks_bonus: i64 = match profile.marks {
        m if m >= 90.0 => 25,
        m if m >= 80.0 => 22,
        m if m >= 70.0 => 18,
        m if m >= 60.0 => 14,
        _ => 10,
    };

    let qualification_bonus: i64 = match profile.qualification {
        Qualification::Postgraduate => 10,
        Qualification::Undergraduate => 8,
        _ => 5,
    };

    let gap_penalty = profile.gap_years.min(5) as i64;

    (marks_bonus + qualification_bonus - gap_penalty).clamp(0, MAX_ACADEMIC_SCORE as i64) as u32
}

/// Financial sub-score (0-25)
///
/// Compares the annual cost against the midpoint of the student's budget.
pub fn financial_score(annual_cost: f64, budget_min: f64, budget_max: f64) -> u32 {
    let midpoint = (budget_min + budget_max) / 2.0;
    let ratio = annual_cost / midpoint;

    if !ratio.is_finite() {
        return OVER_BUDGET_FINANCIAL_SCORE;
    }

    FINANCIAL_BANDS
        .iter()
        .find(|(limit, _)| ratio <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(OVER_BUDGET_FINANCIAL_SCORE)
}

/// Language sub-score (0-15)
///
/// A missing test scores a flat 8 rather than zero.
pub fn language_score(test: Option<&EnglishTest>, score: Option<f64>) -> u32 {
    let bands = match test {
        None => return NO_TEST_LANGUAGE_SCORE,
        Some(EnglishTest::Ielts) => &IELTS_BANDS,
        Some(EnglishTest::Toefl) => &TOEFL_BANDS,
        Some(EnglishTest::Other(_)) => return UNKNOWN_TEST_LANGUAGE_SCORE,
    };

    let score = score.unwrap_or(0.0);
    bands
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(BELOW_THRESHOLD_LANGUAGE_SCORE)
}

/// Pick the degree label to offer for the student's qualification
pub fn select_degree(qualification: Qualification, degrees: &[&str]) -> String {
    let pick = match qualification {
        Qualification::Postgraduate => degrees
            .iter()
            .find(|d| d.contains("PhD"))
            .or_else(|| degrees.last()),
        Qualification::Undergraduate => degrees
            .iter()
            .find(|d| d.contains("Master"))
            .or_else(|| degrees.get(1))
            .or_else(|| degrees.first()),
        _ => degrees.first(),
    };

    pick.map(|d| d.to_string()).unwrap_or_default()
}
