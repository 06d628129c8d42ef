use std::collections::HashSet;

use crate::core::{countries::countries_match, enricher::DataEnricher};
use crate::models::{StudentProfile, UniversityData, UniversityMatch};

/// Default number of matches returned to the UI
pub const DEFAULT_TOP_N: usize = 50;

/// Minimum number of slots reserved for each preferred country
const MIN_COUNTRY_QUOTA: usize = 3;

/// Result of the selection process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<UniversityMatch>,
    /// Size of the deduplicated candidate pool
    pub total_candidates: usize,
}

/// Selects a ranked, deduplicated and country-diversified slate of matches
///
/// # Pipeline Stages
/// 1. Candidate collection (preferred countries first, others on shortfall)
/// 2. Enrichment of every candidate
/// 3. Deduplication by university name and country
/// 4. Ranking by match score
/// 5. Country diversity quotas
#[derive(Debug, Clone, Default)]
pub struct MatchSelector {
    enricher: DataEnricher,
}

impl MatchSelector {
    pub fn new(enricher: DataEnricher) -> Self {
        Self { enricher }
    }

    pub fn enricher(&self) -> &DataEnricher {
        &self.enricher
    }

    /// Select up to `top_n` matches for a student profile
    ///
    /// Results are sorted by descending match score; ties keep dataset order.
    /// When the profile names preferred countries, each one is guaranteed up
    /// to `max(3, top_n / n_preferred)` slots if the data allows.
    pub fn select_matches(
        &self,
        universities: &[UniversityData],
        profile: &StudentProfile,
        top_n: usize,
    ) -> MatchResult {
        let candidates = self.collect_candidates(universities, profile, top_n);
        let enriched_count = candidates.len();

        let mut ranked = deduplicate(candidates);
        let total_candidates = ranked.len();

        // Stable sort keeps insertion order among equal scores
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        let matches = match profile.preferences() {
            Some(preferred) => diversify(ranked, preferred, top_n),
            None => {
                ranked.truncate(top_n);
                ranked
            }
        };

        tracing::debug!(
            "Selected {} matches from {} candidates ({} enriched, top_n: {})",
            matches.len(),
            total_candidates,
            enriched_count,
            top_n
        );

        MatchResult {
            matches,
            total_candidates,
        }
    }

    /// Enrich the universities relevant to the profile
    ///
    /// A university matching several preferred countries is enriched once per
    /// match; duplicates are removed later.
    fn collect_candidates(
        &self,
        universities: &[UniversityData],
        profile: &StudentProfile,
        top_n: usize,
    ) -> Vec<UniversityMatch> {
        let Some(preferred) = profile.preferences() else {
            return universities
                .iter()
                .map(|u| self.enricher.enrich(u, profile))
                .collect();
        };

        let mut candidates = Vec::new();
        for country in preferred {
            candidates.extend(
                universities
                    .iter()
                    .filter(|u| countries_match(&u.country, country))
                    .map(|u| self.enricher.enrich(u, profile)),
            );
        }

        if candidates.len() < top_n {
            tracing::debug!(
                "Preferred countries yielded {} candidates, widening to all countries",
                candidates.len()
            );
            candidates.extend(
                universities
                    .iter()
                    .filter(|u| !preferred.iter().any(|c| countries_match(&u.country, c)))
                    .map(|u| self.enricher.enrich(u, profile)),
            );
        }

        candidates
    }
}

/// Drop repeated (university name, country) pairs, keeping the first
fn deduplicate(candidates: Vec<UniversityMatch>) -> Vec<UniversityMatch> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|m| seen.insert(m.dedup_key()))
        .collect()
}

/// Fill the slate with per-country quotas, then the best of the rest
///
/// `ranked` must already be sorted by descending score.
fn diversify(
    ranked: Vec<UniversityMatch>,
    preferred: &[String],
    top_n: usize,
) -> Vec<UniversityMatch> {
    let quota = MIN_COUNTRY_QUOTA.max(top_n / preferred.len());
    let mut taken = vec![false; ranked.len()];
    let mut picked = Vec::with_capacity(top_n.min(ranked.len()));

    for country in preferred {
        let mut pulled = 0;
        for (idx, m) in ranked.iter().enumerate() {
            if picked.len() >= top_n || pulled >= quota {
                break;
            }
            if !taken[idx] && countries_match(&m.country, country) {
                taken[idx] = true;
                picked.push(idx);
                pulled += 1;
            }
        }
    }

    for idx in 0..ranked.len() {
        if picked.len() >= top_n {
            break;
        }
        if !taken[idx] {
            taken[idx] = true;
            picked.push(idx);
        }
    }

    // Ranked order is score order, so index order restores it
    picked.sort_unstable();

    let mut slots: Vec<Option<UniversityMatch>> = ranked.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timing::FixedTiming;
    use crate::models::Qualification;
    use chrono::Utc;
    use std::sync::Arc;

    fn selector() -> MatchSelector {
        MatchSelector::new(DataEnricher::new(Arc::new(FixedTiming::new(Utc::now(), 8))))
    }

    fn university(name: &str, country: &str) -> UniversityData {
        UniversityData {
            name: name.to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    fn create_profile(preferred: Option<Vec<&str>>) -> StudentProfile {
        StudentProfile {
            marks: 82.0,
            qualification: Qualification::Undergraduate,
            field: "Engineering".to_string(),
            budget_min: 30000.0,
            budget_max: 50000.0,
            preferred_countries: preferred
                .map(|list| list.into_iter().map(String::from).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input() {
        let result = selector().select_matches(&[], &create_profile(None), 10);
        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_deduplicates_by_name_and_country() {
        let universities = vec![
            university("Alpha", "Canada"),
            university("Alpha", "Canada"),
            university("Alpha", "Germany"),
        ];

        let result = selector().select_matches(&universities, &create_profile(None), 10);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.total_candidates, 2);
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let universities = vec![
            university("Low", "Atlantis"),
            university("High", "Canada"),
            university("Mid", "France"),
        ];

        let result = selector().select_matches(&universities, &create_profile(None), 10);

        let names: Vec<&str> = result.matches.iter().map(|m| m.university_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let universities: Vec<UniversityData> = (0..5)
            .map(|i| university(&format!("Uni {}", i), "Canada"))
            .collect();

        let result = selector().select_matches(&universities, &create_profile(None), 3);

        let names: Vec<&str> = result.matches.iter().map(|m| m.university_name.as_str()).collect();
        assert_eq!(names, vec!["Uni 0", "Uni 1", "Uni 2"]);
    }

    #[test]
    fn test_empty_preferences_treated_as_none() {
        let universities = vec![university("A", "Canada"), university("B", "USA")];
        let result = selector().select_matches(&universities, &create_profile(Some(vec![])), 10);
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_preferred_country_quota_survives_lower_scores() {
        // Canadian universities score above Ireland for this profile
        let mut universities: Vec<UniversityData> = (0..10)
            .map(|i| university(&format!("Canada {}", i), "Canada"))
            .collect();
        universities.extend((0..4).map(|i| university(&format!("Ireland {}", i), "Ireland")));

        let profile = create_profile(Some(vec!["Canada", "Ireland"]));
        let result = selector().select_matches(&universities, &profile, 6);

        assert_eq!(result.matches.len(), 6);
        let irish = result.matches.iter().filter(|m| m.country == "Ireland").count();
        assert_eq!(irish, 3);
    }

    #[test]
    fn test_shortfall_widens_to_other_countries() {
        let universities = vec![
            university("Only Canadian", "Canada"),
            university("German One", "Germany"),
            university("French One", "France"),
        ];

        let profile = create_profile(Some(vec!["Canada"]));
        let result = selector().select_matches(&universities, &profile, 3);

        assert_eq!(result.matches.len(), 3);
        assert!(result.matches.iter().any(|m| m.university_name == "Only Canadian"));
    }

    #[test]
    fn test_no_widening_when_preferences_suffice() {
        let universities = vec![
            university("C1", "Canada"),
            university("C2", "Canada"),
            university("G1", "Germany"),
        ];

        let profile = create_profile(Some(vec!["Canada"]));
        let result = selector().select_matches(&universities, &profile, 2);

        assert_eq!(result.total_candidates, 2);
        assert!(result.matches.iter().all(|m| m.country == "Canada"));
    }

    #[test]
    fn test_unmatched_preference_contributes_nothing() {
        let universities = vec![university("C1", "Canada"), university("G1", "Germany")];
        let profile = create_profile(Some(vec!["Narnia", "Canada"]));

        let result = selector().select_matches(&universities, &profile, 5);
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_zero_top_n() {
        let universities = vec![university("C1", "Canada")];
        let result = selector().select_matches(&universities, &create_profile(Some(vec!["Canada"])), 0);
        assert!(result.matches.is_empty());
    }
}
