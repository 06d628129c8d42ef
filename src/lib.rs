//! UniCounsel matching service
//!
//! Scores a prospective student's profile against a university dataset and
//! selects a ranked, country-diversified slate of matches.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DataEnricher, MatchResult, MatchSelector, TimingSource, DEFAULT_TOP_N};
pub use crate::models::{StudentProfile, UniversityData, UniversityMatch, FindMatchesRequest, FindMatchesResponse};

/// Score one university for a profile using the wall clock
pub fn enrich(university: &UniversityData, profile: &StudentProfile) -> UniversityMatch {
    DataEnricher::with_system_timing().enrich(university, profile)
}

/// Select up to `top_n` matches for a profile using the wall clock
pub fn select_matches(
    universities: &[UniversityData],
    profile: &StudentProfile,
    top_n: usize,
) -> Vec<UniversityMatch> {
    MatchSelector::default()
        .select_matches(universities, profile, top_n)
        .matches
}
