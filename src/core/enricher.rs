use std::sync::Arc;

use uuid::Uuid;

use crate::core::{
    profiles::{country_profile, program_profile},
    scoring::{academic_score, financial_score, language_score, select_degree},
    timing::{next_intakes, SystemTiming, TimingSource},
};
use crate::models::{
    EstimatedCost, Requirements, ScoreBreakdown, StudentProfile, UniversityData, UniversityMatch,
};

/// Turns one university record into a scored match for a student profile
///
/// Enrichment never fails: unknown countries, programs and tests resolve to
/// default profiles. The only inputs besides the record and the profile come
/// from the [`TimingSource`].
#[derive(Clone)]
pub struct DataEnricher {
    timing: Arc<dyn TimingSource>,
}

impl DataEnricher {
    pub fn new(timing: Arc<dyn TimingSource>) -> Self {
        Self { timing }
    }

    pub fn with_system_timing() -> Self {
        Self::new(Arc::new(SystemTiming))
    }

    /// Score a single university for the given profile
    pub fn enrich(&self, university: &UniversityData, profile: &StudentProfile) -> UniversityMatch {
        let country = country_profile(&university.country);
        let program = program_profile(&profile.field);

        let tuition = program.avg_tuition;
        let living = country.living_cost;
        let total = tuition + living;

        let breakdown = ScoreBreakdown {
            academic: academic_score(profile),
            financial: financial_score(total, profile.budget_min, profile.budget_max),
            language: language_score(profile.english_test.as_ref(), profile.english_score),
            timing: self.timing.intake_score(),
            work_pr: country.work_pr_score,
        };

        UniversityMatch {
            id: match_id(&university.name, &university.country, program.name),
            university_name: university.name.clone(),
            country: university.country.clone(),
            city: university.city.clone(),
            url: university.url.clone(),
            program: program.name.to_string(),
            degree: select_degree(profile.qualification, program.degrees),
            match_score: breakdown.total().min(100),
            score_breakdown: breakdown,
            visa_fit: country.visa_fit,
            estimated_cost: EstimatedCost {
                tuition,
                living,
                total,
            },
            requirements: Requirements {
                min_score: program.min_score.to_string(),
                documents: program.documents.iter().map(|d| d.to_string()).collect(),
                next_intakes: next_intakes(self.timing.now()),
            },
            popular_programs: country
                .popular_programs
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Default for DataEnricher {
    fn default() -> Self {
        Self::with_system_timing()
    }
}

impl std::fmt::Debug for DataEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataEnricher").finish_non_exhaustive()
    }
}

/// Stable match id derived from university, country and program
pub fn match_id(university: &str, country: &str, program: &str) -> String {
    let key = format!("{}|{}|{}", university, country, program);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}
