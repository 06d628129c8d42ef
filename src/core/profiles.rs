use crate::core::countries::canonical_code;
use crate::models::VisaFit;

/// Country-level facts used for scoring
#[derive(Debug, Clone, Copy)]
pub struct CountryProfile {
    pub code: &'static str,
    pub visa_fit: VisaFit,
    pub living_cost: f64,
    pub work_pr_score: u32,
    pub popular_programs: &'static [&'static str],
}

/// Program-level facts used for scoring
#[derive(Debug, Clone, Copy)]
pub struct ProgramProfile {
    pub name: &'static str,
    pub degrees: &'static [&'static str],
    pub avg_tuition: f64,
    pub min_score: &'static str,
    pub documents: &'static [&'static str],
}

/// Fallback for countries without an entry
pub const DEFAULT_COUNTRY: CountryProfile = CountryProfile {
    code: "Default",
    visa_fit: VisaFit::Medium,
    living_cost: 15000.0,
    work_pr_score: 5,
    popular_programs: &["Business", "Engineering", "Computer Science"],
};

/// Fallback for fields of study without an entry
pub const DEFAULT_PROGRAM: ProgramProfile = ProgramProfile {
    name: "General Studies",
    degrees: &["Bachelor's Degree", "Master's Degree", "PhD"],
    avg_tuition: 25000.0,
    min_score: "60% in previous qualification",
    documents: &[
        "Academic transcripts",
        "Statement of purpose",
        "Letters of recommendation",
        "Passport copy",
    ],
};

const COUNTRY_PROFILES: &[CountryProfile] = &[
    CountryProfile {
        code: "US",
        visa_fit: VisaFit::Medium,
        living_cost: 18000.0,
        work_pr_score: 10,
        popular_programs: &["Computer Science", "Business", "Engineering", "Data Science"],
    },
    CountryProfile {
        code: "CA",
        visa_fit: VisaFit::High,
        living_cost: 15000.0,
        work_pr_score: 9,
        popular_programs: &["Computer Science", "Engineering", "Business", "Healthcare"],
    },
    CountryProfile {
        code: "GB",
        visa_fit: VisaFit::Medium,
        living_cost: 16000.0,
        work_pr_score: 7,
        popular_programs: &["Business", "Law", "Medicine", "Arts"],
    },
    CountryProfile {
        code: "AU",
        visa_fit: VisaFit::High,
        living_cost: 20000.0,
        work_pr_score: 9,
        popular_programs: &["Engineering", "Business", "Medicine", "Computer Science"],
    },
    CountryProfile {
        code: "DE",
        visa_fit: VisaFit::High,
        living_cost: 11000.0,
        work_pr_score: 8,
        popular_programs: &["Engineering", "Computer Science", "Physics"],
    },
    CountryProfile {
        code: "IE",
        visa_fit: VisaFit::High,
        living_cost: 14000.0,
        work_pr_score: 8,
        popular_programs: &["Computer Science", "Data Science", "Business"],
    },
    CountryProfile {
        code: "NZ",
        visa_fit: VisaFit::High,
        living_cost: 15000.0,
        work_pr_score: 8,
        popular_programs: &["Agriculture", "Engineering", "Business"],
    },
    CountryProfile {
        code: "NL",
        visa_fit: VisaFit::Medium,
        living_cost: 14000.0,
        work_pr_score: 7,
        popular_programs: &["Business", "Engineering", "Data Science"],
    },
    CountryProfile {
        code: "FR",
        visa_fit: VisaFit::Medium,
        living_cost: 13000.0,
        work_pr_score: 6,
        popular_programs: &["Business", "Arts", "Engineering"],
    },
    CountryProfile {
        code: "SG",
        visa_fit: VisaFit::Medium,
        living_cost: 17000.0,
        work_pr_score: 6,
        popular_programs: &["Business", "Computer Science", "Engineering"],
    },
];

const PROGRAM_PROFILES: &[ProgramProfile] = &[
    ProgramProfile {
        name: "Computer Science",
        degrees: &["BSc Computer Science", "MSc Computer Science", "PhD Computer Science"],
        avg_tuition: 35000.0,
        min_score: "70% in Mathematics and overall",
        documents: &[
            "Academic transcripts",
            "Statement of purpose",
            "Letters of recommendation",
            "Resume/CV",
            "English proficiency score",
        ],
    },
    ProgramProfile {
        name: "Data Science",
        degrees: &["BSc Data Science", "MSc Data Science", "PhD Data Science"],
        avg_tuition: 33000.0,
        min_score: "70% with Statistics or Mathematics",
        documents: &[
            "Academic transcripts",
            "Statement of purpose",
            "Letters of recommendation",
            "English proficiency score",
        ],
    },
    ProgramProfile {
        name: "Engineering",
        degrees: &["BEng", "MEng", "PhD Engineering"],
        avg_tuition: 32000.0,
        min_score: "65% in Physics, Chemistry and Mathematics",
        documents: &[
            "Academic transcripts",
            "Statement of purpose",
            "Letters of recommendation",
            "English proficiency score",
        ],
    },
    ProgramProfile {
        name: "Business",
        degrees: &["BBA", "Master of Business Administration", "PhD Management"],
        avg_tuition: 30000.0,
        min_score: "60% overall",
        documents: &[
            "Academic transcripts",
            "Statement of purpose",
            "Resume/CV",
            "GMAT/GRE score",
            "English proficiency score",
        ],
    },
    ProgramProfile {
        name: "Medicine",
        degrees: &["MBBS", "MD", "PhD Medical Sciences"],
        avg_tuition: 55000.0,
        min_score: "85% in Biology, Chemistry and Physics",
        documents: &[
            "Academic transcripts",
            "Personal statement",
            "Letters of recommendation",
            "Entrance exam score",
            "Medical fitness certificate",
        ],
    },
    ProgramProfile {
        name: "Law",
        degrees: &["LLB", "LLM", "PhD Law"],
        avg_tuition: 38000.0,
        min_score: "70% overall",
        documents: &[
            "Academic transcripts",
            "Personal statement",
            "Writing sample",
            "English proficiency score",
        ],
    },
    ProgramProfile {
        name: "Arts",
        degrees: &["BA", "MA", "PhD Humanities"],
        avg_tuition: 22000.0,
        min_score: "55% overall",
        documents: &["Academic transcripts", "Portfolio", "Statement of purpose"],
    },
];

/// Look up the country profile for a free-text country name
pub fn country_profile(country: &str) -> &'static CountryProfile {
    canonical_code(country)
        .and_then(|code| COUNTRY_PROFILES.iter().find(|p| p.code == code))
        .unwrap_or(&DEFAULT_COUNTRY)
}

/// Look up the program profile for a field of study
///
/// Matches when the field contains a program name (case-insensitive);
/// the first table entry wins.
pub fn program_profile(field: &str) -> &'static ProgramProfile {
    let field = field.trim().to_lowercase();
    if field.is_empty() {
        return &DEFAULT_PROGRAM;
    }

    PROGRAM_PROFILES
        .iter()
        .find(|p| field.contains(&p.name.to_lowercase()))
        .unwrap_or(&DEFAULT_PROGRAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup() {
        let usa = country_profile("United States");
        assert_eq!(usa.code, "US");
        assert_eq!(usa.work_pr_score, 10);
        assert_eq!(usa.living_cost, 18000.0);

        let canada = country_profile("canada");
        assert_eq!(canada.visa_fit, VisaFit::High);
    }

    #[test]
    fn test_country_fallback() {
        let unknown = country_profile("Atlantis");
        assert_eq!(unknown.code, "Default");
        assert_eq!(unknown.visa_fit, VisaFit::Medium);
        assert_eq!(unknown.work_pr_score, 5);
    }

    #[test]
    fn test_program_lookup_case_insensitive() {
        assert_eq!(program_profile("computer science").name, "Computer Science");
        assert_eq!(program_profile("MSc Computer Science and AI").name, "Computer Science");
        assert_eq!(program_profile("Mechanical Engineering").name, "Engineering");
    }

    #[test]
    fn test_program_fallback() {
        assert_eq!(program_profile("Underwater Basket Weaving").name, DEFAULT_PROGRAM.name);
        assert_eq!(program_profile("   ").avg_tuition, 25000.0);
    }
}
