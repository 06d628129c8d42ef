use serde::{Deserialize, Deserializer, Serialize};

/// Highest qualification the student holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Qualification {
    Tenth,
    #[default]
    Twelfth,
    Undergraduate,
    Postgraduate,
}

impl Qualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualification::Tenth => "10th",
            Qualification::Twelfth => "12th",
            Qualification::Undergraduate => "Undergraduate",
            Qualification::Postgraduate => "Postgraduate",
        }
    }
}

impl From<String> for Qualification {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "10th" => Qualification::Tenth,
            "undergraduate" => Qualification::Undergraduate,
            "postgraduate" => Qualification::Postgraduate,
            // Unknown values fall back to the school-leaving level
            _ => Qualification::Twelfth,
        }
    }
}

impl From<Qualification> for String {
    fn from(value: Qualification) -> Self {
        value.as_str().to_string()
    }
}

/// English proficiency test the student declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnglishTest {
    Ielts,
    Toefl,
    Other(String),
}

impl From<String> for EnglishTest {
    fn from(value: String) -> Self {
        match value.trim().to_uppercase().as_str() {
            "IELTS" => EnglishTest::Ielts,
            "TOEFL" => EnglishTest::Toefl,
            _ => EnglishTest::Other(value),
        }
    }
}

impl From<EnglishTest> for String {
    fn from(value: EnglishTest) -> Self {
        match value {
            EnglishTest::Ielts => "IELTS".to_string(),
            EnglishTest::Toefl => "TOEFL".to_string(),
            EnglishTest::Other(name) => name,
        }
    }
}

/// Student profile collected by the counselling conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub name: String,
    pub nationality: String,
    pub qualification: Qualification,
    #[serde(deserialize_with = "lenient_f64")]
    pub marks: f64,
    pub field: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub budget_min: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub budget_max: f64,
    #[serde(deserialize_with = "declared_test")]
    pub english_test: Option<EnglishTest>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub english_score: Option<f64>,
    pub preferred_countries: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_u32")]
    pub gap_years: u32,
}

impl StudentProfile {
    /// Preferred countries, treating an empty list the same as none
    pub fn preferences(&self) -> Option<&[String]> {
        match &self.preferred_countries {
            Some(countries) if !countries.is_empty() => Some(countries.as_slice()),
            _ => None,
        }
    }
}

/// One row of the raw university dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversityData {
    pub name: String,
    pub url: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    pub address: String,
    pub country: String,
    pub city: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Number or numeric string; null and unparseable values are `None`
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Number or numeric string; anything else is 0.0
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

/// Whole non-negative count; fractions truncate, anything else is 0
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// A blank test name means no test was declared
fn declared_test<'de, D>(deserializer: D) -> Result<Option<EnglishTest>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|name| !name.trim().is_empty())
        .map(EnglishTest::from))
}

/// Visa feasibility classification for a destination country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisaFit {
    High,
    Medium,
    Low,
}

/// Per-factor contribution to the overall match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub academic: u32,
    pub financial: u32,
    pub language: u32,
    pub timing: u32,
    pub work_pr: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.academic + self.financial + self.language + self.timing + self.work_pr
    }
}

/// Annual cost estimate in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedCost {
    pub tuition: f64,
    pub living: f64,
    pub total: f64,
}

/// Admission requirements for the selected program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub min_score: String,
    pub documents: Vec<String>,
    pub next_intakes: Vec<String>,
}

/// Scored university/program pairing for one student profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityMatch {
    pub id: String,
    pub university_name: String,
    pub country: String,
    pub city: String,
    pub url: String,
    pub program: String,
    pub degree: String,
    pub match_score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub visa_fit: VisaFit,
    pub estimated_cost: EstimatedCost,
    pub requirements: Requirements,
    pub popular_programs: Vec<String>,
}

impl UniversityMatch {
    /// Composite key used to deduplicate matches
    pub fn dedup_key(&self) -> (String, String) {
        (self.university_name.clone(), self.country.clone())
    }
}
