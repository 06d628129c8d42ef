use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{StudentProfile, UniversityData};

/// Request to find university matches for a student profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(default)]
    pub profile: StudentProfile,
    /// Upper bound is `matching.max_top_n`, checked by the handler
    #[validate(range(min = 1))]
    #[serde(alias = "top_n", rename = "topN")]
    pub top_n: Option<u16>,
}

/// Request to score a single university against a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnrichRequest {
    #[validate(nested)]
    pub university: UniversityPayload,
    #[serde(default)]
    pub profile: StudentProfile,
}

/// University record as sent by the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UniversityPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
}

impl From<UniversityPayload> for UniversityData {
    fn from(value: UniversityPayload) -> Self {
        UniversityData {
            name: value.name,
            url: value.url,
            latitude: value.latitude,
            longitude: value.longitude,
            address: value.address,
            country: value.country,
            city: value.city,
        }
    }
}
