// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    EnglishTest, EstimatedCost, Qualification, Requirements, ScoreBreakdown, StudentProfile,
    UniversityData, UniversityMatch, VisaFit,
};
pub use requests::{EnrichRequest, FindMatchesRequest, UniversityPayload};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, RefreshResponse};
