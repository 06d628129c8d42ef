// Core algorithm exports
pub mod countries;
pub mod enricher;
pub mod profiles;
pub mod scoring;
pub mod selector;
pub mod timing;

pub use countries::{canonical_code, countries_match};
pub use enricher::{match_id, DataEnricher};
pub use profiles::{country_profile, program_profile, CountryProfile, ProgramProfile};
pub use selector::{MatchResult, MatchSelector, DEFAULT_TOP_N};
pub use timing::{next_intakes, FixedTiming, SystemTiming, TimingSource};
