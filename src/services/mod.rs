// Service exports
pub mod cache;
pub mod loader;

pub use cache::{CacheError, CacheStats, UniversityCache};
pub use loader::{parse_csv, split_address, LoaderError, UniversityLoader, UniversitySource};
