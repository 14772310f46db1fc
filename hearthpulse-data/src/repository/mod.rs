// Repository module structure
pub mod errors;
mod readings;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use readings::{KvReadingRepository, ReadingRepositoryTrait};
pub use readings::{INSIGHT_KEY, PROFILE_KEY, READINGS_KEY};
