use async_trait::async_trait;
use tracing::debug;

use crate::models::{Insight, Profile, Reading};
use crate::store::KvStore;

use super::errors::RepositoryError;

/// Key under which the reading collection is stored
pub const READINGS_KEY: &str = "bp_logs";

/// Key under which the user profile is stored
pub const PROFILE_KEY: &str = "user_profile";

/// Key under which the current insight report is stored
pub const INSIGHT_KEY: &str = "bp_insights";

/// Trait for persistence operations over the reading collection, the user
/// profile, and the cached insight report.
///
/// All operations use whole-collection read/replace semantics: there is no
/// partial update and no transaction surface.
#[async_trait]
pub trait ReadingRepositoryTrait: Send + Sync {
    /// Load the full reading collection; an absent key loads as empty
    async fn load_readings(&self) -> Result<Vec<Reading>, RepositoryError>;

    /// Replace the full reading collection
    async fn save_readings(&self, readings: &[Reading]) -> Result<(), RepositoryError>;

    /// Load the user profile; an absent key loads as the default profile
    async fn load_profile(&self) -> Result<Profile, RepositoryError>;

    /// Replace the user profile
    async fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError>;

    /// Load the stored insight report, if one exists
    async fn load_insight(&self) -> Result<Option<Insight>, RepositoryError>;

    /// Replace the stored insight report
    async fn save_insight(&self, insight: &Insight) -> Result<(), RepositoryError>;

    /// Discard the stored insight report
    async fn clear_insight(&self) -> Result<(), RepositoryError>;
}

/// Repository backed by a [`KvStore`], serializing each collection as one
/// JSON document under a fixed key.
#[derive(Clone)]
pub struct KvReadingRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvReadingRepository<S> {
    /// Create a new repository over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KvStore> ReadingRepositoryTrait for KvReadingRepository<S> {
    async fn load_readings(&self) -> Result<Vec<Reading>, RepositoryError> {
        match self.store.get(READINGS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_readings(&self, readings: &[Reading]) -> Result<(), RepositoryError> {
        debug!("Saving {} readings", readings.len());
        let json = serde_json::to_string(readings)?;
        self.store.put(READINGS_KEY, &json)?;
        Ok(())
    }

    async fn load_profile(&self) -> Result<Profile, RepositoryError> {
        match self.store.get(PROFILE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Profile::default()),
        }
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(profile)?;
        self.store.put(PROFILE_KEY, &json)?;
        Ok(())
    }

    async fn load_insight(&self) -> Result<Option<Insight>, RepositoryError> {
        match self.store.get(INSIGHT_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save_insight(&self, insight: &Insight) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(insight)?;
        self.store.put(INSIGHT_KEY, &json)?;
        Ok(())
    }

    async fn clear_insight(&self) -> Result<(), RepositoryError> {
        debug!("Clearing stored insight");
        self.store.remove(INSIGHT_KEY)?;
        Ok(())
    }
}
