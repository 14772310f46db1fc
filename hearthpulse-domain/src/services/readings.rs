use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use hearthpulse_data::repository::{ReadingRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::{CreateReadingRequest, Profile, Reading};

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for ReadingServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ReadingServiceError::NotFound(msg),
            _ => ReadingServiceError::Repository(err.to_string()),
        }
    }
}

/// Trait for reading and profile operations
#[async_trait]
pub trait ReadingServiceTrait: Send + Sync {
    /// Create a new reading. Any mutation of the reading set discards the
    /// stored insight, so insights never reflect a different reading set
    /// than the one that generated them.
    async fn add_reading(&self, request: CreateReadingRequest)
        -> Result<Reading, ReadingServiceError>;

    /// Delete a reading by id. Also discards the stored insight.
    async fn delete_reading(&self, id: &str) -> Result<(), ReadingServiceError>;

    /// All readings, newest first
    async fn list_readings(&self) -> Result<Vec<Reading>, ReadingServiceError>;

    /// Fetch one reading by id
    async fn get_reading(&self, id: &str) -> Result<Reading, ReadingServiceError>;

    /// The current user profile
    async fn get_profile(&self) -> Result<Profile, ReadingServiceError>;

    /// Replace the user profile wholesale
    async fn update_profile(&self, profile: Profile) -> Result<(), ReadingServiceError>;
}

/// Reading service over a repository
pub struct ReadingService<R: ReadingRepositoryTrait> {
    repository: R,
}

impl<R: ReadingRepositoryTrait> ReadingService<R> {
    /// Create a new reading service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn load_sorted(&self) -> Result<Vec<Reading>, ReadingServiceError> {
        let mut readings: Vec<Reading> = self
            .repository
            .load_readings()
            .await?
            .into_iter()
            .map(conversions::to_domain_reading)
            .collect();
        // Newest first, matching the display order the app uses everywhere
        readings.sort_by_key(|r| std::cmp::Reverse(r.instant()));
        Ok(readings)
    }

    async fn save_all(&self, readings: &[Reading]) -> Result<(), ReadingServiceError> {
        let data: Vec<_> = readings.iter().map(conversions::to_data_reading).collect();
        self.repository.save_readings(&data).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: ReadingRepositoryTrait> ReadingServiceTrait for ReadingService<R> {
    async fn add_reading(
        &self,
        request: CreateReadingRequest,
    ) -> Result<Reading, ReadingServiceError> {
        request
            .validate()
            .map_err(|e| ReadingServiceError::Validation(e.to_string()))?;

        let reading = Reading {
            id: Uuid::new_v4().to_string(),
            systolic: request.systolic,
            diastolic: request.diastolic,
            pulse: request.pulse,
            timestamp: request.timestamp.unwrap_or_else(|| Utc::now().to_rfc3339()),
            note: request.note,
        };

        let mut readings = self.load_sorted().await?;
        readings.push(reading.clone());
        readings.sort_by_key(|r| std::cmp::Reverse(r.instant()));
        self.save_all(&readings).await?;

        // Stale insight must not outlive a change to the reading set
        self.repository.clear_insight().await?;

        info!("Created reading {}", reading.id);
        Ok(reading)
    }

    async fn delete_reading(&self, id: &str) -> Result<(), ReadingServiceError> {
        let readings = self.load_sorted().await?;
        if !readings.iter().any(|r| r.id == id) {
            return Err(ReadingServiceError::NotFound(format!(
                "Reading with ID {} not found",
                id
            )));
        }
        let remaining: Vec<Reading> = readings.into_iter().filter(|r| r.id != id).collect();

        self.save_all(&remaining).await?;
        self.repository.clear_insight().await?;

        info!("Deleted reading {}", id);
        Ok(())
    }

    async fn list_readings(&self) -> Result<Vec<Reading>, ReadingServiceError> {
        self.load_sorted().await
    }

    async fn get_reading(&self, id: &str) -> Result<Reading, ReadingServiceError> {
        self.load_sorted()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| {
                ReadingServiceError::NotFound(format!("Reading with ID {} not found", id))
            })
    }

    async fn get_profile(&self) -> Result<Profile, ReadingServiceError> {
        Ok(self.repository.load_profile().await?)
    }

    async fn update_profile(&self, profile: Profile) -> Result<(), ReadingServiceError> {
        self.repository.save_profile(&profile).await?;
        Ok(())
    }
}
