use async_trait::async_trait;
use tracing::info;

use hearthpulse_data::ai::InsightClient;
use hearthpulse_data::repository::ReadingRepositoryTrait;

use crate::entities::{Insight, OcrReading};

use super::readings::ReadingServiceError;

/// Trait for insight generation and retrieval
#[async_trait]
pub trait InsightServiceTrait: Send + Sync {
    /// The stored insight, if one is current for the reading set
    async fn current(&self) -> Result<Option<Insight>, ReadingServiceError>;

    /// Generate a fresh insight from the full reading log and profile,
    /// persist it, and return it. The AI client degrades to fallback
    /// payloads internally, so this only fails on storage errors.
    async fn generate(&self) -> Result<Insight, ReadingServiceError>;

    /// Discard the stored insight
    async fn clear(&self) -> Result<(), ReadingServiceError>;

    /// Extract reading values from a base64-encoded device photo
    async fn scan_device_image(&self, image_base64: &str) -> Option<OcrReading>;
}

/// Insight service over a repository and an AI client
pub struct InsightService<R: ReadingRepositoryTrait, C: InsightClient> {
    repository: R,
    client: C,
}

impl<R: ReadingRepositoryTrait, C: InsightClient> InsightService<R, C> {
    /// Create a new insight service
    pub fn new(repository: R, client: C) -> Self {
        Self { repository, client }
    }
}

#[async_trait]
impl<R: ReadingRepositoryTrait, C: InsightClient> InsightServiceTrait for InsightService<R, C> {
    async fn current(&self) -> Result<Option<Insight>, ReadingServiceError> {
        Ok(self.repository.load_insight().await?)
    }

    async fn generate(&self) -> Result<Insight, ReadingServiceError> {
        let readings = self.repository.load_readings().await?;
        let profile = self.repository.load_profile().await?;

        info!("Requesting insight over {} readings", readings.len());
        let insight = self.client.request_insights(&readings, &profile).await;

        self.repository.save_insight(&insight).await?;
        Ok(insight)
    }

    async fn clear(&self) -> Result<(), ReadingServiceError> {
        self.repository.clear_insight().await?;
        Ok(())
    }

    async fn scan_device_image(&self, image_base64: &str) -> Option<OcrReading> {
        self.client.request_ocr_extraction(image_base64).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthpulse_data::ai::MockInsightClient;
    use hearthpulse_data::models::{Reading, Trend};
    use hearthpulse_data::repository::KvReadingRepository;
    use hearthpulse_data::store::InMemoryKvStore;

    fn service() -> InsightService<KvReadingRepository<InMemoryKvStore>, MockInsightClient> {
        InsightService::new(
            KvReadingRepository::new(InMemoryKvStore::new()),
            MockInsightClient,
        )
    }

    #[tokio::test]
    async fn current_is_none_before_generation() {
        assert!(service().current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn generate_persists_the_insight() {
        let service = service();
        service
            .repository
            .save_readings(&[Reading {
                id: "a".to_string(),
                systolic: 120,
                diastolic: 80,
                pulse: 70,
                timestamp: "2024-01-01T08:00:00Z".to_string(),
                note: None,
            }])
            .await
            .unwrap();

        let insight = service.generate().await.unwrap();
        assert_eq!(insight.trend, Trend::Stable);
        assert_eq!(service.current().await.unwrap(), Some(insight));
    }

    #[tokio::test]
    async fn clear_discards_the_insight() {
        let service = service();
        service.generate().await.unwrap();
        service.clear().await.unwrap();
        assert!(service.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_passes_through_to_the_client() {
        let values = service().scan_device_image("data:image/jpeg;base64,abc").await;
        assert_eq!(values.unwrap().systolic, 120);
    }
}
