// API module structure
pub mod handlers;
mod routes;

pub use routes::create_application;

use std::sync::Arc;

use hearthpulse_data::ai::GeminiClient;
use hearthpulse_data::repository::KvReadingRepository;
use hearthpulse_data::store::SqliteKvStore;
use hearthpulse_domain::services::{
    InsightService, InsightServiceTrait, ReadingService, ReadingServiceTrait,
};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<dyn ReadingServiceTrait>,
    pub insights: Arc<dyn InsightServiceTrait>,
}

impl AppState {
    /// Build the production state over a SQLite store and the Gemini client
    pub fn new(store: SqliteKvStore) -> Self {
        let repository = KvReadingRepository::new(store);
        Self {
            readings: Arc::new(ReadingService::new(repository.clone())),
            insights: Arc::new(InsightService::new(repository, GeminiClient::from_env())),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl AppState {
    /// State over in-memory storage and the canned AI client, for tests
    pub fn in_memory() -> Self {
        use hearthpulse_data::ai::MockInsightClient;
        use hearthpulse_data::store::InMemoryKvStore;

        let repository = KvReadingRepository::new(InMemoryKvStore::new());
        Self {
            readings: Arc::new(ReadingService::new(repository.clone())),
            insights: Arc::new(InsightService::new(repository, MockInsightClient)),
        }
    }
}
