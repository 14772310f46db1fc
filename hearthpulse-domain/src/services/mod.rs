// Services that implement business logic
pub mod aggregate;
pub mod classify;
pub mod insights;
pub mod readings;

pub use aggregate::{aggregate, Aggregation, DayGroup, WindowStats};
pub use classify::classify;
pub use insights::{InsightService, InsightServiceTrait};
pub use readings::{ReadingService, ReadingServiceError, ReadingServiceTrait};
