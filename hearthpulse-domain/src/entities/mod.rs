// Domain entities
pub mod conversions;
mod reading;

pub use reading::{
    Category, CreateReadingRequest, Insight, OcrReading, Profile, Reading, Trend,
};
