// Data storage models
mod reading;

pub use reading::{Insight, OcrReading, Profile, Reading, Trend};
