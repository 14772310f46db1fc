//! Conversions between the data layer's storage models and domain entities.

use hearthpulse_data::models as data;

use super::Reading;

/// Convert a storage reading to a domain reading
pub fn to_domain_reading(reading: data::Reading) -> Reading {
    Reading {
        id: reading.id,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        pulse: reading.pulse,
        timestamp: reading.timestamp,
        note: reading.note,
    }
}

/// Convert a domain reading to its storage shape
pub fn to_data_reading(reading: &Reading) -> data::Reading {
    data::Reading {
        id: reading.id.clone(),
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        pulse: reading.pulse,
        timestamp: reading.timestamp.clone(),
        note: reading.note.clone(),
    }
}
