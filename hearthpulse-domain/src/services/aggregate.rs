//! Reading aggregation: day grouping, window selection, and summary stats.
//!
//! Everything here is a pure function over its input slice; grouping keys
//! come from each reading's own recorded local time, never from the wall
//! clock or UTC.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::entities::Reading;

/// Readings sharing one local calendar date, with per-day averages
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// The local calendar date shared by the group
    pub date: NaiveDate,

    /// The day's readings in the order they appeared in the input
    pub readings: Vec<Reading>,

    pub avg_systolic: i32,
    pub avg_diastolic: i32,
    pub avg_pulse: i32,
}

/// Summary statistics over a window of readings.
///
/// All-zero for an empty window; callers treat `count == 0` as the distinct
/// "no data" case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub count: usize,
    pub avg_systolic: i32,
    pub avg_diastolic: i32,
    pub avg_pulse: i32,
    pub min_systolic: i32,
    pub max_systolic: i32,
    pub min_diastolic: i32,
    pub max_diastolic: i32,
}

/// Day grouping and window statistics over one window of readings
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Day groups keyed by local calendar date, in date order
    pub by_day: BTreeMap<NaiveDate, DayGroup>,

    /// Statistics over the whole window
    pub window_stats: WindowStats,
}

/// Round to the nearest integer, half away from zero toward positive
/// infinity (JavaScript `Math.round` semantics).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

fn mean_half_up<F: Fn(&Reading) -> i32>(readings: &[Reading], field: F) -> i32 {
    if readings.is_empty() {
        return 0;
    }
    let sum: i64 = readings.iter().map(|r| field(r) as i64).sum();
    round_half_up(sum as f64 / readings.len() as f64)
}

/// Group readings by their local calendar date.
///
/// Every reading lands in exactly one group; within a group the input order
/// is preserved, not re-sorted.
pub fn group_by_day(readings: &[Reading]) -> BTreeMap<NaiveDate, DayGroup> {
    let mut by_day: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();
    for reading in readings {
        let date = reading.local_date();
        by_day
            .entry(date)
            .or_insert_with(|| DayGroup {
                date,
                readings: Vec::new(),
                avg_systolic: 0,
                avg_diastolic: 0,
                avg_pulse: 0,
            })
            .readings
            .push(reading.clone());
    }
    for group in by_day.values_mut() {
        group.avg_systolic = mean_half_up(&group.readings, |r| r.systolic);
        group.avg_diastolic = mean_half_up(&group.readings, |r| r.diastolic);
        group.avg_pulse = mean_half_up(&group.readings, |r| r.pulse);
    }
    by_day
}

/// Compute summary statistics over a window of readings
pub fn window_stats(readings: &[Reading]) -> WindowStats {
    if readings.is_empty() {
        return WindowStats::default();
    }

    let mut min_systolic = i32::MAX;
    let mut max_systolic = i32::MIN;
    let mut min_diastolic = i32::MAX;
    let mut max_diastolic = i32::MIN;
    for reading in readings {
        min_systolic = min_systolic.min(reading.systolic);
        max_systolic = max_systolic.max(reading.systolic);
        min_diastolic = min_diastolic.min(reading.diastolic);
        max_diastolic = max_diastolic.max(reading.diastolic);
    }

    WindowStats {
        count: readings.len(),
        avg_systolic: mean_half_up(readings, |r| r.systolic),
        avg_diastolic: mean_half_up(readings, |r| r.diastolic),
        avg_pulse: mean_half_up(readings, |r| r.pulse),
        min_systolic,
        max_systolic,
        min_diastolic,
        max_diastolic,
    }
}

/// Group a window by day and compute its statistics in one pass
pub fn aggregate(readings: &[Reading]) -> Aggregation {
    Aggregation {
        by_day: group_by_day(readings),
        window_stats: window_stats(readings),
    }
}

/// Sort readings chronologically, oldest first
fn sorted_ascending(readings: &[Reading]) -> Vec<Reading> {
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.instant());
    sorted
}

/// The readings from the last `days` days, anchored at the most recent
/// reading's timestamp rather than the current wall clock: the window is
/// `[latest - days, latest]`, inclusive on both ends. Output is in
/// chronological order.
pub fn last_days_window(readings: &[Reading], days: i64) -> Vec<Reading> {
    let sorted = sorted_ascending(readings);
    let Some(latest) = sorted.last().map(|r| r.instant()) else {
        return Vec::new();
    };
    let start = latest - Duration::days(days);
    sorted
        .into_iter()
        .filter(|r| {
            let t = r.instant();
            t >= start && t <= latest
        })
        .collect()
}

/// The final `count` readings of the chronologically ordered sequence, with
/// no time-based filtering. Fewer are returned if fewer exist.
pub fn last_entries_window(readings: &[Reading], count: usize) -> Vec<Reading> {
    let sorted = sorted_ascending(readings);
    let skip = sorted.len().saturating_sub(count);
    sorted.into_iter().skip(skip).collect()
}
