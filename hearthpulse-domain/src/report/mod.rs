//! Paginated report layout.
//!
//! The renderers produce a backend-neutral [`Document`]: an ordered sequence
//! of fixed-size pages holding positioned draw elements. Coordinates are
//! millimetres on an A4 portrait page with the origin at the top-left and y
//! growing downward; a PDF backend flips the axis as needed.

mod standardized;
mod summary;

pub use standardized::render_standardized_log;
pub use summary::render_summary;

use chrono::NaiveDate;
use thiserror::Error;

/// Page width in millimetres (A4 portrait)
pub const PAGE_WIDTH: f64 = 210.0;

/// Page height in millimetres (A4 portrait)
pub const PAGE_HEIGHT: f64 = 297.0;

/// Left margin / left text edge
pub const MARGIN_LEFT: f64 = 20.0;

/// Right text edge
pub const MARGIN_RIGHT: f64 = 190.0;

/// First content baseline on a page
pub const CONTENT_TOP: f64 = 20.0;

/// Blocks may not be placed below this cursor position
pub const CONTENT_BOTTOM: f64 = 270.0;

/// Footer baseline, below the printable area
pub const FOOTER_Y: f64 = 285.0;

/// Fixed disclaimer stamped on every page
pub const DISCLAIMER: &str =
    "This report is for informational purposes only. Consult your healthcare provider for medical advice.";

/// Font style for a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// One positioned drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Text placed with its baseline at (x, y)
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        text: String,
    },

    /// Straight line segment
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },

    /// Rectangle outline with its top-left corner at (x, y)
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

/// One fixed-size page of positioned elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn text(&mut self, x: f64, y: f64, size: f64, style: FontStyle, text: impl Into<String>) {
        self.elements.push(Element::Text { x, y, size, style, text: text.into() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.elements.push(Element::Line { x1, y1, x2, y2 });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.elements.push(Element::Rect { x, y, width, height });
    }
}

/// A rendered document: ordered pages plus the suggested export filename
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
    pub filename: String,
}

/// Report rendering errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The input window was empty: there is nothing to render, and a blank
    /// document must not be produced in its place.
    #[error("No readings available to export")]
    NoReadings,
}

/// Short date used in headers and filenames, `/` already replaced by `-`
fn short_date(date: NaiveDate) -> String {
    date.format("%m-%d-%Y").to_string()
}

/// Filename for the summary report: `BP_Report_<start>_to_<end>.pdf`
pub fn summary_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("BP_Report_{}_to_{}.pdf", short_date(start), short_date(end))
}

/// Filename for the standardized log sheet: `AHA_BP_Log_<iso-date>.pdf`
pub fn standardized_filename(generated: NaiveDate) -> String {
    format!("AHA_BP_Log_{}.pdf", generated.format("%Y-%m-%d"))
}

/// Fixed cell text for a reading: three dash-joined fields, never localized
pub(crate) fn reading_cell(systolic: i32, diastolic: i32, pulse: i32) -> String {
    format!("{} - {} - {}", systolic, diastolic, pulse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_filename_uses_dashed_short_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            summary_filename(start, end),
            "BP_Report_01-08-2024_to_01-15-2024.pdf"
        );
    }

    #[test]
    fn standardized_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(standardized_filename(date), "AHA_BP_Log_2024-03-09.pdf");
    }

    #[test]
    fn cell_format_is_fixed() {
        assert_eq!(reading_cell(120, 80, 70), "120 - 80 - 70");
        assert_eq!(reading_cell(-5, 0, 300), "-5 - 0 - 300");
    }
}
