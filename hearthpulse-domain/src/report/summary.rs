//! Summary report layout: a chronological, day-grouped list of readings with
//! summary statistics, paginated with a running vertical cursor.

use chrono::NaiveDateTime;

use crate::entities::Reading;
use crate::services::aggregate::{aggregate, DayGroup};
use crate::services::classify::classify;

use super::{
    summary_filename, Document, FontStyle, Page, ReportError, CONTENT_BOTTOM, CONTENT_TOP,
    DISCLAIMER, FOOTER_Y, MARGIN_LEFT, MARGIN_RIGHT,
};

const ROW_HEIGHT: f64 = 7.0;
const NOTE_HEIGHT: f64 = 6.0;
const DAY_HEADER_HEIGHT: f64 = 7.0;
const DAY_HEADER_GAP: f64 = 3.0;

struct Cursor {
    pages: Vec<Page>,
    y: f64,
}

impl Cursor {
    fn new() -> Self {
        Self { pages: vec![Page::default()], y: CONTENT_TOP }
    }

    fn page(&mut self) -> &mut Page {
        self.pages.last_mut().expect("at least one page")
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = CONTENT_TOP;
    }

    /// Whether a block of `height` mm still fits above the printable limit
    fn fits(&self, height: f64) -> bool {
        self.y + height <= CONTENT_BOTTOM
    }
}

fn day_header(cursor: &mut Cursor, group: &DayGroup, continued: bool) {
    if cursor.y > CONTENT_TOP {
        cursor.y += DAY_HEADER_GAP;
    }
    let date = group.date.format("%B %d, %Y");
    let text = if continued {
        format!("{} (continued)", date)
    } else {
        format!(
            "{} ({} readings, avg {}/{} mmHg, pulse {})",
            date,
            group.readings.len(),
            group.avg_systolic,
            group.avg_diastolic,
            group.avg_pulse
        )
    };
    let y = cursor.y;
    cursor.page().text(MARGIN_LEFT, y, 10.0, FontStyle::Bold, text);
    cursor.y += DAY_HEADER_HEIGHT;
}

fn reading_row(cursor: &mut Cursor, reading: &Reading) {
    let y = cursor.y;
    let time = reading.local_datetime().format("%H:%M").to_string();
    let category = classify(reading.systolic, reading.diastolic).to_string();
    let page = cursor.page();
    page.text(MARGIN_LEFT, y, 9.0, FontStyle::Regular, time);
    page.text(70.0, y, 9.0, FontStyle::Regular, reading.systolic.to_string());
    page.text(95.0, y, 9.0, FontStyle::Regular, reading.diastolic.to_string());
    page.text(120.0, y, 9.0, FontStyle::Regular, reading.pulse.to_string());
    page.text(140.0, y, 9.0, FontStyle::Regular, category);
    cursor.y += ROW_HEIGHT;

    if let Some(note) = &reading.note {
        let note_y = cursor.y - 2.0;
        cursor
            .page()
            .text(25.0, note_y, 8.0, FontStyle::Italic, format!("Note: {}", note));
        cursor.y += NOTE_HEIGHT;
    }
}

fn column_headers(cursor: &mut Cursor) {
    let y = cursor.y;
    let page = cursor.page();
    page.text(MARGIN_LEFT, y, 9.0, FontStyle::Bold, "Time");
    page.text(70.0, y, 9.0, FontStyle::Bold, "Systolic");
    page.text(95.0, y, 9.0, FontStyle::Bold, "Diastolic");
    page.text(120.0, y, 9.0, FontStyle::Bold, "Pulse");
    page.text(140.0, y, 9.0, FontStyle::Bold, "Category");
    page.line(MARGIN_LEFT, y + 2.0, MARGIN_RIGHT, y + 2.0);
    cursor.y += 8.0;
}

/// Render the summary layout over a chronologically ordered window of
/// readings. `generated_at` is the caller's clock so the renderer itself
/// stays a pure function of its inputs.
pub fn render_summary(
    window: &[Reading],
    generated_at: NaiveDateTime,
) -> Result<Document, ReportError> {
    if window.is_empty() {
        return Err(ReportError::NoReadings);
    }

    let agg = aggregate(window);
    // BTreeMap keys are in date order, so first/last give the period bounds
    let start = *agg.by_day.keys().next().expect("non-empty window");
    let end = *agg.by_day.keys().next_back().expect("non-empty window");
    let stats = agg.window_stats;

    let mut cursor = Cursor::new();

    // Document header
    {
        let page = cursor.page();
        page.text(MARGIN_LEFT, 20.0, 22.0, FontStyle::Bold, "HearthPulse");
        page.text(MARGIN_LEFT, 30.0, 16.0, FontStyle::Bold, "Blood Pressure Report");
        page.text(
            MARGIN_LEFT,
            40.0,
            10.0,
            FontStyle::Regular,
            format!(
                "Report Period: {} - {}",
                start.format("%m/%d/%Y"),
                end.format("%m/%d/%Y")
            ),
        );
        page.text(
            MARGIN_LEFT,
            45.0,
            10.0,
            FontStyle::Regular,
            format!("Generated: {}", generated_at.format("%m/%d/%Y at %H:%M")),
        );

        page.text(MARGIN_LEFT, 55.0, 12.0, FontStyle::Bold, "Summary Statistics");
        page.text(
            MARGIN_LEFT,
            62.0,
            10.0,
            FontStyle::Regular,
            format!("Total Readings: {}", stats.count),
        );
        page.text(
            MARGIN_LEFT,
            68.0,
            10.0,
            FontStyle::Regular,
            format!("Average: {}/{} mmHg", stats.avg_systolic, stats.avg_diastolic),
        );
        page.text(
            MARGIN_LEFT,
            74.0,
            10.0,
            FontStyle::Regular,
            format!("Average Pulse: {} bpm", stats.avg_pulse),
        );
        page.text(
            MARGIN_LEFT,
            80.0,
            10.0,
            FontStyle::Regular,
            format!("Systolic Range: {} - {} mmHg", stats.min_systolic, stats.max_systolic),
        );
        page.text(
            MARGIN_LEFT,
            86.0,
            10.0,
            FontStyle::Regular,
            format!("Diastolic Range: {} - {} mmHg", stats.min_diastolic, stats.max_diastolic),
        );

        page.text(MARGIN_LEFT, 100.0, 12.0, FontStyle::Bold, "Detailed Readings");
    }
    cursor.y = 110.0;
    column_headers(&mut cursor);

    for group in agg.by_day.values() {
        // A day header with no room for a single row under it is useless
        if !cursor.fits(DAY_HEADER_GAP + DAY_HEADER_HEIGHT + ROW_HEIGHT) {
            cursor.new_page();
        }
        day_header(&mut cursor, group, false);

        for reading in &group.readings {
            let needed = if reading.note.is_some() {
                ROW_HEIGHT + NOTE_HEIGHT
            } else {
                ROW_HEIGHT
            };
            if !cursor.fits(needed) {
                cursor.new_page();
                // A break inside a day group restates the day as a continuation
                day_header(&mut cursor, group, true);
            }
            reading_row(&mut cursor, reading);
        }
    }

    // Finalization pass: the page count is only known once layout is done
    let total = cursor.pages.len();
    for (index, page) in cursor.pages.iter_mut().enumerate() {
        page.text(MARGIN_LEFT, FOOTER_Y, 8.0, FontStyle::Italic, DISCLAIMER);
        page.text(
            180.0,
            FOOTER_Y,
            8.0,
            FontStyle::Italic,
            format!("Page {} of {}", index + 1, total),
        );
    }

    Ok(Document {
        pages: cursor.pages,
        filename: summary_filename(start, end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Element;
    use chrono::NaiveDate;

    fn reading(timestamp: &str, systolic: i32, note: Option<&str>) -> Reading {
        Reading {
            id: timestamp.to_string(),
            systolic,
            diastolic: 80,
            pulse: 70,
            timestamp: timestamp.to_string(),
            note: note.map(str::to_string),
        }
    }

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn texts(page: &Page) -> Vec<&str> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_window_is_a_distinct_outcome() {
        assert_eq!(render_summary(&[], generated()), Err(ReportError::NoReadings));
    }

    #[test]
    fn single_reading_fits_one_page() {
        let window = vec![reading("2024-01-15T08:00:00Z", 120, None)];
        let doc = render_summary(&window, generated()).unwrap();
        assert_eq!(doc.pages.len(), 1);

        let texts = texts(&doc.pages[0]);
        assert!(texts.contains(&"HearthPulse"));
        assert!(texts.contains(&"Blood Pressure Report"));
        assert!(texts.contains(&"Total Readings: 1"));
        assert!(texts.contains(&"Elevated"));
        assert!(texts.contains(&"Page 1 of 1"));
        assert!(texts.iter().any(|t| t.starts_with("Report Period: 01/15/2024")));
    }

    #[test]
    fn filename_covers_the_window_date_range() {
        let window = vec![
            reading("2024-01-08T08:00:00Z", 120, None),
            reading("2024-01-15T08:00:00Z", 125, None),
        ];
        let doc = render_summary(&window, generated()).unwrap();
        assert_eq!(doc.filename, "BP_Report_01-08-2024_to_01-15-2024.pdf");
    }

    #[test]
    fn notes_render_as_italic_rows() {
        let window = vec![reading("2024-01-15T08:00:00Z", 120, Some("after run"))];
        let doc = render_summary(&window, generated()).unwrap();
        assert!(texts(&doc.pages[0]).contains(&"Note: after run"));
    }

    #[test]
    fn long_day_spills_with_a_continuation_header() {
        let window: Vec<Reading> = (0..60)
            .map(|i| {
                reading(
                    &format!("2024-01-15T{:02}:{:02}:00Z", i / 4, (i % 4) * 15),
                    120,
                    None,
                )
            })
            .collect();
        let doc = render_summary(&window, generated()).unwrap();
        assert!(doc.pages.len() > 1);

        let continued = doc
            .pages
            .iter()
            .skip(1)
            .all(|p| texts(p).iter().any(|t| t.ends_with("(continued)")));
        assert!(continued);

        // Every reading row made it into the document
        let rows: usize = doc
            .pages
            .iter()
            .map(|p| texts(p).iter().filter(|t| t.len() == 5 && t.as_bytes()[2] == b':').count())
            .sum();
        assert_eq!(rows, 60);
    }

    #[test]
    fn every_page_carries_footer_and_page_marker() {
        let window: Vec<Reading> = (0..80)
            .map(|i| reading(&format!("2024-01-{:02}T08:{:02}:00Z", 1 + i / 8, i % 8), 120, None))
            .collect();
        let doc = render_summary(&window, generated()).unwrap();
        let total = doc.pages.len();
        assert!(total > 1);

        for (i, page) in doc.pages.iter().enumerate() {
            let texts = texts(page);
            assert!(texts.contains(&DISCLAIMER));
            let marker = format!("Page {} of {}", i + 1, total);
            assert!(texts.iter().any(|t| *t == marker));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let window = vec![
            reading("2024-01-14T08:00:00Z", 132, Some("am")),
            reading("2024-01-15T20:00:00Z", 141, None),
        ];
        assert_eq!(
            render_summary(&window, generated()).unwrap(),
            render_summary(&window, generated()).unwrap()
        );
    }
}
