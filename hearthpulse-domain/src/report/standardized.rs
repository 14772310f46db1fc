//! Standardized log-sheet layout: a fixed two-table grid of 14 rows per
//! table with AM/PM sub-columns, in the style of the printable AHA log.
//!
//! Placement is positional over the supplied window, not date-keyed: the
//! i-th reading goes to sheet row `i / 2`, rows 0-13 in the left table and
//! 14-27 in the right, and into the AM or PM cell of that row by its local
//! hour. A later reading hitting an occupied cell overwrites it.

use chrono::NaiveDate;

use crate::entities::{Profile, Reading};

use super::{
    reading_cell, standardized_filename, Document, FontStyle, Page, ReportError, MARGIN_LEFT,
};

/// Rows per table; the grid always renders all of them
pub const ROWS_PER_TABLE: usize = 14;

/// Sheet capacity across both tables
pub const SHEET_ROWS: usize = 2 * ROWS_PER_TABLE;

const TABLE_TOP: f64 = 62.0;
const TABLE_WIDTH: f64 = 80.0;
const TABLE_GAP: f64 = 10.0;
const HEADER_ROW_HEIGHT: f64 = 8.0;
const ROW_HEIGHT: f64 = 10.0;

const DATE_COL_WIDTH: f64 = 24.0;
const SLOT_COL_WIDTH: f64 = 28.0;

#[derive(Debug, Clone, Default)]
struct RowSlot {
    date: Option<String>,
    am: Option<String>,
    pm: Option<String>,
}

/// Assign window readings to sheet rows. Pure placement, exposed to the
/// renderer below; readings past the sheet capacity are ignored.
fn place(window: &[Reading]) -> Vec<RowSlot> {
    let mut rows = vec![RowSlot::default(); SHEET_ROWS];
    for (index, reading) in window.iter().enumerate() {
        let row = index / 2;
        if row >= SHEET_ROWS {
            break;
        }
        let slot = &mut rows[row];
        slot.date = Some(reading.local_date().format("%m/%d").to_string());
        let cell = reading_cell(reading.systolic, reading.diastolic, reading.pulse);
        if reading.is_morning() {
            slot.am = Some(cell);
        } else {
            slot.pm = Some(cell);
        }
    }
    rows
}

fn draw_table(page: &mut Page, x: f64, rows: &[RowSlot], first_entry_number: usize) {
    let height = HEADER_ROW_HEIGHT + ROWS_PER_TABLE as f64 * ROW_HEIGHT;
    page.rect(x, TABLE_TOP, TABLE_WIDTH, height);

    // Column headers
    page.text(x + 2.0, TABLE_TOP + 6.0, 9.0, FontStyle::Bold, "Date");
    page.text(x + DATE_COL_WIDTH + 2.0, TABLE_TOP + 6.0, 9.0, FontStyle::Bold, "AM");
    page.text(
        x + DATE_COL_WIDTH + SLOT_COL_WIDTH + 2.0,
        TABLE_TOP + 6.0,
        9.0,
        FontStyle::Bold,
        "PM",
    );
    page.line(x, TABLE_TOP + HEADER_ROW_HEIGHT, x + TABLE_WIDTH, TABLE_TOP + HEADER_ROW_HEIGHT);

    // Column separators
    let date_x = x + DATE_COL_WIDTH;
    let slot_x = date_x + SLOT_COL_WIDTH;
    page.line(date_x, TABLE_TOP, date_x, TABLE_TOP + height);
    page.line(slot_x, TABLE_TOP, slot_x, TABLE_TOP + height);

    // All 14 rows are drawn whether filled or not; position is the row's
    // identity on the printed sheet
    for (i, slot) in rows.iter().enumerate() {
        let top = TABLE_TOP + HEADER_ROW_HEIGHT + i as f64 * ROW_HEIGHT;
        let baseline = top + 7.0;
        page.line(x, top + ROW_HEIGHT, x + TABLE_WIDTH, top + ROW_HEIGHT);

        let date = slot.date.clone().unwrap_or_else(|| format!("{}.", first_entry_number + i));
        page.text(x + 2.0, baseline, 8.0, FontStyle::Regular, date);
        if let Some(am) = &slot.am {
            page.text(date_x + 2.0, baseline, 8.0, FontStyle::Regular, am.clone());
        }
        if let Some(pm) = &slot.pm {
            page.text(slot_x + 2.0, baseline, 8.0, FontStyle::Regular, pm.clone());
        }
    }
}

/// Render the standardized log sheet over a window of readings (the caller
/// supplies the last-28-entries window in chronological order). `generated`
/// is the caller's clock date, used for the header and filename.
pub fn render_standardized_log(
    window: &[Reading],
    profile: &Profile,
    generated: NaiveDate,
) -> Result<Document, ReportError> {
    if window.is_empty() {
        return Err(ReportError::NoReadings);
    }

    let mut page = Page::default();

    page.text(MARGIN_LEFT, 20.0, 18.0, FontStyle::Bold, "Blood Pressure Log");
    page.text(
        MARGIN_LEFT,
        28.0,
        10.0,
        FontStyle::Regular,
        "Standardized AHA-style log sheet, AM and PM readings per entry",
    );

    let name = profile.name.as_deref().unwrap_or("____________________");
    page.text(MARGIN_LEFT, 40.0, 10.0, FontStyle::Regular, format!("Name: {}", name));
    let goal = profile
        .bp_goal
        .map(|g| format!("My BP Goal: {} mmHg", g))
        .unwrap_or_else(|| "My BP Goal: ______ mmHg".to_string());
    page.text(110.0, 40.0, 10.0, FontStyle::Regular, goal);
    page.text(
        MARGIN_LEFT,
        47.0,
        10.0,
        FontStyle::Regular,
        format!("Generated: {}", generated.format("%m/%d/%Y")),
    );
    page.text(
        MARGIN_LEFT,
        54.0,
        9.0,
        FontStyle::Italic,
        "Each cell reads systolic - diastolic - pulse.",
    );

    let rows = place(window);
    draw_table(&mut page, MARGIN_LEFT, &rows[..ROWS_PER_TABLE], 1);
    draw_table(
        &mut page,
        MARGIN_LEFT + TABLE_WIDTH + TABLE_GAP,
        &rows[ROWS_PER_TABLE..],
        ROWS_PER_TABLE + 1,
    );

    Ok(Document {
        pages: vec![page],
        filename: standardized_filename(generated),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Element;

    fn reading(timestamp: &str, systolic: i32, diastolic: i32, pulse: i32) -> Reading {
        Reading {
            id: timestamp.to_string(),
            systolic,
            diastolic,
            pulse,
            timestamp: timestamp.to_string(),
            note: None,
        }
    }

    fn generated() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    fn cell_texts(page: &Page) -> Vec<(f64, f64, String)> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_window_is_a_distinct_outcome() {
        let result = render_standardized_log(&[], &Profile::default(), generated());
        assert_eq!(result, Err(ReportError::NoReadings));
    }

    #[test]
    fn am_and_pm_readings_share_row_zero() {
        let window = vec![
            reading("2024-01-01T08:00:00Z", 120, 80, 70),
            reading("2024-01-01T20:00:00Z", 118, 76, 68),
        ];
        let rows = place(&window);
        assert_eq!(rows[0].am.as_deref(), Some("120 - 80 - 70"));
        assert_eq!(rows[0].pm.as_deref(), Some("118 - 76 - 68"));
        assert!(rows[1].am.is_none() && rows[1].pm.is_none());
    }

    #[test]
    fn same_slot_collision_overwrites() {
        // Two consecutive morning readings pair into row 0; the second wins
        let window = vec![
            reading("2024-01-01T07:00:00Z", 120, 80, 70),
            reading("2024-01-01T09:00:00Z", 130, 85, 75),
        ];
        let rows = place(&window);
        assert_eq!(rows[0].am.as_deref(), Some("130 - 85 - 75"));
        assert!(rows[0].pm.is_none());
    }

    #[test]
    fn placement_is_positional_not_date_keyed() {
        // Same calendar day, but indices 2 and 3 land in row 1
        let window = vec![
            reading("2024-01-01T06:00:00Z", 110, 70, 60),
            reading("2024-01-01T18:00:00Z", 112, 72, 62),
            reading("2024-01-01T07:00:00Z", 114, 74, 64),
            reading("2024-01-01T19:00:00Z", 116, 76, 66),
        ];
        let rows = place(&window);
        assert_eq!(rows[1].am.as_deref(), Some("114 - 74 - 64"));
        assert_eq!(rows[1].pm.as_deref(), Some("116 - 76 - 66"));
    }

    #[test]
    fn both_tables_always_render_fourteen_rows() {
        let window = vec![reading("2024-01-01T08:00:00Z", 120, 80, 70)];
        let doc = render_standardized_log(&window, &Profile::default(), generated()).unwrap();
        assert_eq!(doc.pages.len(), 1);

        // 14 numbered placeholders beyond the filled rows, per table
        let texts = cell_texts(&doc.pages[0]);
        for entry in 2..=28 {
            let placeholder = format!("{}.", entry);
            assert!(
                texts.iter().any(|(_, _, t)| *t == placeholder),
                "missing placeholder row {}",
                entry
            );
        }
    }

    #[test]
    fn filled_row_shows_date_instead_of_placeholder() {
        let window = vec![reading("2024-01-05T08:00:00Z", 120, 80, 70)];
        let doc = render_standardized_log(&window, &Profile::default(), generated()).unwrap();
        let texts = cell_texts(&doc.pages[0]);
        assert!(texts.iter().any(|(_, _, t)| t == "01/05"));
        assert!(!texts.iter().any(|(_, _, t)| t == "1."));
    }

    #[test]
    fn header_uses_profile_name_and_goal() {
        let mut profile = Profile::default();
        profile.name = Some("Alex".to_string());
        profile.bp_goal = Some(120);
        let window = vec![reading("2024-01-01T08:00:00Z", 120, 80, 70)];
        let doc = render_standardized_log(&window, &profile, generated()).unwrap();
        let texts = cell_texts(&doc.pages[0]);
        assert!(texts.iter().any(|(_, _, t)| t == "Name: Alex"));
        assert!(texts.iter().any(|(_, _, t)| t == "My BP Goal: 120 mmHg"));
    }

    #[test]
    fn filename_uses_the_generation_date() {
        let window = vec![reading("2024-01-01T08:00:00Z", 120, 80, 70)];
        let doc = render_standardized_log(&window, &Profile::default(), generated()).unwrap();
        assert_eq!(doc.filename, "AHA_BP_Log_2024-01-16.pdf");
    }

    #[test]
    fn full_window_fills_the_left_table() {
        // 28 readings pair into the 14 rows of the left table
        let window: Vec<Reading> = (0..28)
            .map(|i| {
                let day = i / 2 + 1;
                let hour = if i % 2 == 0 { 8 } else { 20 };
                reading(&format!("2024-01-{:02}T{:02}:00:00Z", day, hour), 120 + i, 80, 70)
            })
            .collect();
        let rows = place(&window);
        for row in 0..ROWS_PER_TABLE {
            assert!(rows[row].am.is_some(), "row {} should have an AM cell", row);
            assert!(rows[row].pm.is_some(), "row {} should have a PM cell", row);
        }
        for row in ROWS_PER_TABLE..SHEET_ROWS {
            assert!(rows[row].am.is_none() && rows[row].pm.is_none());
        }
    }
}
