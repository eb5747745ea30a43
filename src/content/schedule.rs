//! Booking calendar derivation: month grid, time slots, and label formats.
//!
//! Everything is a pure function of "today" and the requested month so the
//! rules can be exercised without a live clock. Times are stored in 24-hour
//! `HH:MM` form regardless of the display format; the timezone choice is
//! recorded with the request and never shifts the slot grid.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First bookable slot of the day, inclusive.
const FIRST_SLOT_MINUTES: u32 = 9 * 60;
/// Last bookable slot of the day, inclusive.
const LAST_SLOT_MINUTES: u32 = 19 * 60;
const SLOT_STEP_MINUTES: u32 = 30;

/// The calendar always renders six full weeks.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_past: bool,
}

/// Build the 42-cell grid for `year`/`month`, starting from the Sunday on
/// or before the 1st. Returns `None` for an invalid month.
pub fn month_grid(today: NaiveDate, year: i32, month: u32) -> Option<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead_days = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead_days);

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarCell {
                date,
                in_current_month: date.month() == month && date.year() == year,
                is_past: date < today,
            }
        })
        .collect();
    Some(cells)
}

/// The fixed half-hour slot grid, 09:00 through 19:00 inclusive.
pub fn time_slots() -> Vec<String> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_STEP_MINUTES as usize)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

/// Render a stored `HH:MM` slot in the requested display format. Values
/// that do not parse come back unchanged.
pub fn slot_label(slot: &str, format: TimeFormat) -> String {
    let Some((hour, minute)) = parse_slot(slot) else {
        return slot.to_string();
    };
    match format {
        TimeFormat::TwentyFourHour => format!("{hour:02}:{minute:02}"),
        TimeFormat::TwelveHour => {
            let suffix = if hour < 12 { "AM" } else { "PM" };
            let display_hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{display_hour}:{minute:02} {suffix}")
        }
    }
}

/// Whether a date can be picked at all: anything from today onward.
/// Callers also reject cells outside the displayed month.
pub fn is_selectable(today: NaiveDate, date: NaiveDate) -> bool {
    date >= today
}

/// Whether a chosen time has gone stale: the date is today and the time is
/// earlier than the current clock. Both times are `HH:MM`, so lexicographic
/// order is chronological order. Drives the minute tick that clears a
/// selection the user made before the slot passed.
pub fn should_clear_time(date: NaiveDate, time: &str, today: NaiveDate, now: &str) -> bool {
    date == today && !time.is_empty() && time < now
}

fn two_digit_field(field: &str) -> Option<u32> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_slot(slot: &str) -> Option<(u32, u32)> {
    let (hour, minute) = slot.split_once(':')?;
    let hour = two_digit_field(hour)?;
    let minute = two_digit_field(minute)?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// True when the value is a well-formed, zero-padded `HH:MM` clock time.
/// The padding matters: stored times are compared lexicographically, which
/// is only chronological when every field is two digits.
pub fn is_valid_slot(slot: &str) -> bool {
    parse_slot(slot).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_has_42_cells_starting_sunday() {
        let today = date(2026, 8, 23);
        let cells = month_grid(today, 2026, 8).unwrap();
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        // August 1st 2026 is a Saturday, so the grid leads with July days.
        assert_eq!(cells[0].date, date(2026, 7, 26));
        assert!(!cells[0].in_current_month);
        assert_eq!(cells[6].date, date(2026, 8, 1));
        assert!(cells[6].in_current_month);
    }

    #[test]
    fn test_grid_flags_past_days() {
        let today = date(2026, 8, 23);
        let cells = month_grid(today, 2026, 8).unwrap();
        for cell in &cells {
            assert_eq!(cell.is_past, cell.date < today, "{}", cell.date);
        }
        // Today itself is not past.
        let today_cell = cells.iter().find(|c| c.date == today).unwrap();
        assert!(!today_cell.is_past);
    }

    #[test]
    fn test_grid_when_month_starts_on_sunday() {
        // March 2026 starts on a Sunday: no lead days.
        let cells = month_grid(date(2026, 3, 15), 2026, 3).unwrap();
        assert_eq!(cells[0].date, date(2026, 3, 1));
        assert!(cells[0].in_current_month);
        let in_month = cells.iter().filter(|c| c.in_current_month).count();
        assert_eq!(in_month, 31);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(month_grid(date(2026, 8, 23), 2026, 13).is_none());
        assert!(month_grid(date(2026, 8, 23), 2026, 0).is_none());
    }

    #[test]
    fn test_twenty_one_half_hour_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 21);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("19:00"));
        assert!(slots.contains(&"12:30".to_string()));
        for pair in slots.windows(2) {
            let (a, b) = (parse_slot(&pair[0]).unwrap(), parse_slot(&pair[1]).unwrap());
            let step = (b.0 * 60 + b.1) - (a.0 * 60 + a.1);
            assert_eq!(step, 30);
        }
    }

    #[test]
    fn test_twelve_hour_labels() {
        assert_eq!(slot_label("09:00", TimeFormat::TwelveHour), "9:00 AM");
        assert_eq!(slot_label("12:00", TimeFormat::TwelveHour), "12:00 PM");
        assert_eq!(slot_label("12:30", TimeFormat::TwelveHour), "12:30 PM");
        assert_eq!(slot_label("19:00", TimeFormat::TwelveHour), "7:00 PM");
        assert_eq!(slot_label("00:30", TimeFormat::TwelveHour), "12:30 AM");
    }

    #[test]
    fn test_twenty_four_hour_labels_are_unchanged() {
        for slot in time_slots() {
            assert_eq!(slot_label(&slot, TimeFormat::TwentyFourHour), slot);
        }
        // Unparseable values pass through rather than panic.
        assert_eq!(slot_label("soon", TimeFormat::TwelveHour), "soon");
    }

    #[test]
    fn test_selectability_clamps_past_dates() {
        let today = date(2026, 8, 23);
        assert!(!is_selectable(today, date(2026, 8, 22)));
        assert!(is_selectable(today, today));
        assert!(is_selectable(today, date(2026, 8, 24)));
    }

    #[test]
    fn test_stale_time_is_cleared_only_for_today() {
        let today = date(2026, 8, 23);
        assert!(should_clear_time(today, "09:00", today, "09:30"));
        assert!(!should_clear_time(today, "10:00", today, "09:30"));
        assert!(!should_clear_time(today, "", today, "09:30"));
        // Future dates keep any time.
        assert!(!should_clear_time(date(2026, 8, 24), "09:00", today, "09:30"));
    }

    #[test]
    fn test_slot_validity() {
        assert!(is_valid_slot("09:00"));
        assert!(is_valid_slot("19:00"));
        assert!(!is_valid_slot("25:00"));
        assert!(!is_valid_slot("09:75"));
        assert!(!is_valid_slot("0900"));
        assert!(!is_valid_slot(""));
    }

    #[test]
    fn test_slot_fields_must_be_zero_padded() {
        // "9:00" sorts after "18:00" lexicographically despite being nine
        // hours earlier; the rest are not clock times at all.
        assert!(!is_valid_slot("9:00"));
        assert!(!is_valid_slot("9:5"));
        assert!(!is_valid_slot("+9:00"));
        assert!(!is_valid_slot("009:000"));
        assert!(!is_valid_slot("1 :30"));
    }
}
