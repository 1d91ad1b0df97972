//! Month grid projection
//!
//! Pure function from calendar state to the grid a front-end renders:
//! Monday-first weeks, leading blanks before day 1, one cell per day with
//! independent `today` / `selected` / `available` flags.

use crate::calendar::CalendarState;
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// Filler before day 1 so weekdays line up
    Blank,
    /// A day of the displayed month
    Day {
        /// Day of month, 1-based
        day: u32,
        /// The full date
        date: NaiveDate,
        /// Whether this is today's date
        today: bool,
        /// Whether this date is currently selected
        selected: bool,
        /// Whether price data exists for this date; only available cells
        /// respond to selection
        available: bool,
    },
}

/// A rendered month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// Header such as `"March 2026"`
    pub title: String,
    /// Leading blanks followed by day cells
    pub cells: Vec<CalendarCell>,
}

/// Project calendar state into a month grid
pub fn month_grid(state: &CalendarState, today: NaiveDate) -> MonthGrid {
    let year = state.displayed_year();
    let month = state.displayed_month();

    // Month is normalized to 0-11 by the controller, so day 1 always exists.
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return MonthGrid {
            title: String::new(),
            cells: Vec::new(),
        };
    };

    let title = format!("{} {}", MONTH_NAMES[month as usize], year);
    let mut cells = Vec::with_capacity(37);

    // Monday-first: weekday of day 1 gives the count of leading blanks.
    for _ in 0..first.weekday().num_days_from_monday() {
        cells.push(CalendarCell::Blank);
    }

    let mut date = first;
    loop {
        cells.push(CalendarCell::Day {
            day: date.day(),
            date,
            today: date == today,
            selected: state.selected_date() == Some(date),
            available: state.is_available(date),
        });
        match date.succ_opt() {
            Some(next) if next.month0() == month && next.year() == year => date = next,
            _ => break,
        }
    }

    MonthGrid { title, cells }
}
