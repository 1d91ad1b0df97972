//! Calendar date-availability and selection controller
//!
//! Tracks the displayed month, the set of dates the price service has data
//! for, and the currently selected date. Month navigation is a pure state
//! change; selecting an available date triggers a detail fetch whose result
//! becomes the [`PriceTable`] projection. Selection of a date without data
//! is silently ignored.

pub mod grid;

pub use grid::{month_grid, CalendarCell, MonthGrid};

use crate::client::{PricesApi, RequestSequence};
use crate::error::Result;
use crate::view::PriceTable;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Calendar state: displayed month, availability set, selection
///
/// Mutation happens only through [`CalendarController`]; the fields are not
/// assignable from outside this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    displayed_year: i32,
    /// 0-11
    displayed_month: u32,
    selected_date: Option<NaiveDate>,
    available_dates: BTreeSet<NaiveDate>,
}

impl CalendarState {
    /// Create state showing the given month (0-11, rolled into range)
    pub fn new(year: i32, month: i32) -> Self {
        let (displayed_year, displayed_month) = normalize_month(year, month);
        Self {
            displayed_year,
            displayed_month,
            selected_date: None,
            available_dates: BTreeSet::new(),
        }
    }

    /// Create state showing the month containing `today`
    pub fn for_today(today: NaiveDate) -> Self {
        Self::new(today.year(), today.month0() as i32)
    }

    /// Displayed year
    pub fn displayed_year(&self) -> i32 {
        self.displayed_year
    }

    /// Displayed month, 0-11
    pub fn displayed_month(&self) -> u32 {
        self.displayed_month
    }

    /// Currently selected date, if any
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Dates with price data
    pub fn available_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.available_dates
    }

    /// Whether a date has price data and can be selected
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.available_dates.contains(&date)
    }

    pub(crate) fn set_selected(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    pub(crate) fn set_available_dates(&mut self, dates: BTreeSet<NaiveDate>) {
        self.available_dates = dates;
    }
}

/// Roll a month offset into `[0, 11]`, adjusting the year
fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    (year + month.div_euclid(12), month.rem_euclid(12) as u32)
}

/// Controller owning calendar state and the price detail view
pub struct CalendarController<P> {
    api: P,
    state: RwLock<CalendarState>,
    detail: RwLock<PriceTable>,
    requests: RequestSequence,
}

impl<P: PricesApi> CalendarController<P> {
    /// Create a controller showing the month containing `today`
    pub fn new(api: P, today: NaiveDate) -> Self {
        Self {
            api,
            state: RwLock::new(CalendarState::for_today(today)),
            detail: RwLock::new(PriceTable::Loading),
            requests: RequestSequence::new(),
        }
    }

    /// Snapshot of the calendar state
    pub async fn state(&self) -> CalendarState {
        self.state.read().await.clone()
    }

    /// Snapshot of the price detail view
    pub async fn price_table(&self) -> PriceTable {
        self.detail.read().await.clone()
    }

    /// Project the current month grid
    pub async fn grid(&self, today: NaiveDate) -> MonthGrid {
        month_grid(&*self.state.read().await, today)
    }

    /// Access the underlying API client
    pub fn api(&self) -> &P {
        &self.api
    }

    /// Show a specific month; out-of-range months roll the year. No fetch
    /// happens, availability stays as loaded.
    pub async fn set_month(&self, year: i32, month: i32) {
        let (year, month) = normalize_month(year, month);
        let mut state = self.state.write().await;
        state.displayed_year = year;
        state.displayed_month = month;
    }

    /// Advance one month, rolling into January of the next year
    pub async fn next_month(&self) {
        let (year, month) = {
            let state = self.state.read().await;
            (state.displayed_year, state.displayed_month as i32 + 1)
        };
        self.set_month(year, month).await;
    }

    /// Go back one month, rolling into December of the previous year
    pub async fn prev_month(&self) {
        let (year, month) = {
            let state = self.state.read().await;
            (state.displayed_year, state.displayed_month as i32 - 1)
        };
        self.set_month(year, month).await;
    }

    /// Fetch the availability set. Called once at startup; on failure the
    /// set stays empty and every cell renders unavailable.
    pub async fn load_available_dates(&self) -> Result<()> {
        let dates = self.api.available_dates().await.map_err(|e| {
            warn!("failed to load available dates: {e}");
            e
        })?;

        let mut parsed = BTreeSet::new();
        for raw in &dates {
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => {
                    parsed.insert(date);
                }
                Err(e) => warn!("skipping unparseable available date {raw:?}: {e}"),
            }
        }
        debug!("loaded {} available dates", parsed.len());

        self.state.write().await.set_available_dates(parsed);
        Ok(())
    }

    /// Select a date and fetch its detail. Dates outside the availability
    /// set are ignored without error; re-selecting the current date is
    /// idempotent apart from the re-fetch.
    pub async fn select_date(&self, date: NaiveDate) -> Result<()> {
        {
            let state = self.state.read().await;
            if !state.is_available(date) {
                debug!("ignoring selection of unavailable date {date}");
                return Ok(());
            }
        }

        self.state.write().await.set_selected(Some(date));
        self.load_price_detail(date).await
    }

    /// Fetch the hourly prices for a date into the detail view. A failed
    /// fetch renders [`PriceTable::Failed`] and leaves the selection as it
    /// was; a response superseded by a newer request is dropped.
    pub async fn load_price_detail(&self, date: NaiveDate) -> Result<()> {
        let token = self.requests.begin();
        *self.detail.write().await = PriceTable::Loading;

        let result = self.api.prices_for_date(date).await;

        if !self.requests.is_current(token) {
            debug!("discarding stale price response for {date}");
            return Ok(());
        }

        match result.and_then(|day| day.validate().map(|()| day)) {
            Ok(day) => {
                *self.detail.write().await = PriceTable::from_day(&day);
                Ok(())
            }
            Err(e) => {
                warn!("failed to load prices for {date}: {e}");
                *self.detail.write().await = PriceTable::Failed { date };
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_normalization_rolls_years() {
        assert_eq!(normalize_month(2026, 12), (2027, 0));
        assert_eq!(normalize_month(2026, -1), (2025, 11));
        assert_eq!(normalize_month(2026, 25), (2028, 1));
        assert_eq!(normalize_month(2026, 5), (2026, 5));
    }

    #[test]
    fn state_for_today_uses_zero_based_month() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let state = CalendarState::for_today(today);
        assert_eq!(state.displayed_year(), 2026);
        assert_eq!(state.displayed_month(), 2);
    }
}
