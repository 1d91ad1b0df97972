//! Calendar controller state-machine tests
//!
//! These run against the in-crate scriptable mocks (`--features test-utils`)
//! so every property is checked without HTTP.

use async_trait::async_trait;
use chrono::NaiveDate;
use homeboard_client::calendar::{CalendarCell, CalendarController};
use homeboard_client::client::PricesApi;
use homeboard_client::mock::{sample_day, MockPricesApi};
use homeboard_client::models::PriceDay;
use homeboard_client::view::{PriceBand, PriceTable};
use homeboard_client::{HomeboardError, Result};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn controller_with(api: MockPricesApi, today: &str) -> CalendarController<MockPricesApi> {
    CalendarController::new(api, date(today))
}

/// Wraps the mock so one response can be held back mid-flight, overlapping
/// two detail requests.
struct GatedPricesApi {
    inner: MockPricesApi,
    gate: Notify,
    gate_armed: AtomicBool,
}

impl GatedPricesApi {
    fn new(inner: MockPricesApi) -> Self {
        Self {
            inner,
            gate: Notify::new(),
            gate_armed: AtomicBool::new(false),
        }
    }

    fn hold_next_response(&self) {
        self.gate_armed.store(true, Ordering::SeqCst);
    }

    fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl PricesApi for GatedPricesApi {
    async fn available_dates(&self) -> Result<Vec<String>> {
        self.inner.available_dates().await
    }

    async fn prices_for_date(&self, date: NaiveDate) -> Result<PriceDay> {
        let result = self.inner.prices_for_date(date).await;
        if self.gate_armed.swap(false, Ordering::SeqCst) {
            self.gate.notified().await;
        }
        result
    }
}

#[tokio::test]
async fn twelve_next_months_return_to_the_start() {
    let controller = controller_with(MockPricesApi::new(), "2025-03-10");
    let start = controller.state().await;

    for _ in 0..12 {
        controller.next_month().await;
    }

    let end = controller.state().await;
    assert_eq!(end.displayed_year(), start.displayed_year() + 1);
    assert_eq!(end.displayed_month(), start.displayed_month());

    for _ in 0..12 {
        controller.prev_month().await;
    }
    let back = controller.state().await;
    assert_eq!(
        (back.displayed_year(), back.displayed_month()),
        (start.displayed_year(), start.displayed_month())
    );
}

#[tokio::test]
async fn month_navigation_rolls_the_year_at_the_edges() {
    let controller = controller_with(MockPricesApi::new(), "2025-12-15");
    controller.next_month().await;
    let state = controller.state().await;
    assert_eq!((state.displayed_year(), state.displayed_month()), (2026, 0));

    controller.set_month(2026, -1).await;
    let state = controller.state().await;
    assert_eq!((state.displayed_year(), state.displayed_month()), (2025, 11));
}

#[tokio::test]
async fn set_month_does_not_refetch_availability() {
    let api = MockPricesApi::new().with_dates(&["2025-03-10"]);
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();
    assert_eq!(controller.api().dates_calls(), 1);

    controller.set_month(2026, 7).await;
    controller.next_month().await;
    assert_eq!(controller.api().dates_calls(), 1);
}

#[tokio::test]
async fn selecting_an_unavailable_date_is_a_silent_noop() {
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10"])
        .with_day(sample_day(date("2025-03-10"), 45.0));
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();

    controller.select_date(date("2025-03-11")).await.unwrap();
    assert_eq!(controller.state().await.selected_date(), None);
    assert_eq!(controller.api().detail_calls(), 0);
}

#[tokio::test]
async fn selecting_an_available_date_fetches_detail() {
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10"])
        .with_day(sample_day(date("2025-03-10"), 45.0));
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();

    controller.select_date(date("2025-03-10")).await.unwrap();
    assert_eq!(
        controller.state().await.selected_date(),
        Some(date("2025-03-10"))
    );
    assert_eq!(controller.api().detail_calls(), 1);
    assert!(matches!(
        controller.price_table().await,
        PriceTable::Rows { .. }
    ));

    // Re-selecting the same date keeps the state and just re-fetches.
    controller.select_date(date("2025-03-10")).await.unwrap();
    assert_eq!(
        controller.state().await.selected_date(),
        Some(date("2025-03-10"))
    );
}

#[tokio::test]
async fn failed_detail_load_renders_an_error_and_keeps_the_selection() {
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10", "2025-03-11"])
        .with_day(sample_day(date("2025-03-10"), 45.0));
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();
    controller.select_date(date("2025-03-10")).await.unwrap();

    // 2025-03-11 is in the availability set but the detail endpoint has
    // nothing for it.
    let err = controller.select_date(date("2025-03-11")).await.unwrap_err();
    assert!(matches!(err, HomeboardError::Api { status: 404, .. }));
    assert_eq!(
        controller.price_table().await,
        PriceTable::Failed {
            date: date("2025-03-11")
        }
    );
    assert_eq!(
        controller.state().await.selected_date(),
        Some(date("2025-03-11"))
    );
}

#[tokio::test]
async fn availability_failure_leaves_the_set_empty() {
    let api = MockPricesApi::new().with_dates(&["2025-03-10"]);
    api.set_failing(true);
    let controller = controller_with(api, "2025-03-10");

    assert!(controller.load_available_dates().await.is_err());
    let state = controller.state().await;
    assert!(state.available_dates().is_empty());

    let grid = controller.grid(date("2025-03-10")).await;
    assert!(grid.cells.iter().all(|cell| match cell {
        CalendarCell::Day { available, .. } => !available,
        CalendarCell::Blank => true,
    }));
}

#[tokio::test]
async fn unparseable_dates_are_skipped() {
    let api = MockPricesApi::new().with_dates(&["2025-03-10", "not-a-date", "2025-3-9"]);
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();

    let state = controller.state().await;
    assert_eq!(state.available_dates().len(), 2);
    assert!(state.is_available(date("2025-03-10")));
    assert!(state.is_available(date("2025-03-09")));
}

#[tokio::test]
async fn malformed_day_is_a_parsing_failure() {
    let mut short_day = sample_day(date("2025-03-10"), 45.0);
    short_day.prices.truncate(12);
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10"])
        .with_day(short_day);
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();

    let err = controller.select_date(date("2025-03-10")).await.unwrap_err();
    assert!(matches!(err, HomeboardError::Parsing(_)));
    assert!(matches!(
        controller.price_table().await,
        PriceTable::Failed { .. }
    ));
}

#[tokio::test]
async fn loaded_day_classifies_rows_into_bands() {
    let mut day = sample_day(date("2025-03-10"), 45.0);
    day.prices[0].price = 49.9;
    day.prices[1].price = 50.0;
    day.prices[2].price = 69.9;
    day.prices[3].price = 70.0;
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10"])
        .with_day(day);
    let controller = controller_with(api, "2025-03-10");
    controller.load_available_dates().await.unwrap();
    controller.select_date(date("2025-03-10")).await.unwrap();

    let PriceTable::Rows { rows, .. } = controller.price_table().await else {
        panic!("expected loaded rows");
    };
    let bands: Vec<PriceBand> = rows.iter().take(4).map(|row| row.band).collect();
    assert_eq!(
        bands,
        vec![
            PriceBand::Low,
            PriceBand::Low,
            PriceBand::Normal,
            PriceBand::High
        ]
    );
    assert_eq!(rows[0].hour_range, "00:00 - 01:00");
    assert_eq!(rows[23].hour_range, "23:00 - 00:00");
}

#[tokio::test]
async fn superseded_detail_response_is_discarded() {
    let api = GatedPricesApi::new(
        MockPricesApi::new()
            .with_dates(&["2025-03-10", "2025-03-11"])
            .with_day(sample_day(date("2025-03-10"), 90.0))
            .with_day(sample_day(date("2025-03-11"), 40.0)),
    );
    let controller = Arc::new(CalendarController::new(api, date("2025-03-10")));
    controller.load_available_dates().await.unwrap();

    // First selection: the response is held back mid-flight.
    controller.api().hold_next_response();
    let held = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.select_date(date("2025-03-10")).await })
    };
    while controller.api().inner.detail_calls() == 0 {
        tokio::task::yield_now().await;
    }

    // Second selection completes while the first is still in flight.
    controller.select_date(date("2025-03-11")).await.unwrap();

    // The older response resolves last but must not win.
    controller.api().release();
    held.await.unwrap().unwrap();

    assert_eq!(
        controller.state().await.selected_date(),
        Some(date("2025-03-11"))
    );
    let PriceTable::Rows { rows, .. } = controller.price_table().await else {
        panic!("expected loaded rows");
    };
    assert_eq!(rows[0].price, 40.0);
}

#[tokio::test]
async fn grid_flags_track_selection_and_today() {
    let api = MockPricesApi::new()
        .with_dates(&["2025-03-10"])
        .with_day(sample_day(date("2025-03-10"), 45.0));
    let controller = controller_with(api, "2025-03-15");
    controller.load_available_dates().await.unwrap();
    controller.select_date(date("2025-03-10")).await.unwrap();

    let grid = controller.grid(date("2025-03-15")).await;
    assert_eq!(grid.title, "March 2025");

    let selected: Vec<u32> = grid
        .cells
        .iter()
        .filter_map(|cell| match cell {
            CalendarCell::Day {
                day, selected: true, ..
            } => Some(*day),
            _ => None,
        })
        .collect();
    assert_eq!(selected, vec![10]);

    let today: Vec<u32> = grid
        .cells
        .iter()
        .filter_map(|cell| match cell {
            CalendarCell::Day { day, today: true, .. } => Some(*day),
            _ => None,
        })
        .collect();
    assert_eq!(today, vec![15]);
}
