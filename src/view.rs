//! Pure view projections
//!
//! Everything a front-end renders is a deterministic projection of
//! controller state computed here, with no I/O. This is the split that
//! keeps the calendar and sync state machines testable headlessly: the
//! controllers mutate state, these types describe what the screen shows.

use crate::models::{DeviceRecord, NetworkStats, PriceDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price band of one hour, derived from the EUR/MWh price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBand {
    /// At or below 50 EUR/MWh
    Low,
    /// Between the two thresholds
    Normal,
    /// At or above 70 EUR/MWh
    High,
}

impl PriceBand {
    /// Classify a price: `<= 50` is low, `>= 70` is high, anything between
    /// is normal.
    pub fn classify(price: f64) -> Self {
        if price <= 50.0 {
            Self::Low
        } else if price >= 70.0 {
            Self::High
        } else {
            Self::Normal
        }
    }

    /// Stable lowercase label ("low", "normal", "high")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// One row of the hourly price table
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    /// Display range such as `"00:00 - 01:00"`
    pub hour_range: String,
    /// Price in EUR/MWh
    pub price: f64,
    /// Price in cents/kWh
    pub price_kwh: f64,
    /// Band classification for styling
    pub band: PriceBand,
}

/// Display label for an hour slot, wrapping 23 back to 00
pub fn hour_range_label(hour: u8) -> String {
    format!("{:02}:00 - {:02}:00", hour, (hour + 1) % 24)
}

/// The price detail panel for the selected date
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PriceTable {
    /// No detail loaded yet, or a load is in flight
    #[default]
    Loading,
    /// A fully loaded day
    Rows {
        /// Upstream data source label
        source: String,
        /// Cheapest hour, EUR/MWh
        min_price: f64,
        /// Most expensive hour, EUR/MWh
        max_price: f64,
        /// Day average, EUR/MWh
        avg_price: f64,
        /// Hourly rows in server order
        rows: Vec<PriceRow>,
    },
    /// The detail fetch failed; prior selection stays untouched
    Failed {
        /// The date that failed to load
        date: NaiveDate,
    },
}

impl PriceTable {
    /// Project a loaded day into table rows
    pub fn from_day(day: &PriceDay) -> Self {
        let rows = day
            .prices
            .iter()
            .map(|entry| PriceRow {
                hour_range: hour_range_label(entry.hour),
                price: entry.price,
                price_kwh: entry.price_kwh,
                band: PriceBand::classify(entry.price),
            })
            .collect();
        Self::Rows {
            source: day.source.clone(),
            min_price: day.min_price,
            max_price: day.max_price,
            avg_price: day.avg_price,
            rows,
        }
    }
}

/// One row of the device table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    /// Server-assigned id
    pub id: u64,
    /// Friendly name
    pub name: String,
    /// MAC address
    pub mac: String,
    /// Manufacturer, `"Unknown"` when the server has none
    pub manufacturer: String,
    /// Online flag from the last scan
    pub online: bool,
}

impl DeviceRow {
    /// Display label for the online column
    pub fn status_label(&self) -> &'static str {
        if self.online {
            "Online"
        } else {
            "Offline"
        }
    }
}

/// The device list panel
///
/// An empty collection and a failed load are distinct render states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceTable {
    /// The server has no devices yet
    #[default]
    Empty,
    /// The collection could not be loaded
    Failed,
    /// Loaded devices
    Rows(Vec<DeviceRow>),
}

impl DeviceTable {
    /// Project a device collection into the table
    pub fn from_devices(devices: &[DeviceRecord]) -> Self {
        if devices.is_empty() {
            return Self::Empty;
        }
        let rows = devices
            .iter()
            .map(|device| DeviceRow {
                id: device.id,
                name: device.name.clone(),
                mac: device.mac.clone(),
                manufacturer: device
                    .manufacturer
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                online: device.online,
            })
            .collect();
        Self::Rows(rows)
    }

    /// Whether the table holds loaded rows
    pub fn has_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// The network statistics panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    /// Total tracked devices
    pub total_devices: u32,
    /// Devices currently online
    pub online_devices: u32,
    /// Devices currently offline
    pub offline_devices: u32,
    /// One line per manufacturer, e.g. `"Apple: 3 (2 online)"`
    pub manufacturer_lines: Vec<String>,
}

impl StatsView {
    /// Project network statistics into display lines
    pub fn from_stats(stats: &NetworkStats) -> Self {
        Self {
            total_devices: stats.total_devices,
            online_devices: stats.online_devices,
            offline_devices: stats.offline_devices,
            manufacturer_lines: stats
                .manufacturers
                .iter()
                .map(|m| format!("{}: {} ({} online)", m.name, m.count, m.online))
                .collect(),
        }
    }
}

/// UI theme preference, persisted in the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Default
    #[default]
    Light,
    /// Dark mode
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether dark mode is active
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Parse the persisted `darkMode` value (`"true"` means dark)
    pub fn from_storage_value(value: &str) -> Self {
        if value == "true" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Value persisted under the `darkMode` key
    pub fn storage_value(self) -> &'static str {
        if self.is_dark() {
            "true"
        } else {
            "false"
        }
    }
}
