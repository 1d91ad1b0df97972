//! Wire models for both Homeboard services
//!
//! Field names mirror the JSON the services emit; no renaming happens here
//! beyond serde defaults for optional fields.

use crate::error::{HomeboardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /prices/available-dates`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDates {
    /// Dates with price data, as zero-padded `YYYY-MM-DD` strings
    pub dates: Vec<String>,
}

/// One hour of spot price data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPrice {
    /// Hour of the day, 0-23
    pub hour: u8,
    /// Price in EUR/MWh
    pub price: f64,
    /// Price in cents/kWh
    pub price_kwh: f64,
}

/// Response of `GET /prices/date/{date}`: a full day of hourly prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDay {
    /// The day the prices belong to
    pub date: NaiveDate,
    /// Upstream data source label
    pub source: String,
    /// Cheapest hour of the day, EUR/MWh
    pub min_price: f64,
    /// Most expensive hour of the day, EUR/MWh
    pub max_price: f64,
    /// Day average, EUR/MWh
    pub avg_price: f64,
    /// Hourly prices, one entry per hour
    pub prices: Vec<HourPrice>,
}

impl PriceDay {
    /// Validate the day invariant: exactly 24 entries with unique hours
    /// covering 0-23.
    pub fn validate(&self) -> Result<()> {
        if self.prices.len() != 24 {
            return Err(HomeboardError::parsing(format!(
                "expected 24 hourly prices for {}, got {}",
                self.date,
                self.prices.len()
            )));
        }
        let mut seen = [false; 24];
        for entry in &self.prices {
            let hour = usize::from(entry.hour);
            if hour >= 24 || seen[hour] {
                return Err(HomeboardError::parsing(format!(
                    "invalid or duplicate hour {} for {}",
                    entry.hour, self.date
                )));
            }
            seen[hour] = true;
        }
        Ok(())
    }
}

/// A device tracked by the inventory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Server-assigned identifier, stable across edits
    pub id: u64,
    /// Friendly device name
    pub name: String,
    /// MAC address
    pub mac: String,
    /// Manufacturer derived from the MAC prefix, if known
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Whether the last scan saw the device on the network
    #[serde(default)]
    pub online: bool,
}

/// Response of `GET /devices`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceList {
    /// All tracked devices
    pub devices: Vec<DeviceRecord>,
}

/// Request body for adding or updating a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevice {
    /// Friendly device name
    pub name: String,
    /// MAC address
    pub mac: String,
}

/// Per-manufacturer device counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerStat {
    /// Manufacturer name
    pub name: String,
    /// Total devices from this manufacturer
    pub count: u32,
    /// How many of them are online
    pub online: u32,
}

/// Response of `GET /network-stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    /// All tracked devices
    pub total_devices: u32,
    /// Devices seen online by the last scan
    pub online_devices: u32,
    /// Devices not seen online
    pub offline_devices: u32,
    /// Breakdown by manufacturer
    pub manufacturers: Vec<ManufacturerStat>,
}

/// Request body for `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Request body for `PUT /credentials`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialUpdate {
    /// New username
    pub username: String,
    /// New password
    pub password: String,
}

/// Error body shape used by the device service (`{"detail": ...}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable failure description
    pub detail: Option<String>,
}
