//! API client traits and implementations
//!
//! The controllers talk to the services exclusively through the
//! [`PricesApi`] and [`DevicesApi`] traits, so their state machines can be
//! exercised against scriptable mocks (see [`crate::mock`]) as well as the
//! reqwest-backed clients in [`http`].

pub mod http;
pub mod sequence;

pub use http::{HttpDevicesClient, HttpPricesClient};
pub use sequence::RequestSequence;

use crate::auth::Credential;
use crate::error::Result;
use crate::models::{
    CredentialUpdate, DeviceRecord, NetworkStats, NewDevice, PriceDay,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Client interface for the spot price service
#[async_trait]
pub trait PricesApi: Send + Sync {
    /// Fetch the full set of dates with price data
    async fn available_dates(&self) -> Result<Vec<String>>;

    /// Fetch a full day of hourly prices
    async fn prices_for_date(&self, date: NaiveDate) -> Result<PriceDay>;
}

/// Client interface for the device inventory service
///
/// Every call except [`login`](DevicesApi::login) carries a basic-auth
/// credential.
#[async_trait]
pub trait DevicesApi: Send + Sync {
    /// Explicit authentication check against `POST /login`
    async fn login(&self, username: &str, password: &str) -> Result<()>;

    /// Legacy login probe: an authenticated read of the device collection.
    ///
    /// A 2xx response is interpreted as valid credentials. Kept for servers
    /// that predate the `/login` endpoint.
    async fn probe(&self, credential: &Credential) -> Result<()>;

    /// Fetch the device collection
    async fn list_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>>;

    /// Trigger a rescan and fetch devices with refreshed online flags
    async fn scan_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>>;

    /// Create a device; the server assigns the id and manufacturer
    async fn add_device(
        &self,
        credential: &Credential,
        device: &NewDevice,
    ) -> Result<DeviceRecord>;

    /// Update an existing device by id
    async fn update_device(
        &self,
        credential: &Credential,
        id: u64,
        device: &NewDevice,
    ) -> Result<DeviceRecord>;

    /// Delete a device by id
    async fn delete_device(&self, credential: &Credential, id: u64) -> Result<()>;

    /// Fetch aggregate network statistics
    async fn network_stats(&self, credential: &Credential) -> Result<NetworkStats>;

    /// Rotate the stored server-side credentials
    async fn update_credentials(
        &self,
        credential: &Credential,
        update: &CredentialUpdate,
    ) -> Result<()>;
}
