//! Mock implementations for testing
//!
//! Scriptable in-memory implementations of [`PricesApi`] and [`DevicesApi`]
//! with call counters, so controller semantics can be exercised without an
//! HTTP server.

use crate::auth::Credential;
use crate::client::{DevicesApi, PricesApi};
use crate::error::{HomeboardError, Result};
use crate::models::{
    CredentialUpdate, DeviceRecord, HourPrice, ManufacturerStat, NetworkStats, NewDevice,
    PriceDay,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build a well-formed 24-hour price day for tests
pub fn sample_day(date: NaiveDate, base_price: f64) -> PriceDay {
    let prices: Vec<HourPrice> = (0..24)
        .map(|hour| HourPrice {
            hour,
            price: base_price,
            price_kwh: base_price / 10.0,
        })
        .collect();
    PriceDay {
        date,
        source: "mock".to_string(),
        min_price: base_price,
        max_price: base_price,
        avg_price: base_price,
        prices,
    }
}

/// Mock price service
#[derive(Default)]
pub struct MockPricesApi {
    dates: Mutex<Vec<String>>,
    days: Mutex<HashMap<NaiveDate, PriceDay>>,
    fail_all: AtomicBool,
    dates_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockPricesApi {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the available-date strings
    pub fn with_dates(self, dates: &[&str]) -> Self {
        *self.dates.lock().expect("mock lock") =
            dates.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Register a day of prices
    pub fn with_day(self, day: PriceDay) -> Self {
        self.days.lock().expect("mock lock").insert(day.date, day);
        self
    }

    /// Make every call fail with a connection error
    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    /// How many times the availability endpoint was hit
    pub fn dates_calls(&self) -> usize {
        self.dates_calls.load(Ordering::SeqCst)
    }

    /// How many times the detail endpoint was hit
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PricesApi for MockPricesApi {
    async fn available_dates(&self) -> Result<Vec<String>> {
        self.dates_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(HomeboardError::connection("mock outage"));
        }
        Ok(self.dates.lock().expect("mock lock").clone())
    }

    async fn prices_for_date(&self, date: NaiveDate) -> Result<PriceDay> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(HomeboardError::connection("mock outage"));
        }
        self.days
            .lock()
            .expect("mock lock")
            .get(&date)
            .cloned()
            .ok_or_else(|| HomeboardError::api(404, format!("No price data for {date}")))
    }
}

/// Mock device inventory service
pub struct MockDevicesApi {
    accepted: Mutex<(String, String)>,
    devices: Mutex<Vec<DeviceRecord>>,
    next_id: AtomicU64,
    fail_list: AtomicBool,
    login_calls: AtomicUsize,
    probe_calls: AtomicUsize,
    list_calls: AtomicUsize,
    credential_update_calls: AtomicUsize,
}

impl MockDevicesApi {
    /// Create a mock accepting one username/password pair
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            accepted: Mutex::new((username.to_string(), password.to_string())),
            devices: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_list: AtomicBool::new(false),
            login_calls: AtomicUsize::new(0),
            probe_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            credential_update_calls: AtomicUsize::new(0),
        }
    }

    /// Seed the device collection
    pub fn with_devices(self, devices: Vec<DeviceRecord>) -> Self {
        let max_id = devices.iter().map(|d| d.id).max().unwrap_or(0);
        self.next_id.store(max_id + 1, Ordering::SeqCst);
        *self.devices.lock().expect("mock lock") = devices;
        self
    }

    /// Make list calls fail with a connection error
    pub fn set_list_failing(&self, failing: bool) {
        self.fail_list.store(failing, Ordering::SeqCst);
    }

    /// How many login attempts were made
    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    /// How many probe reads were made
    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    /// How many collection reads were made
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many credential rotations were requested
    pub fn credential_update_calls(&self) -> usize {
        self.credential_update_calls.load(Ordering::SeqCst)
    }

    fn expected_credential(&self) -> Credential {
        let accepted = self.accepted.lock().expect("mock lock");
        Credential::basic(accepted.0.clone(), &accepted.1)
    }

    fn authorize(&self, credential: &Credential) -> Result<()> {
        if *credential == self.expected_credential() {
            Ok(())
        } else {
            Err(HomeboardError::authentication("Invalid credentials"))
        }
    }
}

#[async_trait]
impl DevicesApi for MockDevicesApi {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let accepted = self.accepted.lock().expect("mock lock");
        if accepted.0 == username && accepted.1 == password {
            Ok(())
        } else {
            Err(HomeboardError::authentication("Invalid credentials"))
        }
    }

    async fn probe(&self, credential: &Credential) -> Result<()> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.authorize(credential)
    }

    async fn list_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.authorize(credential)?;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(HomeboardError::connection("mock outage"));
        }
        Ok(self.devices.lock().expect("mock lock").clone())
    }

    async fn scan_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>> {
        self.authorize(credential)?;
        // Same rule the original backend simulates: even ids are online.
        let mut devices = self.devices.lock().expect("mock lock");
        for device in devices.iter_mut() {
            device.online = device.id % 2 == 0;
        }
        Ok(devices.clone())
    }

    async fn add_device(
        &self,
        credential: &Credential,
        device: &NewDevice,
    ) -> Result<DeviceRecord> {
        self.authorize(credential)?;
        let mut devices = self.devices.lock().expect("mock lock");
        if devices.iter().any(|d| d.mac == device.mac) {
            return Err(HomeboardError::api(
                400,
                "Device with this MAC address already exists",
            ));
        }
        let record = DeviceRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: device.name.clone(),
            mac: device.mac.clone(),
            manufacturer: None,
            online: false,
        };
        devices.push(record.clone());
        Ok(record)
    }

    async fn update_device(
        &self,
        credential: &Credential,
        id: u64,
        device: &NewDevice,
    ) -> Result<DeviceRecord> {
        self.authorize(credential)?;
        let mut devices = self.devices.lock().expect("mock lock");
        let Some(existing) = devices.iter_mut().find(|d| d.id == id) else {
            return Err(HomeboardError::api(404, "Device not found"));
        };
        existing.name = device.name.clone();
        existing.mac = device.mac.clone();
        Ok(existing.clone())
    }

    async fn delete_device(&self, credential: &Credential, id: u64) -> Result<()> {
        self.authorize(credential)?;
        let mut devices = self.devices.lock().expect("mock lock");
        let before = devices.len();
        devices.retain(|d| d.id != id);
        if devices.len() == before {
            return Err(HomeboardError::api(404, "Device not found"));
        }
        Ok(())
    }

    async fn network_stats(&self, credential: &Credential) -> Result<NetworkStats> {
        self.authorize(credential)?;
        let devices = self.devices.lock().expect("mock lock");
        let online = devices.iter().filter(|d| d.online).count() as u32;
        let total = devices.len() as u32;

        let mut by_manufacturer: HashMap<String, (u32, u32)> = HashMap::new();
        for device in devices.iter() {
            let name = device
                .manufacturer
                .clone()
                .unwrap_or_else(|| "Unknown".to_string());
            let entry = by_manufacturer.entry(name).or_insert((0, 0));
            entry.0 += 1;
            if device.online {
                entry.1 += 1;
            }
        }
        let mut manufacturers: Vec<ManufacturerStat> = by_manufacturer
            .into_iter()
            .map(|(name, (count, online))| ManufacturerStat {
                name,
                count,
                online,
            })
            .collect();
        manufacturers.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(NetworkStats {
            total_devices: total,
            online_devices: online,
            offline_devices: total - online,
            manufacturers,
        })
    }

    async fn update_credentials(
        &self,
        credential: &Credential,
        update: &CredentialUpdate,
    ) -> Result<()> {
        self.credential_update_calls.fetch_add(1, Ordering::SeqCst);
        self.authorize(credential)?;
        *self.accepted.lock().expect("mock lock") =
            (update.username.clone(), update.password.clone());
        Ok(())
    }
}
