//! reqwest-backed service clients
//!
//! Thin HTTP implementations of [`PricesApi`] and [`DevicesApi`]. Non-2xx
//! responses are mapped to [`HomeboardError::Api`] carrying the server's
//! `detail` message when the body provides one; 401 becomes an
//! authentication error so callers can tell rejected credentials from
//! transport failures.

use crate::auth::Credential;
use crate::client::{DevicesApi, PricesApi};
use crate::config::ClientConfig;
use crate::error::{HomeboardError, Result};
use crate::models::{
    ApiErrorBody, AvailableDates, CredentialUpdate, DeviceList, DeviceRecord, LoginRequest,
    NetworkStats, NewDevice, PriceDay,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

fn build_http(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .danger_accept_invalid_certs(!config.verify_tls)
        .build()
        .map_err(HomeboardError::from)
}

fn endpoint(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Convert a non-2xx response into an error, preferring the body `detail`
async fn error_from_response(response: Response) -> HomeboardError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return HomeboardError::authentication("Invalid credentials");
    }
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    HomeboardError::api(status.as_u16(), message)
}

/// HTTP client for the spot price service
pub struct HttpPricesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPricesClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.prices_base_url.clone(),
        })
    }
}

#[async_trait]
impl PricesApi for HttpPricesClient {
    async fn available_dates(&self) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, "prices/available-dates");
        debug!("fetching available dates from {url}");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let body: AvailableDates = response.json().await?;
        debug!("received {} available dates", body.dates.len());
        Ok(body.dates)
    }

    async fn prices_for_date(&self, date: NaiveDate) -> Result<PriceDay> {
        let url = endpoint(
            &self.base_url,
            &format!("prices/date/{}", date.format("%Y-%m-%d")),
        );
        debug!("fetching prices from {url}");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }
}

/// HTTP client for the device inventory service
pub struct HttpDevicesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDevicesClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.devices_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

#[async_trait]
impl DevicesApi for HttpDevicesClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        debug!("logging in as {username}");
        let response = self.http.post(self.url("login")).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn probe(&self, credential: &Credential) -> Result<()> {
        debug!("probing credentials via device collection");
        let response = self
            .http
            .get(self.url("devices"))
            .header(AUTHORIZATION, credential.authorization_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn list_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>> {
        let response = self
            .http
            .get(self.url("devices"))
            .header(AUTHORIZATION, credential.authorization_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let body: DeviceList = response.json().await?;
        debug!("received {} devices", body.devices.len());
        Ok(body.devices)
    }

    async fn scan_devices(&self, credential: &Credential) -> Result<Vec<DeviceRecord>> {
        let response = self
            .http
            .get(self.url("devices/scan"))
            .header(AUTHORIZATION, credential.authorization_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        // The scan endpoint returns a bare array, unlike the collection
        Ok(response.json().await?)
    }

    async fn add_device(
        &self,
        credential: &Credential,
        device: &NewDevice,
    ) -> Result<DeviceRecord> {
        debug!("adding device {}", device.name);
        let response = self
            .http
            .post(self.url("devices"))
            .header(AUTHORIZATION, credential.authorization_value())
            .json(device)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_device(
        &self,
        credential: &Credential,
        id: u64,
        device: &NewDevice,
    ) -> Result<DeviceRecord> {
        debug!("updating device {id}");
        let response = self
            .http
            .put(self.url(&format!("devices/{id}")))
            .header(AUTHORIZATION, credential.authorization_value())
            .json(device)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn delete_device(&self, credential: &Credential, id: u64) -> Result<()> {
        debug!("deleting device {id}");
        let response = self
            .http
            .delete(self.url(&format!("devices/{id}")))
            .header(AUTHORIZATION, credential.authorization_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn network_stats(&self, credential: &Credential) -> Result<NetworkStats> {
        let response = self
            .http
            .get(self.url("network-stats"))
            .header(AUTHORIZATION, credential.authorization_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_credentials(
        &self,
        credential: &Credential,
        update: &CredentialUpdate,
    ) -> Result<()> {
        debug!("rotating credentials for {}", update.username);
        let response = self
            .http
            .put(self.url("credentials"))
            .header(AUTHORIZATION, credential.authorization_value())
            .json(update)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
