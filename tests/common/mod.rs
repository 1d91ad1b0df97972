//! WireMock-based Homeboard API mocking infrastructure
//!
//! Mock HTTP servers simulating the spot price service and the device
//! inventory service, so the reqwest-backed clients can be tested without
//! real backends.

#![allow(dead_code)]

use homeboard_client::ClientConfig;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Basic-auth header value for the default admin:admin pair
pub const ADMIN_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

/// Build a 24-hour price day body with a flat price
pub fn flat_day_body(date: &str, price: f64) -> Value {
    let prices: Vec<Value> = (0..24)
        .map(|hour| json!({ "hour": hour, "price": price, "price_kwh": price / 10.0 }))
        .collect();
    json!({
        "date": date,
        "source": "nordpool",
        "min_price": price,
        "max_price": price,
        "avg_price": price,
        "prices": prices,
    })
}

/// Mock spot price service
pub struct MockPriceServer {
    pub server: MockServer,
}

impl MockPriceServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub async fn mock_available_dates(&self, dates: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/prices/available-dates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dates": dates })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_day(&self, date: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/prices/date/{date}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_day_error(&self, date: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/prices/date/{date}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// Mock device inventory service
pub struct MockDeviceServer {
    pub server: MockServer,
}

impl MockDeviceServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub async fn mock_login_ok(&self) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login_rejected(&self) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&self.server)
            .await;
    }

    /// Device collection for the default admin credential
    pub async fn mock_devices(&self, devices: Value) {
        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(header("authorization", ADMIN_AUTH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })),
            )
            .mount(&self.server)
            .await;
    }

    /// Collection endpoint rejecting every credential
    pub async fn mock_devices_unauthorized(&self) {
        Mock::given(method("GET"))
            .and(path("/devices"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_stats(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/network-stats"))
            .and(header("authorization", ADMIN_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

/// Configuration pointing both clients at the mock servers
pub fn config_for(prices: &MockPriceServer, devices: &MockDeviceServer) -> ClientConfig {
    ClientConfig::new(
        Url::parse(&prices.server.uri()).expect("mock server uri"),
        Url::parse(&devices.server.uri()).expect("mock server uri"),
    )
}

/// Configuration for price-only tests
pub fn prices_config(prices: &MockPriceServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.prices_base_url = Url::parse(&prices.server.uri()).expect("mock server uri");
    config
}

/// Configuration for device-only tests
pub fn devices_config(devices: &MockDeviceServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.devices_base_url = Url::parse(&devices.server.uri()).expect("mock server uri");
    config
}
