//! HTTP client for the PizzaDronz REST service.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dronz_core::{NamedRegion, Order, Restaurant};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Where a planning run gets its orders and map data from.
pub trait DeliverySource {
    fn is_alive(&self) -> Result<bool>;
    fn orders(&self, date: NaiveDate) -> Result<Vec<Order>>;
    fn restaurants(&self) -> Result<Vec<Restaurant>>;
    fn no_fly_zones(&self) -> Result<Vec<NamedRegion>>;
    fn central_area(&self) -> Result<NamedRegion>;
}

pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for the service at `base_url` (e.g. "https://example.org/ilp").
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "fetching");
        self.client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to request {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected status from {url}"))?
            .json()
            .with_context(|| format!("Failed to decode response from {url}"))
    }
}

impl DeliverySource for RestClient {
    fn is_alive(&self) -> Result<bool> {
        let url = format!("{}/isAlive", self.base_url);
        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to request {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected status from {url}"))?
            .text()
            .with_context(|| format!("Failed to read response from {url}"))?;
        Ok(body.trim().eq_ignore_ascii_case("true"))
    }

    fn orders(&self, date: NaiveDate) -> Result<Vec<Order>> {
        self.get_json(&format!("orders/{}", date.format("%Y-%m-%d")))
    }

    fn restaurants(&self) -> Result<Vec<Restaurant>> {
        self.get_json("restaurants")
    }

    fn no_fly_zones(&self) -> Result<Vec<NamedRegion>> {
        self.get_json("noFlyZones")
    }

    fn central_area(&self) -> Result<NamedRegion> {
        self.get_json("centralArea")
    }
}
