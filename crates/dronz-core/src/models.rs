//! Core data models for the delivery system.
//!
//! Field names follow the camelCase layout served by the order/restaurant REST API.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A position as a longitude/latitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

/// A named polygon. The vertex ring is implicitly closed.
///
/// Construction rejects rings with fewer than 3 vertices or with non-finite
/// coordinates, so every `NamedRegion` in circulation is usable by the
/// containment test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct NamedRegion {
    name: String,
    vertices: Vec<LngLat>,
}

#[derive(Deserialize)]
struct RawRegion {
    name: String,
    vertices: Vec<LngLat>,
}

impl TryFrom<RawRegion> for NamedRegion {
    type Error = GeometryError;

    fn try_from(raw: RawRegion) -> Result<Self, Self::Error> {
        NamedRegion::new(raw.name, raw.vertices)
    }
}

impl NamedRegion {
    pub fn new(name: impl Into<String>, vertices: Vec<LngLat>) -> Result<Self, GeometryError> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(GeometryError::DegenerateRegion {
                name,
                count: vertices.len(),
            });
        }
        if let Some(index) = vertices.iter().position(|vertex| !vertex.is_finite()) {
            return Err(GeometryError::NonFiniteVertex { name, index });
        }
        Ok(Self { name, vertices })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[LngLat] {
        &self.vertices
    }
}

/// Day of the week as spelled by the REST API (`MONDAY` .. `SUNDAY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub name: String,
    pub price_in_pence: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub location: LngLat,
    #[serde(default)]
    pub opening_days: Vec<DayOfWeek>,
    #[serde(default)]
    pub menu: Vec<Pizza>,
}

impl Restaurant {
    /// Whether a pizza of this name is on the menu.
    pub fn serves(&self, pizza_name: &str) -> bool {
        self.menu.iter().any(|item| item.name == pizza_name)
    }

    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.opening_days.contains(&DayOfWeek::from(date.weekday()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Undefined,
    Invalid,
    ValidButNotDelivered,
    Delivered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderValidationCode {
    #[default]
    Undefined,
    CardNumberInvalid,
    ExpiryDateInvalid,
    CvvInvalid,
    TotalIncorrect,
    PizzaNotDefined,
    MaxPizzaCountExceeded,
    PizzaFromMultipleRestaurants,
    RestaurantClosed,
    NoError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInformation {
    #[serde(default)]
    pub credit_card_number: Option<String>,
    /// `MM/YY`
    #[serde(default)]
    pub credit_card_expiry: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_no: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub order_validation_code: OrderValidationCode,
    pub price_total_in_pence: i64,
    #[serde(default)]
    pub pizzas_in_order: Vec<Pizza>,
    #[serde(default)]
    pub credit_card_information: CreditCardInformation,
}
