//! PizzaDronz delivery planner.
//!
//! Fetches a day's orders and map data from the REST service, validates the
//! orders, plans a round trip for each deliverable one and writes the result
//! files.

pub mod app;
pub mod config;
pub mod output;
pub mod rest;

pub use app::{run, RunSummary};
pub use config::Config;
pub use rest::{DeliverySource, RestClient};
