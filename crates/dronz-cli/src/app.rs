//! One planning run for a single day.

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use dronz_core::{is_in_central_area, DeliveryPlanner, OrderStatus, OrderValidator};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::ResultWriter;
use crate::rest::DeliverySource;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub orders: usize,
    pub valid: usize,
    pub delivered: usize,
    pub searches: usize,
    pub files: Vec<PathBuf>,
}

/// Fetch, validate, plan and write the results for `date`.
pub fn run<S: DeliverySource>(source: &S, date: NaiveDate, config: &Config) -> Result<RunSummary> {
    let rules = config.flight_rules();

    ensure!(
        source.is_alive().context("Failed to reach the REST service")?,
        "REST service reports it is not alive"
    );

    let mut orders = source.orders(date).context("Failed to fetch orders")?;
    let restaurants = source.restaurants().context("Failed to fetch restaurants")?;
    let no_fly_zones = source.no_fly_zones().context("Failed to fetch no-fly zones")?;
    let central_area = source.central_area().context("Failed to fetch central area")?;

    ensure!(!restaurants.is_empty(), "No restaurant data: expected at least one restaurant");
    ensure!(!no_fly_zones.is_empty(), "No no-fly zone data: expected at least one zone");
    let base_in_central = is_in_central_area(rules.base, Some(&central_area), &rules)
        .context("Central area data is unusable")?;
    tracing::debug!(base_in_central, "central area checked");

    tracing::info!(%date, orders = orders.len(), "validating orders");
    let validator = OrderValidator::new(&rules);
    for order in orders.iter_mut() {
        let code = validator.validate(order, &restaurants);
        tracing::debug!(order_no = %order.order_no, ?code, "order validated");
    }
    let valid = orders
        .iter()
        .filter(|order| order.order_status == OrderStatus::ValidButNotDelivered)
        .count();

    tracing::info!(valid, "planning flight paths");
    let mut planner = DeliveryPlanner::new(rules, no_fly_zones);
    let flights = planner.plan_orders(&mut orders, &restaurants);

    let writer = ResultWriter::new(&config.output_dir)?;
    let files = vec![
        writer.write_deliveries(date, &orders)?,
        writer.write_flight_paths(date, &flights)?,
        writer.write_drone_geojson(date, &flights)?,
    ];

    let summary = RunSummary {
        orders: orders.len(),
        valid,
        delivered: flights.len(),
        searches: planner.searches_run(),
        files,
    };
    tracing::info!(
        orders = summary.orders,
        valid = summary.valid,
        delivered = summary.delivered,
        searches = summary.searches,
        "run complete"
    );
    Ok(summary)
}
