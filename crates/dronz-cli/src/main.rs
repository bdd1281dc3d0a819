//! Plan a day of PizzaDronz deliveries.
//!
//! Usage: dronz 2023-09-01 https://example.org/ilp

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use dronz_cli::{run, Config, RestClient};
use reqwest::Url;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate a day's orders and write their delivery flight paths
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Order date (YYYY-MM-DD)
    date: NaiveDate,

    /// Base URL of the REST service
    #[arg(value_parser = parse_service_url)]
    url: String,
}

fn parse_service_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("expected an http or https URL, got scheme `{other}`")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("dronz=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    tracing::info!(date = %args.date, url = %args.url, "processing orders");

    let client = RestClient::new(&args.url, config.http_timeout)?;
    let summary = run(&client, args.date, &config)?;

    println!(
        "Delivered {} of {} orders ({} valid), results in {}",
        summary.delivered,
        summary.orders,
        summary.valid,
        config.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_date_and_http_url() {
        let args = Args::try_parse_from(["dronz", "2023-09-01", "https://example.org/ilp"]).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());
        assert_eq!(args.url, "https://example.org/ilp");
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Args::try_parse_from(["dronz", "01/09/2023", "https://example.org"]).is_err());
        assert!(Args::try_parse_from(["dronz", "2023-09-01", "ftp://example.org"]).is_err());
        assert!(Args::try_parse_from(["dronz", "2023-09-01", "not a url"]).is_err());
        assert!(Args::try_parse_from(["dronz", "2023-09-01"]).is_err());
    }
}
