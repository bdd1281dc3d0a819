//! Result files written at the end of a run.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dronz_core::{angle_between, Order, OrderFlight, OrderStatus, OrderValidationCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// One entry of `deliveries-{date}.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub order_no: String,
    pub order_status: OrderStatus,
    pub order_validation_code: OrderValidationCode,
    pub cost_in_pence: i64,
}

impl From<&Order> for DeliveryRecord {
    fn from(order: &Order) -> Self {
        Self {
            order_no: order.order_no.clone(),
            order_status: order.order_status,
            order_validation_code: order.order_validation_code,
            cost_in_pence: order.price_total_in_pence,
        }
    }
}

/// One move of a delivered order, as written to `flightpath-{date}.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPathRecord {
    pub order_no: String,
    pub from_longitude: f64,
    pub from_latitude: f64,
    pub angle: f64,
    pub to_longitude: f64,
    pub to_latitude: f64,
}

pub fn flight_path_records(flights: &[OrderFlight]) -> Vec<FlightPathRecord> {
    flights
        .iter()
        .flat_map(|flight| {
            flight.path.moves().map(|(from, to)| FlightPathRecord {
                order_no: flight.order_no.clone(),
                from_longitude: from.lng,
                from_latitude: from.lat,
                angle: angle_between(from, to),
                to_longitude: to.lng,
                to_latitude: to.lat,
            })
        })
        .collect()
}

/// All delivered round trips as a single GeoJSON line.
pub fn drone_geojson(flights: &[OrderFlight]) -> Value {
    if flights.is_empty() {
        return json!({ "type": "FeatureCollection", "features": [] });
    }

    let coordinates: Vec<[f64; 2]> = flights
        .iter()
        .flat_map(|flight| flight.path.positions().iter().map(|p| [p.lng, p.lat]))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        }],
    })
}

/// Writes the three result files of a day into one directory.
pub struct ResultWriter {
    dir: PathBuf,
}

impl ResultWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn write_deliveries(&self, date: NaiveDate, orders: &[Order]) -> Result<PathBuf> {
        let records: Vec<DeliveryRecord> = orders.iter().map(DeliveryRecord::from).collect();
        self.write_json(&format!("deliveries-{date}.json"), &records)
    }

    pub fn write_flight_paths(&self, date: NaiveDate, flights: &[OrderFlight]) -> Result<PathBuf> {
        self.write_json(
            &format!("flightpath-{date}.json"),
            &flight_path_records(flights),
        )
    }

    pub fn write_drone_geojson(&self, date: NaiveDate, flights: &[OrderFlight]) -> Result<PathBuf> {
        self.write_json(&format!("drone-{date}.geojson"), &drone_geojson(flights))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote result file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronz_core::{assemble, CreditCardInformation, LngLat, HOVER_ANGLE};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()
    }

    fn flight(order_no: &str) -> OrderFlight {
        let outbound = vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(1.0, 1.0),
        ];
        OrderFlight {
            order_no: order_no.to_string(),
            path: assemble(Some(outbound)).unwrap(),
        }
    }

    fn order(order_no: &str, status: OrderStatus, code: OrderValidationCode) -> Order {
        Order {
            order_no: order_no.to_string(),
            order_date: date(),
            order_status: status,
            order_validation_code: code,
            price_total_in_pence: 2500,
            pizzas_in_order: Vec::new(),
            credit_card_information: CreditCardInformation::default(),
        }
    }

    #[test]
    fn flight_path_has_one_record_per_move() {
        let records = flight_path_records(&[flight("A"), flight("B")]);
        // Seven positions per round trip, six moves each.
        assert_eq!(records.len(), 12);
        assert!(records[..6].iter().all(|r| r.order_no == "A"));

        assert_eq!(records[0].angle, 0.0);
        assert_eq!(records[1].angle, 90.0);
        assert_eq!(records[2].angle, HOVER_ANGLE);
        assert_eq!(records[3].angle, 270.0);
        assert_eq!(records[4].angle, 180.0);
        assert_eq!(records[5].angle, HOVER_ANGLE);
        assert_eq!(records[5].to_longitude, 0.0);
    }

    #[test]
    fn flight_path_records_use_camel_case() {
        let value = serde_json::to_value(&flight_path_records(&[flight("A")])[0]).unwrap();
        assert_eq!(value["orderNo"], "A");
        assert_eq!(value["fromLongitude"], 0.0);
        assert_eq!(value["toLongitude"], 1.0);
        assert_eq!(value["angle"], 0.0);
    }

    #[test]
    fn geojson_concatenates_all_trips() {
        let value = drone_geojson(&[flight("A"), flight("B")]);
        assert_eq!(value["type"], "FeatureCollection");
        let coordinates = value["features"][0]["geometry"]["coordinates"]
            .as_array()
            .unwrap();
        assert_eq!(coordinates.len(), 14);
        assert_eq!(coordinates[2], json!([1.0, 1.0]));
    }

    #[test]
    fn geojson_without_flights_has_no_features() {
        let value = drone_geojson(&[]);
        assert_eq!(value, json!({ "type": "FeatureCollection", "features": [] }));
    }

    #[test]
    fn writer_creates_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("resultfiles")).unwrap();
        let orders = vec![
            order("A", OrderStatus::Delivered, OrderValidationCode::NoError),
            order("B", OrderStatus::Invalid, OrderValidationCode::CvvInvalid),
        ];
        let flights = vec![flight("A")];

        let deliveries = writer.write_deliveries(date(), &orders).unwrap();
        let paths = writer.write_flight_paths(date(), &flights).unwrap();
        let geojson = writer.write_drone_geojson(date(), &flights).unwrap();

        assert!(deliveries.ends_with("deliveries-2023-09-01.json"));
        assert!(paths.ends_with("flightpath-2023-09-01.json"));
        assert!(geojson.ends_with("drone-2023-09-01.geojson"));

        let written: Value = serde_json::from_str(&fs::read_to_string(deliveries).unwrap()).unwrap();
        assert_eq!(
            written,
            json!([
                {
                    "orderNo": "A",
                    "orderStatus": "DELIVERED",
                    "orderValidationCode": "NO_ERROR",
                    "costInPence": 2500
                },
                {
                    "orderNo": "B",
                    "orderStatus": "INVALID",
                    "orderValidationCode": "CVV_INVALID",
                    "costInPence": 2500
                }
            ])
        );
    }
}
