//! Planar geometry over longitude/latitude pairs.
//!
//! Positions are treated as points on a flat plane: distances are measured in
//! degrees, not meters, and headings are counter-clockwise from east.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::models::{LngLat, NamedRegion};
use crate::rules::FlightRules;

/// Angle reported for a move that stays in place.
pub const HOVER_ANGLE: f64 = 999.0;

/// The directions the drone may fly in, 22.5° apart, plus hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    East,
    EastNorthEast,
    NorthEast,
    NorthNorthEast,
    North,
    NorthNorthWest,
    NorthWest,
    WestNorthWest,
    West,
    WestSouthWest,
    SouthWest,
    SouthSouthWest,
    South,
    SouthSouthEast,
    SouthEast,
    EastSouthEast,
    Hover,
}

impl Heading {
    /// Every heading that actually moves the drone, in increasing angle.
    pub const COMPASS: [Heading; 16] = [
        Heading::East,
        Heading::EastNorthEast,
        Heading::NorthEast,
        Heading::NorthNorthEast,
        Heading::North,
        Heading::NorthNorthWest,
        Heading::NorthWest,
        Heading::WestNorthWest,
        Heading::West,
        Heading::WestSouthWest,
        Heading::SouthWest,
        Heading::SouthSouthWest,
        Heading::South,
        Heading::SouthSouthEast,
        Heading::SouthEast,
        Heading::EastSouthEast,
    ];

    /// Angle in degrees; `HOVER_ANGLE` for [`Heading::Hover`].
    pub fn degrees(self) -> f64 {
        match self {
            Heading::Hover => HOVER_ANGLE,
            compass => 22.5 * compass as u8 as f64,
        }
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: LngLat, b: LngLat) -> f64 {
    let d_lng = a.lng - b.lng;
    let d_lat = a.lat - b.lat;
    (d_lng * d_lng + d_lat * d_lat).sqrt()
}

/// Whether `b` is within `rules.close_distance` of `a`.
pub fn is_close(a: LngLat, b: LngLat, rules: &FlightRules) -> bool {
    distance(a, b) <= rules.close_distance
}

/// Point-in-polygon test by ray casting, border inclusive.
///
/// Vertices and points lying exactly on an edge count as inside. Edges of
/// equal latitude never count as a crossing of the eastward ray.
pub fn is_in_region(point: LngLat, region: &NamedRegion) -> bool {
    let vertices = region.vertices();
    let n = vertices.len();
    let mut crossings = 0usize;

    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];

        if point == p1 || point == p2 || lies_on_edge(point, p1, p2) {
            return true;
        }

        if p1.lat == p2.lat {
            continue;
        }

        if point.lat > p1.lat.min(p2.lat)
            && point.lat <= p1.lat.max(p2.lat)
            && point.lng <= p1.lng.max(p2.lng)
        {
            let lng_intersect = (point.lat - p1.lat) * (p2.lng - p1.lng) / (p2.lat - p1.lat) + p1.lng;
            if p1.lng == p2.lng || point.lng <= lng_intersect {
                crossings += 1;
            }
        }
    }

    crossings % 2 == 1
}

fn lies_on_edge(point: LngLat, a: LngLat, b: LngLat) -> bool {
    let cross = (b.lng - a.lng) * (point.lat - a.lat) - (b.lat - a.lat) * (point.lng - a.lng);
    cross == 0.0
        && point.lng >= a.lng.min(b.lng)
        && point.lng <= a.lng.max(b.lng)
        && point.lat >= a.lat.min(b.lat)
        && point.lat <= a.lat.max(b.lat)
}

/// [`is_in_region`] for the central area, guarding the caller contract that
/// the region handed in really is the central area.
pub fn is_in_central_area(
    point: LngLat,
    central_area: Option<&NamedRegion>,
    rules: &FlightRules,
) -> Result<bool, GeometryError> {
    let region = central_area.ok_or(GeometryError::MissingRegion)?;
    if region.name() != rules.central_region_name {
        return Err(GeometryError::NotCentralArea {
            found: region.name().to_string(),
            expected: rules.central_region_name.clone(),
        });
    }
    Ok(is_in_region(point, region))
}

/// Position reached by flying one move along `heading`.
pub fn next_position(position: LngLat, heading: Heading, rules: &FlightRules) -> LngLat {
    if heading == Heading::Hover {
        return position;
    }
    let radians = heading.degrees().to_radians();
    LngLat {
        lng: position.lng + rules.move_distance * radians.cos(),
        lat: position.lat + rules.move_distance * radians.sin(),
    }
}

/// Direction of travel from `from` to `to`, in degrees within `[0, 360)`,
/// rounded to two decimals. Identical positions yield [`HOVER_ANGLE`].
pub fn angle_between(from: LngLat, to: LngLat) -> f64 {
    if from == to {
        return HOVER_ANGLE;
    }
    let mut angle = (to.lat - from.lat).atan2(to.lng - from.lng).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    let rounded = (angle * 100.0).round() / 100.0;
    if rounded >= 360.0 {
        0.0
    } else {
        rounded
    }
}
