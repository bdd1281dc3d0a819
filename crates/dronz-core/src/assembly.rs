//! Turning a one-way flight path into a full delivery round trip.

use crate::models::LngLat;
use crate::path_finding::Path;

/// Outbound path, the same path flown back, and a final hover over the start.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripPath {
    positions: Vec<LngLat>,
    outbound_len: usize,
}

impl RoundTripPath {
    /// Every position of the trip in flying order.
    pub fn positions(&self) -> &[LngLat] {
        &self.positions
    }

    /// The base-to-destination leg.
    pub fn outbound(&self) -> &[LngLat] {
        &self.positions[..self.outbound_len]
    }

    /// The position the trip ends hovering at (the start of the outbound leg).
    pub fn hover_point(&self) -> LngLat {
        self.positions[self.positions.len() - 1]
    }

    /// Consecutive `(from, to)` pairs, one per move or hover.
    pub fn moves(&self) -> impl Iterator<Item = (LngLat, LngLat)> + '_ {
        self.positions.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Build the round trip for an outbound path.
///
/// A missing path stays missing. An empty path has no start to return to and
/// is treated the same way.
pub fn assemble(outbound: Option<Path>) -> Option<RoundTripPath> {
    let outbound = outbound?;
    let start = *outbound.first()?;
    let outbound_len = outbound.len();

    let mut positions = Vec::with_capacity(outbound_len * 2 + 1);
    positions.extend_from_slice(&outbound);
    positions.extend(outbound.iter().rev().copied());
    positions.push(start);

    Some(RoundTripPath {
        positions,
        outbound_len,
    })
}
