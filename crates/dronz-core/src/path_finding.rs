//! A* flight path search.
//!
//! The search graph is implicit: the neighbours of a position are the 16
//! positions one move away along the compass headings. Costs are distances
//! flown, the heuristic is the straight-line distance to the goal, and a
//! position counts as the goal once it is close to it.
//!
//! Positions are keyed by the exact bit pattern of their coordinates, so two
//! lattice points are the same node only when both components match exactly.
//! Frontier entries with equal `f` are popped in insertion order, which keeps
//! the returned path shape deterministic for a given input.

use crate::geometry::{distance, is_close, is_in_region, next_position, Heading};
use crate::models::{LngLat, NamedRegion};
use crate::rules::FlightRules;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Consecutive positions from a start to a point close to the goal.
pub type Path = Vec<LngLat>;

/// Result of a search together with how much work it did.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub nodes_expanded: usize,
}

impl SearchOutcome {
    fn failed(nodes_expanded: usize) -> Self {
        Self {
            path: None,
            nodes_expanded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PositionKey {
    lng_bits: u64,
    lat_bits: u64,
}

impl From<LngLat> for PositionKey {
    fn from(position: LngLat) -> Self {
        Self {
            lng_bits: position.lng.to_bits(),
            lat_bits: position.lat.to_bits(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    position: LngLat,
    f_score: FloatOrd,
    sequence: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.sequence == other.sequence
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Best known way of reaching a position.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g_score: f64,
    came_from: Option<LngLat>,
}

/// Find a shortest path from `start` to a position close to `goal` that never
/// touches a no-fly zone.
///
/// Returns `None` when either endpoint lies inside a zone, or no such path
/// exists within the reachable lattice (or within `rules.max_expansions`).
pub fn find_path(
    start: LngLat,
    goal: LngLat,
    no_fly_zones: &[NamedRegion],
    rules: &FlightRules,
) -> Option<Path> {
    search(start, goal, no_fly_zones, rules).path
}

/// [`find_path`], also reporting the number of expanded nodes.
pub fn search(
    start: LngLat,
    goal: LngLat,
    no_fly_zones: &[NamedRegion],
    rules: &FlightRules,
) -> SearchOutcome {
    if !start.is_finite() || !goal.is_finite() {
        tracing::warn!(?start, ?goal, "refusing to search with non-finite endpoints");
        return SearchOutcome::failed(0);
    }
    if in_no_fly_zone(start, no_fly_zones) || in_no_fly_zone(goal, no_fly_zones) {
        tracing::debug!(?start, ?goal, "endpoint lies inside a no-fly zone");
        return SearchOutcome::failed(0);
    }

    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut closed_set: HashSet<PositionKey> = HashSet::new();
    let mut nodes: HashMap<PositionKey, SearchNode> = HashMap::new();
    let mut sequence = 0u64;
    let mut nodes_expanded = 0usize;

    nodes.insert(
        start.into(),
        SearchNode {
            g_score: 0.0,
            came_from: None,
        },
    );
    open_set.push(Reverse(OpenNode {
        position: start,
        f_score: FloatOrd(distance(start, goal)),
        sequence,
    }));

    while let Some(Reverse(current)) = open_set.pop() {
        let current_key = PositionKey::from(current.position);
        if closed_set.contains(&current_key) {
            continue;
        }

        if is_close(current.position, goal, rules) {
            let path = reconstruct_path(&nodes, current.position);
            tracing::debug!(
                nodes_expanded,
                moves = path.len().saturating_sub(1),
                "flight path found"
            );
            return SearchOutcome {
                path: Some(path),
                nodes_expanded,
            };
        }

        if rules
            .max_expansions
            .is_some_and(|limit| nodes_expanded >= limit)
        {
            tracing::warn!(nodes_expanded, "search expansion budget exhausted");
            return SearchOutcome::failed(nodes_expanded);
        }

        closed_set.insert(current_key);
        nodes_expanded += 1;
        let current_g = nodes
            .get(&current_key)
            .map(|node| node.g_score)
            .unwrap_or(0.0);

        for heading in Heading::COMPASS {
            let neighbour = next_position(current.position, heading, rules);
            let neighbour_key = PositionKey::from(neighbour);
            if closed_set.contains(&neighbour_key) || in_no_fly_zone(neighbour, no_fly_zones) {
                continue;
            }

            let tentative_g = current_g + distance(current.position, neighbour);
            let improves = nodes
                .get(&neighbour_key)
                .map_or(true, |known| tentative_g < known.g_score);
            if !improves {
                continue;
            }

            nodes.insert(
                neighbour_key,
                SearchNode {
                    g_score: tentative_g,
                    came_from: Some(current.position),
                },
            );
            sequence += 1;
            open_set.push(Reverse(OpenNode {
                position: neighbour,
                f_score: FloatOrd(tentative_g + distance(neighbour, goal)),
                sequence,
            }));
        }
    }

    tracing::debug!(nodes_expanded, "no flight path found");
    SearchOutcome::failed(nodes_expanded)
}

fn in_no_fly_zone(position: LngLat, no_fly_zones: &[NamedRegion]) -> bool {
    no_fly_zones
        .iter()
        .any(|zone| is_in_region(position, zone))
}

fn reconstruct_path(nodes: &HashMap<PositionKey, SearchNode>, end: LngLat) -> Path {
    let mut path = vec![end];
    let mut current = end;
    while let Some(previous) = nodes
        .get(&PositionKey::from(current))
        .and_then(|node| node.came_from)
    {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
