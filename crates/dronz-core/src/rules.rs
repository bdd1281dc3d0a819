//! Fixed system parameters for flight planning and order validation.

use serde::{Deserialize, Serialize};

use crate::models::LngLat;

/// Appleton Tower, where every delivery starts and ends.
pub const APPLETON_TOWER: LngLat = LngLat::new(-3.186874, 55.944494);

/// Configuration shared by the search, the assembler and the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRules {
    /// Length of one move, in degrees
    pub move_distance: f64,
    /// Distance at which a position counts as having reached its target
    pub close_distance: f64,
    /// Where the drone takes off and lands
    pub base: LngLat,
    /// Name the central area region must carry
    pub central_region_name: String,
    pub max_pizzas_per_order: usize,
    /// Fixed delivery charge added to every order total
    pub order_charge_in_pence: i64,
    /// Upper bound on expanded search nodes (`None` = search until the frontier empties)
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            move_distance: 0.00015,
            close_distance: 0.00015,
            base: APPLETON_TOWER,
            central_region_name: "central".to_string(),
            max_pizzas_per_order: 4,
            order_charge_in_pence: 100,
            max_expansions: None,
        }
    }
}
