//! Delivery planning for a day's orders.
//!
//! Every restaurant is searched for at most once per planner; later orders
//! for the same restaurant reuse the stored round trip.

use std::collections::HashMap;

use crate::assembly::{assemble, RoundTripPath};
use crate::models::{NamedRegion, Order, OrderStatus, Restaurant};
use crate::path_finding::search;
use crate::rules::FlightRules;
use crate::validation::supplying_restaurant;

/// The round trip flown for one delivered order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlight {
    pub order_no: String,
    pub path: RoundTripPath,
}

pub struct DeliveryPlanner {
    rules: FlightRules,
    no_fly_zones: Vec<NamedRegion>,
    round_trips: HashMap<String, Option<RoundTripPath>>,
    searches: usize,
}

impl DeliveryPlanner {
    pub fn new(rules: FlightRules, no_fly_zones: Vec<NamedRegion>) -> Self {
        Self {
            rules,
            no_fly_zones,
            round_trips: HashMap::new(),
            searches: 0,
        }
    }

    /// Round trip from the base to `restaurant` and back, or `None` when no
    /// path exists. Keyed by restaurant name.
    #[tracing::instrument(skip(self, restaurant), fields(restaurant = %restaurant.name))]
    pub fn round_trip_to(&mut self, restaurant: &Restaurant) -> Option<&RoundTripPath> {
        if !self.round_trips.contains_key(&restaurant.name) {
            self.searches += 1;
            let outcome = search(
                self.rules.base,
                restaurant.location,
                &self.no_fly_zones,
                &self.rules,
            );
            tracing::info!(
                nodes_expanded = outcome.nodes_expanded,
                found = outcome.path.is_some(),
                "searched for restaurant flight path"
            );
            self.round_trips
                .insert(restaurant.name.clone(), assemble(outcome.path));
        }

        self.round_trips
            .get(&restaurant.name)
            .and_then(Option::as_ref)
    }

    /// Fly every valid order, marking it delivered when a path exists.
    ///
    /// Orders that are not `ValidButNotDelivered` are skipped. Valid orders
    /// whose restaurant cannot be reached keep their status.
    pub fn plan_orders(
        &mut self,
        orders: &mut [Order],
        restaurants: &[Restaurant],
    ) -> Vec<OrderFlight> {
        let mut flights = Vec::new();

        for order in orders
            .iter_mut()
            .filter(|order| order.order_status == OrderStatus::ValidButNotDelivered)
        {
            let Some(restaurant) = supplying_restaurant(&order.pizzas_in_order, restaurants) else {
                tracing::warn!(order_no = %order.order_no, "valid order has no supplying restaurant");
                continue;
            };

            match self.round_trip_to(restaurant) {
                Some(path) => {
                    let path = path.clone();
                    order.order_status = OrderStatus::Delivered;
                    flights.push(OrderFlight {
                        order_no: order.order_no.clone(),
                        path,
                    });
                }
                None => {
                    tracing::warn!(
                        order_no = %order.order_no,
                        restaurant = %restaurant.name,
                        "no flight path to restaurant"
                    );
                }
            }
        }

        flights
    }

    /// Number of searches actually run.
    pub fn searches_run(&self) -> usize {
        self.searches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreditCardInformation, DayOfWeek, LngLat, OrderValidationCode, Pizza};
    use chrono::NaiveDate;

    fn rules() -> FlightRules {
        FlightRules {
            move_distance: 1.0,
            close_distance: 1.0,
            base: LngLat::new(0.0, 0.0),
            ..FlightRules::default()
        }
    }

    fn restaurant(name: &str, location: LngLat, pizza: &str) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            location,
            opening_days: vec![DayOfWeek::Friday],
            menu: vec![Pizza {
                name: pizza.to_string(),
                price_in_pence: 1000,
            }],
        }
    }

    fn order(order_no: &str, pizza: &str, status: OrderStatus) -> Order {
        Order {
            order_no: order_no.to_string(),
            order_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            order_status: status,
            order_validation_code: OrderValidationCode::NoError,
            price_total_in_pence: 1100,
            pizzas_in_order: vec![Pizza {
                name: pizza.to_string(),
                price_in_pence: 1000,
            }],
            credit_card_information: CreditCardInformation::default(),
        }
    }

    fn walled_off() -> NamedRegion {
        NamedRegion::new(
            "wall",
            vec![
                LngLat::new(-4.0, 2.0),
                LngLat::new(-2.0, 2.0),
                LngLat::new(-2.0, 4.0),
                LngLat::new(-4.0, 4.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn each_restaurant_is_searched_once() {
        let restaurants = vec![
            restaurant("East", LngLat::new(4.0, 0.0), "E1"),
            restaurant("North", LngLat::new(0.0, 5.0), "N1"),
        ];
        let mut orders = vec![
            order("A", "E1", OrderStatus::ValidButNotDelivered),
            order("B", "N1", OrderStatus::ValidButNotDelivered),
            order("C", "E1", OrderStatus::ValidButNotDelivered),
            order("D", "E1", OrderStatus::ValidButNotDelivered),
        ];

        let mut planner = DeliveryPlanner::new(rules(), Vec::new());
        let flights = planner.plan_orders(&mut orders, &restaurants);

        assert_eq!(planner.searches_run(), 2);
        assert_eq!(flights.len(), 4);
        assert!(orders.iter().all(|o| o.order_status == OrderStatus::Delivered));
        assert_eq!(flights[0].path, flights[2].path);
        assert_eq!(flights[0].path.hover_point(), LngLat::new(0.0, 0.0));
    }

    #[test]
    fn invalid_orders_are_not_flown() {
        let restaurants = vec![restaurant("East", LngLat::new(4.0, 0.0), "E1")];
        let mut orders = vec![
            order("A", "E1", OrderStatus::Invalid),
            order("B", "E1", OrderStatus::ValidButNotDelivered),
        ];

        let mut planner = DeliveryPlanner::new(rules(), Vec::new());
        let flights = planner.plan_orders(&mut orders, &restaurants);

        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].order_no, "B");
        assert_eq!(orders[0].order_status, OrderStatus::Invalid);
    }

    #[test]
    fn unreachable_restaurant_is_remembered() {
        // The restaurant sits inside a no-fly zone, so the search fails at once.
        let restaurants = vec![restaurant("Walled", LngLat::new(-3.0, 3.0), "W1")];
        let mut orders = vec![
            order("A", "W1", OrderStatus::ValidButNotDelivered),
            order("B", "W1", OrderStatus::ValidButNotDelivered),
        ];

        let mut planner = DeliveryPlanner::new(rules(), vec![walled_off()]);
        let flights = planner.plan_orders(&mut orders, &restaurants);

        assert!(flights.is_empty());
        assert_eq!(planner.searches_run(), 1);
        assert!(orders
            .iter()
            .all(|o| o.order_status == OrderStatus::ValidButNotDelivered));
    }

    #[test]
    fn round_trip_to_returns_stored_path() {
        let east = restaurant("East", LngLat::new(3.0, 0.0), "E1");
        let mut planner = DeliveryPlanner::new(rules(), Vec::new());

        let first = planner.round_trip_to(&east).cloned().unwrap();
        let second = planner.round_trip_to(&east).cloned().unwrap();

        assert_eq!(first, second);
        assert_eq!(planner.searches_run(), 1);
        // Two moves east end within one unit of (3, 0).
        assert_eq!(first.outbound().len(), 3);
    }
}
