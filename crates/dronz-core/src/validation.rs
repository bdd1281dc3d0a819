//! Order validation.
//!
//! Checks run in a fixed order and the first failure decides the validation
//! code, so an order with several problems always reports the same one.

use chrono::{Datelike, NaiveDate};

use crate::models::{Order, OrderStatus, OrderValidationCode, Pizza, Restaurant};
use crate::rules::FlightRules;

#[derive(Debug, Clone)]
pub struct OrderValidator {
    max_pizzas_per_order: usize,
    order_charge_in_pence: i64,
}

impl OrderValidator {
    pub fn new(rules: &FlightRules) -> Self {
        Self {
            max_pizzas_per_order: rules.max_pizzas_per_order,
            order_charge_in_pence: rules.order_charge_in_pence,
        }
    }

    /// Validate `order` against the known restaurants, setting its status and
    /// validation code. Returns the code that was set.
    pub fn validate(&self, order: &mut Order, restaurants: &[Restaurant]) -> OrderValidationCode {
        match self.check(order, restaurants) {
            Ok(()) => {
                order.order_status = OrderStatus::ValidButNotDelivered;
                order.order_validation_code = OrderValidationCode::NoError;
            }
            Err(code) => {
                order.order_status = OrderStatus::Invalid;
                order.order_validation_code = code;
            }
        }
        order.order_validation_code
    }

    fn check(&self, order: &Order, restaurants: &[Restaurant]) -> Result<(), OrderValidationCode> {
        let card = &order.credit_card_information;

        if !card
            .credit_card_number
            .as_deref()
            .is_some_and(|number| is_digits(number, 16))
        {
            return Err(OrderValidationCode::CardNumberInvalid);
        }

        if !card.cvv.as_deref().is_some_and(|cvv| is_digits(cvv, 3)) {
            return Err(OrderValidationCode::CvvInvalid);
        }

        let expiry = card
            .credit_card_expiry
            .as_deref()
            .and_then(parse_expiry)
            .ok_or(OrderValidationCode::ExpiryDateInvalid)?;
        if order.order_date > expiry {
            return Err(OrderValidationCode::ExpiryDateInvalid);
        }

        let pizzas = &order.pizzas_in_order;
        let expected_total = pizzas
            .iter()
            .try_fold(0i64, |total, pizza| total.checked_add(pizza.price_in_pence))
            .and_then(|cost| cost.checked_add(self.order_charge_in_pence));
        if order.price_total_in_pence < 0 || expected_total != Some(order.price_total_in_pence) {
            return Err(OrderValidationCode::TotalIncorrect);
        }

        if pizzas.is_empty()
            || !pizzas
                .iter()
                .all(|pizza| restaurants.iter().any(|r| r.serves(&pizza.name)))
        {
            return Err(OrderValidationCode::PizzaNotDefined);
        }

        if pizzas.len() > self.max_pizzas_per_order {
            return Err(OrderValidationCode::MaxPizzaCountExceeded);
        }

        let restaurant = supplying_restaurant(pizzas, restaurants)
            .ok_or(OrderValidationCode::PizzaFromMultipleRestaurants)?;

        if !restaurant.is_open_on(order.order_date) {
            return Err(OrderValidationCode::RestaurantClosed);
        }

        Ok(())
    }
}

/// The first restaurant whose menu carries every pizza of the order.
pub fn supplying_restaurant<'r>(
    pizzas: &[Pizza],
    restaurants: &'r [Restaurant],
) -> Option<&'r Restaurant> {
    restaurants
        .iter()
        .find(|restaurant| pizzas.iter().all(|pizza| restaurant.serves(&pizza.name)))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `MM/YY` into the last day the card is valid.
fn parse_expiry(expiry: &str) -> Option<NaiveDate> {
    let (month, year) = expiry.split_once('/')?;
    if !is_digits(month, 2) || !is_digits(year, 2) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year = 2000 + year.parse::<i32>().ok()?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, first_of_month.month() + 1, 1)?
    };
    first_of_next.pred_opt()
}
