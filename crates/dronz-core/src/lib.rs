pub mod assembly;
pub mod error;
pub mod geometry;
pub mod models;
pub mod path_finding;
pub mod planner;
pub mod rules;
pub mod validation;

pub use assembly::{assemble, RoundTripPath};
pub use error::GeometryError;
pub use geometry::{
    angle_between, distance, is_close, is_in_central_area, is_in_region, next_position, Heading,
    HOVER_ANGLE,
};
pub use models::{
    CreditCardInformation, DayOfWeek, LngLat, NamedRegion, Order, OrderStatus,
    OrderValidationCode, Pizza, Restaurant,
};
pub use path_finding::{find_path, search, Path, SearchOutcome};
pub use planner::{DeliveryPlanner, OrderFlight};
pub use rules::{FlightRules, APPLETON_TOWER};
pub use validation::{supplying_restaurant, OrderValidator};
