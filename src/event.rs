//! Events experienced by customers during a simulation run.
use crate::id::define_id_type;
use crate::units::Money;
use std::fmt;

define_id_type! {CustomerID}
define_id_type! {EventKind}

/// The label of the event which marks a completed sale
pub const SOLD_EVENT: &str = "sold";

impl EventKind {
    /// Whether this event is a completed sale
    pub fn is_sold(&self) -> bool {
        self.as_str() == SOLD_EVENT
    }
}

/// The cohort a customer was assigned to in the simulation.
///
/// Groups are stored as numeric codes in event history files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomerGroup {
    /// Code `0.0`
    Mid,
    /// Code `1.0`
    High,
    /// Code `2.0`
    Low,
    /// A code with no known label, kept as is
    Other(f64),
}

impl CustomerGroup {
    /// Get the group for a numeric code. Unrecognised codes are passed through.
    #[allow(clippy::float_cmp)]
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::Mid
        } else if code == 1.0 {
            Self::High
        } else if code == 2.0 {
            Self::Low
        } else {
            Self::Other(code)
        }
    }
}

impl fmt::Display for CustomerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mid => write!(f, "mid"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
            Self::Other(code) => write!(f, "{code:?}"),
        }
    }
}

/// A single event from an event history, with derived economic quantities
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Time at which the event occurred
    pub t: f64,
    /// The customer who experienced the event
    pub customer: CustomerID,
    /// What happened
    pub event: EventKind,
    /// The customer's willingness to pay at the time of the event
    pub customer_wtp: Money,
    /// The price offered to the customer
    pub price: Money,
    /// The simulation run which produced this event
    pub run_id: u32,
    /// The customer's cohort
    pub actual_group: CustomerGroup,
    /// Consumer surplus. Zero unless the event is a sale.
    pub welfare: Money,
    /// Seller revenue. Zero unless the event is a sale.
    pub profit: Money,
}

impl EventRecord {
    /// Create a new [`EventRecord`], calculating `welfare` and `profit`
    pub fn new(
        t: f64,
        customer: CustomerID,
        event: EventKind,
        customer_wtp: Money,
        price: Money,
        run_id: u32,
        actual_group: CustomerGroup,
    ) -> Self {
        let (welfare, profit) = if event.is_sold() {
            (customer_wtp - price, price)
        } else {
            (Money(0.0), Money(0.0))
        };

        Self {
            t,
            customer,
            event,
            customer_wtp,
            price,
            run_id,
            actual_group,
            welfare,
            profit,
        }
    }
}
