use serde::{Deserialize, Serialize};

use crate::currency::Money;

/// Tunable constants the scoring and stress engines read. Persisted as part
/// of the single application-state blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Daily earnings target used by the karma performance component.
    pub daily_target: Money,
    /// Reference petrol price per litre for stress scenarios.
    pub fuel_price: Money,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daily_target: Money::from_rupees(800),
            fuel_price: Money::from_rupees(102),
        }
    }
}
