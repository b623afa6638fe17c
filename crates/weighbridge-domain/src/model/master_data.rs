//! Read-only master data referenced by transactions

use serde::{Deserialize, Serialize};

use super::{Customer, Product, Vehicle};

/// Customers, vehicles and products known to the weighbridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl MasterData {
    pub fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn find_vehicle(&self, registration: &str) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.registration.eq_ignore_ascii_case(registration))
    }

    pub fn find_product(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }
}
