//! Case-insensitive substring search over stored data
//!
//! An empty (or whitespace-only) query matches everything.

use crate::model::{Customer, TransactionRecord, Vehicle};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn transaction_matches(record: &TransactionRecord, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    let tx = &record.transaction;
    contains_ci(&tx.vehicle_registration, &q)
        || record.transaction_no.contains(&q)
        || contains_ci(&tx.customer_id, &q)
}

pub fn customer_matches(customer: &Customer, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    contains_ci(&customer.name, &q)
        || customer.contact.contains(&q)
        || contains_ci(&customer.email, &q)
        || contains_ci(&customer.id, &q)
}

pub fn vehicle_matches(vehicle: &Vehicle, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    contains_ci(&vehicle.registration, &q)
        || contains_ci(&vehicle.make, &q)
        || contains_ci(&vehicle.owner, &q)
}

pub fn filter_transactions(records: Vec<TransactionRecord>, query: &str) -> Vec<TransactionRecord> {
    records
        .into_iter()
        .filter(|r| transaction_matches(r, query))
        .collect()
}

pub fn filter_customers(customers: Vec<Customer>, query: &str) -> Vec<Customer> {
    customers
        .into_iter()
        .filter(|c| customer_matches(c, query))
        .collect()
}

pub fn filter_vehicles(vehicles: Vec<Vehicle>, query: &str) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|v| vehicle_matches(v, query))
        .collect()
}
