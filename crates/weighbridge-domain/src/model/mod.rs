//! Domain model types

pub mod customer;
pub mod master_data;
pub mod product;
pub mod transaction;
pub mod vehicle;

pub use customer::Customer;
pub use master_data::MasterData;
pub use product::Product;
pub use transaction::{TransactionRecord, WeighingTransaction};
pub use vehicle::Vehicle;
