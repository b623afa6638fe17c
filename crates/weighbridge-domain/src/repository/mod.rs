//! Repository trait definitions for data persistence

use weighbridge_types::Result;

use crate::model::{Customer, Product, TransactionRecord, Vehicle, WeighingTransaction};
use crate::service::search::filter_transactions;

/// Store that receives finalized transactions
pub trait TransactionRepository {
    /// Insert a new transaction or replace the one with the same id
    ///
    /// New transactions get the next sequential number.
    fn save(&mut self, transaction: WeighingTransaction) -> Result<TransactionRecord>;

    /// Find a transaction by its number ("000001")
    fn find_by_number(&self, transaction_no: &str) -> Result<Option<TransactionRecord>>;

    /// All transactions, newest first
    fn find_all(&self) -> Result<Vec<TransactionRecord>>;

    /// Substring search over registration, number and customer
    fn search(&self, query: &str) -> Result<Vec<TransactionRecord>> {
        Ok(filter_transactions(self.find_all()?, query))
    }

    /// Remove a transaction; `false` if no such number
    fn delete(&mut self, transaction_no: &str) -> Result<bool>;
}

/// Read-only customer, vehicle and product data
pub trait MasterDataRepository {
    fn customers(&self) -> Vec<Customer>;

    fn vehicles(&self) -> Vec<Vehicle>;

    fn products(&self) -> Vec<Product>;

    fn find_customer(&self, id: &str) -> Option<Customer> {
        self.customers().into_iter().find(|c| c.id == id)
    }
}
