//! Infrastructure layer - persistence implementations, loaders, CSV

pub mod master_data_loader;
pub mod persistence;
pub mod transaction_csv;
