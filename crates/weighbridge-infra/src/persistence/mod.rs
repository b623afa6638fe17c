//! Persistence implementations
//!
//! File-based implementations of the repository traits.

mod file_transaction_repo;

pub use file_transaction_repo::FileTransactionRepository;
