//! Repository adapters for persistence layer

use std::path::PathBuf;

use weighbridge_infra::master_data_loader::MasterDataLoader;
use weighbridge_infra::persistence::FileTransactionRepository;
use weighbridge_types::Result;

use crate::config::Config;

/// Open file-based transaction repository
pub fn open_transaction_repo(config: &Config) -> Result<FileTransactionRepository> {
    let store_dir = config.store_dir()?;
    FileTransactionRepository::open(store_dir)
}

/// Open file-based transaction repository at a custom directory
pub fn open_transaction_repo_at(store_dir: PathBuf) -> Result<FileTransactionRepository> {
    FileTransactionRepository::open(store_dir)
}

/// Load configured master data, or the built-in set
pub fn open_master_data(config: &Config) -> Result<MasterDataLoader> {
    MasterDataLoader::load_or_builtin(config.master_data.as_deref())
}
