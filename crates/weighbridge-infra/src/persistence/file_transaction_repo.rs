//! File-based transaction repository
//!
//! Stores every transaction in `transactions.json` under the data directory,
//! rewritten in full on each change.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weighbridge_domain::model::{TransactionRecord, WeighingTransaction};
use weighbridge_domain::repository::TransactionRepository;
use weighbridge_types::{Result, StoreError};

/// On-disk layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Next number to hand out; numbers are never reused after delete
    next_sequence: u64,
    records: Vec<TransactionRecord>,
}

impl StoreFile {
    fn next_number(&mut self) -> String {
        // Stores written by hand may start at zero
        let sequence = self.next_sequence.max(1);
        self.next_sequence = sequence + 1;
        TransactionRecord::format_number(sequence)
    }
}

/// File-based implementation of TransactionRepository
pub struct FileTransactionRepository {
    store_path: PathBuf,
    file: StoreFile,
}

impl FileTransactionRepository {
    /// Create or load a repository in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("transactions.json");

        let file = if store_path.exists() {
            let reader = BufReader::new(File::open(&store_path)?);
            serde_json::from_reader(reader).map_err(|e| {
                StoreError::Corrupted(format!("{}: {}", store_path.display(), e))
            })?
        } else {
            StoreFile {
                next_sequence: 1,
                records: Vec::new(),
            }
        };

        Ok(Self { store_path, file })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn count(&self) -> usize {
        self.file.records.len()
    }

    /// Write `staged` to disk, then adopt it; on failure memory keeps the
    /// last state that reached disk
    fn commit(&mut self, staged: StoreFile) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.store_path)?);
        serde_json::to_writer_pretty(&mut writer, &staged)?;
        writer.flush()?;
        self.file = staged;
        Ok(())
    }
}

impl TransactionRepository for FileTransactionRepository {
    fn save(&mut self, transaction: WeighingTransaction) -> Result<TransactionRecord> {
        let saved_at = Utc::now();
        let mut staged = self.file.clone();
        let existing = staged
            .records
            .iter()
            .position(|r| r.transaction.id == transaction.id);

        let record = match existing {
            Some(index) => {
                let record = &mut staged.records[index];
                record.transaction = transaction;
                record.saved_at = saved_at;
                record.clone()
            }
            None => {
                let record = TransactionRecord {
                    transaction_no: staged.next_number(),
                    saved_at,
                    transaction,
                };
                staged.records.push(record.clone());
                record
            }
        };

        self.commit(staged)?;
        debug!(transaction_no = %record.transaction_no, "transaction stored");
        Ok(record)
    }

    fn find_by_number(&self, transaction_no: &str) -> Result<Option<TransactionRecord>> {
        Ok(self
            .file
            .records
            .iter()
            .find(|r| r.transaction_no == transaction_no)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<TransactionRecord>> {
        let mut records = self.file.records.clone();
        records.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| b.transaction_no.cmp(&a.transaction_no))
        });
        Ok(records)
    }

    fn delete(&mut self, transaction_no: &str) -> Result<bool> {
        if !self.file.records.iter().any(|r| r.transaction_no == transaction_no) {
            return Ok(false);
        }
        let mut staged = self.file.clone();
        staged.records.retain(|r| r.transaction_no != transaction_no);
        self.commit(staged)?;
        Ok(true)
    }
}
