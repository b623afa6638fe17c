//! Master data loader from TOML
//!
//! ```toml
//! [[customers]]
//! id = "acme"
//! name = "Acme Industries"
//!
//! [[vehicles]]
//! registration = "ABC123GP"
//!
//! [[products]]
//! code = "COAL-A"
//! name = "Coal Grade A"
//! ```

use std::fs;
use std::path::Path;

use weighbridge_domain::model::{Customer, MasterData, Product, Vehicle};
use weighbridge_domain::repository::MasterDataRepository;
use weighbridge_types::{ConfigError, Error, Result};

const BUILTIN_MASTER_DATA: &str = include_str!("../data/master.toml");

/// Master data loaded from TOML
#[derive(Debug, Clone)]
pub struct MasterDataLoader {
    data: MasterData,
}

impl MasterDataLoader {
    /// Load master data from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read master data file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load master data from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let data: MasterData = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse master data TOML: {}",
                e
            )))
        })?;
        Ok(Self { data })
    }

    /// Sample customers, vehicles and products shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::load_from_str(BUILTIN_MASTER_DATA)
    }

    /// Load from `path` when given, otherwise the built-in data
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Self::builtin(),
        }
    }

    pub fn data(&self) -> &MasterData {
        &self.data
    }
}

impl MasterDataRepository for MasterDataLoader {
    fn customers(&self) -> Vec<Customer> {
        self.data.customers.clone()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        self.data.vehicles.clone()
    }

    fn products(&self) -> Vec<Product> {
        self.data.products.clone()
    }

    fn find_customer(&self, id: &str) -> Option<Customer> {
        self.data.find_customer(id).cloned()
    }
}
