//! Rental-contract lookup.

mod files;
mod history;

pub use files::ContractFiles;
pub use history::CsvContractStore;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A rental contract covering the infraction instant.
///
/// The optional fields map to columns that older history exports do not
/// carry; absence is a normal value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMatch {
    /// Branch code (sucursal).
    pub branch: String,
    /// Customer code.
    pub customer: String,
    /// Internal program code (HOC), when the export carries it.
    pub program_code: Option<String>,
    /// Customer nationality, when the export carries it.
    pub nationality: Option<String>,
}

/// Datastore of rental history, queried by plate and infraction instant.
///
/// The call is synchronous and expected to answer within a short deadline;
/// the pipeline treats one slow lookup as one slow document, never as a
/// reason to abort the batch.
pub trait ContractStore {
    /// Find the contract whose rental period (departure ≤ infraction ≤ real
    /// return) covers the instant, for the plate. When several cover it,
    /// the most recently departed one wins. `None` is a normal outcome.
    fn find_covering_contract(
        &self,
        plate: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<ContractMatch>>;
}
