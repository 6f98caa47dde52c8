//! CSV-backed contract store.
//!
//! Reads a rental-history export once and answers containment queries from
//! memory. Column layout follows the back-office export: `matricula`,
//! `fecha_salida`, `hora_salida`, `fecha_entrada_real`, `hora_entrada_real`,
//! `sucursal`, `cliente`, plus `programa` and `nacionalidad` where the
//! export version includes them.

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use super::{ContractMatch, ContractStore, Result};
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct RentalRecord {
    plate: String,
    departure: NaiveDateTime,
    return_real: NaiveDateTime,
    branch: String,
    customer: String,
    program_code: Option<String>,
    nationality: Option<String>,
}

/// Contract store over a rental-history CSV export.
#[derive(Debug)]
pub struct CsvContractStore {
    records: Vec<RentalRecord>,
}

impl CsvContractStore {
    /// Load the history export. Optional columns missing from the file make
    /// every match carry `None` for those fields; rows with unparseable
    /// rental periods are skipped with a warning.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| StoreError::Malformed(e.to_string()))?
            .clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let idx_plate = col("matricula").ok_or(StoreError::MissingColumn("matricula"))?;
        let idx_dep_date = col("fecha_salida").ok_or(StoreError::MissingColumn("fecha_salida"))?;
        let idx_dep_time = col("hora_salida").ok_or(StoreError::MissingColumn("hora_salida"))?;
        let idx_ret_date =
            col("fecha_entrada_real").ok_or(StoreError::MissingColumn("fecha_entrada_real"))?;
        let idx_ret_time =
            col("hora_entrada_real").ok_or(StoreError::MissingColumn("hora_entrada_real"))?;
        let idx_branch = col("sucursal").ok_or(StoreError::MissingColumn("sucursal"))?;
        let idx_customer = col("cliente").ok_or(StoreError::MissingColumn("cliente"))?;
        let idx_program = col("programa");
        let idx_nationality = col("nacionalidad");

        let mut records = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| StoreError::Malformed(e.to_string()))?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();
            let optional = |i: Option<usize>| {
                i.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            };

            let departure = parse_instant(field(idx_dep_date), field(idx_dep_time));
            let return_real = parse_instant(field(idx_ret_date), field(idx_ret_time));
            let (Some(departure), Some(return_real)) = (departure, return_real) else {
                warn!("skipping history row {} with unparseable rental period", row + 2);
                continue;
            };

            records.push(RentalRecord {
                plate: field(idx_plate).to_uppercase(),
                departure,
                return_real,
                branch: field(idx_branch).to_string(),
                customer: field(idx_customer).to_string(),
                program_code: optional(idx_program),
                nationality: optional(idx_nationality),
            });
        }

        debug!("loaded {} rental history rows from {}", records.len(), path.display());

        Ok(Self { records })
    }
}

fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%d/%m/%Y").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}

impl ContractStore for CsvContractStore {
    fn find_covering_contract(
        &self,
        plate: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<ContractMatch>> {
        let instant = date.and_time(time);
        let plate = plate.to_uppercase();

        let best = self
            .records
            .iter()
            .filter(|r| r.plate == plate && r.departure <= instant && instant <= r.return_real)
            .max_by_key(|r| r.departure);

        Ok(best.map(|r| ContractMatch {
            branch: r.branch.clone(),
            customer: r.customer.clone(),
            program_code: r.program_code.clone(),
            nationality: r.nationality.clone(),
        }))
    }
}
