//! Loads inverter catalogs from CSV.
//!
//! Expected header: `id,name,rated_power_kw,efficiency_pct,mppt_count`.
//! Whitespace around fields is ignored.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::catalog::inverter::{InverterCatalog, InverterModel};

/// Failure while loading an inverter catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot open catalog \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog line {line}: {message}")]
    InvalidRow { line: u64, message: String },
    #[error("catalog contains no inverter models")]
    Empty,
}

/// Reads a catalog CSV file.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be opened, otherwise
/// whatever [`read_catalog`] reports.
pub fn read_catalog_path(path: &Path) -> Result<InverterCatalog, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = read_catalog(io::BufReader::new(file))?;
    debug!(path = %path.display(), models = catalog.len(), "inverter catalog loaded");
    Ok(catalog)
}

/// Reads a catalog CSV from any reader.
///
/// Every row is checked like an inline catalog entry; ids must be unique.
///
/// # Errors
///
/// Returns `Csv` for unparseable rows, `InvalidRow` for rows with bad
/// values or duplicate ids, and `Empty` when there are no rows.
pub fn read_catalog(reader: impl Read) -> Result<InverterCatalog, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut models: Vec<InverterModel> = Vec::new();
    for row in rdr.deserialize::<InverterModel>() {
        let model = row?;
        // header is line 1
        let line = models.len() as u64 + 2;
        if let Some(message) = model.check() {
            return Err(CatalogError::InvalidRow { line, message });
        }
        if models.iter().any(|m| m.id == model.id) {
            return Err(CatalogError::InvalidRow {
                line,
                message: format!("duplicate id \"{}\"", model.id),
            });
        }
        models.push(model);
    }

    if models.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(InverterCatalog::new(models))
}
