//! Catalog load error types

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::preset::{Family, PresetError};

/// Errors raised while loading a preset table
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("{family} preset table not found: {path}")]
    #[diagnostic(code(tripta::catalog::table_not_found))]
    TableNotFound { family: Family, path: PathBuf },

    #[error("{family} table is missing required columns: {}", .missing.join(", "))]
    #[diagnostic(
        code(tripta::catalog::missing_columns),
        help("the header row must name every column of the {family} schema")
    )]
    MissingColumns {
        family: Family,
        missing: Vec<String>,
    },

    #[error("failed to read {family} table: {source}")]
    #[diagnostic(code(tripta::catalog::read))]
    Csv {
        family: Family,
        #[source]
        source: csv::Error,
    },

    /// Row numbers are 1-based with the header counted as row 1
    #[error("row {row}: {source}")]
    #[diagnostic(code(tripta::catalog::invalid_row))]
    Row {
        row: usize,
        #[source]
        source: PresetError,
    },
}
