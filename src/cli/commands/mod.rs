//! Command implementations

pub mod check;
pub mod codes;
pub mod config;
pub mod generate;
pub mod list;
pub mod pair;
pub mod show;
pub mod sizes;
pub mod status;

use std::path::PathBuf;

use miette::Result;

use crate::catalog::{Catalog, CsvLoader, Family};
use crate::cli::GlobalOpts;
use crate::config::DEFAULT_SETTINGS_FILE;

/// Catalog handle over the configured data directory
pub(crate) fn open_catalog(global: &GlobalOpts) -> Catalog {
    Catalog::new(CsvLoader::new(global.data_dir.clone()))
}

pub(crate) fn parse_family(value: &str) -> Result<Family> {
    value.parse().map_err(|e: String| miette::miette!(e))
}

pub(crate) fn parse_family_opt(value: Option<&str>) -> Result<Option<Family>> {
    value.map(parse_family).transpose()
}

/// Settings file path from the global options
pub(crate) fn settings_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// Load the catalog up front so queries cannot fail mid-command
pub(crate) fn ensure_loaded(catalog: &mut Catalog) -> Result<()> {
    if catalog.is_loaded() || catalog.load_all() {
        Ok(())
    } else {
        Err(miette::miette!(
            "failed to load preset catalog:\n  {}",
            catalog.load_errors().join("\n  ")
        ))
    }
}
