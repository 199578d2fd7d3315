//! Catalog core: preset records, table loading, and indexed lookup

pub mod error;
pub mod loader;
pub mod manager;
pub mod preset;

pub use error::CatalogError;
pub use loader::{Availability, CsvLoader, FamilyIntegrity, IntegrityReport};
pub use manager::{Catalog, CatalogSummary};
pub use preset::{
    Dimensions, Family, FerruleDims, GasketDims, ParamValue, ParameterMap, Preset, PresetError,
    DEFAULT_STANDARD,
};
