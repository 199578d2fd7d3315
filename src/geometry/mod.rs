//! Geometry descriptors and the session model registry

pub mod generator;
pub mod registry;

pub use generator::{build_model, FerruleGenerator, GasketGenerator, GeometryError, GeometryModel};
pub use registry::{ModelRegistry, RegistryError};
