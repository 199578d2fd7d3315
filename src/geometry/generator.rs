//! Geometry descriptor generation
//!
//! Generators turn a validated `Preset` into a named parameter
//! descriptor for the host CAD system. Solid construction itself is
//! delegated to the host; this layer only guarantees that a generator
//! of one family never consumes a preset of the other.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::preset::{Family, ParamValue, ParameterMap, Preset};

/// Errors raised by the generators
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    #[error("{expected} generator requires a {expected} preset, got {got}")]
    FamilyMismatch { expected: Family, got: Family },
}

/// A generated model descriptor: the unit handed to the CAD host and
/// to the session registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryModel {
    pub name: String,
    pub family: Family,
    pub parameters: ParameterMap,
}

/// Ferrule geometry generator
#[derive(Debug, Clone)]
pub struct FerruleGenerator {
    preset: Preset,
}

impl FerruleGenerator {
    /// Fails fast when handed a preset of another family
    pub fn new(preset: &Preset) -> Result<Self, GeometryError> {
        if preset.family() != Family::Ferrule {
            return Err(GeometryError::FamilyMismatch {
                expected: Family::Ferrule,
                got: preset.family(),
            });
        }
        Ok(Self {
            preset: preset.clone(),
        })
    }

    pub fn build(&self) -> GeometryModel {
        GeometryModel {
            name: self.preset.display_name(),
            family: Family::Ferrule,
            parameters: self.preset.parameter_map(),
        }
    }

    /// Merge the preset parameters into a spreadsheet-like target
    pub fn update_sheet(&self, sheet: &mut HashMap<String, ParamValue>) {
        self.preset.parameter_map().apply_to(sheet);
    }
}

/// Gasket geometry generator
#[derive(Debug, Clone)]
pub struct GasketGenerator {
    preset: Preset,
}

impl GasketGenerator {
    /// Fails fast when handed a preset of another family
    pub fn new(preset: &Preset) -> Result<Self, GeometryError> {
        if preset.family() != Family::Gasket {
            return Err(GeometryError::FamilyMismatch {
                expected: Family::Gasket,
                got: preset.family(),
            });
        }
        Ok(Self {
            preset: preset.clone(),
        })
    }

    pub fn build(&self) -> GeometryModel {
        GeometryModel {
            name: self.preset.display_name(),
            family: Family::Gasket,
            parameters: self.preset.parameter_map(),
        }
    }

    pub fn update_sheet(&self, sheet: &mut HashMap<String, ParamValue>) {
        self.preset.parameter_map().apply_to(sheet);
    }
}

/// Build the descriptor for a preset with the generator matching its
/// family
pub fn build_model(preset: &Preset) -> Result<GeometryModel, GeometryError> {
    match preset.family() {
        Family::Ferrule => Ok(FerruleGenerator::new(preset)?.build()),
        Family::Gasket => Ok(GasketGenerator::new(preset)?.build()),
    }
}
