//! Session model registry
//!
//! In-memory, name-keyed store of generated model descriptors.
//! Lifetime-scoped to the hosting session; unsynchronized by design
//! (single-session, single-thread usage).

use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::preset::Family;
use crate::geometry::generator::GeometryModel;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("a model must carry a name")]
    MissingName,
}

/// Registry of the models generated during one session
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, GeometryModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a model under its name and return that name.
    ///
    /// Re-adding a name replaces the previous entry silently
    /// (replace-on-conflict).
    pub fn add(&mut self, model: GeometryModel) -> Result<String, RegistryError> {
        if model.name.trim().is_empty() {
            return Err(RegistryError::MissingName);
        }
        let name = model.name.clone();
        self.models.insert(name.clone(), model);
        Ok(name)
    }

    /// Stored models, optionally filtered by family; iteration order
    /// is unspecified (map-backed)
    pub fn list(&self, family: Option<Family>) -> Vec<&GeometryModel> {
        self.models
            .values()
            .filter(|m| family.map_or(true, |f| m.family == f))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&GeometryModel> {
        self.models.get(name)
    }

    /// Remove by name; true iff the model existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.models.remove(name).is_some()
    }

    /// Drop every model, or only those of one family
    pub fn clear(&mut self, family: Option<Family>) {
        match family {
            None => self.models.clear(),
            Some(f) => self.models.retain(|_, m| m.family != f),
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
