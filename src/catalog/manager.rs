//! Catalog manager: owns the loaded presets and their lookup indices
//!
//! The catalog has two states, unloaded and loaded. Queries trigger a
//! load on first use; while a load keeps failing, every query retries
//! it once and then reports absence, so a fixed table is picked up by
//! the next query without an explicit reload.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::loader::{Availability, CsvLoader, IntegrityReport};
use crate::catalog::preset::{dn_ordinal, Family, Preset};

/// Per-family storage plus the two lookup indices.
///
/// Index values are positions into `presets`; later rows sharing a key
/// silently overwrite earlier ones (last-row-wins, a documented
/// property of the source tables).
#[derive(Debug, Default)]
struct FamilyIndex {
    presets: Vec<Preset>,
    by_size: HashMap<u64, usize>,
    by_dn: HashMap<String, usize>,
}

impl FamilyIndex {
    fn rebuild(&mut self, presets: Vec<Preset>) {
        self.by_size.clear();
        self.by_dn.clear();
        for (idx, preset) in presets.iter().enumerate() {
            self.by_size.insert(size_key(preset.size_in()), idx);
            self.by_dn.insert(preset.dn().to_string(), idx);
        }
        self.presets = presets;
    }

    fn clear(&mut self) {
        self.presets.clear();
        self.by_size.clear();
        self.by_dn.clear();
    }

    fn by_size(&self, size: f64) -> Option<&Preset> {
        self.by_size
            .get(&size_key(size))
            .map(|&idx| &self.presets[idx])
    }

    fn by_dn(&self, dn: &str) -> Option<&Preset> {
        self.by_dn.get(dn).map(|&idx| &self.presets[idx])
    }
}

/// Sizes always originate from the same string parser, so bitwise
/// identity is the right equality for index keys
fn size_key(size: f64) -> u64 {
    size.to_bits()
}

/// Summary of the catalog state for status displays
#[derive(Debug, Clone, Default)]
pub struct CatalogSummary {
    pub loaded: bool,
    pub errors: Vec<String>,
    pub ferrule_count: usize,
    pub gasket_count: usize,
    pub total_count: usize,
    pub available_sizes: Vec<f64>,
    pub available_dns: Vec<String>,
}

/// Central access point for preset data
#[derive(Debug)]
pub struct Catalog {
    loader: CsvLoader,
    ferrule: FamilyIndex,
    gasket: FamilyIndex,
    loaded: bool,
    load_errors: Vec<String>,
}

impl Catalog {
    pub fn new(loader: CsvLoader) -> Self {
        Self {
            loader,
            ferrule: FamilyIndex::default(),
            gasket: FamilyIndex::default(),
            loaded: false,
            load_errors: Vec::new(),
        }
    }

    pub fn loader(&self) -> &CsvLoader {
        &self.loader
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Error messages accumulated by failed loads
    pub fn load_errors(&self) -> &[String] {
        &self.load_errors
    }

    /// Load both preset tables and rebuild all indices.
    ///
    /// Never raises: a failure is recorded in `load_errors` and leaves
    /// the catalog unloaded. Cross-family size gaps are logged as
    /// warnings, not treated as failures.
    pub fn load_all(&mut self) -> bool {
        let ferrule = match self.loader.load_family(Family::Ferrule) {
            Ok(presets) => presets,
            Err(e) => {
                self.load_errors.push(e.to_string());
                return false;
            }
        };
        let gasket = match self.loader.load_family(Family::Gasket) {
            Ok(presets) => presets,
            Err(e) => {
                self.load_errors.push(e.to_string());
                return false;
            }
        };

        self.ferrule.rebuild(ferrule);
        self.gasket.rebuild(gasket);
        self.loaded = true;

        self.warn_size_gaps();
        debug!(
            ferrule = self.ferrule.presets.len(),
            gasket = self.gasket.presets.len(),
            "catalog indices built"
        );
        true
    }

    /// Advisory cross-family consistency check: each family should
    /// cover the other's size set
    fn warn_size_gaps(&self) {
        let ferrule_sizes: Vec<f64> = self.ferrule.presets.iter().map(|p| p.size_in()).collect();
        let gasket_sizes: Vec<f64> = self.gasket.presets.iter().map(|p| p.size_in()).collect();

        let missing_gaskets: Vec<f64> = ferrule_sizes
            .iter()
            .copied()
            .filter(|s| !gasket_sizes.contains(s))
            .collect();
        let missing_ferrules: Vec<f64> = gasket_sizes
            .iter()
            .copied()
            .filter(|s| !ferrule_sizes.contains(s))
            .collect();

        if !missing_gaskets.is_empty() {
            warn!(sizes = ?missing_gaskets, "no gasket preset for ferrule sizes");
        }
        if !missing_ferrules.is_empty() {
            warn!(sizes = ?missing_ferrules, "no ferrule preset for gasket sizes");
        }
    }

    /// Auto-load hook invoked by every query. Returns the loaded flag;
    /// while unloaded, each call retries the load.
    fn ensure_loaded(&mut self) -> bool {
        if !self.loaded {
            self.load_all();
        }
        self.loaded
    }

    fn index(&self, family: Family) -> &FamilyIndex {
        match family {
            Family::Ferrule => &self.ferrule,
            Family::Gasket => &self.gasket,
        }
    }

    /// Look up a preset by nominal size in inches
    pub fn get_by_size(&mut self, family: Family, size: f64) -> Option<&Preset> {
        if !self.ensure_loaded() {
            return None;
        }
        self.index(family).by_size(size)
    }

    /// Look up a preset by diameter code, e.g. "DN80"
    pub fn get_by_code(&mut self, family: Family, dn: &str) -> Option<&Preset> {
        if !self.ensure_loaded() {
            return None;
        }
        self.index(family).by_dn(dn)
    }

    /// Distinct sizes, ascending. `None` unions both families.
    pub fn list_sizes(&mut self, family: Option<Family>) -> Vec<f64> {
        if !self.ensure_loaded() {
            return Vec::new();
        }

        let mut sizes: Vec<f64> = match family {
            Some(f) => self.index(f).presets.iter().map(|p| p.size_in()).collect(),
            None => self
                .ferrule
                .presets
                .iter()
                .chain(self.gasket.presets.iter())
                .map(|p| p.size_in())
                .collect(),
        };
        sizes.sort_by(f64::total_cmp);
        sizes.dedup();
        sizes
    }

    /// Distinct diameter codes, ascending by the trailing integer
    /// ("DN40" before "DN100"). `None` unions both families.
    pub fn list_codes(&mut self, family: Option<Family>) -> Vec<String> {
        if !self.ensure_loaded() {
            return Vec::new();
        }

        let mut codes: Vec<String> = match family {
            Some(f) => self.index(f).by_dn.keys().cloned().collect(),
            None => self
                .ferrule
                .by_dn
                .keys()
                .chain(self.gasket.by_dn.keys())
                .cloned()
                .collect(),
        };
        codes.sort_by_key(|dn| dn_ordinal(dn));
        codes.dedup();
        codes
    }

    /// The ferrule/gasket pair for a size; either side may be absent
    pub fn compatible_pair(&mut self, size: f64) -> (Option<&Preset>, Option<&Preset>) {
        if !self.ensure_loaded() {
            return (None, None);
        }
        (
            self.index(Family::Ferrule).by_size(size),
            self.index(Family::Gasket).by_size(size),
        )
    }

    /// All presets in table order, one or both families
    pub fn all_presets(&mut self, family: Option<Family>) -> Vec<&Preset> {
        if !self.ensure_loaded() {
            return Vec::new();
        }
        match family {
            Some(f) => self.index(f).presets.iter().collect(),
            None => self
                .ferrule
                .presets
                .iter()
                .chain(self.gasket.presets.iter())
                .collect(),
        }
    }

    /// Snapshot of the catalog state. Does not trigger a load; an
    /// unloaded catalog reports zero counts and its error list.
    pub fn summary(&self) -> CatalogSummary {
        if !self.loaded {
            return CatalogSummary {
                loaded: false,
                errors: self.load_errors.clone(),
                ..CatalogSummary::default()
            };
        }

        let mut sizes: Vec<f64> = self
            .ferrule
            .presets
            .iter()
            .chain(self.gasket.presets.iter())
            .map(|p| p.size_in())
            .collect();
        sizes.sort_by(f64::total_cmp);
        sizes.dedup();

        let mut dns: Vec<String> = self
            .ferrule
            .by_dn
            .keys()
            .chain(self.gasket.by_dn.keys())
            .cloned()
            .collect();
        dns.sort_by_key(|dn| dn_ordinal(dn));
        dns.dedup();

        CatalogSummary {
            loaded: true,
            errors: self.load_errors.clone(),
            ferrule_count: self.ferrule.presets.len(),
            gasket_count: self.gasket.presets.len(),
            total_count: self.ferrule.presets.len() + self.gasket.presets.len(),
            available_sizes: sizes,
            available_dns: dns,
        }
    }

    /// Full integrity check, independent of the in-memory state
    pub fn check_integrity(&self) -> IntegrityReport {
        self.loader.check_integrity()
    }

    /// Per-family existence of the backing tables
    pub fn check_availability(&self) -> Availability {
        self.loader.check_availability()
    }

    /// Discard all state and attempt a fresh load
    pub fn reload(&mut self) -> bool {
        self.ferrule.clear();
        self.gasket.clear();
        self.loaded = false;
        self.load_errors.clear();
        self.load_all()
    }
}
