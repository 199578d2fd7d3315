//! Preset record type for Ferrule and Gasket components
//!
//! A `Preset` is one validated row of a DIN 32676 A dimension table.
//! Construction performs all type coercion and coherence checking, so
//! a `Preset` that exists is internally consistent by definition.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Standard applied when a row leaves the `Standard` column empty
pub const DEFAULT_STANDARD: &str = "DIN 32676 A";

/// Component family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Ferrule,
    Gasket,
}

impl Family {
    /// Lowercase identifier used in CLI arguments and parameter maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Ferrule => "ferrule",
            Family::Gasket => "gasket",
        }
    }

    /// Capitalized label used in model names
    pub fn label(&self) -> &'static str {
        match self {
            Family::Ferrule => "Ferrule",
            Family::Gasket => "Gasket",
        }
    }

    /// Both families, in catalog order
    pub fn all() -> &'static [Family] {
        &[Family::Ferrule, Family::Gasket]
    }

    /// Column set a table of this family must provide
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Family::Ferrule => &[
                "Size",
                "DN",
                "FlangeOD_mm",
                "C2_mm",
                "TubeID_mm",
                "PassageDia_mm",
                "HeightTube_mm",
                "HeightProfile_mm",
                "SeatLipWidth_mm",
                "Standard",
            ],
            Family::Gasket => &[
                "Size",
                "DN",
                "FlangeOD_mm",
                "GasketOD_mm",
                "GasketID_mm",
                "BeadC2_mm",
                "ProfileH_mm",
                "SeatLipWidth_mm",
                "Standard",
            ],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ferrule" => Ok(Family::Ferrule),
            "gasket" => Ok(Family::Gasket),
            _ => Err(format!(
                "Invalid family: {}. Use 'ferrule' or 'gasket'",
                s
            )),
        }
    }
}

/// Ferrule dimension set, millimeters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FerruleDims {
    pub flange_od_mm: f64,
    pub c2_mm: f64,
    pub tube_id_mm: f64,
    pub passage_dia_mm: f64,
    pub height_tube_mm: f64,
    pub height_profile_mm: f64,
    pub seat_lip_width_mm: f64,
}

/// Gasket dimension set, millimeters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasketDims {
    pub flange_od_mm: f64,
    pub gasket_od_mm: f64,
    pub gasket_id_mm: f64,
    pub bead_c2_mm: f64,
    pub profile_h_mm: f64,
    pub seat_lip_width_mm: f64,
}

/// Family-specific dimensions as a closed tagged union
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dimensions {
    Ferrule(FerruleDims),
    Gasket(GasketDims),
}

/// Errors raised while validating a single table row
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PresetError {
    #[error("Size and DN are required fields")]
    MissingRequired,

    #[error("invalid numeric value for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0}")]
    Coherence(&'static str),
}

/// A single parameter value in a geometry parameter map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Ordered name→value map handed to geometry consumers
///
/// Key order is fixed per family so display and export output is
/// deterministic. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMap(Vec<(&'static str, ParamValue)>);

impl ParameterMap {
    pub fn iter(&self) -> std::slice::Iter<'_, (&'static str, ParamValue)> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge every parameter into a spreadsheet-like key/value target,
    /// overwriting entries that already exist
    pub fn apply_to(&self, sheet: &mut HashMap<String, ParamValue>) {
        for (name, value) in &self.0 {
            sheet.insert((*name).to_string(), value.clone());
        }
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One validated preset record
///
/// Fields are private and immutable after construction; records are
/// built once per row at catalog load time and discarded only when
/// the whole catalog is reloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    family: Family,
    size_in: f64,
    dn: String,
    standard: String,
    dims: Dimensions,
}

impl Preset {
    /// Validate and build a preset from a raw column→value row.
    ///
    /// Values are trimmed. `Size` and `DN` must be present and carry a
    /// numeric size token; every dimension column must parse as a real
    /// number; family-specific coherence rules run last, in fixed
    /// order, stopping at the first violation.
    pub fn from_row(family: Family, row: &HashMap<String, String>) -> Result<Self, PresetError> {
        let size_in = extract_size(text_field(row, "Size").unwrap_or(""));
        let dn = text_field(row, "DN").unwrap_or("").to_string();

        if size_in == 0.0 || dn.is_empty() {
            return Err(PresetError::MissingRequired);
        }

        let standard = text_field(row, "Standard")
            .unwrap_or(DEFAULT_STANDARD)
            .to_string();

        let dims = match family {
            Family::Ferrule => {
                let d = FerruleDims {
                    flange_od_mm: numeric_field(row, "FlangeOD_mm")?,
                    c2_mm: numeric_field(row, "C2_mm")?,
                    tube_id_mm: numeric_field(row, "TubeID_mm")?,
                    passage_dia_mm: numeric_field(row, "PassageDia_mm")?,
                    height_tube_mm: numeric_field(row, "HeightTube_mm")?,
                    height_profile_mm: numeric_field(row, "HeightProfile_mm")?,
                    seat_lip_width_mm: numeric_field(row, "SeatLipWidth_mm")?,
                };
                check_ferrule_coherence(&d)?;
                Dimensions::Ferrule(d)
            }
            Family::Gasket => {
                let d = GasketDims {
                    flange_od_mm: numeric_field(row, "FlangeOD_mm")?,
                    gasket_od_mm: numeric_field(row, "GasketOD_mm")?,
                    gasket_id_mm: numeric_field(row, "GasketID_mm")?,
                    bead_c2_mm: numeric_field(row, "BeadC2_mm")?,
                    profile_h_mm: numeric_field(row, "ProfileH_mm")?,
                    seat_lip_width_mm: numeric_field(row, "SeatLipWidth_mm")?,
                };
                check_gasket_coherence(&d)?;
                Dimensions::Gasket(d)
            }
        };

        Ok(Self {
            family,
            size_in,
            dn,
            standard,
            dims,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Nominal size in inches
    pub fn size_in(&self) -> f64 {
        self.size_in
    }

    /// Standardized nominal diameter code, e.g. "DN80"
    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }

    pub fn dims(&self) -> &Dimensions {
        &self.dims
    }

    /// Flange outer diameter, common to both families
    pub fn flange_od_mm(&self) -> f64 {
        match &self.dims {
            Dimensions::Ferrule(d) => d.flange_od_mm,
            Dimensions::Gasket(d) => d.flange_od_mm,
        }
    }

    /// Trailing integer of the DN code, used for numeric code ordering
    /// ("DN40" before "DN100")
    pub fn dn_ordinal(&self) -> u32 {
        dn_ordinal(&self.dn)
    }

    /// Canonical identity string, e.g. `Ferrule_3.0in_DN80`
    pub fn display_name(&self) -> String {
        format!(
            "{}_{}in_{}",
            self.family.label(),
            format_size(self.size_in),
            self.dn
        )
    }

    /// True when the two presets mate in assembly: same size, DN, and
    /// standard
    pub fn is_compatible_with(&self, other: &Preset) -> bool {
        self.size_in == other.size_in && self.dn == other.dn && self.standard == other.standard
    }

    /// Full named parameter map in stable key order
    pub fn parameter_map(&self) -> ParameterMap {
        let mut params = vec![
            ("Size", ParamValue::Number(self.size_in)),
            ("DN", ParamValue::Text(self.dn.clone())),
            ("Standard", ParamValue::Text(self.standard.clone())),
            (
                "ComponentType",
                ParamValue::Text(self.family.as_str().to_string()),
            ),
        ];

        match &self.dims {
            Dimensions::Ferrule(d) => params.extend([
                ("FlangeOD_mm", ParamValue::Number(d.flange_od_mm)),
                ("C2_mm", ParamValue::Number(d.c2_mm)),
                ("TubeID_mm", ParamValue::Number(d.tube_id_mm)),
                ("PassageDia_mm", ParamValue::Number(d.passage_dia_mm)),
                ("HeightTube_mm", ParamValue::Number(d.height_tube_mm)),
                ("HeightProfile_mm", ParamValue::Number(d.height_profile_mm)),
                ("SeatLipWidth_mm", ParamValue::Number(d.seat_lip_width_mm)),
            ]),
            Dimensions::Gasket(d) => params.extend([
                ("FlangeOD_mm", ParamValue::Number(d.flange_od_mm)),
                ("GasketOD_mm", ParamValue::Number(d.gasket_od_mm)),
                ("GasketID_mm", ParamValue::Number(d.gasket_id_mm)),
                ("BeadC2_mm", ParamValue::Number(d.bead_c2_mm)),
                ("ProfileH_mm", ParamValue::Number(d.profile_h_mm)),
                ("SeatLipWidth_mm", ParamValue::Number(d.seat_lip_width_mm)),
            ]),
        }

        ParameterMap(params)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.standard)
    }
}

/// Trimmed, non-empty cell value
fn text_field<'a>(row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    row.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Numeric cell coercion. An absent column behaves as zero so the
/// coherence rules catch it; a present but unparsable value is an
/// immediate error naming the column.
fn numeric_field(row: &HashMap<String, String>, field: &'static str) -> Result<f64, PresetError> {
    match row.get(field) {
        None => Ok(0.0),
        Some(raw) => {
            let value = raw.trim();
            value.parse::<f64>().map_err(|_| PresetError::InvalidNumber {
                field,
                value: value.to_string(),
            })
        }
    }
}

/// Extract the first numeric token from a free-form size label.
///
/// Scans for the first maximal digit run, optionally followed by one
/// decimal point and more digits (`3"` → 3.0, `1.5 in` → 1.5).
/// Returns 0.0 when the label carries no numeric token; callers treat
/// that as a missing required field.
pub(crate) fn extract_size(label: &str) -> f64 {
    let bytes = label.as_bytes();
    let Some(start) = bytes.iter().position(|b| b.is_ascii_digit()) else {
        return 0.0;
    };

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    label[start..end].parse().unwrap_or(0.0)
}

/// Trailing integer of a DN code ("DN80" → 80); 0 when absent
pub(crate) fn dn_ordinal(dn: &str) -> u32 {
    dn.trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .unwrap_or(0)
}

/// Render a nominal size for model names: integral sizes keep one
/// decimal ("3.0"), fractional sizes render naturally ("1.5")
pub(crate) fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{:.1}", size)
    } else {
        format!("{}", size)
    }
}

fn check_ferrule_coherence(d: &FerruleDims) -> Result<(), PresetError> {
    if d.tube_id_mm <= 0.0 {
        return Err(PresetError::Coherence("TubeID must be greater than 0"));
    }
    if d.passage_dia_mm <= 0.0 {
        return Err(PresetError::Coherence("PassageDia must be greater than 0"));
    }
    if d.flange_od_mm <= d.tube_id_mm {
        return Err(PresetError::Coherence("FlangeOD must exceed TubeID"));
    }
    Ok(())
}

fn check_gasket_coherence(d: &GasketDims) -> Result<(), PresetError> {
    if d.gasket_id_mm <= 0.0 {
        return Err(PresetError::Coherence("GasketID must be greater than 0"));
    }
    if d.gasket_od_mm <= d.gasket_id_mm {
        return Err(PresetError::Coherence("GasketOD must exceed GasketID"));
    }
    // Exact comparison: both columns carry the same published value,
    // not independently rounded ones.
    if d.flange_od_mm != d.gasket_od_mm {
        return Err(PresetError::Coherence("FlangeOD must equal GasketOD"));
    }
    Ok(())
}
