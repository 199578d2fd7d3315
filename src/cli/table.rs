//! Table rendering for CLI output

use tabled::{builder::Builder, settings::Style};

use crate::catalog::preset::{ParameterMap, Preset};

/// Render a preset listing, one row per preset
pub fn preset_table(presets: &[&Preset]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["NAME", "FAMILY", "SIZE", "DN", "FLANGE OD", "STANDARD"]);

    for preset in presets {
        builder.push_record([
            preset.display_name(),
            preset.family().to_string(),
            format!("{}\"", preset.size_in()),
            preset.dn().to_string(),
            format!("{} mm", preset.flange_od_mm()),
            preset.standard().to_string(),
        ]);
    }

    builder.build().with(Style::sharp()).to_string()
}

/// Render a parameter map in its stable key order
pub fn parameter_table(params: &ParameterMap) -> String {
    let mut builder = Builder::default();
    builder.push_record(["PARAMETER", "VALUE"]);

    for (name, value) in params.iter() {
        builder.push_record([(*name).to_string(), value.to_string()]);
    }

    builder.build().with(Style::sharp()).to_string()
}
