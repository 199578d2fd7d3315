//! Generate a geometry descriptor for one preset

use clap::ArgGroup;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::preset::format_size;
use crate::cli::{table, GlobalOpts};
use crate::geometry::{build_model, ModelRegistry};

use super::{ensure_loaded, open_catalog, parse_family};

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("key").required(true).args(["size", "dn"])))]
pub struct GenerateArgs {
    /// Family (ferrule or gasket)
    pub family: String,

    /// Nominal size in inches
    #[arg(long)]
    pub size: Option<f64>,

    /// Diameter code, e.g. DN80
    #[arg(long)]
    pub dn: Option<String>,

    /// Emit the descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    let family = parse_family(&args.family)?;
    let mut catalog = open_catalog(global);
    ensure_loaded(&mut catalog)?;

    let preset = match (&args.size, &args.dn) {
        (Some(size), _) => catalog.get_by_size(family, *size).ok_or_else(|| {
            miette::miette!("no {} preset for size {}", family, format_size(*size))
        })?,
        (None, Some(dn)) => catalog
            .get_by_code(family, dn)
            .ok_or_else(|| miette::miette!("no {} preset for code {}", family, dn))?,
        (None, None) => unreachable!("clap enforces the key group"),
    };

    let model = build_model(preset).map_err(|e| miette::miette!("{}", e))?;

    // Session registry: scoped to this invocation, mirrors what a
    // CAD-host session would hold onto.
    let mut registry = ModelRegistry::new();
    let name = registry
        .add(model.clone())
        .map_err(|e| miette::miette!("{}", e))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&model).into_diagnostic()?
        );
    } else {
        if !global.quiet {
            println!("{} Generated {}", style("✓").green(), style(&name).cyan());
        }
        println!("{}", table::parameter_table(&model.parameters));
    }
    Ok(())
}
