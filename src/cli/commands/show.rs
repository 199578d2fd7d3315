//! Show one preset's full parameter map

use clap::ArgGroup;
use miette::Result;

use crate::catalog::preset::format_size;
use crate::cli::{table, GlobalOpts};

use super::{ensure_loaded, open_catalog, parse_family};

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("key").required(true).args(["size", "dn"])))]
pub struct ShowArgs {
    /// Family (ferrule or gasket)
    pub family: String,

    /// Look up by nominal size in inches
    #[arg(long)]
    pub size: Option<f64>,

    /// Look up by diameter code, e.g. DN80
    #[arg(long)]
    pub dn: Option<String>,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let family = parse_family(&args.family)?;
    let mut catalog = open_catalog(global);
    ensure_loaded(&mut catalog)?;

    let preset = match (&args.size, &args.dn) {
        (Some(size), _) => catalog.get_by_size(family, *size).ok_or_else(|| {
            miette::miette!(
                "no {} preset for size {}",
                family,
                format_size(*size)
            )
        })?,
        (None, Some(dn)) => catalog
            .get_by_code(family, dn)
            .ok_or_else(|| miette::miette!("no {} preset for code {}", family, dn))?,
        (None, None) => unreachable!("clap enforces the key group"),
    };

    if !global.quiet {
        println!("{}", preset);
    }
    println!("{}", table::parameter_table(&preset.parameter_map()));
    Ok(())
}
