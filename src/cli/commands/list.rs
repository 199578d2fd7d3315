//! List catalog presets

use miette::Result;

use crate::cli::{table, GlobalOpts};

use super::{ensure_loaded, open_catalog, parse_family_opt};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Restrict to one family (ferrule or gasket)
    #[arg(long)]
    pub family: Option<String>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let family = parse_family_opt(args.family.as_deref())?;
    let mut catalog = open_catalog(global);
    ensure_loaded(&mut catalog)?;

    let presets = catalog.all_presets(family);
    println!("{}", table::preset_table(&presets));
    if !global.quiet {
        println!("{} preset(s)", presets.len());
    }
    Ok(())
}
