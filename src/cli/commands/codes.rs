//! List available diameter codes, one per line

use miette::Result;

use crate::cli::GlobalOpts;

use super::{ensure_loaded, open_catalog, parse_family_opt};

#[derive(clap::Args, Debug)]
pub struct CodesArgs {
    /// Restrict to one family (ferrule or gasket)
    #[arg(long)]
    pub family: Option<String>,
}

pub fn run(args: CodesArgs, global: &GlobalOpts) -> Result<()> {
    let family = parse_family_opt(args.family.as_deref())?;
    let mut catalog = open_catalog(global);
    ensure_loaded(&mut catalog)?;

    for code in catalog.list_codes(family) {
        println!("{}", code);
    }
    Ok(())
}
