//! Compatible ferrule/gasket pair lookup

use console::style;
use miette::Result;

use crate::catalog::preset::format_size;
use crate::cli::GlobalOpts;

use super::{ensure_loaded, open_catalog};

#[derive(clap::Args, Debug)]
pub struct PairArgs {
    /// Nominal size in inches, e.g. 3.0
    pub size: f64,
}

pub fn run(args: PairArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global);
    ensure_loaded(&mut catalog)?;

    let (ferrule, gasket) = catalog.compatible_pair(args.size);

    println!("Size {}\"", format_size(args.size));
    match &ferrule {
        Some(p) => println!("  {} ferrule  {}", style("✓").green(), p.display_name()),
        None => println!("  {} ferrule  no preset", style("✗").red()),
    }
    match &gasket {
        Some(p) => println!("  {} gasket   {}", style("✓").green(), p.display_name()),
        None => println!("  {} gasket   no preset", style("✗").red()),
    }

    if let (Some(f), Some(g)) = (ferrule, gasket) {
        if f.is_compatible_with(g) {
            if !global.quiet {
                println!("  {} presets mate in assembly", style("✓").green());
            }
        } else {
            // Same size but mismatched DN or standard across the two
            // tables; surfaced but not an error.
            println!(
                "  {} presets share the size but do not mate (DN/standard mismatch)",
                style("!").yellow()
            );
        }
    }
    Ok(())
}
