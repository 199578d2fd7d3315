//! Catalog status summary

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;

use super::open_catalog;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global);
    catalog.load_all();
    let summary = catalog.summary();

    if summary.loaded {
        println!("{} catalog loaded", style("✓").green());
        println!("  data dir:  {}", catalog.loader().data_dir().display());
        println!("  ferrules:  {}", summary.ferrule_count);
        println!("  gaskets:   {}", summary.gasket_count);
        println!("  total:     {}", summary.total_count);
        println!(
            "  sizes:     {}",
            summary
                .available_sizes
                .iter()
                .map(|s| format!("{}\"", s))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  codes:     {}", summary.available_dns.join(", "));
    } else {
        println!("{} catalog not loaded", style("✗").red());
        println!("  data dir:  {}", catalog.loader().data_dir().display());
        for error in &summary.errors {
            println!("  {} {}", style("error:").red(), error);
        }
    }
    Ok(())
}
