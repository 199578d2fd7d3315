//! Table availability and integrity checks

use console::style;
use miette::Result;

use crate::catalog::Family;
use crate::cli::GlobalOpts;

use super::open_catalog;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {}

pub fn run(_args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global);

    let availability = catalog.check_availability();
    println!("Tables in {}:", catalog.loader().data_dir().display());
    for family in Family::all() {
        let mark = if availability.get(*family) {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!(
            "  {} {}  {}",
            mark,
            family,
            catalog.loader().table_path(*family).display()
        );
    }

    let report = catalog.check_integrity();
    println!("\nIntegrity:");
    for family in Family::all() {
        let entry = report.get(*family);
        if entry.valid {
            println!(
                "  {} {}  {} record(s)",
                style("✓").green(),
                family,
                entry.record_count
            );
        } else {
            println!("  {} {}", style("✗").red(), family);
            for error in &entry.errors {
                println!("      {}", error);
            }
        }
    }

    if report.all_valid() {
        Ok(())
    } else {
        Err(miette::miette!("catalog integrity check failed"))
    }
}
