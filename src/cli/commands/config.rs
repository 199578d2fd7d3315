//! Persisted settings management

use clap::Subcommand;
use console::style;
use miette::Result;
use serde_json::Value;

use crate::cli::GlobalOpts;
use crate::config::SettingsStore;

use super::settings_path;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show every setting
    List,

    /// Show one setting
    Get {
        /// Setting key, e.g. units
        key: String,
    },

    /// Update one setting (value parsed as JSON, else taken as string)
    Set { key: String, value: String },

    /// Print the settings file path
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    let path = settings_path(global);
    let mut store = SettingsStore::open(&path).map_err(|e| miette::miette!("{}", e))?;

    match cmd {
        ConfigCommands::List => {
            for key in store.keys() {
                if let Some(value) = store.get(&key) {
                    println!("{} = {}", key, value);
                }
            }
        }
        ConfigCommands::Get { key } => match store.get(&key) {
            Some(value) => println!("{}", value),
            None => return Err(miette::miette!("unknown setting: {}", key)),
        },
        ConfigCommands::Set { key, value } => {
            // Accept bare strings without requiring JSON quoting.
            let parsed: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));
            store
                .set(&key, parsed)
                .map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} {} updated", style("✓").green(), key);
            }
        }
        ConfigCommands::Path => println!("{}", store.path().display()),
    }
    Ok(())
}
