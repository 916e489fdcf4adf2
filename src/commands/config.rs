//! Config command - show, locate and edit the configuration

use super::Result;
use crate::StyleGridError;
use crate::cli::ConfigCommands;
use crate::config::StyleGridConfig;
use crate::loader::StyleDir;
use std::path::Path;

/// Execute a configuration subcommand against the default config file
///
/// # Errors
///
/// Returns an error if the config location cannot be determined, or the
/// configuration cannot be serialized or saved.
pub fn execute(config: &mut StyleGridConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    let path = StyleGridConfig::config_path()?;
    run(config, &path, command, quiet)
}

fn run(config: &mut StyleGridConfig, path: &Path, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| StyleGridError::InvalidInput(format!("Failed to serialize config: {e}")))?;
            print!("{text}");
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::AddDir { path: dir, priority } => {
            let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.clone());
            config.add_style_dir(StyleDir::new(&dir, *priority));
            config.save_to(path)?;
            if !quiet {
                println!("Added styles directory {} (priority {priority}).", dir.display());
            }
        }
        ConfigCommands::RemoveDir { path: dir } => {
            if config.remove_style_dir(dir) {
                config.save_to(path)?;
                if !quiet {
                    println!("Removed styles directory {}.", dir.display());
                }
            } else if !quiet {
                println!("Styles directory {} is not configured.", dir.display());
            }
        }
    }
    Ok(())
}
