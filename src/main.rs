//! Stylegrid CLI application entry point
//!
//! This is the main executable for the style grid. It loads style presets from
//! CSV directories (or a JSON data document), and lets you browse, search and
//! apply them to prompt text from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Categories and their styles
//! stylegrid list
//! stylegrid list --source art.csv
//!
//! # Search with words, "phrases", -exclusions and @CATEGORY filters
//! stylegrid search water -ocean @scene
//!
//! # Apply styles to a prompt, or hand over the selection JSON
//! stylegrid apply STYLE_Ink_Wash SCENE_Lake -p "a cat" -n "blurry"
//! stylegrid apply STYLE_Ink_Wash --mode silent
//!
//! # Pick interactively
//! stylegrid pick -p "a cat"
//!
//! # Preferences are kept per tab
//! stylegrid --tab img2img fav add STYLE_Ink_Wash
//! stylegrid preset save moody STYLE_Ink_Wash SCENE_Lake
//! ```
//!
//! # Configuration
//!
//! On first run, stylegrid prompts for a styles directory. Configuration is
//! stored in the user's config directory (`~/.config/stylegrid/config.toml`
//! on Linux).

use std::path::Path;
use std::time::Duration;
use stylegrid::{
    StyleGridError,
    cli::{Cli, Commands},
    commands::{self, Context},
    config::StyleGridConfig,
    loader::{StyleSet, scan_dirs},
    logging,
    panel::{CatalogData, PanelSettings},
    prefs::Preferences,
};

type Result<T> = std::result::Result<T, StyleGridError>;

/// Load style data from a JSON document or the styles directories
fn load_styles(cli: &Cli, config: &StyleGridConfig) -> Result<CatalogData> {
    let set = match &cli.data {
        Some(path) => load_document(path)?,
        None if cli.styles_dirs.is_empty() => scan_dirs(&config.style_dirs)?,
        None => scan_dirs(&cli.style_dirs())?,
    };
    if set.is_empty() {
        tracing::warn!("No styles loaded");
    }
    Ok(CatalogData::new(set, config.category_order.clone()))
}

fn load_document(path: &Path) -> Result<StyleSet> {
    let json = std::fs::read_to_string(path)?;
    Ok(StyleSet::from_json_lossy(&json))
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose)?;

    let mut config = StyleGridConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return commands::config(&mut config, command, quiet);
    }

    let prefs_path = match &cli.prefs {
        Some(path) => path.clone(),
        None => config.prefs_path()?,
    };
    let prefs = Preferences::open(&prefs_path)?;

    let data = if cli.command.needs_styles() {
        load_styles(&cli, &config)?
    } else {
        CatalogData::default()
    };

    let ctx = Context {
        tab: cli.tab,
        prefs: &prefs,
        data,
        settings: PanelSettings::from(&config),
        debounce: Duration::from_millis(config.debounce_ms),
        quiet,
    };

    let result = match &cli.command {
        Commands::List { source_args, sort } => commands::list(&ctx, source_args.source.as_deref(), *sort),
        Commands::Search { query, source_args } => commands::search(&ctx, query, source_args.source.as_deref()),
        Commands::Apply {
            names,
            prompt_args,
            mode,
            copy,
        } => commands::apply(
            &ctx,
            names,
            &prompt_args.prompt,
            &prompt_args.negative,
            (*mode).into(),
            *copy,
        ),
        Commands::Remove { names, prompt_args } => {
            commands::remove(&ctx, names, &prompt_args.prompt, &prompt_args.negative)
        }
        Commands::Fav { command } => commands::fav(&ctx, command),
        Commands::Preset { command } => commands::preset(&ctx, command),
        Commands::Recent { clear } => commands::recent(&ctx, *clear),
        Commands::Pick { prompt_args, mode } => {
            commands::pick(&ctx, &prompt_args.prompt, &prompt_args.negative, *mode)
        }
        Commands::Watch { interval } => {
            let dirs = if cli.styles_dirs.is_empty() {
                config.style_dirs.clone()
            } else {
                cli.style_dirs()
            };
            let secs = interval.unwrap_or(config.watch_interval_secs).max(1);
            commands::watch(&ctx, dirs, Duration::from_secs(secs))
        }
        Commands::Config { .. } => unreachable!(),
    };

    prefs.flush()?;
    result
}
