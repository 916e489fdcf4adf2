//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for stylegrid using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Categories in display order with their styles
//! - **search**: Styles matching a query (`water -ocean "soft light" @scene`)
//! - **apply**: Merge styles into prompt text, or print the selection JSON
//! - **remove**: Take literal style text back out of a prompt
//! - **fav**, **preset**, **recent**: Per-tab preferences
//! - **pick**: Interactive panel driven from the terminal
//! - **watch**: Poll the styles directories and report reloads
//! - **config**: Show or locate the configuration
//!
//! # Design Features
//!
//! - Global `--tab` selects the independent preference set (`txt2img`, `img2img`)
//! - Global `--quiet` flag for scripting-friendly output
//! - `-v` raises log verbosity, `RUST_LOG` is honored as well
//! - Style data comes from `--data` (a JSON document) or the styles directories

use crate::loader::StyleDir;
use crate::prefs::{ApplyMode, SortMode, Tab};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "stylegrid")]
#[command(about = "A categorized, searchable picker for prompt style presets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tab context whose preferences are used
    #[arg(long = "tab", value_enum, global = true, default_value_t = Tab::Txt2img)]
    pub tab: Tab,

    /// Styles directory to scan (repeatable, later directories win; overrides config)
    #[arg(short = 'd', long = "styles-dir", value_name = "DIR", global = true)]
    pub styles_dirs: Vec<PathBuf>,

    /// Read style data from a JSON document instead of scanning directories
    #[arg(long = "data", value_name = "FILE", global = true, conflicts_with = "styles_dirs")]
    pub data: Option<PathBuf>,

    /// Preference store location (overrides config)
    #[arg(long = "prefs", value_name = "PATH", global = true)]
    pub prefs: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Apply modes offered on the command line
///
/// On-select mode is only meaningful inside an interactive panel.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CliApplyMode {
    /// Merge styles into the prompt text
    #[default]
    Prompt,
    /// Print the selection JSON for deferred application
    Silent,
}

impl From<CliApplyMode> for ApplyMode {
    fn from(mode: CliApplyMode) -> Self {
        match mode {
            CliApplyMode::Prompt => Self::Prompt,
            CliApplyMode::Silent => Self::Silent,
        }
    }
}

/// Shared source filter argument
#[derive(Parser, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Only show styles from this source file (remembered per tab)
    #[arg(short = 's', long = "source", value_name = "SOURCE")]
    pub source: Option<String>,
}

/// Prompt text the styles are merged into
#[derive(Parser, Debug, Clone, Default)]
pub struct PromptArgs {
    /// Current positive prompt
    #[arg(short = 'p', long = "prompt", value_name = "TEXT", default_value = "")]
    pub prompt: String,

    /// Current negative prompt
    #[arg(short = 'n', long = "negative", value_name = "TEXT", default_value = "")]
    pub negative: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List categories and their styles
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        source_args: SourceArgs,

        /// Card order within each category (remembered per tab)
        #[arg(long = "sort", value_enum)]
        sort: Option<SortMode>,
    },

    /// Search styles with the query language
    #[command(visible_alias = "s")]
    Search {
        /// Query: words, "phrases", -exclusions and @CATEGORY filters
        #[arg(value_name = "QUERY", num_args = 1.., required = true, allow_hyphen_values = true)]
        query: Vec<String>,

        #[command(flatten)]
        source_args: SourceArgs,
    },

    /// Merge styles into prompt text
    #[command(visible_alias = "a")]
    Apply {
        /// Style names to apply
        #[arg(value_name = "NAMES", num_args = 1.., required = true)]
        names: Vec<String>,

        #[command(flatten)]
        prompt_args: PromptArgs,

        /// How the selection is delivered
        #[arg(short = 'm', long = "mode", value_enum, default_value = "prompt")]
        mode: CliApplyMode,

        /// Copy the resulting positive prompt to the clipboard
        #[arg(short = 'c', long = "copy")]
        copy: bool,
    },

    /// Remove the literal text of styles from prompt text
    #[command(visible_alias = "rm")]
    Remove {
        /// Style names to remove
        #[arg(value_name = "NAMES", num_args = 1.., required = true)]
        names: Vec<String>,

        #[command(flatten)]
        prompt_args: PromptArgs,
    },

    /// Manage favorite styles
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },

    /// Manage saved presets
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Show recently applied styles
    Recent {
        /// Forget the recent list
        #[arg(long = "clear")]
        clear: bool,
    },

    /// Pick styles interactively and apply them
    #[command(visible_alias = "p")]
    Pick {
        #[command(flatten)]
        prompt_args: PromptArgs,

        /// Apply mode for this session (remembered)
        #[arg(short = 'm', long = "mode", value_enum)]
        mode: Option<ApplyMode>,
    },

    /// Watch the styles directories and report changes
    #[command(visible_alias = "w")]
    Watch {
        /// Polling interval in seconds (overrides config)
        #[arg(short = 'i', long = "interval", value_name = "SECS")]
        interval: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Favorite management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FavCommands {
    /// Mark styles as favorites
    Add {
        #[arg(value_name = "NAMES", num_args = 1.., required = true)]
        names: Vec<String>,
    },

    /// Unmark favorite styles
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_name = "NAMES", num_args = 1.., required = true)]
        names: Vec<String>,
    },

    /// List favorite styles
    #[command(visible_alias = "ls")]
    List,
}

/// Preset management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetCommands {
    /// Save styles under a preset name
    Save {
        /// Name of the preset
        name: String,

        /// Styles in the preset
        #[arg(value_name = "NAMES", num_args = 1.., required = true)]
        styles: Vec<String>,
    },

    /// List saved presets
    #[command(visible_alias = "ls")]
    List,

    /// Show the styles of a preset
    Show {
        /// Name of the preset
        name: String,
    },

    /// Delete a preset
    #[command(visible_alias = "rm")]
    Delete {
        /// Name of the preset
        name: String,
    },

    /// Apply a preset to prompt text
    Apply {
        /// Name of the preset
        name: String,

        #[command(flatten)]
        prompt_args: PromptArgs,

        /// Copy the resulting positive prompt to the clipboard
        #[arg(short = 'c', long = "copy")]
        copy: bool,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file location
    Path,

    /// Add a styles directory to the configuration
    AddDir {
        /// Directory of CSV style files
        path: PathBuf,

        /// Merge priority of its styles (higher wins)
        #[arg(short = 'p', long = "priority", default_value_t = crate::catalog::SOURCE_PRIORITY_USER)]
        priority: i64,
    },

    /// Remove a styles directory from the configuration
    RemoveDir {
        /// Directory to remove
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Styles directories given on the command line
    ///
    /// Priorities follow argument order so later directories win merges.
    #[must_use]
    pub fn style_dirs(&self) -> Vec<StyleDir> {
        self.styles_dirs
            .iter()
            .zip(0_i64..)
            .map(|(path, priority)| StyleDir::new(path, priority))
            .collect()
    }
}

impl Commands {
    /// Source filter of commands that take one
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::List { source_args, .. } | Self::Search { source_args, .. } => source_args.source.as_deref(),
            _ => None,
        }
    }

    /// Whether the command needs style data loaded
    #[must_use]
    pub fn needs_styles(&self) -> bool {
        !matches!(
            self,
            Self::Config { .. } | Self::Recent { .. } | Self::Fav { command: FavCommands::List }
        )
    }
}
