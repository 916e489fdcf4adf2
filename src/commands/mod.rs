//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation through a [`Context`]: the tab's preferences plus
//! the loaded style data.

pub mod apply;
pub mod config;
pub mod fav;
pub mod list;
pub mod pick;
pub mod preset;
pub mod recent;
pub mod remove;
pub mod search;
pub mod watch;

pub use apply::execute as apply;
pub use config::execute as config;
pub use fav::execute as fav;
pub use list::execute as list;
pub use pick::execute as pick;
pub use preset::execute as preset;
pub use recent::execute as recent;
pub use remove::execute as remove;
pub use search::execute as search;
pub use watch::execute as watch;

use crate::StyleGridError;
use crate::panel::{CatalogData, PanelController, PanelEvent, PanelSettings, PromptHost};
use crate::prefs::{Preferences, Tab};
use std::time::Duration;

type Result<T> = std::result::Result<T, StyleGridError>;

/// Everything a command needs to build a panel
pub struct Context<'p> {
    pub tab: Tab,
    pub prefs: &'p Preferences,
    pub data: CatalogData,
    pub settings: PanelSettings,
    pub debounce: Duration,
    pub quiet: bool,
}

impl<'p> Context<'p> {
    /// Build a panel for this tab against the given host
    pub fn panel<H: PromptHost>(&self, host: H) -> PanelController<'p, H> {
        PanelController::new(
            self.tab,
            self.data.clone(),
            self.settings.clone(),
            host,
            self.prefs,
            self.debounce,
        )
    }

    /// Build a panel and select a source on it when one was given
    ///
    /// # Errors
    ///
    /// Returns `StyleGridError::PrefsError` if remembering the source fails.
    pub fn panel_for_source<H: PromptHost>(&self, host: H, source: Option<&str>) -> Result<PanelController<'p, H>> {
        let mut panel = self.panel(host);
        if let Some(source) = source {
            panel.dispatch(PanelEvent::SelectSource(source.to_string()))?;
            let chosen = panel.view().source;
            if chosen != source && !self.quiet {
                eprintln!("Unknown source '{source}', showing {chosen}.");
            }
        }
        Ok(panel)
    }
}

/// Check that every name resolves to a loaded style
///
/// # Errors
///
/// Returns `StyleGridError::InvalidInput` naming the unknown styles.
pub fn require_styles<H: PromptHost>(panel: &PanelController<'_, H>, names: &[String]) -> Result<()> {
    let unknown: Vec<&str> = names
        .iter()
        .filter(|name| panel.state().resolve(name).is_none())
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(StyleGridError::InvalidInput(format!(
            "Unknown style(s): {}",
            unknown.join(", ")
        )))
    }
}
