//! Watch command - poll the styles directories and refresh a panel
//!
//! The panel's host serves style data by scanning the directories, so a
//! detected change goes through the regular refresh path: `RequestRefresh`
//! asks the host to reload and the fresh data arrives as `Refresh`.

use super::{Context, Result};
use crate::StyleGridError;
use crate::loader::{Fingerprint, StyleDir, fingerprint, scan_dirs};
use crate::merge::PromptField;
use crate::output;
use crate::panel::{CatalogData, PanelController, PanelEvent, PanelView, PromptHost};
use std::time::Duration;

/// Host without prompt fields whose data comes from styles directories
pub struct ScanHost {
    dirs: Vec<StyleDir>,
    category_order: Vec<String>,
}

impl ScanHost {
    #[must_use]
    pub const fn new(dirs: Vec<StyleDir>, category_order: Vec<String>) -> Self {
        Self { dirs, category_order }
    }

    #[must_use]
    pub fn dirs(&self) -> &[StyleDir] {
        &self.dirs
    }
}

impl PromptHost for ScanHost {
    fn read(&self, _field: PromptField) -> Option<String> {
        None
    }

    fn write(&mut self, field: PromptField, _value: &str) {
        tracing::debug!("Watcher has no {field} field");
    }

    fn write_selection(&mut self, _json: &str) {
        tracing::debug!("Watcher has no selection field");
    }

    fn reload(&mut self) -> Option<CatalogData> {
        match scan_dirs(&self.dirs) {
            Ok(set) => Some(CatalogData::new(set, self.category_order.clone())),
            Err(e) => {
                tracing::warn!("Failed to rescan styles directories: {e}");
                None
            }
        }
    }
}

/// Detects changes to the styles directories and refreshes its panel
pub struct Watcher<'p> {
    panel: PanelController<'p, ScanHost>,
    last: Fingerprint,
}

impl<'p> Watcher<'p> {
    /// Start watching from the current state of the directories
    ///
    /// # Errors
    ///
    /// Returns `StyleGridError::LoadError` if a directory cannot be scanned.
    pub fn new(ctx: &Context<'p>, dirs: Vec<StyleDir>) -> Result<Self> {
        let last = fingerprint(&dirs)?;
        let host = ScanHost::new(dirs, ctx.data.category_order.clone());
        Ok(Self {
            panel: ctx.panel(host),
            last,
        })
    }

    /// Check the directories once, refreshing the panel when they changed
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be scanned.
    pub fn poll(&mut self) -> Result<bool> {
        let current = fingerprint(self.panel.host().dirs())?;
        if current == self.last {
            return Ok(false);
        }
        tracing::info!(files = current.len(), "styles directories changed");
        self.last = current;
        self.panel.dispatch(PanelEvent::RequestRefresh)?;
        Ok(true)
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        self.panel.view()
    }
}

/// Execute the watch command, polling until interrupted
///
/// # Errors
///
/// Returns an error if no directory is configured or scanning fails.
pub fn execute(ctx: &Context<'_>, dirs: Vec<StyleDir>, interval: Duration) -> Result<()> {
    if dirs.is_empty() {
        return Err(StyleGridError::InvalidInput(
            "No styles directories configured. Use 'stylegrid config add-dir <path>' or --styles-dir.".into(),
        ));
    }

    let mut watcher = Watcher::new(ctx, dirs)?;
    if !ctx.quiet {
        println!(
            "Watching {} style(s), polling every {}s. Press Ctrl-C to stop.",
            ctx.data.styles.len(),
            interval.as_secs()
        );
    }

    loop {
        std::thread::sleep(interval);
        if watcher.poll()? {
            report(&watcher.view(), ctx.quiet);
        }
    }
}

fn report(view: &PanelView, quiet: bool) {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    if quiet {
        println!("{stamp} reloaded");
        return;
    }
    println!("[{stamp}] Styles reloaded:");
    for section in &view.sections {
        println!("  {}", output::category_header(&section.name, section.count, false));
    }
}
