//! Panel controller: one per tab context
//!
//! Owns the [`PanelState`], feeds it events through [`reduce`] and carries
//! out the resulting effects against the host and the preference store.
//!
//! ```text
//! event ──► reduce(state, event, host.snapshot()) ──► effects
//!                                                       │
//!   WriteField / WriteSelection / SelectionCount ──► PromptHost
//!   Persist                                       ──► Preferences
//!   RequestReload ──► host.reload() ──► Refresh event
//! ```

use super::debounce::Debouncer;
use super::event::{Effect, PanelEvent, PrefChange, Transition};
use super::host::PromptHost;
use super::reducer::reduce;
use super::state::{CatalogData, PanelSettings, PanelState};
use super::view::{PanelView, view};
use crate::prefs::{ApplyMode, Preferences, PrefsError, Tab};
use std::time::{Duration, Instant};

/// Drives one panel against its host and preferences
pub struct PanelController<'p, H: PromptHost> {
    state: PanelState,
    host: H,
    prefs: &'p Preferences,
    search: Debouncer<String>,
}

impl<'p, H: PromptHost> PanelController<'p, H> {
    /// Build a panel for a tab, restoring its persisted preferences
    pub fn new(
        tab: Tab,
        data: CatalogData,
        settings: PanelSettings,
        host: H,
        prefs: &'p Preferences,
        debounce: Duration,
    ) -> Self {
        let state = PanelState::restore(tab, data, settings, prefs);
        tracing::debug!(tab = %tab, styles = state.data.styles.len(), "panel built");
        Self {
            state,
            host,
            prefs,
            search: Debouncer::new(debounce),
        }
    }

    /// Use an apply mode for this panel only, leaving the stored one alone
    #[must_use]
    pub fn with_apply_mode(mut self, mode: ApplyMode) -> Self {
        self.state.apply_mode = mode;
        self
    }

    /// Reduce one event and run its effects
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if a preference write fails. The state change
    /// and host writes of the event are kept.
    pub fn dispatch(&mut self, event: PanelEvent) -> Result<(), PrefsError> {
        let fields = self.host.snapshot();
        let state = std::mem::take(&mut self.state);
        let Transition { state, effects } = reduce(state, event, &fields);
        self.state = state;
        self.run(effects)
    }

    fn run(&mut self, effects: Vec<Effect>) -> Result<(), PrefsError> {
        let tab = self.state.tab;
        let mut result = Ok(());

        for effect in effects {
            match effect {
                Effect::WriteField(field, text) => self.host.write(field, &text),
                Effect::WriteSelection(json) => self.host.write_selection(&json),
                Effect::SelectionCount(count) => self.host.selection_count(count),
                Effect::Persist(change) => {
                    if let Err(e) = self.persist(tab, change) {
                        tracing::warn!("Failed to save preference: {e}");
                        result = Err(e);
                    }
                }
                Effect::RequestReload => match self.host.reload() {
                    Some(data) => self.dispatch(PanelEvent::Refresh(data))?,
                    None => tracing::debug!("Host cannot reload style data"),
                },
            }
        }
        result
    }

    fn persist(&self, tab: Tab, change: PrefChange) -> Result<(), PrefsError> {
        match change {
            PrefChange::Favorites(favorites) => self.prefs.set_favorites(tab, &favorites),
            PrefChange::Recent(recent) => self.prefs.set_recent(tab, &recent),
            PrefChange::Source(label) => self.prefs.set_source(tab, &label),
            PrefChange::ApplyMode(mode) => self.prefs.set_apply_mode(mode),
            PrefChange::SortMode(mode) => self.prefs.set_sort_mode(tab, mode),
            PrefChange::Preset(preset) => self.prefs.save_preset(tab, &preset),
        }
    }

    /// Record a keystroke in the search box
    ///
    /// The box updates at once; filtering waits for [`Self::tick`] to see
    /// the input settle.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if running the event's effects fails.
    pub fn type_search(&mut self, raw: &str, now: Instant) -> Result<(), PrefsError> {
        self.search.push(raw.to_string(), now);
        self.dispatch(PanelEvent::SearchInput(raw.to_string()))
    }

    /// Settle a pending search whose quiet period is over
    ///
    /// Returns whether a search was applied.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if running the event's effects fails.
    pub fn tick(&mut self, now: Instant) -> Result<bool, PrefsError> {
        match self.search.poll(now) {
            Some(query) => {
                self.dispatch(PanelEvent::SearchSettled(query))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Settle any pending search immediately
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if running the event's effects fails.
    pub fn settle_search(&mut self) -> Result<(), PrefsError> {
        if let Some(query) = self.search.flush() {
            self.dispatch(PanelEvent::SearchSettled(query))?;
        }
        Ok(())
    }

    /// Load a saved preset into the selection
    ///
    /// Returns `false` when no preset has that name.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if running the event's effects fails.
    pub fn load_preset(&mut self, name: &str) -> Result<bool, PrefsError> {
        match self.prefs.preset(self.state.tab, name) {
            Some(preset) => {
                self.dispatch(PanelEvent::LoadPreset(preset))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        view(&self.state)
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Tear down the panel, handing back the host
    pub fn into_host(self) -> H {
        self.host
    }
}
