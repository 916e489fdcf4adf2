//! Events fed to the reducer and effects it asks the host to perform

use super::state::{CatalogData, PanelState};
use crate::merge::PromptField;
use crate::prefs::{ApplyMode, Preset, SortMode};
use std::collections::BTreeSet;

/// A discrete user or host interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Open,
    Close,
    /// Trigger control pressed
    Toggle,
    /// Escape key, closes an open panel
    Escape,
    /// Search box edited; the visible cards update on `SearchSettled`
    SearchInput(String),
    SearchSettled(String),
    ToggleStyle(String),
    ToggleFavorite(String),
    /// Select every visible style of a section, or deselect them when all are selected
    SelectAllInCategory(String),
    /// Footer chip removed
    RemoveSelected(String),
    ClearAll,
    SelectSource(String),
    SetApplyMode(ApplyMode),
    SetSortMode(SortMode),
    ToggleCollapsed(String),
    /// Collapse every section, or expand them all when all are collapsed
    CollapseAll,
    ToggleCompact,
    Apply,
    LoadPreset(Preset),
    SavePreset(String),
    /// Ask the host for fresh style data
    RequestRefresh,
    /// Fresh style data arrived
    Refresh(CatalogData),
}

/// A preference write requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefChange {
    Favorites(BTreeSet<String>),
    Recent(Vec<String>),
    Source(String),
    ApplyMode(ApplyMode),
    SortMode(SortMode),
    Preset(Preset),
}

/// Side effect to run after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Set a prompt field and raise its change notification
    WriteField(PromptField, String),
    /// Store the selection JSON for deferred application
    WriteSelection(String),
    Persist(PrefChange),
    /// Selection size changed
    SelectionCount(usize),
    RequestReload,
}

/// Snapshot of the host's prompt fields, `None` when a field is missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFields {
    pub prompt: Option<String>,
    pub negative: Option<String>,
}

impl PromptFields {
    #[must_use]
    pub fn new(prompt: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            negative: Some(negative.into()),
        }
    }

    #[must_use]
    pub fn get(&self, field: PromptField) -> Option<&str> {
        match field {
            PromptField::Prompt => self.prompt.as_deref(),
            PromptField::Negative => self.negative.as_deref(),
        }
    }

    pub fn set(&mut self, field: PromptField, value: String) {
        match field {
            PromptField::Prompt => self.prompt = Some(value),
            PromptField::Negative => self.negative = Some(value),
        }
    }
}

/// Result of reducing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PanelState,
    pub effects: Vec<Effect>,
}
