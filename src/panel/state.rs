//! Panel state owned by one controller per tab context

use crate::Style;
use crate::catalog::{Categories, SourceSelection, categorize, filter_by_source, merge_by_priority, order_categories, sources_of};
use crate::config::{DEFAULT_ALL_SOURCES_LABEL, StyleGridConfig, default_category_order};
use crate::loader::StyleSet;
use crate::merge::AppliedRecord;
use crate::prefs::{ApplyMode, Preferences, SortMode, Tab};
use crate::search::SearchScope;
use std::collections::{BTreeMap, BTreeSet};

/// Style data a panel is built from, immutable until the next refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogData {
    pub styles: Vec<Style>,
    pub sources: Vec<String>,
    pub category_order: Vec<String>,
}

impl CatalogData {
    #[must_use]
    pub fn new(set: StyleSet, category_order: Vec<String>) -> Self {
        Self {
            styles: set.styles,
            sources: set.sources,
            category_order,
        }
    }
}

/// Behavior knobs taken from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub all_sources_label: String,
    pub search_scope: SearchScope,
    pub category_shortcut: bool,
    pub recent_limit: usize,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            all_sources_label: DEFAULT_ALL_SOURCES_LABEL.to_string(),
            search_scope: SearchScope::default(),
            category_shortcut: false,
            recent_limit: 10,
        }
    }
}

impl From<&StyleGridConfig> for PanelSettings {
    fn from(config: &StyleGridConfig) -> Self {
        Self {
            all_sources_label: config.all_sources_label.clone(),
            search_scope: config.search_scope,
            category_shortcut: config.category_shortcut,
            recent_limit: config.recent_limit,
        }
    }
}

/// Everything one tab's panel knows
///
/// Mutated only by [`super::reduce`]. Derived structures (categories,
/// visible sections) are recomputed from these fields on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub tab: Tab,
    pub data: CatalogData,
    pub settings: PanelSettings,
    pub selected: BTreeSet<String>,
    pub favorites: BTreeSet<String>,
    pub recent: Vec<String>,
    pub source: SourceSelection,
    pub apply_mode: ApplyMode,
    pub sort_mode: SortMode,
    /// Search box content as typed
    pub search_input: String,
    /// Query the visible cards are filtered by
    pub search_query: String,
    /// Literal contributions made in on-select mode, by style name
    pub applied: BTreeMap<String, AppliedRecord>,
    pub collapsed: BTreeSet<String>,
    pub open: bool,
    pub compact: bool,
}

impl PanelState {
    /// Fresh panel with default preferences
    #[must_use]
    pub fn new(tab: Tab, data: CatalogData, settings: PanelSettings) -> Self {
        Self {
            tab,
            data,
            settings,
            ..Self::default()
        }
    }

    /// Panel restored from persisted preferences
    ///
    /// A remembered source that no longer exists falls back to all sources.
    #[must_use]
    pub fn restore(tab: Tab, data: CatalogData, settings: PanelSettings, prefs: &Preferences) -> Self {
        let mut state = Self::new(tab, data, settings);
        state.favorites = prefs.favorites(tab);
        state.recent = prefs.recent(tab);
        state.apply_mode = prefs.apply_mode();
        state.sort_mode = prefs.sort_mode(tab);
        if let Some(label) = prefs.source(tab) {
            state.source = state.checked_source(&label);
        }
        state
    }

    /// Source names offered to the user
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        sources_of(&self.data.styles, &self.data.sources)
    }

    /// Parse a source label, falling back to all sources when it is unknown
    #[must_use]
    pub fn checked_source(&self, label: &str) -> SourceSelection {
        match SourceSelection::parse(label, &self.settings.all_sources_label) {
            SourceSelection::Named(name) if self.sources().contains(&name) => SourceSelection::Named(name),
            SourceSelection::Named(name) => {
                tracing::debug!("Unknown source '{name}', showing all sources");
                SourceSelection::All
            }
            SourceSelection::All => SourceSelection::All,
        }
    }

    /// Label of the current source selection
    #[must_use]
    pub fn source_label(&self) -> String {
        self.source.label(&self.settings.all_sources_label).to_string()
    }

    /// Styles of the selected source, bucketed by derived category
    #[must_use]
    pub fn categories(&self) -> Categories {
        categorize(&filter_by_source(&self.data.styles, &self.source))
    }

    /// Category names in display order
    #[must_use]
    pub fn category_names(&self, categories: &Categories) -> Vec<String> {
        let order = if self.data.category_order.is_empty() {
            default_category_order()
        } else {
            self.data.category_order.clone()
        };
        order_categories(&categories.names(), &order)
    }

    /// Look up a style by name for applying it
    ///
    /// Prefers the record visible under the current source, then the
    /// highest-priority record from any source.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Style> {
        if let Some(style) = self.categories().find(name) {
            return Some(style.clone());
        }
        merge_by_priority(&self.data.styles)
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| crate::catalog::with_derived_names(&s))
    }

    /// Selected styles that resolve, in selection order
    #[must_use]
    pub fn selected_styles(&self) -> Vec<Style> {
        self.selected.iter().filter_map(|name| self.resolve(name)).collect()
    }

    /// Names of the selection in enumeration order
    #[must_use]
    pub fn selected_names(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
