//! Stateless rendering of a panel state into a view model
//!
//! Sections are the favorites pseudo-category (when any favorite is
//! visible) followed by the categories in display order. Each section holds
//! only the cards passing the settled search; empty sections are omitted.

use super::conflicts::{Conflict, detect};
use super::state::PanelState;
use crate::Style;
use crate::catalog::OTHER_CATEGORY;
use crate::prefs::{ApplyMode, SortMode};
use crate::search::{ParsedQuery, StyleFilterExt, category_shortcut};
use serde::Serialize;

/// Name of the pseudo-category listing favorite styles
pub const FAVORITES_SECTION: &str = "FAVORITES";

const OTHER_COLOR: &str = "#6b7280";

const CATEGORY_COLORS: [(&str, &str); 10] = [
    (FAVORITES_SECTION, "#eab308"),
    ("BASE", "#6366f1"),
    ("STYLE", "#3b82f6"),
    ("SCENE", "#22c55e"),
    ("THEME", "#8b5cf6"),
    ("POSE", "#14b8a6"),
    ("LIGHTING", "#f59e0b"),
    ("COLOR", "#ec4899"),
    ("CAMERA", "#f97316"),
    (OTHER_CATEGORY, OTHER_COLOR),
];

/// Accent color of a section, unknown categories share the `OTHER` color
#[must_use]
pub fn category_color(name: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(category, _)| *category == name)
        .map_or(OTHER_COLOR, |&(_, color)| color)
}

/// A named group of styles in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub styles: Vec<Style>,
}

/// Sections before search filtering, favorites first
fn display_sections(state: &PanelState) -> Vec<Section> {
    let categories = state.categories();
    let mut sections = Vec::new();

    let favorites: Vec<Style> = categories
        .styles()
        .filter(|s| state.favorites.contains(&s.name))
        .cloned()
        .collect();
    if !favorites.is_empty() {
        sections.push(Section {
            name: FAVORITES_SECTION.to_string(),
            styles: favorites,
        });
    }

    for name in state.category_names(&categories) {
        if let Some(styles) = categories.get(&name) {
            sections.push(Section {
                name,
                styles: styles.to_vec(),
            });
        }
    }
    sections
}

/// Names of every displayed section, ignoring the search
#[must_use]
pub fn section_names(state: &PanelState) -> Vec<String> {
    display_sections(state).into_iter().map(|s| s.name).collect()
}

fn sort_styles(styles: &mut [Style], mode: SortMode) {
    match mode {
        SortMode::Name => styles.sort_by_cached_key(|s| s.label().to_lowercase()),
        SortMode::Source => styles.sort_by_cached_key(|s| {
            (s.source.clone().unwrap_or_default(), s.label().to_lowercase())
        }),
    }
}

/// Sections with the cards passing the settled search, sorted
#[must_use]
pub fn visible_sections(state: &PanelState) -> Vec<Section> {
    let sections = display_sections(state);
    let query = state.search_query.trim();

    if state.settings.category_shortcut {
        let categories: Vec<String> = sections
            .iter()
            .filter(|s| s.name != FAVORITES_SECTION)
            .map(|s| s.name.clone())
            .collect();
        if let Some(category) = category_shortcut(query, &categories).map(String::from) {
            return sections
                .into_iter()
                .filter(|s| s.name == category)
                .map(|mut s| {
                    sort_styles(&mut s.styles, state.sort_mode);
                    s
                })
                .collect();
        }
    }

    let parsed = ParsedQuery::parse(query);
    let scope = state.settings.search_scope;
    sections
        .into_iter()
        .filter_map(|section| {
            let mut styles: Vec<Style> = section
                .styles
                .iter()
                .matching_in(&section.name, &parsed, scope)
                .into_iter()
                .cloned()
                .collect();
            if styles.is_empty() {
                return None;
            }
            sort_styles(&mut styles, state.sort_mode);
            Some(Section {
                name: section.name,
                styles,
            })
        })
        .collect()
}

/// Visible styles of one section, empty when the section is hidden
#[must_use]
pub fn visible_in(state: &PanelState, section: &str) -> Vec<Style> {
    visible_sections(state)
        .into_iter()
        .find(|s| s.name == section)
        .map(|s| s.styles)
        .unwrap_or_default()
}

/// One style card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub label: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub selected: bool,
    pub favorite: bool,
}

/// One collapsible section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub name: String,
    pub color: &'static str,
    pub count: usize,
    pub collapsed: bool,
    pub cards: Vec<CardView>,
}

/// Footer entry for a selected style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chip {
    pub name: String,
    pub label: String,
}

/// Everything a front end needs to draw the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub compact: bool,
    pub search: String,
    pub sources: Vec<String>,
    pub source: String,
    pub apply_mode: ApplyMode,
    pub sort_mode: SortMode,
    pub sections: Vec<SectionView>,
    pub all_collapsed: bool,
    pub selected_count: usize,
    pub chips: Vec<Chip>,
    pub conflicts: Vec<Conflict>,
}

/// Render a panel state
#[must_use]
pub fn view(state: &PanelState) -> PanelView {
    let sections: Vec<SectionView> = visible_sections(state)
        .into_iter()
        .map(|section| SectionView {
            color: category_color(&section.name),
            count: section.styles.len(),
            collapsed: state.collapsed.contains(&section.name),
            cards: section
                .styles
                .into_iter()
                .map(|style| CardView {
                    selected: state.selected.contains(&style.name),
                    favorite: state.favorites.contains(&style.name),
                    label: style.label().to_string(),
                    name: style.name,
                    category: style.category,
                    prompt: style.prompt,
                    negative_prompt: style.negative_prompt,
                    source: style.source,
                })
                .collect(),
            name: section.name,
        })
        .collect();

    let names = section_names(state);
    let all_collapsed = !names.is_empty() && names.iter().all(|n| state.collapsed.contains(n));

    let selected = state.selected_styles();
    let chips = state
        .selected
        .iter()
        .map(|name| Chip {
            name: name.clone(),
            label: selected
                .iter()
                .find(|s| &s.name == name)
                .map_or_else(|| name.clone(), |s| s.label().to_string()),
        })
        .collect();

    PanelView {
        open: state.open,
        compact: state.compact,
        search: state.search_input.clone(),
        sources: state.sources(),
        source: state.source_label(),
        apply_mode: state.apply_mode,
        sort_mode: state.sort_mode,
        sections,
        all_collapsed,
        selected_count: state.selected.len(),
        chips,
        conflicts: detect(&selected),
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod view_tests;
