//! The panel reducer: `(state, event, fields) -> (state, effects)`
//!
//! All mutation of [`PanelState`] happens here. Prompt text changes are
//! computed against a working copy of the host fields and emitted as
//! [`Effect::WriteField`] only for fields whose text actually changed.

use super::event::{Effect, PanelEvent, PrefChange, PromptFields, Transition};
use super::state::PanelState;
use super::view::{section_names, visible_in};
use crate::loader::selection_to_json;
use crate::merge::{AppliedRecord, PromptField, append_tracked, apply_styles, remove_fragment};
use crate::prefs::{ApplyMode, Preset, push_recent};
use std::collections::BTreeSet;

struct Reduction<'f> {
    state: PanelState,
    fields: PromptFields,
    original: &'f PromptFields,
    effects: Vec<Effect>,
}

impl<'f> Reduction<'f> {
    fn new(state: PanelState, original: &'f PromptFields) -> Self {
        Self {
            state,
            fields: original.clone(),
            original,
            effects: Vec::new(),
        }
    }

    fn select(&mut self, name: &str) {
        if !self.state.selected.insert(name.to_string()) {
            return;
        }
        if self.state.apply_mode == ApplyMode::OnSelect {
            self.apply_immediately(name);
        }
    }

    fn deselect(&mut self, name: &str) {
        if self.state.selected.remove(name) {
            self.undo(name);
        }
    }

    /// Append a style's fragments now and record what can be taken back
    fn apply_immediately(&mut self, name: &str) {
        let Some(style) = self.state.resolve(name) else {
            tracing::debug!("Selected style '{name}' is not in the catalog");
            return;
        };

        let mut record = AppliedRecord::default();
        for field in PromptField::ALL {
            let Some(fragment) = style.fragment(field) else {
                continue;
            };
            let Some(current) = self.fields.get(field) else {
                tracing::debug!("Host has no {field} field, skipping");
                continue;
            };
            let (text, literal) = append_tracked(current, fragment);
            self.fields.set(field, text);
            record.set(field, literal);
        }

        if record != AppliedRecord::default() {
            self.state.applied.insert(name.to_string(), record);
        }
        self.remember(&[name.to_string()]);
    }

    /// Remove the literals a style contributed in on-select mode
    fn undo(&mut self, name: &str) {
        let Some(record) = self.state.applied.remove(name) else {
            return;
        };
        for field in PromptField::ALL {
            if let Some(literal) = record.get(field)
                && let Some(current) = self.fields.get(field)
            {
                let text = remove_fragment(current, literal);
                self.fields.set(field, text);
            }
        }
    }

    fn remember(&mut self, names: &[String]) {
        let recent = std::mem::take(&mut self.state.recent);
        self.state.recent = push_recent(recent, names, self.state.settings.recent_limit);
        self.effects
            .push(Effect::Persist(PrefChange::Recent(self.state.recent.clone())));
    }

    fn apply(&mut self) {
        if self.state.selected.is_empty() {
            return;
        }
        let names = self.state.selected_names();

        match self.state.apply_mode {
            ApplyMode::Prompt => {
                let styles = self.state.selected_styles();
                for field in PromptField::ALL {
                    if let Some(current) = self.fields.get(field) {
                        let text = apply_styles(current, &styles, field);
                        self.fields.set(field, text);
                    }
                }
            }
            ApplyMode::Silent => {
                self.effects.push(Effect::WriteSelection(selection_to_json(&names)));
            }
            ApplyMode::OnSelect => {}
        }

        tracing::info!(
            styles = names.len(),
            mode = %self.state.apply_mode,
            "applied styles"
        );
        self.remember(&names);
        self.state.open = false;
    }

    fn select_all_in(&mut self, section: &str) {
        let visible: Vec<String> = visible_in(&self.state, section)
            .into_iter()
            .map(|s| s.name)
            .collect();
        if visible.is_empty() {
            return;
        }

        if visible.iter().all(|name| self.state.selected.contains(name)) {
            for name in &visible {
                self.deselect(name);
            }
        } else {
            for name in &visible {
                self.select(name);
            }
        }
    }

    fn clear_all(&mut self) {
        for name in self.state.selected_names() {
            self.deselect(&name);
        }
    }

    fn load_preset(&mut self, preset: &Preset) {
        let wanted: BTreeSet<&str> = preset.styles.iter().map(String::as_str).collect();
        for name in self.state.selected_names() {
            if !wanted.contains(name.as_str()) {
                self.deselect(&name);
            }
        }
        for name in &preset.styles {
            if self.state.resolve(name).is_some() {
                self.select(name);
            } else {
                tracing::warn!("Preset '{}' names unknown style '{name}'", preset.name);
            }
        }
    }

    fn save_preset(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.state.selected.is_empty() {
            tracing::debug!("Not saving preset: blank name or empty selection");
            return;
        }
        let preset = Preset::new(name, self.state.selected_names());
        self.effects.push(Effect::Persist(PrefChange::Preset(preset)));
    }

    fn toggle_collapsed(&mut self, section: &str) {
        if !self.state.collapsed.remove(section) {
            self.state.collapsed.insert(section.to_string());
        }
    }

    fn collapse_all(&mut self) {
        let names = section_names(&self.state);
        if names.iter().all(|n| self.state.collapsed.contains(n)) {
            for name in &names {
                self.state.collapsed.remove(name);
            }
        } else {
            self.state.collapsed.extend(names);
        }
    }

    fn finish(self, selection_changed: bool) -> Transition {
        let mut effects: Vec<Effect> = PromptField::ALL
            .into_iter()
            .filter_map(|field| {
                let text = self.fields.get(field)?;
                (self.original.get(field) != Some(text))
                    .then(|| Effect::WriteField(field, text.to_string()))
            })
            .collect();
        effects.extend(self.effects);

        if selection_changed {
            effects.push(Effect::SelectionCount(self.state.selected.len()));
        }

        Transition {
            state: self.state,
            effects,
        }
    }
}

/// Reduce one event
///
/// `fields` is a snapshot of the host's prompt fields taken just before the
/// event; a `None` field is never written.
#[must_use]
pub fn reduce(state: PanelState, event: PanelEvent, fields: &PromptFields) -> Transition {
    tracing::debug!(?event, "panel event");

    let before = state.selected.clone();
    let mut r = Reduction::new(state, fields);

    match event {
        PanelEvent::Open => r.state.open = true,
        PanelEvent::Close => r.state.open = false,
        PanelEvent::Toggle => r.state.open = !r.state.open,
        PanelEvent::Escape => {
            if r.state.open {
                r.state.open = false;
            }
        }
        PanelEvent::SearchInput(raw) => r.state.search_input = raw,
        PanelEvent::SearchSettled(raw) => r.state.search_query = raw,
        PanelEvent::ToggleStyle(name) => {
            if r.state.selected.contains(&name) {
                r.deselect(&name);
            } else {
                r.select(&name);
            }
        }
        PanelEvent::ToggleFavorite(name) => {
            if !r.state.favorites.remove(&name) {
                r.state.favorites.insert(name);
            }
            let favorites = r.state.favorites.clone();
            r.effects.push(Effect::Persist(PrefChange::Favorites(favorites)));
        }
        PanelEvent::SelectAllInCategory(section) => r.select_all_in(&section),
        PanelEvent::RemoveSelected(name) => r.deselect(&name),
        PanelEvent::ClearAll => r.clear_all(),
        PanelEvent::SelectSource(label) => {
            r.state.source = r.state.checked_source(&label);
            let label = r.state.source_label();
            r.effects.push(Effect::Persist(PrefChange::Source(label)));
        }
        PanelEvent::SetApplyMode(mode) => {
            r.state.apply_mode = mode;
            r.effects.push(Effect::Persist(PrefChange::ApplyMode(mode)));
        }
        PanelEvent::SetSortMode(mode) => {
            r.state.sort_mode = mode;
            r.effects.push(Effect::Persist(PrefChange::SortMode(mode)));
        }
        PanelEvent::ToggleCollapsed(section) => r.toggle_collapsed(&section),
        PanelEvent::CollapseAll => r.collapse_all(),
        PanelEvent::ToggleCompact => r.state.compact = !r.state.compact,
        PanelEvent::Apply => r.apply(),
        PanelEvent::LoadPreset(preset) => r.load_preset(&preset),
        PanelEvent::SavePreset(name) => r.save_preset(&name),
        PanelEvent::RequestRefresh => r.effects.push(Effect::RequestReload),
        PanelEvent::Refresh(data) => {
            tracing::info!(styles = data.styles.len(), "refreshed style data");
            r.state.data = data;
            let label = r.state.source_label();
            r.state.source = r.state.checked_source(&label);
        }
    }

    let changed = r.state.selected != before;
    r.finish(changed)
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod reducer_tests;
