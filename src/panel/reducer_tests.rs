//! Unit tests for the panel reducer

use super::*;
use crate::catalog::SourceSelection;
use crate::panel::state::{CatalogData, PanelSettings};
use crate::prefs::{SortMode, Tab};
use crate::testing::sample_styles;

fn data() -> CatalogData {
    CatalogData {
        styles: sample_styles(),
        sources: Vec::new(),
        category_order: vec!["STYLE".into(), "SCENE".into()],
    }
}

fn panel() -> PanelState {
    PanelState::new(Tab::Txt2img, data(), PanelSettings::default())
}

fn panel_in(mode: ApplyMode) -> PanelState {
    PanelState {
        apply_mode: mode,
        ..panel()
    }
}

/// Reduce an event and write the resulting field effects back into `fields`
fn step(state: PanelState, event: PanelEvent, fields: &mut PromptFields) -> (PanelState, Vec<Effect>) {
    let Transition { state, effects } = reduce(state, event, fields);
    for effect in &effects {
        if let Effect::WriteField(field, text) = effect {
            fields.set(*field, text.clone());
        }
    }
    (state, effects)
}

fn toggle(name: &str) -> PanelEvent {
    PanelEvent::ToggleStyle(name.to_string())
}

#[test]
fn test_visibility_events() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), PanelEvent::Escape, &mut fields);
    assert!(!state.open);

    let (state, _) = step(state, PanelEvent::Toggle, &mut fields);
    assert!(state.open);
    let (state, _) = step(state, PanelEvent::Escape, &mut fields);
    assert!(!state.open);

    let (state, _) = step(state, PanelEvent::Open, &mut fields);
    let (state, _) = step(state, PanelEvent::Close, &mut fields);
    assert!(!state.open);
}

#[test]
fn test_search_input_and_settle() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), PanelEvent::SearchInput("wat".into()), &mut fields);
    assert_eq!(state.search_input, "wat");
    assert_eq!(state.search_query, "");

    let (state, _) = step(state, PanelEvent::SearchSettled("water".into()), &mut fields);
    assert_eq!(state.search_query, "water");
}

#[test]
fn test_prompt_mode_batch_apply() {
    let mut fields = PromptFields::new("a cat", "ugly");
    let (state, _) = step(panel(), PanelEvent::Open, &mut fields);
    let (state, _) = step(state, toggle("STYLE_Neon"), &mut fields);
    let (state, effects) = step(state, toggle("STYLE_Ink_Wash"), &mut fields);
    assert!(!effects.iter().any(|e| matches!(e, Effect::WriteField(..))));

    let (state, effects) = step(state, PanelEvent::Apply, &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, ink wash, monochrome, neon glow"));
    assert_eq!(fields.negative.as_deref(), Some("ugly, color"));
    assert!(effects.contains(&Effect::Persist(PrefChange::Recent(vec![
        "STYLE_Ink_Wash".into(),
        "STYLE_Neon".into()
    ]))));
    assert!(!state.open);
    assert_eq!(state.selected.len(), 2);
}

#[test]
fn test_prompt_mode_placeholder_applied_first() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel(), toggle("SCENE_Frame"), &mut fields);
    let (state, _) = step(state, toggle("SCENE_Lake"), &mut fields);
    let _ = step(state, PanelEvent::Apply, &mut fields);
    assert_eq!(
        fields.prompt.as_deref(),
        Some("a cat, on a lake shore, calm lake, water")
    );
}

#[test]
fn test_apply_with_empty_selection_does_nothing() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel(), PanelEvent::Open, &mut fields);
    let (state, effects) = step(state, PanelEvent::Apply, &mut fields);
    assert!(effects.is_empty());
    assert!(state.open);
    assert!(state.recent.is_empty());
}

#[test]
fn test_silent_mode_writes_selection() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel_in(ApplyMode::Silent), toggle("STYLE_Neon"), &mut fields);
    let (state, _) = step(state, toggle("SCENE_Lake"), &mut fields);
    let (_, effects) = step(state, PanelEvent::Apply, &mut fields);

    assert!(effects.contains(&Effect::WriteSelection(r#"["SCENE_Lake","STYLE_Neon"]"#.into())));
    assert!(!effects.iter().any(|e| matches!(e, Effect::WriteField(..))));
    assert_eq!(fields.prompt.as_deref(), Some("a cat"));
}

#[test]
fn test_on_select_round_trip() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, effects) = step(panel_in(ApplyMode::OnSelect), toggle("STYLE_Ink_Wash"), &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, ink wash, monochrome"));
    assert_eq!(fields.negative.as_deref(), Some("color"));
    assert!(effects.contains(&Effect::SelectionCount(1)));
    assert_eq!(
        state.applied.get("STYLE_Ink_Wash").and_then(|r| r.get(PromptField::Prompt)),
        Some("ink wash, monochrome")
    );

    let (state, effects) = step(state, toggle("STYLE_Ink_Wash"), &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat"));
    assert_eq!(fields.negative.as_deref(), Some(""));
    assert!(effects.contains(&Effect::SelectionCount(0)));
    assert!(state.applied.is_empty());
}

#[test]
fn test_on_select_placeholder_not_reversible() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel_in(ApplyMode::OnSelect), toggle("SCENE_Frame"), &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, on a lake shore"));
    assert!(state.applied.is_empty());

    let (_, effects) = step(state, toggle("SCENE_Frame"), &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, on a lake shore"));
    assert!(!effects.iter().any(|e| matches!(e, Effect::WriteField(..))));
}

#[test]
fn test_on_select_missing_field_is_skipped() {
    let mut fields = PromptFields {
        prompt: Some("a cat".into()),
        negative: None,
    };
    let (_, effects) = step(panel_in(ApplyMode::OnSelect), toggle("STYLE_Ink_Wash"), &mut fields);
    let writes: Vec<_> = effects
        .iter()
        .filter(|e| matches!(e, Effect::WriteField(..)))
        .collect();
    assert_eq!(writes.len(), 1);
    assert_eq!(fields.negative, None);
}

#[test]
fn test_on_select_clear_all_undoes_everything() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel_in(ApplyMode::OnSelect), toggle("STYLE_Ink_Wash"), &mut fields);
    let (state, _) = step(state, toggle("STYLE_Neon"), &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, ink wash, monochrome, neon glow"));

    let (state, _) = step(state, PanelEvent::ClearAll, &mut fields);
    assert_eq!(fields.prompt.as_deref(), Some("a cat"));
    assert!(state.selected.is_empty());
    assert!(state.applied.is_empty());
}

#[test]
fn test_on_select_records_recent() {
    let mut fields = PromptFields::new("", "");
    let (state, _) = step(panel_in(ApplyMode::OnSelect), toggle("STYLE_Neon"), &mut fields);
    let (state, _) = step(state, toggle("SCENE_Lake"), &mut fields);
    assert_eq!(state.recent, vec!["SCENE_Lake", "STYLE_Neon"]);
}

#[test]
fn test_remove_selected_chip() {
    let mut fields = PromptFields::new("", "");
    let (state, _) = step(panel(), toggle("STYLE_Neon"), &mut fields);
    let (state, effects) = step(state, PanelEvent::RemoveSelected("STYLE_Neon".into()), &mut fields);
    assert!(state.selected.is_empty());
    assert!(effects.contains(&Effect::SelectionCount(0)));

    let (_, effects) = step(state, PanelEvent::RemoveSelected("STYLE_Neon".into()), &mut fields);
    assert!(effects.is_empty());
}

#[test]
fn test_select_all_toggles() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), toggle("STYLE_Neon"), &mut fields);

    let (state, _) = step(state, PanelEvent::SelectAllInCategory("STYLE".into()), &mut fields);
    assert!(state.selected.contains("STYLE_Ink_Wash"));
    assert!(state.selected.contains("STYLE_Neon"));

    let (state, _) = step(state, PanelEvent::SelectAllInCategory("STYLE".into()), &mut fields);
    assert!(state.selected.is_empty());
}

#[test]
fn test_select_all_respects_search() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), PanelEvent::SearchSettled("neon".into()), &mut fields);
    let (state, _) = step(state, PanelEvent::SelectAllInCategory("STYLE".into()), &mut fields);
    assert_eq!(state.selected_names(), vec!["STYLE_Neon"]);

    let (state, effects) = step(state, PanelEvent::SelectAllInCategory("SCENE".into()), &mut fields);
    assert_eq!(state.selected.len(), 1);
    assert!(effects.is_empty());
}

#[test]
fn test_toggle_favorite_persists() {
    let mut fields = PromptFields::default();
    let (state, effects) = step(panel(), PanelEvent::ToggleFavorite("SCENE_Lake".into()), &mut fields);
    assert!(state.favorites.contains("SCENE_Lake"));
    assert_eq!(
        effects,
        vec![Effect::Persist(PrefChange::Favorites(state.favorites.clone()))]
    );

    let (state, _) = step(state, PanelEvent::ToggleFavorite("SCENE_Lake".into()), &mut fields);
    assert!(state.favorites.is_empty());
}

#[test]
fn test_select_source() {
    let mut fields = PromptFields::default();
    let (state, effects) = step(panel(), PanelEvent::SelectSource("art.csv".into()), &mut fields);
    assert_eq!(state.source, SourceSelection::Named("art.csv".into()));
    assert_eq!(effects, vec![Effect::Persist(PrefChange::Source("art.csv".into()))]);

    let (state, effects) = step(state, PanelEvent::SelectSource("missing.csv".into()), &mut fields);
    assert_eq!(state.source, SourceSelection::All);
    assert_eq!(effects, vec![Effect::Persist(PrefChange::Source("All Sources".into()))]);
}

#[test]
fn test_mode_changes_persist() {
    let mut fields = PromptFields::default();
    let (state, effects) = step(panel(), PanelEvent::SetApplyMode(ApplyMode::Silent), &mut fields);
    assert_eq!(state.apply_mode, ApplyMode::Silent);
    assert_eq!(effects, vec![Effect::Persist(PrefChange::ApplyMode(ApplyMode::Silent))]);

    let (state, effects) = step(state, PanelEvent::SetSortMode(SortMode::Source), &mut fields);
    assert_eq!(state.sort_mode, SortMode::Source);
    assert_eq!(effects, vec![Effect::Persist(PrefChange::SortMode(SortMode::Source))]);
}

#[test]
fn test_collapse() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), PanelEvent::ToggleCollapsed("SCENE".into()), &mut fields);
    assert!(state.collapsed.contains("SCENE"));
    let (state, _) = step(state, PanelEvent::ToggleCollapsed("SCENE".into()), &mut fields);
    assert!(state.collapsed.is_empty());

    let (state, _) = step(state, PanelEvent::CollapseAll, &mut fields);
    assert_eq!(state.collapsed.len(), 3);
    let (state, _) = step(state, PanelEvent::CollapseAll, &mut fields);
    assert!(state.collapsed.is_empty());
}

#[test]
fn test_compact_toggle() {
    let mut fields = PromptFields::default();
    let (state, _) = step(panel(), PanelEvent::ToggleCompact, &mut fields);
    assert!(state.compact);
}

#[test]
fn test_save_preset() {
    let mut fields = PromptFields::default();
    let (state, effects) = step(panel(), PanelEvent::SavePreset("mix".into()), &mut fields);
    assert!(effects.is_empty());

    let (state, _) = step(state, toggle("STYLE_Neon"), &mut fields);
    let (state, effects) = step(state, PanelEvent::SavePreset("   ".into()), &mut fields);
    assert!(effects.is_empty());

    let (_, effects) = step(state, PanelEvent::SavePreset(" mix ".into()), &mut fields);
    match effects.as_slice() {
        [Effect::Persist(PrefChange::Preset(preset))] => {
            assert_eq!(preset.name, "mix");
            assert_eq!(preset.styles, vec!["STYLE_Neon"]);
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn test_load_preset_replaces_selection() {
    let mut fields = PromptFields::new("a cat", "");
    let (state, _) = step(panel_in(ApplyMode::OnSelect), toggle("STYLE_Neon"), &mut fields);
    let preset = Preset::new("p", vec!["SCENE_Lake".into(), "Nope".into()]);

    let (state, _) = step(state, PanelEvent::LoadPreset(preset), &mut fields);
    assert_eq!(state.selected_names(), vec!["SCENE_Lake"]);
    assert_eq!(fields.prompt.as_deref(), Some("a cat, calm lake, water"));
}

#[test]
fn test_refresh() {
    let mut fields = PromptFields::default();
    let (state, effects) = step(panel(), PanelEvent::RequestRefresh, &mut fields);
    assert_eq!(effects, vec![Effect::RequestReload]);

    let (state, _) = step(state, PanelEvent::SelectSource("places.csv".into()), &mut fields);
    let fresh = CatalogData {
        styles: vec![crate::Style::new("STYLE_New").with_source("new.csv", 0)],
        ..CatalogData::default()
    };
    let (state, _) = step(state, PanelEvent::Refresh(fresh), &mut fields);
    assert_eq!(state.data.styles.len(), 1);
    assert_eq!(state.source, SourceSelection::All);
}

#[test]
fn test_recent_is_bounded() {
    let mut state = panel();
    state.settings.recent_limit = 2;
    let mut fields = PromptFields::new("", "");
    for name in ["STYLE_Neon", "SCENE_Lake", "Plain"] {
        let (s, _) = step(state, toggle(name), &mut fields);
        let (s, _) = step(s, PanelEvent::Apply, &mut fields);
        let (s, _) = step(s, PanelEvent::ClearAll, &mut fields);
        state = s;
    }
    assert_eq!(state.recent, vec!["Plain", "SCENE_Lake"]);
}
