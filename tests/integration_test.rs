//! Integration tests for stylegrid
//!
//! These tests build temporary styles directories and preference stores and
//! drive the public API end to end: scanning, categorizing, searching and
//! applying styles through a panel.

use std::fs;
use std::path::Path;
use std::time::Duration;
use stylegrid::{
    catalog::{SourceSelection, categorize, filter_by_source, order_categories},
    loader::{StyleDir, StyleSet, scan_dirs, selection_from_json},
    merge::{PromptField, apply_fragments, remove_fragment},
    panel::{CatalogData, MemoryHost, PanelController, PanelEvent, PanelSettings},
    prefs::{ApplyMode, Preferences, Tab},
    search::ParsedQuery,
};
use tempfile::TempDir;

const BUILTIN_CSV: &str = "name,prompt,negative_prompt
STYLE_Ink_Wash,ink wash,color
SCENE_Lake,calm lake at dawn,
Plain,plain look,
";

const USER_CSV: &str = "STYLE_Ink_Wash,{prompt} in heavy ink,blurry
SCENE_Ocean,water and waves,
";

/// Helper function to create a styles directory with one CSV file
fn styles_dir(file_name: &str, content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_csv(dir.path(), file_name, content);
    dir
}

fn write_csv(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).unwrap();
}

fn scan(builtin: &TempDir, user: &TempDir) -> StyleSet {
    scan_dirs(&[StyleDir::new(builtin.path(), 0), StyleDir::new(user.path(), 2)]).unwrap()
}

fn panel<'p>(
    prefs: &'p Preferences,
    set: StyleSet,
    host: MemoryHost,
) -> PanelController<'p, MemoryHost> {
    let data = CatalogData::new(set, vec!["SCENE".into()]);
    PanelController::new(
        Tab::Txt2img,
        data,
        PanelSettings::default(),
        host,
        prefs,
        Duration::ZERO,
    )
}

fn visible_names(panel: &PanelController<'_, MemoryHost>) -> Vec<String> {
    panel
        .view()
        .sections
        .iter()
        .flat_map(|s| s.cards.iter().map(|c| c.name.clone()))
        .collect()
}

#[test]
fn test_scan_merges_sources_by_priority() {
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let set = scan(&builtin, &user);

    assert_eq!(set.sources, vec!["builtin.csv", "user.csv"]);
    assert_eq!(set.styles.len(), 5);

    let merged = filter_by_source(&set.styles, &SourceSelection::All);
    assert_eq!(merged.len(), 4);
    let ink = merged.iter().find(|s| s.name == "STYLE_Ink_Wash").unwrap();
    assert_eq!(ink.source.as_deref(), Some("user.csv"));
    assert_eq!(ink.prompt.as_deref(), Some("{prompt} in heavy ink"));
}

#[test]
fn test_categories_follow_configured_order() {
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let set = scan(&builtin, &user);

    let categories = categorize(&filter_by_source(&set.styles, &SourceSelection::All));
    let ordered = order_categories(&categories.names(), &["SCENE".to_string()]);
    assert_eq!(ordered, vec!["SCENE", "STYLE", "OTHER"]);

    let scene: Vec<&str> = categories
        .get("SCENE")
        .unwrap()
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    assert_eq!(scene, vec!["Lake", "Ocean"]);
}

#[test]
fn test_named_source_keeps_its_own_records() {
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let set = scan(&builtin, &user);

    let selection = SourceSelection::parse("builtin.csv", "All Sources");
    let styles = filter_by_source(&set.styles, &selection);
    let ink = styles.iter().find(|s| s.name == "STYLE_Ink_Wash").unwrap();
    assert_eq!(ink.prompt.as_deref(), Some("ink wash"));
    assert!(styles.iter().all(|s| s.source.as_deref() == Some("builtin.csv")));
}

#[test]
fn test_query_language_end_to_end() {
    let temp = TempDir::new().unwrap();
    let prefs = Preferences::open(temp.path().join("prefs")).unwrap();
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let mut panel = panel(&prefs, scan(&builtin, &user), MemoryHost::default());

    assert!(ParsedQuery::parse("  ").is_empty());

    panel.dispatch(PanelEvent::SearchSettled("water".into())).unwrap();
    assert_eq!(visible_names(&panel), vec!["SCENE_Ocean"]);

    panel.dispatch(PanelEvent::SearchSettled("@scene -waves".into())).unwrap();
    assert_eq!(visible_names(&panel), vec!["SCENE_Lake"]);

    panel.dispatch(PanelEvent::SearchSettled("\"calm lake\"".into())).unwrap();
    assert_eq!(visible_names(&panel), vec!["SCENE_Lake"]);

    panel.dispatch(PanelEvent::SearchSettled("nothing-matches".into())).unwrap();
    assert!(panel.view().sections.is_empty());
}

#[test]
fn test_apply_through_panel_and_remember_recent() {
    let temp = TempDir::new().unwrap();
    let prefs = Preferences::open(temp.path().join("prefs")).unwrap();
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let host = MemoryHost::new("a cat", "");
    let mut panel = panel(&prefs, scan(&builtin, &user), host);

    panel.dispatch(PanelEvent::Open).unwrap();
    panel.dispatch(PanelEvent::ToggleStyle("STYLE_Ink_Wash".into())).unwrap();
    panel.dispatch(PanelEvent::ToggleStyle("SCENE_Lake".into())).unwrap();
    panel.dispatch(PanelEvent::Apply).unwrap();

    let host = panel.host();
    assert_eq!(
        host.field(PromptField::Prompt),
        Some("a cat in heavy ink, calm lake at dawn")
    );
    assert_eq!(host.field(PromptField::Negative), Some("blurry"));
    assert!(!panel.view().open);

    let recent = prefs.recent(Tab::Txt2img);
    assert_eq!(recent.len(), 2);
    assert!(recent.contains(&"SCENE_Lake".to_string()));
}

#[test]
fn test_silent_mode_hands_over_selection() {
    let temp = TempDir::new().unwrap();
    let prefs = Preferences::open(temp.path().join("prefs")).unwrap();
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let mut panel = panel(&prefs, scan(&builtin, &user), MemoryHost::new("a cat", ""))
        .with_apply_mode(ApplyMode::Silent);

    panel.dispatch(PanelEvent::ToggleStyle("Plain".into())).unwrap();
    assert_eq!(panel.host().selection(), None);
    panel.dispatch(PanelEvent::Apply).unwrap();

    let json = panel.host().selection().unwrap_or_default().to_string();
    assert_eq!(selection_from_json(&json), vec!["Plain"]);
    assert_eq!(panel.host().field(PromptField::Prompt), Some("a cat"));
    assert_eq!(prefs.apply_mode(), ApplyMode::Prompt);
}

#[test]
fn test_preferences_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefs");
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);

    {
        let prefs = Preferences::open(&path).unwrap();
        let mut panel = panel(&prefs, scan(&builtin, &user), MemoryHost::default());
        panel.dispatch(PanelEvent::ToggleFavorite("SCENE_Ocean".into())).unwrap();
        panel.dispatch(PanelEvent::SelectSource("user.csv".into())).unwrap();
        prefs.flush().unwrap();
    }

    let prefs = Preferences::open(&path).unwrap();
    assert!(prefs.favorites(Tab::Txt2img).contains("SCENE_Ocean"));
    assert!(prefs.favorites(Tab::Img2img).is_empty());

    let panel = panel(&prefs, scan(&builtin, &user), MemoryHost::default());
    assert_eq!(panel.view().source, "user.csv");
}

#[test]
fn test_refresh_picks_up_new_files() {
    let temp = TempDir::new().unwrap();
    let prefs = Preferences::open(temp.path().join("prefs")).unwrap();
    let builtin = styles_dir("builtin.csv", BUILTIN_CSV);
    let user = styles_dir("user.csv", USER_CSV);
    let mut panel = panel(&prefs, scan(&builtin, &user), MemoryHost::default());

    write_csv(user.path(), "extra.csv", "LIGHT_Rim,rim light,\n");
    let data = CatalogData::new(scan(&builtin, &user), vec!["SCENE".into()]);
    panel.dispatch(PanelEvent::Refresh(data)).unwrap();

    assert_eq!(panel.view().sources, vec!["builtin.csv", "extra.csv", "user.csv"]);
    assert!(visible_names(&panel).contains(&"LIGHT_Rim".to_string()));
}

#[test]
fn test_fragment_splice_and_remove() {
    let prompt = apply_fragments("a cat", &["{prompt} at night", "film grain"]);
    assert_eq!(prompt, "a cat at night, film grain");
    assert_eq!(remove_fragment(&prompt, "film grain"), "a cat at night");
}
