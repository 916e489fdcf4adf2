//! Unit tests for the preference store

use super::*;
use crate::testing::TestPrefs;

#[test]
fn test_defaults_on_empty_store() {
    let prefs = TestPrefs::new();
    assert!(prefs.favorites(Tab::Txt2img).is_empty());
    assert!(prefs.recent(Tab::Txt2img).is_empty());
    assert_eq!(prefs.source(Tab::Txt2img), None);
    assert_eq!(prefs.apply_mode(), ApplyMode::Prompt);
    assert_eq!(prefs.sort_mode(Tab::Img2img), SortMode::Name);
    assert!(prefs.presets(Tab::Txt2img).is_empty());
}

#[test]
fn test_favorites_round_trip() {
    let prefs = TestPrefs::new();
    let favorites: BTreeSet<String> = ["STYLE_Ink", "SCENE_Lake"].into_iter().map(String::from).collect();
    prefs.set_favorites(Tab::Txt2img, &favorites).unwrap();
    assert_eq!(prefs.favorites(Tab::Txt2img), favorites);
}

#[test]
fn test_tabs_are_isolated() {
    let prefs = TestPrefs::new();
    prefs.set_source(Tab::Txt2img, "a.csv").unwrap();
    prefs.set_sort_mode(Tab::Img2img, SortMode::Source).unwrap();

    assert_eq!(prefs.source(Tab::Txt2img).as_deref(), Some("a.csv"));
    assert_eq!(prefs.source(Tab::Img2img), None);
    assert_eq!(prefs.sort_mode(Tab::Txt2img), SortMode::Name);
    assert_eq!(prefs.sort_mode(Tab::Img2img), SortMode::Source);
}

#[test]
fn test_apply_mode_is_global() {
    let prefs = TestPrefs::new();
    prefs.set_apply_mode(ApplyMode::OnSelect).unwrap();
    assert_eq!(prefs.apply_mode(), ApplyMode::OnSelect);
}

#[test]
fn test_undecodable_value_falls_back() {
    let prefs = TestPrefs::new();
    prefs.prefs.insert("txt2img/sort_mode", vec![0xff, 0xff, 0xff]).unwrap();
    assert_eq!(prefs.sort_mode(Tab::Txt2img), SortMode::Name);

    Preferences::put(&prefs.prefs, APPLY_MODE, &"sideways").unwrap();
    assert_eq!(prefs.apply_mode(), ApplyMode::Prompt);
}

#[test]
fn test_push_recent_orders_and_limits() {
    let old = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let names = vec!["C".to_string(), "D".to_string()];
    assert_eq!(push_recent(old, &names, 4), vec!["C", "D", "A", "B"]);

    let old = vec!["A".to_string()];
    let names = vec!["B".to_string(), "B".to_string()];
    assert_eq!(push_recent(old, &names, 10), vec!["B", "A"]);
    assert!(push_recent(vec!["A".into()], &[], 0).is_empty());
}

#[test]
fn test_push_recent_persists() {
    let prefs = TestPrefs::new();
    prefs.push_recent(Tab::Txt2img, &["A".to_string()], 2).unwrap();
    prefs.push_recent(Tab::Txt2img, &["B".to_string()], 2).unwrap();
    let recent = prefs.push_recent(Tab::Txt2img, &["C".to_string()], 2).unwrap();
    assert_eq!(recent, vec!["C", "B"]);
    assert_eq!(prefs.recent(Tab::Txt2img), recent);
}

#[test]
fn test_presets_save_list_delete() {
    let prefs = TestPrefs::new();
    prefs
        .save_preset(Tab::Txt2img, &Preset::new("noir", vec!["STYLE_Ink".into()]))
        .unwrap();
    prefs
        .save_preset(Tab::Txt2img, &Preset::new("beach", vec!["SCENE_Beach".into()]))
        .unwrap();
    prefs
        .save_preset(Tab::Img2img, &Preset::new("other", Vec::new()))
        .unwrap();

    let names: Vec<_> = prefs.presets(Tab::Txt2img).into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["beach", "noir"]);
    assert_eq!(prefs.preset(Tab::Txt2img, "noir").unwrap().styles, vec!["STYLE_Ink"]);

    assert!(prefs.delete_preset(Tab::Txt2img, "noir").unwrap());
    assert!(!prefs.delete_preset(Tab::Txt2img, "noir").unwrap());
    assert!(prefs.preset(Tab::Txt2img, "noir").is_none());
}

#[test]
fn test_preset_overwrite() {
    let prefs = TestPrefs::new();
    prefs.save_preset(Tab::Txt2img, &Preset::new("p", vec!["A".into()])).unwrap();
    prefs.save_preset(Tab::Txt2img, &Preset::new("p", vec!["B".into()])).unwrap();
    assert_eq!(prefs.presets(Tab::Txt2img).len(), 1);
    assert_eq!(prefs.preset(Tab::Txt2img, "p").unwrap().styles, vec!["B"]);
}

#[test]
fn test_preset_listing_skips_unreadable_entries() {
    let prefs = TestPrefs::new();
    prefs.save_preset(Tab::Txt2img, &Preset::new("b", vec!["B".into()])).unwrap();
    prefs.save_preset(Tab::Txt2img, &Preset::new("a", vec!["A".into()])).unwrap();
    prefs.save_preset(Tab::Img2img, &Preset::new("c", Vec::new())).unwrap();
    prefs
        .presets
        .insert(Preferences::key(Tab::Txt2img, "broken").as_bytes(), &[0xff_u8, 0xff, 0xff][..])
        .unwrap();

    let listed = prefs.presets(Tab::Txt2img);
    let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(listed[1].styles, vec!["B"]);
}

#[test]
fn test_blank_preset_name_rejected() {
    let prefs = TestPrefs::new();
    let result = prefs.save_preset(Tab::Txt2img, &Preset::new("  ", Vec::new()));
    assert!(matches!(result, Err(PrefsError::InvalidInput(_))));
}

#[test]
fn test_clear() {
    let prefs = TestPrefs::new();
    prefs.set_source(Tab::Txt2img, "a.csv").unwrap();
    prefs.save_preset(Tab::Txt2img, &Preset::new("p", Vec::new())).unwrap();
    prefs.clear().unwrap();
    assert_eq!(prefs.source(Tab::Txt2img), None);
    assert!(prefs.presets(Tab::Txt2img).is_empty());
}

#[test]
fn test_reopen_keeps_values() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("prefs");
    {
        let prefs = Preferences::open(&path).unwrap();
        prefs.set_apply_mode(ApplyMode::Silent).unwrap();
        prefs.flush().unwrap();
    }
    let prefs = Preferences::open(&path).unwrap();
    assert_eq!(prefs.apply_mode(), ApplyMode::Silent);
}
