use std::fs;

use neko_stopwatch::{
    settings::{FontSize, SettingsRecord, SettingsStore},
    SettingsError,
};
use tempfile::tempdir;

#[test]
fn first_load_creates_defaults_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");

    let mut store = SettingsStore::new(&path);
    let record = store.load().unwrap();

    assert_eq!(record, SettingsRecord::default());
    assert!(path.exists());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[Settings]"));
    assert!(text.contains("font=Arial"));
    assert!(text.contains("font_size=40"));
}

#[test]
fn load_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");

    let first = SettingsStore::new(&path).load().unwrap();
    let second = SettingsStore::new(&path).load().unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    let record = SettingsRecord {
        font_family: "Courier".to_string(),
        font_size: FontSize::try_from(55).unwrap(),
        text_color: "#FFFFFF".to_string(),
        background_color: "#000000".to_string(),
    };

    SettingsStore::new(&path).save(record.clone()).unwrap();
    let loaded = SettingsStore::new(&path).load().unwrap();

    assert_eq!(loaded, record);
}

#[test]
fn setters_persist_each_change() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.ini");

    let mut store = SettingsStore::open(&path);
    store.set_font("Courier New").unwrap();
    store.set_font_size(FontSize::try_from(70).unwrap()).unwrap();
    store.set_text_color("white").unwrap();
    store.set_background_color("#0000ff").unwrap();

    let loaded = SettingsStore::open(&path);
    assert_eq!(loaded.record().font_family, "Courier New");
    assert_eq!(loaded.record().font_size.get(), 70);
    assert_eq!(loaded.record().text_color, "white");
    assert_eq!(loaded.record().background_color, "#0000ff");
}

#[test]
fn missing_and_malformed_keys_fall_back_individually() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    fs::write(
        &path,
        "[Settings]\nfont=Verdana\nfont_size=big\ntext_color=#12\n",
    )
    .unwrap();

    let record = SettingsStore::new(&path).load().unwrap();

    assert_eq!(record.font_family, "Verdana");
    assert_eq!(record.font_size.get(), 40);
    assert_eq!(record.text_color, "black");
    assert_eq!(record.background_color, "#00FF00");
}

#[test]
fn font_size_outside_offered_sizes_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    fs::write(&path, "[Settings]\nfont_size=42\n").unwrap();

    let record = SettingsStore::new(&path).load().unwrap();
    assert_eq!(record.font_size.get(), 40);
}

#[test]
fn file_without_section_is_left_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    fs::write(&path, "[Other]\nfont=Verdana\n").unwrap();

    let record = SettingsStore::new(&path).load().unwrap();

    assert_eq!(record, SettingsRecord::default());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[Other]\nfont=Verdana\n");
}

#[test]
fn write_failure_is_surfaced_but_memory_keeps_value() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes every write fail
    let path = dir.path().join("settings.ini");
    fs::create_dir(&path).unwrap();

    let mut store = SettingsStore::new(&path);
    let err = store.set_font("Impact").unwrap_err();

    assert!(matches!(err, SettingsError::Write { .. }));
    assert_eq!(store.record().font_family, "Impact");
}

#[test]
fn unreadable_file_recovers_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    fs::create_dir(&path).unwrap();

    let mut store = SettingsStore::new(&path);
    let record = store.load().unwrap();
    assert_eq!(record, SettingsRecord::default());
}
