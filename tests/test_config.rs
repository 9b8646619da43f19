use std::fs;

use chicken_chop::compute::{Game, Key};
use chicken_chop::config::{Args, Settings};
use chicken_chop::entities::{Screen, Viewport};
use chicken_chop::menu::PRESS_SETTLE_FRAMES;
use chicken_chop::name_store::{FileNameStore, MemoryNameStore, NameStore};

use tempfile::tempdir;

// ── Name store ────────────────────────────────────────────────────────────────

#[test]
fn missing_name_file_reads_empty() {
    let dir = tempdir().unwrap();
    let store = FileNameStore::new(dir.path().join("name.json"));
    assert_eq!(store.get(), "");
}

#[test]
fn name_survives_a_new_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("name.json");
    let mut store = FileNameStore::new(&path);
    store.set("Ada");
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(FileNameStore::new(&path).get(), "Ada");

    store.set("Grace");
    assert_eq!(FileNameStore::new(&path).get(), "Grace");
}

#[test]
fn malformed_name_file_reads_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("name.json");
    fs::write(&path, "not json").unwrap();
    assert_eq!(FileNameStore::new(&path).get(), "");
}

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryNameStore::default();
    assert_eq!(store.get(), "");
    store.set("Bo");
    assert_eq!(store.get(), "Bo");
}

#[test]
fn start_button_persists_the_typed_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("name.json");
    let mut game = Game::new(
        Viewport::new(800.0, 600.0),
        Some(1),
        Box::new(FileNameStore::new(&path)),
    );
    for c in "Lin".chars() {
        game.key(Key::Char(c));
    }
    game.key(Key::Enter);
    for _ in 0..PRESS_SETTLE_FRAMES {
        game.frame();
    }
    assert_eq!(game.screen(), Some(Screen::Levels));

    let reopened = Game::new(
        Viewport::new(800.0, 600.0),
        Some(1),
        Box::new(FileNameStore::new(&path)),
    );
    assert_eq!(reopened.name_input, "Lin");
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[test]
fn missing_settings_use_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("settings.json"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.fps_cap, 30);
    assert_eq!(settings.seed, None);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "fps_cap": 60, "seed": 9 }"#).unwrap();
    let settings = Settings::load(&path);
    assert_eq!(settings.fps_cap, 60);
    assert_eq!(settings.seed, Some(9));
    assert_eq!(settings.cell_width, 10.0);
    assert_eq!(settings.cell_height, 20.0);
}

#[test]
fn malformed_settings_use_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ fps_cap: ").unwrap();
    assert_eq!(Settings::load(&path), Settings::default());
}

#[test]
fn flags_override_the_file() {
    let mut settings = Settings {
        seed: Some(1),
        ..Settings::default()
    };
    settings.apply(&Args {
        fps: Some(0),
        seed: Some(5),
        ..Args::default()
    });
    assert_eq!(settings.fps_cap, 1);
    assert_eq!(settings.seed, Some(5));

    settings.apply(&Args::default());
    assert_eq!(settings.seed, Some(5));
}
