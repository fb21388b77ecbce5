//! Tests for palette persistence.

use super::*;
use crate::palette::{Palette, SourceImage, FALLBACK_CANDIDATES};
use tempfile::TempDir;

fn sample(name: &str) -> Palette {
    Palette::derive(name, SourceImage::Path("/walls/forest.jpg".into()), &FALLBACK_CANDIDATES)
}

#[test]
fn save_then_load_round_trips_colors() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    let palette = sample("forest");

    store.save(&palette, "x").unwrap();
    let loaded = store.load("x").unwrap();

    assert_eq!(loaded.colors, palette.colors);
    assert_eq!(loaded.created_at, palette.created_at);
    assert_eq!(loaded.source_image, palette.source_image);
    assert_eq!(loaded.name, "x");
}

#[test]
fn save_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path().join("nested").join("palettes"));
    let path = store.save(&sample("a"), "a").unwrap();
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "a.json");
}

#[test]
fn record_uses_lowercase_roles_and_utc_timestamp() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    let path = store.save(&sample("a"), "a").unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["name"], "a");
    assert_eq!(json["source_image"], "/walls/forest.jpg");
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(json["colors"]["background"], "#1e1e2e");
    assert_eq!(json["colors"]["bg_light"], "#45475a");
    assert!(json["colors"].get("BACKGROUND").is_none());
}

#[test]
fn custom_source_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    let palette = Palette::derive("c", SourceImage::Custom, &FALLBACK_CANDIDATES);
    store.save(&palette, "c").unwrap();
    assert_eq!(store.load("c").unwrap().source_image, SourceImage::Custom);
}

#[test]
fn load_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    assert!(matches!(store.load("ghost"), Err(PaletteError::NotFound(n)) if n == "ghost"));
}

#[test]
fn load_invalid_json_is_malformed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    let store = PaletteStore::new(dir.path());
    assert!(matches!(
        store.load("bad"),
        Err(PaletteError::MalformedRecord { .. })
    ));
}

#[test]
fn load_missing_role_is_malformed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("partial.json"),
        r##"{
  "name": "partial",
  "timestamp": "2024-05-01T10:00:00Z",
  "source_image": "custom",
  "colors": { "primary": "#ff0000" }
}"##,
    )
    .unwrap();
    let store = PaletteStore::new(dir.path());
    let err = store.load("partial").unwrap_err();
    assert!(err.to_string().contains("missing role"), "{err}");
}

#[test]
fn load_bad_color_value_is_malformed() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    let path = store.save(&sample("a"), "a").unwrap();
    let content = std::fs::read_to_string(&path)
        .unwrap()
        .replace("\"#1e1e2e\"", "\"blue\"");
    std::fs::write(&path, content).unwrap();

    let err = store.load("a").unwrap_err();
    assert!(matches!(err, PaletteError::MalformedRecord { .. }));
    assert!(err.to_string().contains("background"), "{err}");
}

#[test]
fn load_bad_timestamp_is_malformed() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    let path = store.save(&sample("a"), "a").unwrap();
    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["timestamp"] = "yesterday".into();
    std::fs::write(&path, json.to_string()).unwrap();

    assert!(matches!(
        store.load("a"),
        Err(PaletteError::MalformedRecord { .. })
    ));
}

#[test]
fn list_is_empty_without_directory() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path().join("nope"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn list_returns_sorted_record_names_only() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    store.save(&sample("b"), "beach").unwrap();
    store.save(&sample("a"), "autumn").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    std::fs::create_dir(dir.path().join("dir.json")).unwrap();

    assert_eq!(store.list().unwrap(), vec!["autumn", "beach"]);
}

#[test]
fn describe_lists_every_role() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    store.save(&sample("forest"), "forest").unwrap();

    let text = store.describe("forest").unwrap();
    assert!(text.starts_with("Palette: forest\n"));
    assert!(text.contains("Source:  /walls/forest.jpg"));
    for role in crate::palette::Role::ALL {
        assert!(text.contains(role.key()), "missing {role} in:\n{text}");
    }
    assert!(text.contains("#1e1e2e"));
}

#[test]
fn delete_removes_record() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    store.save(&sample("a"), "a").unwrap();
    store.delete("a").unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(store.delete("a"), Err(PaletteError::NotFound(_))));
}

#[test]
fn path_like_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = PaletteStore::new(dir.path());
    for bad in ["", "  ", "../escape", "a/b", ".hidden", "a\\b"] {
        assert!(
            matches!(store.save(&sample("x"), bad), Err(PaletteError::InvalidName(_))),
            "accepted {bad:?}"
        );
    }
}
