//! Tests for the backup manager.

use super::*;
use chrono::TimeZone;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    home: PathBuf,
    root: PathBuf,
    manager: BackupManager,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let home = dir.path().join("home");
    let root = dir.path().join("root");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(root.join("etc")).unwrap();
    let manager = BackupManager::new(
        dir.path().join("backups"),
        PathLayout::new(&home, &root),
    );
    Fixture {
        _dir: dir,
        home,
        root,
        manager,
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 5).unwrap()
}

#[test]
fn absent_file_is_skipped_without_error() {
    let f = fixture();
    let kitty = f.home.join(".config/kitty/colors.conf");
    let waybar = f.home.join(".config/waybar/colors.css");
    let missing = f.home.join(".config/rofi/colors.rasi");
    write(&kitty, "kitty");
    write(&waybar, "waybar");

    let snap = f
        .manager
        .snapshot(&[kitty.clone(), missing, waybar.clone()])
        .unwrap();

    assert_eq!(snap.files.len(), 2);
    assert!(snap.path.is_absolute());
    assert_eq!(
        fs::read_to_string(snap.path.join(".config/kitty/colors.conf")).unwrap(),
        "kitty"
    );
    assert!(!snap.path.join(".config/rofi").exists());
    assert_eq!(snap.files[0].source, kitty);
    assert_eq!(snap.files[1].source, waybar);
}

#[test]
fn empty_snapshot_is_still_created() {
    let f = fixture();
    let snap = f.manager.snapshot(&[f.home.join("nope")]).unwrap();
    assert!(snap.files.is_empty());
    assert!(snap.path.is_dir());
    assert!(is_snapshot_id(&snap.id));
}

#[test]
fn system_files_are_stored_under_etc() {
    let f = fixture();
    let sddm = f.root.join("etc/sddm.conf.d/theme.conf");
    write(&sddm, "[Theme]");

    let snap = f.manager.snapshot(std::slice::from_ref(&sddm)).unwrap();
    assert_eq!(
        snap.files[0].relative,
        PathBuf::from("etc/sddm.conf.d/theme.conf")
    );
    assert!(snap.path.join("etc/sddm.conf.d/theme.conf").is_file());
}

#[test]
fn files_outside_known_roots_are_skipped() {
    let f = fixture();
    let stray = f.root.join("usr/share/stray.conf");
    write(&stray, "x");

    let snap = f.manager.snapshot(&[stray]).unwrap();
    assert!(snap.files.is_empty());
}

#[test]
fn id_uses_local_timestamp_format() {
    let f = fixture();
    let snap = f.manager.snapshot_at(&[], noon()).unwrap();
    assert_eq!(snap.id, "2024-03-09_120005");
    assert_eq!(snap.path, f.manager.backups_root().join("2024-03-09_120005"));
}

#[test]
fn same_second_snapshots_get_suffixes() {
    let f = fixture();
    let ids: Vec<String> = (0..3)
        .map(|_| f.manager.snapshot_at(&[], noon()).unwrap().id)
        .collect();
    assert_eq!(
        ids,
        ["2024-03-09_120005", "2024-03-09_120005_01", "2024-03-09_120005_02"]
    );
}

#[test]
fn list_is_newest_first_and_ignores_noise() {
    let f = fixture();
    f.manager.snapshot_at(&[], noon()).unwrap();
    f.manager.snapshot_at(&[], noon()).unwrap();
    let later = Local.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();
    f.manager.snapshot_at(&[], later).unwrap();
    fs::create_dir_all(f.manager.backups_root().join("scratch")).unwrap();
    fs::write(f.manager.backups_root().join("2024-01-01_000000"), "file").unwrap();

    assert_eq!(
        f.manager.list().unwrap(),
        [
            "2024-03-10_083000",
            "2024-03-09_120005_01",
            "2024-03-09_120005"
        ]
    );
}

#[test]
fn list_without_root_is_empty() {
    let f = fixture();
    assert!(f.manager.list().unwrap().is_empty());
}

#[test]
fn get_reads_back_the_file_listing() {
    let f = fixture();
    let kitty = f.home.join(".config/kitty/colors.conf");
    let sddm = f.root.join("etc/sddm.conf");
    write(&kitty, "k");
    write(&sddm, "s");
    let taken = f.manager.snapshot(&[kitty.clone(), sddm.clone()]).unwrap();

    let loaded = f.manager.get(&taken.id).unwrap();
    assert_eq!(loaded.path, taken.path);
    let sources: Vec<&PathBuf> = loaded.files.iter().map(|e| &e.source).collect();
    assert_eq!(sources, [&kitty, &sddm]);
    assert_eq!(
        fs::read_to_string(loaded.stored_path(&loaded.files[1])).unwrap(),
        "s"
    );
}

#[test]
fn get_unknown_id_is_not_found() {
    let f = fixture();
    assert!(matches!(
        f.manager.get("2020-01-01_000000"),
        Err(BackupError::NotFound(_))
    ));
    assert!(matches!(
        f.manager.get("../etc"),
        Err(BackupError::NotFound(_))
    ));
}

#[test]
fn snapshot_id_shape() {
    assert!(is_snapshot_id("2024-03-09_120005"));
    assert!(is_snapshot_id("2024-03-09_120005_07"));
    assert!(!is_snapshot_id("2024-03-09"));
    assert!(!is_snapshot_id("2024-03-09_120005_7"));
    assert!(!is_snapshot_id("latest"));
}
