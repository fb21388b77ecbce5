//! Tests for the restore engine.

use super::*;
use prism_common::PlatformError;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// Records calls and copies without privileges, or refuses when `refuse`.
#[derive(Clone, Default)]
struct FakeEscalator {
    calls: Rc<RefCell<Vec<PathBuf>>>,
    refuse: bool,
}

impl PrivilegedCopy for FakeEscalator {
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), PlatformError> {
        self.calls.borrow_mut().push(dst.to_path_buf());
        if self.refuse {
            return Err(PlatformError::CommandError("sudo: a password is required".into()));
        }
        copy_atomic(src, dst).map_err(|e| PlatformError::CommandError(e.to_string()))
    }
}

/// Direct copy that behaves like an unprivileged user: anything under an
/// `etc` directory is read-only.
fn copy_as_user(src: &Path, dst: &Path) -> io::Result<()> {
    if dst.components().any(|c| c.as_os_str() == "etc") {
        return Err(io::Error::from(io::ErrorKind::PermissionDenied));
    }
    copy_atomic(src, dst)
}

struct Fixture {
    _dir: TempDir,
    home: PathBuf,
    root: PathBuf,
    escalator: FakeEscalator,
    engine: RestoreEngine,
}

fn fixture() -> Fixture {
    fixture_with(FakeEscalator::default())
}

fn fixture_with(escalator: FakeEscalator) -> Fixture {
    let dir = TempDir::new().unwrap();
    let home = dir.path().join("home");
    let root = dir.path().join("root");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&root).unwrap();
    let manager = BackupManager::new(dir.path().join("backups"), PathLayout::new(&home, &root));
    let engine = RestoreEngine::new(manager, Box::new(escalator.clone()));
    Fixture {
        _dir: dir,
        home,
        root,
        escalator,
        engine,
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn restore_puts_files_back() {
    let f = fixture();
    let kitty = f.home.join(".config/kitty/colors.conf");
    let sddm = f.root.join("etc/sddm.conf");
    write(&kitty, "old kitty");
    write(&sddm, "old sddm");
    let snap = f.engine.backups().snapshot(&[kitty.clone(), sddm.clone()]).unwrap();

    write(&kitty, "new kitty");
    fs::remove_file(&sddm).unwrap();
    fs::remove_dir(f.root.join("etc")).unwrap();

    let report = f.engine.restore(&snap.id).unwrap();
    assert_eq!(report.outcome(), RestoreOutcome::Complete);
    assert_eq!(report.restored.len(), 2);
    assert!(report.escalated.is_empty());
    assert_eq!(read(&kitty), "old kitty");
    assert_eq!(read(&sddm), "old sddm");
    assert!(f.escalator.calls.borrow().is_empty());
}

#[test]
fn restore_twice_is_idempotent() {
    let f = fixture();
    let waybar = f.home.join(".config/waybar/colors.css");
    write(&waybar, "@define-color bg #1e1e2e;");
    let snap = f.engine.backups().snapshot(std::slice::from_ref(&waybar)).unwrap();
    write(&waybar, "changed");

    f.engine.restore(&snap.id).unwrap();
    let first = read(&waybar);
    f.engine.restore(&snap.id).unwrap();
    assert_eq!(read(&waybar), first);
    assert_eq!(first, "@define-color bg #1e1e2e;");
}

#[test]
fn unknown_snapshot_fails_before_writing() {
    let f = fixture();
    assert!(matches!(
        f.engine.restore("1999-12-31_235959"),
        Err(BackupError::NotFound(_))
    ));
}

#[test]
fn one_unwritable_target_is_a_partial_failure() {
    let f = fixture();
    let kitty = f.home.join(".config/kitty/colors.conf");
    let rofi = f.home.join(".config/rofi/colors.rasi");
    let waybar = f.home.join(".config/waybar/colors.css");
    write(&kitty, "kitty");
    write(&rofi, "rofi");
    write(&waybar, "waybar");
    let snap = f
        .engine
        .backups()
        .snapshot(&[kitty.clone(), rofi.clone(), waybar.clone()])
        .unwrap();

    // A regular file where the rofi directory should be blocks that target
    // even for root.
    fs::remove_dir_all(f.home.join(".config/rofi")).unwrap();
    fs::write(f.home.join(".config/rofi"), "in the way").unwrap();
    write(&kitty, "stale");

    let report = f.engine.restore(&snap.id).unwrap();
    assert_eq!(report.outcome(), RestoreOutcome::PartialFailure);
    assert_eq!(report.failed, [rofi.clone()]);
    assert_eq!(report.restored, [kitty.clone(), waybar.clone()]);
    assert_eq!(read(&kitty), "kitty");
    assert!(f.escalator.calls.borrow().is_empty());

    match report.into_result() {
        Err(BackupError::PartialFailure { failed }) => assert_eq!(failed, [rofi]),
        other => panic!("expected partial failure, got {other:?}"),
    }
}

#[test]
fn complete_report_converts_to_ok() {
    let report = RestoreReport {
        snapshot_id: "2024-01-01_000000".into(),
        restored: vec![PathBuf::from("/home/u/.x")],
        ..Default::default()
    };
    assert!(report.into_result().is_ok());
}

#[test]
fn only_denied_system_targets_escalate() {
    let denied = io::Error::from(io::ErrorKind::PermissionDenied);
    let missing = io::Error::from(io::ErrorKind::NotFound);
    assert!(should_escalate(Path::new("etc/sddm.conf"), &denied));
    assert!(!should_escalate(Path::new(".config/kitty/colors.conf"), &denied));
    assert!(!should_escalate(Path::new("etc/sddm.conf"), &missing));
}

#[test]
fn denied_system_target_goes_through_privileged_copy() {
    let mut f = fixture();
    f.engine.direct = copy_as_user;
    let kitty = f.home.join(".config/kitty/colors.conf");
    let sddm = f.root.join("etc/sddm.conf.d/theme.conf");
    write(&kitty, "old kitty");
    write(&sddm, "old sddm");
    let snap = f.engine.backups().snapshot(&[kitty.clone(), sddm.clone()]).unwrap();
    write(&kitty, "new kitty");
    write(&sddm, "new sddm");

    let report = f.engine.restore(&snap.id).unwrap();
    assert_eq!(report.outcome(), RestoreOutcome::Complete);
    assert_eq!(report.restored, [kitty.clone(), sddm.clone()]);
    assert_eq!(report.escalated, [sddm.clone()]);
    assert_eq!(*f.escalator.calls.borrow(), [sddm.clone()]);
    assert_eq!(read(&kitty), "old kitty");
    assert_eq!(read(&sddm), "old sddm");
}

#[test]
fn failed_escalation_is_reported_and_others_still_restore() {
    let mut f = fixture_with(FakeEscalator {
        refuse: true,
        ..Default::default()
    });
    f.engine.direct = copy_as_user;
    let kitty = f.home.join(".config/kitty/colors.conf");
    let sddm = f.root.join("etc/sddm.conf");
    write(&kitty, "old kitty");
    write(&sddm, "old sddm");
    let snap = f.engine.backups().snapshot(&[kitty.clone(), sddm.clone()]).unwrap();
    write(&kitty, "new kitty");
    write(&sddm, "new sddm");

    let report = f.engine.restore(&snap.id).unwrap();
    assert_eq!(report.outcome(), RestoreOutcome::PartialFailure);
    assert_eq!(report.restored, [kitty.clone()]);
    assert!(report.escalated.is_empty());
    assert_eq!(report.failed, [sddm.clone()]);
    assert_eq!(*f.escalator.calls.borrow(), [sddm.clone()]);
    assert_eq!(read(&kitty), "old kitty");
    assert_eq!(read(&sddm), "new sddm");
}
