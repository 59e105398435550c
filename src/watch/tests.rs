use std::path::PathBuf;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use super::debouncer::{ChangeKind, DEBOUNCE_MS, Debouncer, PASS_COOLDOWN_MS};
use super::watch_roots::WatchRoots;

fn make_event(paths: &[&str], kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

/// Pretend the quiet period is over.
fn settle(debouncer: &mut Debouncer) {
    debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));
}

// ============================================================================
// Debouncer
// ============================================================================

#[test]
fn test_debouncer_empty() {
    let mut debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
    assert!(debouncer.take_if_ready().is_none());
}

#[test]
fn test_event_kinds() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(&["/p/a/+Page.tsx"], create_kind()));
    debouncer.add_event(&make_event(&["/p/b/+Page.tsx"], modify_kind()));
    debouncer.add_event(&make_event(&["/p/c/+Page.tsx"], remove_kind()));

    assert_eq!(debouncer.changes.len(), 3);
    assert_eq!(debouncer.changes[&PathBuf::from("/p/a/+Page.tsx")], ChangeKind::Created);
    assert_eq!(debouncer.changes[&PathBuf::from("/p/b/+Page.tsx")], ChangeKind::Modified);
    assert_eq!(debouncer.changes[&PathBuf::from("/p/c/+Page.tsx")], ChangeKind::Removed);
}

#[test]
fn test_metadata_changes_ignored() {
    let mut debouncer = Debouncer::new();
    let kind = notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::WriteTime,
    ));
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], kind));
    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_event.is_none());
}

#[test]
fn test_temp_files_ignored() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(
        &["/p/+Page.tsx.swp", "/p/+Page.tsx~", "/p/.#+Page.tsx", "/p/x.tmp"],
        modify_kind(),
    ));
    assert!(debouncer.changes.is_empty());

    // Hidden registry directories are not editor artifacts
    debouncer.add_event(&make_event(&["/p/.routegen"], create_kind()));
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_first_event_wins() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], create_kind()));
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], modify_kind()));
    assert_eq!(debouncer.changes[&PathBuf::from("/p/+Page.tsx")], ChangeKind::Created);
}

#[test]
fn test_remove_then_create_restores() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], remove_kind()));
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], create_kind()));
    assert_eq!(debouncer.changes[&PathBuf::from("/p/+Page.tsx")], ChangeKind::Created);
}

#[test]
fn test_modify_then_remove_upgrades() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], modify_kind()));
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], remove_kind()));
    assert_eq!(debouncer.changes[&PathBuf::from("/p/+Page.tsx")], ChangeKind::Removed);
}

#[test]
fn test_create_then_remove_discards() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], create_kind()));
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], remove_kind()));
    assert!(debouncer.changes.is_empty());

    settle(&mut debouncer);
    assert!(debouncer.take_if_ready().is_none());
}

#[test]
fn test_not_ready_within_quiet_period() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], modify_kind()));
    assert!(!debouncer.is_ready());
}

#[test]
fn test_take_batch_sorted() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(&["/p/b/+Page.tsx", "/p/a/+Page.tsx"], modify_kind()));
    settle(&mut debouncer);

    let batch = debouncer.take_if_ready().unwrap();
    assert_eq!(
        batch,
        [PathBuf::from("/p/a/+Page.tsx"), PathBuf::from("/p/b/+Page.tsx")]
    );
    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_pass.is_some());
}

#[test]
fn test_cooldown_between_batches() {
    let mut debouncer = Debouncer::new();
    debouncer.last_pass = Some(Instant::now());
    debouncer.add_event(&make_event(&["/p/+Page.tsx"], modify_kind()));
    settle(&mut debouncer);

    assert!(!debouncer.is_ready());
    let dur = debouncer.sleep_duration();
    assert!(dur > Duration::from_millis(DEBOUNCE_MS));
    assert!(dur <= Duration::from_millis(PASS_COOLDOWN_MS));
}

#[test]
fn test_sleep_duration() {
    let mut debouncer = Debouncer::new();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));

    debouncer.last_event = Some(Instant::now());
    let dur = debouncer.sleep_duration();
    assert!(dur <= Duration::from_millis(DEBOUNCE_MS));
    assert!(dur >= Duration::from_millis(1));
}

#[test]
fn test_synthetic_path() {
    let mut debouncer = Debouncer::new();
    debouncer.add_path(PathBuf::from("/p/pages"), ChangeKind::Created);
    settle(&mut debouncer);
    assert_eq!(debouncer.take_if_ready(), Some(vec![PathBuf::from("/p/pages")]));
}

// ============================================================================
// WatchRoots
// ============================================================================

#[test]
fn test_missing_root_attached_when_created() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("pages");
    let mut watcher = notify::recommended_watcher(|_: notify::Result<notify::Event>| {}).unwrap();

    let mut roots = WatchRoots::new(vec![pages.clone()]);
    roots.attach_existing(&mut watcher).unwrap();
    assert!(!roots.all_attached());
    assert!(roots.maintain(&mut watcher).is_empty());

    std::fs::create_dir(&pages).unwrap();
    assert_eq!(roots.maintain(&mut watcher), vec![pages]);
    assert!(roots.all_attached());
    assert!(roots.maintain(&mut watcher).is_empty());
}
