//! End-to-end compare flow tests
//!
//! These exercise the full review path: capture two directory states,
//! diff them, persist a manifest, and re-check a directory against it
//! later. Unit tests in the crate cover the partition properties; here
//! the interest is the flow across crate boundaries.

use std::fs;

use tempfile::TempDir;

use recheck_diff::{check_manifest, compare_dirs, diff_snapshots, DiffError};
use recheck_snapshot::{CaptureOptions, Snapshot, SnapshotError};

fn write_tree(dir: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
}

#[test]
fn submission_rerun_flow_reports_drift() {
    let submitted = TempDir::new().unwrap();
    let rerun = TempDir::new().unwrap();
    write_tree(
        &submitted,
        &[
            ("results.csv", "alpha,0.05\n"),
            ("stats.json", "{\"runs\": 3}"),
            ("notes.txt", "submitted only"),
            ("logs/run.log", "started\nfinished\n"),
        ],
    );
    write_tree(
        &rerun,
        &[
            ("results.csv", "alpha,0.07\n"),
            ("stats.json", "{\"runs\": 3}"),
            ("extra.png", "plot bytes"),
            ("logs/run.log", "started\nfinished\n"),
        ],
    );

    let diff = compare_dirs(
        submitted.path(),
        rerun.path(),
        &CaptureOptions::recursive(),
    )
    .unwrap();

    assert_eq!(diff.added.iter().collect::<Vec<_>>(), ["extra.png"]);
    assert_eq!(diff.removed.iter().collect::<Vec<_>>(), ["notes.txt"]);
    assert_eq!(diff.modified.iter().collect::<Vec<_>>(), ["results.csv"]);
    // Unchanged entries appear in no set at all.
    assert!(!diff.added.contains("logs/run.log"));
    assert!(!diff.modified.contains("logs/run.log"));
    assert!(!diff.modified.contains("stats.json"));
}

#[test]
fn manifest_survives_persistence_and_detects_later_drift() {
    let data = TempDir::new().unwrap();
    let store = TempDir::new().unwrap();
    write_tree(&data, &[("table1.csv", "a,b\n1,2\n"), ("table2.csv", "c,d\n3,4\n")]);
    let manifest_path = store.path().join("submission.json");

    let options = CaptureOptions::default();
    let snapshot = Snapshot::capture(data.path(), &options).unwrap();
    snapshot.save(&manifest_path).unwrap();

    let loaded = Snapshot::load(&manifest_path).unwrap();
    assert_eq!(loaded.manifest_digest(), snapshot.manifest_digest());

    let clean = check_manifest(&loaded, data.path(), &options).unwrap();
    assert!(clean.is_empty());

    fs::write(data.path().join("table1.csv"), "a,b\n9,9\n").unwrap();
    fs::write(data.path().join("table3.csv"), "new\n").unwrap();
    let drift = check_manifest(&loaded, data.path(), &options).unwrap();
    assert_eq!(drift.added.iter().collect::<Vec<_>>(), ["table3.csv"]);
    assert!(drift.removed.is_empty());
    assert_eq!(drift.modified.iter().collect::<Vec<_>>(), ["table1.csv"]);
}

#[test]
fn flat_capture_keeps_subdirectories_out_of_every_set() {
    let before = TempDir::new().unwrap();
    let after = TempDir::new().unwrap();
    write_tree(&before, &[("top.txt", "same"), ("sub/inner.txt", "old")]);
    write_tree(&after, &[("top.txt", "same"), ("sub/inner.txt", "new")]);

    let diff = compare_dirs(before.path(), after.path(), &CaptureOptions::default()).unwrap();

    assert!(diff.is_empty());
    assert!(!diff.added.contains("sub"));
    assert!(!diff.removed.contains("sub"));
    assert!(!diff.modified.contains("sub"));
}

#[cfg(unix)]
#[test]
fn unreadable_entry_fails_the_whole_compare() {
    let before = TempDir::new().unwrap();
    let after = TempDir::new().unwrap();
    write_tree(&before, &[("ok.txt", "fine")]);
    write_tree(&after, &[("ok.txt", "fine")]);
    let broken = after.path().join("broken.txt");
    std::os::unix::fs::symlink(after.path().join("missing-target"), &broken).unwrap();

    let err = compare_dirs(before.path(), after.path(), &CaptureOptions::default()).unwrap_err();
    match err {
        DiffError::Snapshot(SnapshotError::Unreadable { path, .. }) => {
            assert_eq!(path, broken);
        }
        other => panic!("expected Unreadable, got {other:?}"),
    }
}

#[test]
fn progress_observer_covers_every_file_and_diff_is_unchanged() {
    let before = TempDir::new().unwrap();
    let after = TempDir::new().unwrap();
    write_tree(&before, &[("a.txt", "1"), ("b.txt", "2"), ("c.txt", "3")]);
    write_tree(&after, &[("a.txt", "1"), ("b.txt", "changed"), ("d.txt", "4")]);

    let options = CaptureOptions::default();
    let mut seen = Vec::new();
    let before_snap =
        Snapshot::capture_with_progress(before.path(), &options, |done, total, name| {
            seen.push((done, total, name.to_string()));
        })
        .unwrap();
    let after_snap =
        Snapshot::capture_with_progress(after.path(), &options, |done, total, name| {
            seen.push((done, total, name.to_string()));
        })
        .unwrap();

    assert_eq!(seen.len(), 6);
    assert_eq!(seen[0], (1, 3, "a.txt".to_string()));
    assert_eq!(seen[2], (3, 3, "c.txt".to_string()));

    let diff = diff_snapshots(&before_snap, &after_snap);
    let direct = compare_dirs(before.path(), after.path(), &options).unwrap();
    assert_eq!(diff, direct);
    assert_eq!(diff.added.iter().collect::<Vec<_>>(), ["d.txt"]);
    assert_eq!(diff.removed.iter().collect::<Vec<_>>(), ["c.txt"]);
    assert_eq!(diff.modified.iter().collect::<Vec<_>>(), ["b.txt"]);
}
