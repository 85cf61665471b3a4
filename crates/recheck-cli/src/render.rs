//! Plain-text rendering of snapshots, diffs, and session files.
//!
//! Diff output follows the review console's line format so existing
//! tooling that greps those lines keeps working.

use recheck_diff::SnapshotDiff;
use recheck_session::SessionConfig;
use recheck_snapshot::Snapshot;

pub fn diff_text(diff: &SnapshotDiff) -> String {
    if diff.is_empty() {
        return "No differences found.\n".to_string();
    }
    let mut out = String::new();
    if !diff.added.is_empty() {
        out.push_str("    New files:\n");
        for name in &diff.added {
            out.push_str(&format!("      -> {name}\n"));
        }
    }
    if !diff.removed.is_empty() {
        out.push_str("    Removed files:\n");
        for name in &diff.removed {
            out.push_str(&format!("      -> {name}\n"));
        }
    }
    for name in &diff.modified {
        out.push_str(&format!(
            "File {name} was modified!!! (content digest differs)\n"
        ));
    }
    out
}

pub fn snapshot_text(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "Snapshot of {} ({} entries)\n",
        snapshot.root().display(),
        snapshot.len()
    );
    for (name, record) in snapshot.iter() {
        out.push_str(&format!(
            "  {}  {:>10}  {}\n",
            record.digest.short_hex(),
            record.size,
            name
        ));
    }
    out.push_str(&format!("  manifest digest: {}\n", snapshot.manifest_digest()));
    out
}

pub fn session_text(config: &SessionConfig) -> String {
    let mut out = format!("api url: {}\n", config.api_url);
    for profile in &config.profiles {
        let token = if profile.has_token() { "set (redacted)" } else { "none" };
        out.push_str(&format!(
            "  {:<8}  login = {:<12}  token = {}\n",
            profile.role.to_string(),
            profile.login,
            token
        ));
    }
    out
}
