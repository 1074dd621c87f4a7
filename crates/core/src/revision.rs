//! Revision-comment helpers for the audit trail.
//!
//! Every audited save produces a comment of the form
//! `"<prefix> - <comma-joined changed fields> Changed"`. The changed-field
//! list is computed by [`diff_fields`] over before/after JSON snapshots of
//! a strongly-typed entity, with an explicit ignore list for fields that
//! change on every save.

// ---------------------------------------------------------------------------
// Comment prefixes
// ---------------------------------------------------------------------------

/// Prefix for saves coming from the game submission/edit forms.
pub const FORM_SUBMISSION_PREFIX: &str = "Form Submission";

/// Prefix for saves coming from the drag-and-drop scheduler endpoint.
pub const AJAX_SCHEDULE_PREFIX: &str = "AJAX Schedule Submission";

/// Comment recorded when a game is first created.
pub const NEW_GAME_COMMENT: &str = "Form Submission - New";

/// Fields excluded from content-edit diffs (stamped on every save).
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["last_modified"];

// ---------------------------------------------------------------------------
// Field diffing
// ---------------------------------------------------------------------------

/// Names of top-level fields that differ between two JSON object
/// snapshots, sorted alphabetically.
///
/// A field present on only one side counts as changed. Names in `ignore`
/// are skipped. Non-object snapshots produce an empty diff.
pub fn diff_fields(
    before: &serde_json::Value,
    after: &serde_json::Value,
    ignore: &[&str],
) -> Vec<String> {
    let (Some(before), Some(after)) = (before.as_object(), after.as_object()) else {
        return Vec::new();
    };

    let mut changed: Vec<String> = Vec::new();

    for (key, old) in before {
        if ignore.contains(&key.as_str()) {
            continue;
        }
        if after.get(key) != Some(old) {
            changed.push(key.clone());
        }
    }

    // Fields only present on the after side.
    for key in after.keys() {
        if !ignore.contains(&key.as_str()) && !before.contains_key(key) {
            changed.push(key.clone());
        }
    }

    changed.sort();
    changed
}

/// Format a revision comment from a prefix and a sorted changed-field
/// list.
///
/// An empty list yields `"<prefix> -  Changed"` (double space); existing
/// tooling parses this literal format, so it is preserved.
pub fn comment(prefix: &str, changed: &[String]) -> String {
    format!("{prefix} - {} Changed", changed.join(", "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
