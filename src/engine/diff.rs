use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::join::{outer_join, Joined};
use super::SessionInventory;
use crate::db::Database;
use crate::errors::SharescopeError;
use crate::models::{AccessLevel, FileKey, ScanSession, SensitiveFile, Share, ShareKey};

/// How an entity moved between the two compared sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

impl ChangeType {
    /// Added and removed entries sort before modified ones in the report.
    fn rank(self) -> u8 {
        match self {
            ChangeType::Added => 0,
            ChangeType::Removed => 1,
            ChangeType::Modified => 2,
        }
    }
}

/// One share-level difference. The session1_*/session2_* columns carry both
/// snapshots of the four compared fields; absent on the side the share was
/// missing from.
#[derive(Debug, Clone, Serialize)]
pub struct ShareDiff {
    pub hostname: String,
    pub share_name: String,
    pub change_type: ChangeType,
    pub session1_access_level: Option<AccessLevel>,
    pub session1_total_files: Option<i64>,
    pub session1_hidden_files: Option<i64>,
    pub session1_sensitive_files: Option<usize>,
    pub session2_access_level: Option<AccessLevel>,
    pub session2_total_files: Option<i64>,
    pub session2_hidden_files: Option<i64>,
    pub session2_sensitive_files: Option<usize>,
    /// Present only on modified shares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_changes: Option<Vec<FileDiff>>,
}

/// One file-level difference inside a modified share. Detection types are
/// compared as sets; the report carries them sorted.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiff {
    pub file_name: String,
    pub file_path: String,
    pub change_type: ChangeType,
    pub old_detection_types: Vec<String>,
    pub new_detection_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub total_differences: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub files_added: usize,
    pub files_removed: usize,
    pub files_modified: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub sessions: [ScanSession; 2],
    pub differences: Vec<ShareDiff>,
    pub summary: DiffSummary,
}

/// Load both sessions and compare them. Fails with `SessionNotFound` before
/// any join work if either id is unknown.
pub fn compare_sessions(
    db: &Database,
    session_a: i64,
    session_b: i64,
) -> Result<DiffReport, SharescopeError> {
    let a = db.session_inventory(session_a)?;
    let b = db.session_inventory(session_b)?;
    Ok(compare(&a, &b))
}

/// Compare two frozen session snapshots. Pure; the same inputs always
/// produce the same report.
pub fn compare(a: &SessionInventory, b: &SessionInventory) -> DiffReport {
    let joined = outer_join(index_shares(a), index_shares(b));

    let mut summary = DiffSummary::default();
    let mut differences = Vec::new();

    for (key, sides) in joined {
        match sides {
            Joined::Right(entry_b) => {
                summary.added += 1;
                differences.push(share_diff(key, ChangeType::Added, None, Some(snapshot(&entry_b)), None));
            }
            Joined::Left(entry_a) => {
                summary.removed += 1;
                differences.push(share_diff(key, ChangeType::Removed, Some(snapshot(&entry_a)), None, None));
            }
            Joined::Both(entry_a, entry_b) => {
                let snap_a = snapshot(&entry_a);
                let snap_b = snapshot(&entry_b);
                if snap_a == snap_b {
                    // Unchanged shares are dropped from the report entirely
                    continue;
                }
                summary.modified += 1;
                let file_changes = diff_files(&entry_a.files, &entry_b.files, &mut summary);
                differences.push(share_diff(
                    key,
                    ChangeType::Modified,
                    Some(snap_a),
                    Some(snap_b),
                    Some(file_changes),
                ));
            }
        }
    }

    differences.sort_by(|x, y| {
        (x.change_type.rank(), &x.hostname, &x.share_name)
            .cmp(&(y.change_type.rank(), &y.hostname, &y.share_name))
    });
    summary.total_differences = differences.len();

    DiffReport {
        sessions: [a.session.clone(), b.session.clone()],
        differences,
        summary,
    }
}

struct ShareEntry<'a> {
    share: &'a Share,
    files: Vec<&'a SensitiveFile>,
}

/// The per-session view of the four fields the diff classifies on.
#[derive(PartialEq, Eq)]
struct Snapshot {
    access_level: AccessLevel,
    total_files: i64,
    hidden_files: i64,
    sensitive_file_count: usize,
}

/// Group one session's shares by natural key, attaching each share's
/// sensitive files. Scans do not record duplicate shares within a session,
/// so each key maps to one entry.
fn index_shares(inventory: &SessionInventory) -> BTreeMap<ShareKey, ShareEntry<'_>> {
    let mut files_by_share: HashMap<i64, Vec<&SensitiveFile>> = HashMap::new();
    for file in &inventory.sensitive_files {
        files_by_share.entry(file.share_id).or_default().push(file);
    }

    let mut keyed = BTreeMap::new();
    for share in &inventory.shares {
        let files = files_by_share.remove(&share.id).unwrap_or_default();
        keyed.insert(share.key(), ShareEntry { share, files });
    }
    keyed
}

fn snapshot(entry: &ShareEntry) -> Snapshot {
    let distinct: BTreeSet<FileKey> = entry.files.iter().map(|f| f.key()).collect();
    Snapshot {
        access_level: entry.share.access_level,
        total_files: entry.share.total_files,
        hidden_files: entry.share.hidden_files,
        sensitive_file_count: distinct.len(),
    }
}

fn share_diff(
    key: ShareKey,
    change_type: ChangeType,
    session1: Option<Snapshot>,
    session2: Option<Snapshot>,
    file_changes: Option<Vec<FileDiff>>,
) -> ShareDiff {
    ShareDiff {
        hostname: key.hostname,
        share_name: key.share_name,
        change_type,
        session1_access_level: session1.as_ref().map(|s| s.access_level),
        session1_total_files: session1.as_ref().map(|s| s.total_files),
        session1_hidden_files: session1.as_ref().map(|s| s.hidden_files),
        session1_sensitive_files: session1.as_ref().map(|s| s.sensitive_file_count),
        session2_access_level: session2.as_ref().map(|s| s.access_level),
        session2_total_files: session2.as_ref().map(|s| s.total_files),
        session2_hidden_files: session2.as_ref().map(|s| s.hidden_files),
        session2_sensitive_files: session2.as_ref().map(|s| s.sensitive_file_count),
        file_changes,
    }
}

/// Collapse one side's rows into detection-type sets per file key. A file
/// matched by three patterns becomes one key with a three-element set.
fn detection_sets(files: &[&SensitiveFile]) -> BTreeMap<FileKey, BTreeSet<String>> {
    let mut sets: BTreeMap<FileKey, BTreeSet<String>> = BTreeMap::new();
    for file in files {
        sets.entry(file.key()).or_default().insert(file.detection_type.clone());
    }
    sets
}

fn diff_files(
    a: &[&SensitiveFile],
    b: &[&SensitiveFile],
    summary: &mut DiffSummary,
) -> Vec<FileDiff> {
    let joined = outer_join(detection_sets(a), detection_sets(b));

    let mut changes = Vec::new();
    for (key, sides) in joined {
        let (change_type, old, new) = match sides {
            Joined::Right(new) => (ChangeType::Added, BTreeSet::new(), new),
            Joined::Left(old) => (ChangeType::Removed, old, BTreeSet::new()),
            Joined::Both(old, new) => {
                if old == new {
                    continue;
                }
                (ChangeType::Modified, old, new)
            }
        };
        match change_type {
            ChangeType::Added => summary.files_added += 1,
            ChangeType::Removed => summary.files_removed += 1,
            ChangeType::Modified => summary.files_modified += 1,
        }
        changes.push(FileDiff {
            file_name: key.file_name,
            file_path: key.file_path,
            change_type,
            old_detection_types: old.into_iter().collect(),
            new_detection_types: new.into_iter().collect(),
        });
    }
    changes
}
