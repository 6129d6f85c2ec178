use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::Inventory;
use crate::models::Share;

/// Point-in-time statistics over the whole inventory, plus the composite
/// risk score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStats {
    /// Distinct (hostname, share_name) pairs across all sessions.
    pub unique_shares: usize,
    /// Raw share row count, including repeats across scans.
    pub total_shares: usize,
    /// Distinct (hostname, share_name, file_path, file_name) tuples.
    pub unique_sensitive_files: usize,
    /// Raw detection row count; one physical file counts once per matched
    /// pattern.
    pub total_sensitive_files: usize,
    /// Unique shares with at least one hidden file.
    pub unique_hidden_shares: usize,
    /// Sum of hidden_files over every share row.
    pub total_hidden_files: i64,
    /// 0-100 composite, rounded to one decimal.
    pub risk_score: f64,
}

/// Compute counts and the composite risk score for a snapshot.
pub fn aggregate(inventory: &Inventory) -> InventoryStats {
    let mut share_keys = BTreeSet::new();
    let mut hidden_keys = BTreeSet::new();
    let mut total_hidden_files = 0i64;
    let mut shares_by_id: HashMap<i64, &Share> = HashMap::new();

    for share in &inventory.shares {
        share_keys.insert(share.key());
        if share.hidden_files > 0 {
            hidden_keys.insert(share.key());
        }
        total_hidden_files += share.hidden_files;
        shares_by_id.insert(share.id, share);
    }

    // Sensitive-file identity is inherited through the owning share's
    // natural key; rows whose share row is missing from the snapshot
    // cannot be identified and are skipped.
    let mut file_keys: BTreeSet<(&str, &str, &str, &str)> = BTreeSet::new();
    for file in &inventory.sensitive_files {
        if let Some(share) = shares_by_id.get(&file.share_id) {
            file_keys.insert((
                share.hostname.as_str(),
                share.share_name.as_str(),
                file.file_path.as_str(),
                file.file_name.as_str(),
            ));
        }
    }

    InventoryStats {
        unique_shares: share_keys.len(),
        total_shares: inventory.shares.len(),
        unique_sensitive_files: file_keys.len(),
        total_sensitive_files: inventory.sensitive_files.len(),
        unique_hidden_shares: hidden_keys.len(),
        total_hidden_files,
        risk_score: risk_score(file_keys.len(), hidden_keys.len(), share_keys.len()),
    }
}

/// Two components, up to 50 points each: sensitive-file density and hidden
/// share prevalence. An empty inventory scores zero, never NaN. The
/// sensitive component is not clamped: a share carrying more distinct
/// sensitive files than there are unique shares pushes the score past 50.
pub fn risk_score(unique_sensitive: usize, unique_hidden: usize, unique_shares: usize) -> f64 {
    if unique_shares == 0 {
        return 0.0;
    }
    let shares = unique_shares as f64;
    let sensitive_component = unique_sensitive as f64 / shares * 50.0;
    let hidden_component = unique_hidden as f64 / shares * 50.0;
    ((sensitive_component + hidden_component) * 10.0).round() / 10.0
}
