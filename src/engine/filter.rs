use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::Inventory;
use crate::models::{RootFile, SensitiveFile, Share, ShareKey};

/// Which share column a `match_value` substring test applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Hostname,
    ShareName,
    #[default]
    All,
}

/// Which session's rows the listing draws from. "All sessions" means the
/// most recent row per (hostname, share_name), not every historical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    Session(i64),
    LatestPerShare,
}

/// Optional listing conditions, combined with logical AND. Pure data;
/// evaluation happens against an in-memory snapshot.
#[derive(Debug, Clone)]
pub struct ShareFilter {
    pub search: Option<String>,
    pub detection_type: Option<String>,
    pub match_field: MatchField,
    pub match_value: Option<String>,
    pub scope: SessionScope,
}

impl Default for ShareFilter {
    fn default() -> Self {
        Self {
            search: None,
            detection_type: None,
            match_field: MatchField::All,
            match_value: None,
            scope: SessionScope::LatestPerShare,
        }
    }
}

/// One listing row: the share plus its distinct sensitive-file count under
/// the active detection-type condition.
#[derive(Debug, Clone, Serialize)]
pub struct ShareListing {
    #[serde(flatten)]
    pub share: Share,
    pub sensitive_file_count: usize,
}

impl ShareFilter {
    /// Normalize raw request fields: blank strings and the "all" sentinel
    /// mean "no condition".
    pub fn from_request(
        search: Option<String>,
        detection_type: Option<String>,
        match_field: MatchField,
        match_value: Option<String>,
        session_id: Option<i64>,
    ) -> Self {
        Self {
            search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            detection_type: detection_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s != "all"),
            match_field,
            match_value: match_value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            scope: match session_id {
                Some(id) => SessionScope::Session(id),
                None => SessionScope::LatestPerShare,
            },
        }
    }

    /// Evaluate the filter over an inventory snapshot. Matching shares come
    /// back ordered by (hostname, share_name), ties broken by row id.
    pub fn apply(&self, inventory: &Inventory) -> Vec<ShareListing> {
        let mut sensitive_by_share: HashMap<i64, Vec<&SensitiveFile>> = HashMap::new();
        for file in &inventory.sensitive_files {
            sensitive_by_share.entry(file.share_id).or_default().push(file);
        }
        let mut roots_by_share: HashMap<i64, Vec<&RootFile>> = HashMap::new();
        for file in &inventory.root_files {
            roots_by_share.entry(file.share_id).or_default().push(file);
        }

        let candidates: Vec<&Share> = match self.scope {
            SessionScope::Session(id) => {
                inventory.shares.iter().filter(|s| s.session_id == id).collect()
            }
            SessionScope::LatestPerShare => latest_per_key(&inventory.shares),
        };

        let empty_sensitive: Vec<&SensitiveFile> = Vec::new();
        let empty_roots: Vec<&RootFile> = Vec::new();

        let mut rows: Vec<ShareListing> = Vec::new();
        for share in candidates {
            let sensitive = sensitive_by_share.get(&share.id).unwrap_or(&empty_sensitive);
            let roots = roots_by_share.get(&share.id).unwrap_or(&empty_roots);

            if !self.matches_field(share) {
                continue;
            }
            if !self.matches_search(share, sensitive, roots) {
                continue;
            }

            let sensitive_file_count = self.distinct_sensitive_count(sensitive);
            // An active detection-type condition excludes zero-count shares
            // outright (HAVING count > 0), it does not just annotate them.
            if self.detection_type.is_some() && sensitive_file_count == 0 {
                continue;
            }

            rows.push(ShareListing { share: share.clone(), sensitive_file_count });
        }

        rows.sort_by(|a, b| {
            (&a.share.hostname, &a.share.share_name, a.share.id)
                .cmp(&(&b.share.hostname, &b.share.share_name, b.share.id))
        });
        rows
    }

    fn matches_field(&self, share: &Share) -> bool {
        let Some(value) = &self.match_value else { return true };
        match self.match_field {
            MatchField::Hostname => contains_ci(&share.hostname, value),
            MatchField::ShareName => contains_ci(&share.share_name, value),
            MatchField::All => true,
        }
    }

    fn matches_search(
        &self,
        share: &Share,
        sensitive: &[&SensitiveFile],
        roots: &[&RootFile],
    ) -> bool {
        let Some(needle) = &self.search else { return true };
        contains_ci(&share.hostname, needle)
            || contains_ci(&share.share_name, needle)
            || sensitive.iter().any(|f| {
                contains_ci(&f.file_name, needle) || contains_ci(&f.file_path, needle)
            })
            || roots.iter().any(|f| contains_ci(&f.file_name, needle))
    }

    /// Distinct (file_path, file_name) pairs, restricted to the active
    /// detection type when one is set.
    fn distinct_sensitive_count(&self, sensitive: &[&SensitiveFile]) -> usize {
        let mut keys: BTreeSet<(&str, &str)> = BTreeSet::new();
        for file in sensitive {
            let type_matches = match &self.detection_type {
                Some(wanted) => &file.detection_type == wanted,
                None => true,
            };
            if type_matches {
                keys.insert((file.file_path.as_str(), file.file_name.as_str()));
            }
        }
        keys.len()
    }
}

/// The most recent row per natural key. Ties on scan_time fall back to the
/// higher row id so the winner is deterministic.
fn latest_per_key(shares: &[Share]) -> Vec<&Share> {
    let mut latest: BTreeMap<ShareKey, &Share> = BTreeMap::new();
    for share in shares {
        match latest.entry(share.key()) {
            Entry::Vacant(e) => {
                e.insert(share);
            }
            Entry::Occupied(mut e) => {
                let current = *e.get();
                if (share.scan_time, share.id) > (current.scan_time, current.id) {
                    e.insert(share);
                }
            }
        }
    }
    latest.into_values().collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccessLevel;
    use chrono::{TimeZone, Utc};

    fn share(id: i64, session_id: i64, hostname: &str, share_name: &str, day: u32) -> Share {
        Share {
            id,
            session_id,
            hostname: hostname.to_string(),
            share_name: share_name.to_string(),
            access_level: AccessLevel::Read,
            error_message: None,
            total_files: 10,
            total_dirs: 2,
            hidden_files: 0,
            scan_time: Utc.with_ymd_and_hms(2026, 3, day, 8, 0, 0).unwrap(),
        }
    }

    fn sensitive(id: i64, share_id: i64, path: &str, name: &str, detection: &str) -> SensitiveFile {
        SensitiveFile {
            id,
            share_id,
            file_path: path.to_string(),
            file_name: name.to_string(),
            detection_type: detection.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    fn root(id: i64, share_id: i64, name: &str) -> RootFile {
        RootFile {
            id,
            share_id,
            file_name: name.to_string(),
            file_type: "txt".to_string(),
            file_size: 1,
            attributes: Vec::new(),
            created_time: None,
            modified_time: None,
        }
    }

    #[test]
    fn test_filter_latest_per_share_dedupes_by_natural_key() {
        let inventory = Inventory {
            shares: vec![
                share(1, 1, "H1", "docs", 1),
                share(2, 2, "H1", "docs", 8),
                share(3, 1, "H2", "media", 1),
            ],
            ..Default::default()
        };

        let rows = ShareFilter::default().apply(&inventory);
        assert_eq!(rows.len(), 2);
        // H1/docs resolves to the newer session-2 row
        assert_eq!(rows[0].share.id, 2);
        assert_eq!(rows[1].share.id, 3);
    }

    #[test]
    fn test_filter_latest_per_share_tie_breaks_by_id() {
        let inventory = Inventory {
            shares: vec![share(5, 1, "H1", "docs", 1), share(9, 2, "H1", "docs", 1)],
            ..Default::default()
        };

        let rows = ShareFilter::default().apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.id, 9);
    }

    #[test]
    fn test_filter_session_scope_keeps_every_row() {
        let inventory = Inventory {
            shares: vec![
                share(1, 1, "H1", "docs", 1),
                share(2, 2, "H1", "docs", 8),
            ],
            ..Default::default()
        };

        let filter = ShareFilter {
            scope: SessionScope::Session(1),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.session_id, 1);
    }

    #[test]
    fn test_filter_match_field_substring_case_insensitive() {
        let inventory = Inventory {
            shares: vec![share(1, 1, "FILESRV01", "finance$", 1), share(2, 1, "DC01", "sysvol", 1)],
            ..Default::default()
        };

        let filter = ShareFilter {
            match_field: MatchField::Hostname,
            match_value: Some("filesrv".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.hostname, "FILESRV01");

        let filter = ShareFilter {
            match_field: MatchField::ShareName,
            match_value: Some("SYSVOL".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.share_name, "sysvol");
    }

    #[test]
    fn test_filter_match_value_ignored_when_field_is_all() {
        let inventory = Inventory {
            shares: vec![share(1, 1, "H1", "docs", 1)],
            ..Default::default()
        };

        let filter = ShareFilter {
            match_field: MatchField::All,
            match_value: Some("nomatch".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&inventory).len(), 1);
    }

    #[test]
    fn test_filter_detection_type_excludes_zero_count_shares() {
        let inventory = Inventory {
            shares: vec![share(1, 1, "H1", "docs", 1), share(2, 1, "H2", "media", 1)],
            sensitive_files: vec![
                sensitive(1, 1, "\\a", "salaries.xlsx", "payroll"),
                sensitive(2, 2, "\\b", "keys.pem", "credentials"),
            ],
            ..Default::default()
        };

        let filter = ShareFilter {
            detection_type: Some("payroll".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.hostname, "H1");
        assert_eq!(rows[0].sensitive_file_count, 1);
    }

    #[test]
    fn test_filter_count_is_distinct_file_pairs() {
        // One physical file matched by two patterns counts once
        let inventory = Inventory {
            shares: vec![share(1, 1, "H1", "docs", 1)],
            sensitive_files: vec![
                sensitive(1, 1, "\\a", "salaries.xlsx", "payroll"),
                sensitive(2, 1, "\\a", "salaries.xlsx", "pii"),
                sensitive(3, 1, "\\b", "other.txt", "keyword"),
            ],
            ..Default::default()
        };

        let rows = ShareFilter::default().apply(&inventory);
        assert_eq!(rows[0].sensitive_file_count, 2);

        let filter = ShareFilter {
            detection_type: Some("pii".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&inventory)[0].sensitive_file_count, 1);
    }

    #[test]
    fn test_filter_search_spans_share_and_file_names() {
        let inventory = Inventory {
            shares: vec![share(1, 1, "H1", "docs", 1), share(2, 1, "H2", "media", 1)],
            sensitive_files: vec![sensitive(1, 1, "\\payroll", "Salaries.xlsx", "payroll")],
            root_files: vec![root(1, 2, "holiday-video.mp4")],
        };

        // Matches via sensitive file name
        let filter = ShareFilter {
            search: Some("salaries".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.hostname, "H1");

        // Matches via sensitive file path
        let filter = ShareFilter {
            search: Some("payroll".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&inventory).len(), 1);

        // Matches via root file name
        let filter = ShareFilter {
            search: Some("holiday".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.hostname, "H2");

        // No match
        let filter = ShareFilter {
            search: Some("nonexistent".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&inventory).is_empty());
    }

    #[test]
    fn test_filter_conditions_combine_with_and() {
        let inventory = Inventory {
            shares: vec![share(1, 1, "H1", "docs", 1), share(2, 1, "H1", "media", 1)],
            sensitive_files: vec![sensitive(1, 1, "\\a", "keys.pem", "credentials")],
            ..Default::default()
        };

        let filter = ShareFilter {
            match_field: MatchField::Hostname,
            match_value: Some("h1".to_string()),
            detection_type: Some("credentials".to_string()),
            ..Default::default()
        };
        let rows = filter.apply(&inventory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].share.share_name, "docs");
    }

    #[test]
    fn test_filter_from_request_normalizes_sentinels() {
        let filter = ShareFilter::from_request(
            Some("  ".to_string()),
            Some("all".to_string()),
            MatchField::All,
            Some("".to_string()),
            None,
        );
        assert!(filter.search.is_none());
        assert!(filter.detection_type.is_none());
        assert!(filter.match_value.is_none());
        assert_eq!(filter.scope, SessionScope::LatestPerShare);

        let filter = ShareFilter::from_request(None, None, MatchField::All, None, Some(3));
        assert_eq!(filter.scope, SessionScope::Session(3));
    }

    #[test]
    fn test_filter_output_ordered_by_natural_key() {
        let inventory = Inventory {
            shares: vec![
                share(3, 1, "H2", "media", 1),
                share(1, 1, "H1", "docs", 1),
                share(2, 1, "H1", "backup", 1),
            ],
            ..Default::default()
        };

        let rows = ShareFilter::default().apply(&inventory);
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.share.hostname.as_str(), r.share.share_name.as_str()))
            .collect();
        assert_eq!(keys, vec![("H1", "backup"), ("H1", "docs"), ("H2", "media")]);
    }
}
