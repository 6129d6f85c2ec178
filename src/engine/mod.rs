//! Pure, synchronous transformations over inventory snapshots: share
//! listing filters, pagination arithmetic, two-session diffing and risk
//! aggregation. Nothing here touches the store or holds state; every
//! function is deterministic for a given input.

pub mod diff;
pub mod filter;
pub mod join;
pub mod pagination;
pub mod risk;

use crate::models::{RootFile, ScanSession, SensitiveFile, Share};

/// Read-only snapshot of one session's rows, as loaded from the store.
#[derive(Debug, Clone)]
pub struct SessionInventory {
    pub session: ScanSession,
    pub shares: Vec<Share>,
    pub sensitive_files: Vec<SensitiveFile>,
}

/// Read-only snapshot of the entire inventory across all sessions.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub shares: Vec<Share>,
    pub sensitive_files: Vec<SensitiveFile>,
    pub root_files: Vec<RootFile>,
}
