use super::Database;
use crate::engine::{Inventory, SessionInventory};
use crate::errors::SharescopeError;

impl Database {
    /// Snapshot one session's rows for diffing. A missing session id is an
    /// error here, before any comparison work starts.
    pub fn session_inventory(&self, session_id: i64) -> Result<SessionInventory, SharescopeError> {
        let session = self.require_session(session_id)?;
        let shares = self.shares_for_session(session_id)?;
        let sensitive_files = self.sensitive_files_for_session(session_id)?;
        Ok(SessionInventory { session, shares, sensitive_files })
    }

    /// Snapshot the full inventory across all sessions, as consumed by the
    /// listing filter and the risk aggregator.
    pub fn full_inventory(&self) -> Result<Inventory, SharescopeError> {
        Ok(Inventory {
            shares: self.all_shares()?,
            sensitive_files: self.all_sensitive_files()?,
            root_files: self.all_root_files()?,
        })
    }
}
