use serde::{Deserialize, Serialize};

use crate::engine::pagination::{ACTIVITY_PAGE_SIZE, FILE_PAGE_SIZE, SHARE_PAGE_SIZE};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub listing: Option<ListingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_path: Option<String>,
}

/// Page-size defaults per listing kind. Each listing has its own default;
/// an explicit `limit` in a request still wins.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ListingConfig {
    pub share_page_size: Option<usize>,
    pub file_page_size: Option<usize>,
    pub activity_page_size: Option<usize>,
}

impl AppConfig {
    pub fn host(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(8080)
    }

    pub fn db_path(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.db_path.clone())
            .unwrap_or_else(|| "./data/sharescope.db".to_string())
    }

    pub fn share_page_size(&self) -> usize {
        self.listing
            .as_ref()
            .and_then(|l| l.share_page_size)
            .unwrap_or(SHARE_PAGE_SIZE)
    }

    pub fn file_page_size(&self) -> usize {
        self.listing
            .as_ref()
            .and_then(|l| l.file_page_size)
            .unwrap_or(FILE_PAGE_SIZE)
    }

    pub fn activity_page_size(&self) -> usize {
        self.listing
            .as_ref()
            .and_then(|l| l.activity_page_size)
            .unwrap_or(ACTIVITY_PAGE_SIZE)
    }
}
