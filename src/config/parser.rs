use std::path::Path;

use crate::errors::SharescopeError;

use super::types::AppConfig;

/// Load a YAML config file, or built-in defaults when no path is given.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, SharescopeError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        return Err(SharescopeError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(SharescopeError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: AppConfig = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), SharescopeError> {
    if let Some(listing) = &config.listing {
        let sizes = [
            ("share_page_size", listing.share_page_size),
            ("file_page_size", listing.file_page_size),
            ("activity_page_size", listing.activity_page_size),
        ];
        for (name, value) in sizes {
            if value == Some(0) {
                return Err(SharescopeError::Config(format!("{} must be at least 1", name)));
            }
        }
    }
    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(SharescopeError::Config("server.port must be at least 1".into()));
        }
    }
    Ok(())
}
