use std::path::Path;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config;
use crate::errors::SharescopeError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), SharescopeError> {
    let config = config::load_config(args.config.as_deref().map(Path::new)).await?;

    // Flags win over the config file
    let host = args.host.unwrap_or_else(|| config.host());
    let port = args.port.unwrap_or_else(|| config.port());
    let db_path = args.db.clone().unwrap_or_else(|| config.db_path());

    info!(host = %host, port = port, db = %db_path, "Starting API server");

    let state = api::create_app_state(&db_path, config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SharescopeError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
