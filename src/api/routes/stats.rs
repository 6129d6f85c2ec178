use axum::{extract::State, Json};

use crate::api::AppState;
use crate::engine::risk::{self, InventoryStats};
use crate::errors::SharescopeError;

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<InventoryStats>, SharescopeError> {
    let inventory = state.db.full_inventory()?;
    Ok(Json(risk::aggregate(&inventory)))
}
