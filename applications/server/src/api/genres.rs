/// Genre API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use groove_core::Genre;

/// GET /api/genres
pub async fn list_genres(State(app_state): State<AppState>) -> Result<Json<Vec<Genre>>> {
    let genres = app_state.catalog.get_genres().await?;
    Ok(Json(genres))
}
