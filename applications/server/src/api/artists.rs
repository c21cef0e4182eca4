/// Artist API routes
use crate::{
    api::multipart::MultipartForm,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::UploadKind,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use groove_core::{Artist, ArtistId, CreateArtist, RegisterArtistForm};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ArtistCreatedResponse {
    pub message: &'static str,
    pub artist: Artist,
}

/// GET /api/artists
pub async fn list_artists(State(app_state): State<AppState>) -> Result<Json<Vec<Artist>>> {
    let artists = app_state.catalog.get_artists().await?;
    Ok(Json(artists))
}

/// GET /api/user/artists
pub async fn list_my_artists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Artist>>> {
    let artists = app_state
        .catalog
        .get_artists_by_user(auth.user_id())
        .await?;
    Ok(Json(artists))
}

/// POST /api/artists/register
///
/// Multipart form with `name` and an optional `image`; the new profile is
/// owned by the caller.
pub async fn register_artist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ArtistCreatedResponse>)> {
    let mut form = MultipartForm::parse(&headers, body).await?;
    if let Some(file) = form.files.get("image") {
        app_state.uploads.validate(UploadKind::Image, file)?;
    }
    let registration =
        RegisterArtistForm::from_fields(&form.fields).map_err(ServerError::Validation)?;
    let user = auth.load(&app_state).await?;

    let image = match form.take_file("image") {
        Some(file) => Some(app_state.uploads.store(UploadKind::Image, &file).await?),
        None => None,
    };

    let created = app_state
        .catalog
        .create_artist(CreateArtist {
            name: registration.name,
            image: image.clone(),
            user_id: Some(user.id),
        })
        .await;
    let artist = match created {
        Ok(artist) => artist,
        Err(e) => {
            if let Some(path) = &image {
                app_state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(artist_id = artist.id, user_id = user.id, "Artist registered");

    Ok((
        StatusCode::CREATED,
        Json(ArtistCreatedResponse {
            message: "Artist registered successfully",
            artist,
        }),
    ))
}

/// DELETE /api/artists/:id
///
/// Responds 404 for an unknown id instead of treating the delete as a no-op.
pub async fn delete_artist(
    Path(id): Path<ArtistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let admin = auth.require_admin(&app_state).await?;

    if app_state.catalog.get_artist(id).await?.is_none() {
        return Err(ServerError::NotFound("Artist not found".to_string()));
    }
    app_state.catalog.delete_artist(id).await?;

    tracing::info!(artist_id = id, admin_id = admin.id, "Artist deleted");
    Ok(Json(
        serde_json::json!({ "message": "Artist deleted successfully" }),
    ))
}
