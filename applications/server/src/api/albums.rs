/// Album API routes
use crate::{
    api::multipart::MultipartForm,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::UploadKind,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use groove_core::{
    Album, AlbumFilter, AlbumId, AlbumQuery, AlbumSummary, AlbumWithDetails, CreateAlbum,
    GenreId, SortBy, SortOrder, Timeframe, Track, UploadAlbumForm,
};
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/albums`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlbumsParams {
    pub genre_id: Option<GenreId>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub timeframe: Option<Timeframe>,
}

impl ListAlbumsParams {
    pub fn into_query(self) -> AlbumQuery {
        AlbumQuery {
            filter: AlbumFilter {
                genre_id: self.genre_id,
                search: self.search,
                timeframe: self.timeframe,
            },
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            limit: self.limit.map(i64::from),
            offset: self.offset.map(i64::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: i64,
    pub limit: Option<i64>,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct AlbumsResponse {
    pub data: Vec<AlbumSummary>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct AlbumCreatedResponse {
    pub message: &'static str,
    pub album: Album,
}

/// GET /api/albums
pub async fn list_albums(
    State(app_state): State<AppState>,
    params: std::result::Result<Query<ListAlbumsParams>, QueryRejection>,
) -> Result<Json<AlbumsResponse>> {
    let Query(params) = params.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let query = params.into_query();

    let albums = app_state.catalog.get_albums(&query).await?;
    let total = app_state.catalog.get_album_count(&query.filter).await?;
    let data = app_state.catalog.summarize_albums(albums).await?;

    Ok(Json(AlbumsResponse {
        data,
        meta: ListMeta {
            total,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        },
    }))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumWithDetails>> {
    let album = app_state
        .catalog
        .get_album_with_details(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;
    Ok(Json(album))
}

/// GET /api/albums/:id/tracks
pub async fn get_album_tracks(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.catalog.get_tracks_by_album(id).await?;
    Ok(Json(tracks))
}

/// GET /api/albums/:id/related
pub async fn get_related_albums(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AlbumSummary>>> {
    let related = app_state.catalog.get_related_albums(id).await?;
    let summaries = app_state.catalog.summarize_albums(related).await?;
    Ok(Json(summaries))
}

/// POST /api/albums/upload
///
/// Multipart form with `title`, `artistId`, `genreId`, `releaseDate`,
/// `password` and an optional `coverImage` file. The caller must own the
/// artist and re-enter their password. A cover with a disallowed type or
/// size is rejected before anything else is looked at.
pub async fn upload_album(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<AlbumCreatedResponse>)> {
    let mut form = MultipartForm::parse(&headers, body).await?;
    if let Some(file) = form.files.get("coverImage") {
        app_state.uploads.validate(UploadKind::Image, file)?;
    }
    let upload = UploadAlbumForm::from_fields(&form.fields).map_err(ServerError::Validation)?;

    let artist = app_state
        .catalog
        .get_artist(upload.artist_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Artist not found".to_string()))?;

    let user = auth.load(&app_state).await?;
    if artist.user_id != Some(user.id) {
        return Err(ServerError::Forbidden(
            "You do not own this artist profile".to_string(),
        ));
    }

    if !app_state
        .auth_service
        .verify_password(&upload.password, &user.password)?
    {
        tracing::warn!(user_id = user.id, "Album upload with wrong password");
        return Err(ServerError::Auth("Invalid password".to_string()));
    }

    let cover_image = match form.take_file("coverImage") {
        Some(file) => Some(app_state.uploads.store(UploadKind::Image, &file).await?),
        None => None,
    };

    let created = app_state
        .catalog
        .create_album(CreateAlbum {
            title: upload.title,
            artist_id: upload.artist_id,
            cover_image: cover_image.clone(),
            release_date: upload.release_date,
            genre_id: upload.genre_id,
            total_duration: None,
            is_new: 1,
        })
        .await;
    let album = match created {
        Ok(album) => album,
        Err(e) => {
            if let Some(path) = &cover_image {
                app_state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(album_id = album.id, artist_id = artist.id, "Album created");

    Ok((
        StatusCode::CREATED,
        Json(AlbumCreatedResponse {
            message: "Album created successfully",
            album,
        }),
    ))
}

/// DELETE /api/albums/:id
///
/// Responds 404 for an unknown id instead of treating the delete as a no-op.
pub async fn delete_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let admin = auth.require_admin(&app_state).await?;

    if app_state.catalog.get_album(id).await?.is_none() {
        return Err(ServerError::NotFound("Album not found".to_string()));
    }
    app_state.catalog.delete_album(id).await?;

    tracing::info!(album_id = id, admin_id = admin.id, "Album deleted");
    Ok(Json(
        serde_json::json!({ "message": "Album deleted successfully" }),
    ))
}
