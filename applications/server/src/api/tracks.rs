/// Track API routes
use crate::{
    api::multipart::MultipartForm,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::{placeholder_audio_duration, UploadKind},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use groove_core::{CreateTrack, Track, UploadTrackForm};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrackCreatedResponse {
    pub message: &'static str,
    pub track: Track,
}

/// POST /api/tracks/upload
///
/// Multipart form with `title`, `albumId`, `trackNumber` and an optional
/// `audioFile`. The album's total duration is recomputed afterwards.
pub async fn upload_track(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<TrackCreatedResponse>)> {
    let mut form = MultipartForm::parse(&headers, body).await?;
    if let Some(file) = form.files.get("audioFile") {
        app_state.uploads.validate(UploadKind::Audio, file)?;
    }
    let upload = UploadTrackForm::from_fields(&form.fields).map_err(ServerError::Validation)?;

    if app_state.catalog.get_album(upload.album_id).await?.is_none() {
        return Err(ServerError::BadRequest(format!(
            "Album does not exist: {}",
            upload.album_id
        )));
    }

    let audio_file = match form.take_file("audioFile") {
        Some(file) => Some(app_state.uploads.store(UploadKind::Audio, &file).await?),
        None => None,
    };

    let created = app_state
        .catalog
        .create_track(CreateTrack {
            title: upload.title,
            album_id: upload.album_id,
            track_number: upload.track_number,
            duration: placeholder_audio_duration(),
            audio_file: audio_file.clone(),
        })
        .await;
    let track = match created {
        Ok(track) => track,
        Err(e) => {
            if let Some(path) = &audio_file {
                app_state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    let total = app_state
        .catalog
        .refresh_album_duration(track.album_id)
        .await?;

    tracing::info!(
        track_id = track.id,
        album_id = track.album_id,
        user_id = auth.user_id(),
        total_duration = total,
        "Track uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(TrackCreatedResponse {
            message: "Track uploaded successfully",
            track,
        }),
    ))
}
