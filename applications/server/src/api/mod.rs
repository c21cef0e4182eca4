/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod genres;
pub mod health;
pub mod multipart;
pub mod tracks;

use crate::{middleware, services::UploadKind, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Largest accepted upload body: one audio file plus form fields
pub const UPLOAD_BODY_LIMIT: usize = 21 * 1024 * 1024;

/// Build the full application router
///
/// Reads are public. Uploads, artist registration and the current-user
/// endpoints need a bearer access token; deletions additionally check the
/// admin role inside the handlers.
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);
    let upload_limit = || DefaultBodyLimit::max(UPLOAD_BODY_LIMIT);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/genres", get(genres::list_genres))
        .route("/albums", get(albums::list_albums))
        .route("/albums/:id", get(albums::get_album))
        .route("/albums/:id/tracks", get(albums::get_album_tracks))
        .route("/albums/:id/related", get(albums::get_related_albums))
        .route("/artists", get(artists::list_artists));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/user", get(auth::current_user))
        .route("/user/artists", get(artists::list_my_artists))
        .route(
            "/albums/upload",
            post(albums::upload_album).layer(upload_limit()),
        )
        .route(
            "/tracks/upload",
            post(tracks::upload_track).layer(upload_limit()),
        )
        .route(
            "/artists/register",
            post(artists::register_artist).layer(upload_limit()),
        )
        .route("/albums/:id", delete(albums::delete_album))
        .route("/artists/:id", delete(artists::delete_artist))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    // Uploaded files; anything else under /uploads falls through to 404
    let uploads = app_state.uploads.clone();
    let static_files = Router::new()
        .nest_service(
            "/uploads/audio",
            ServeDir::new(uploads.directory(UploadKind::Audio)),
        )
        .nest_service(
            "/uploads/images",
            ServeDir::new(uploads.directory(UploadKind::Image)),
        );

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .merge(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default()),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
