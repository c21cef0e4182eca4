/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use groove_core::{CreateUser, FieldError, GrooveError, Role, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

fn session_for(app_state: &AppState, user: User) -> Result<SessionResponse> {
    let session = app_state.auth_service.create_session(user.id)?;
    Ok(SessionResponse {
        user,
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        token_type: "Bearer",
    })
}

/// POST /api/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let mut errors = Vec::new();
    if req.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    if !errors.is_empty() {
        return Err(ServerError::Validation(errors));
    }

    let password = app_state.auth_service.hash_password(&req.password)?;
    let user = app_state
        .catalog
        .create_user(CreateUser {
            username: req.username.trim().to_string(),
            password,
            role: Role::User,
        })
        .await
        .map_err(|e| match e {
            GrooveError::Duplicate(_) => {
                ServerError::BadRequest("Username already exists".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(session_for(&app_state, user)?)))
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>> {
    let user = app_state
        .catalog
        .get_user_by_username(&req.username)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &user.password)?
    {
        tracing::warn!(user_id = user.id, "Login with wrong password");
        return Err(ServerError::Auth("Invalid username or password".to_string()));
    }

    Ok(Json(session_for(&app_state, user)?))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    // Verify refresh token
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Create new access token
    let access_token = app_state.auth_service.create_access_token(user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer",
    }))
}

/// GET /api/user
pub async fn current_user(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    Ok(Json(auth.load(&app_state).await?))
}
