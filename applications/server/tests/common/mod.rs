//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use groove_core::{Artist, CatalogStorage, CreateArtist, CreateUser, Role, User};
use groove_server::{create_router, AppState, AuthService, UploadStore};
use groove_storage::MemoryCatalog;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const BOUNDARY: &str = "groove-test-boundary";

/// Router plus handles to everything behind it
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<dyn CatalogStorage>,
    pub auth_service: Arc<AuthService>,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// App over an empty in-memory catalog
    pub async fn new() -> Self {
        Self::with_catalog(Arc::new(MemoryCatalog::new())).await
    }

    /// App over the demo catalog
    pub async fn with_demo_catalog() -> Self {
        let catalog = MemoryCatalog::with_demo_catalog()
            .await
            .expect("Failed to seed demo catalog");
        Self::with_catalog(Arc::new(catalog)).await
    }

    pub async fn with_catalog(catalog: Arc<dyn CatalogStorage>) -> Self {
        let upload_dir = TempDir::new().expect("Failed to create upload dir");
        let uploads = UploadStore::new(upload_dir.path().to_path_buf());
        uploads
            .initialize()
            .await
            .expect("Failed to initialize uploads");

        let auth_service = Arc::new(AuthService::new(
            TEST_SECRET.to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let app_state = AppState::new(
            Arc::clone(&catalog),
            Arc::clone(&auth_service),
            Arc::new(uploads),
        );

        Self {
            router: create_router(app_state),
            catalog,
            auth_service,
            upload_dir,
        }
    }

    /// Create a user with a real bcrypt hash and return it with an access token
    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> (User, String) {
        let hash = self.auth_service.hash_password(password).unwrap();
        let user = self
            .catalog
            .create_user(CreateUser {
                username: username.to_string(),
                password: hash,
                role,
            })
            .await
            .unwrap();
        let token = self.auth_service.create_access_token(user.id).unwrap();
        (user, token)
    }

    pub async fn create_artist_for(&self, user: &User, name: &str) -> Artist {
        self.catalog
            .create_artist(CreateArtist {
                name: name.to_string(),
                image: None,
                user_id: Some(user.id),
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// One part of a hand-built multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub fn authorized(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}
