/// Shared application state
use crate::services::{AuthService, UploadStore};
use groove_core::CatalogStorage;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStorage>,
    pub auth_service: Arc<AuthService>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStorage>,
        auth_service: Arc<AuthService>,
        uploads: Arc<UploadStore>,
    ) -> Self {
        Self {
            catalog,
            auth_service,
            uploads,
        }
    }
}
