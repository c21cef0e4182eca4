/// Server services
pub mod auth;
pub mod uploads;

pub use auth::AuthService;
pub use uploads::{placeholder_audio_duration, UploadKind, UploadStore, UploadedFile};
