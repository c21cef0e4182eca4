/// Upload storage - validates and writes cover images and audio files to disk
use crate::error::{Result, ServerError};
use bytes::Bytes;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Kind of file a multipart part is allowed to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Audio,
    Image,
}

impl UploadKind {
    pub fn subdirectory(&self) -> &'static str {
        match self {
            UploadKind::Audio => "audio",
            UploadKind::Image => "images",
        }
    }

    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Audio => &["audio/mpeg", "audio/wav", "audio/ogg", "audio/mp3"],
            UploadKind::Image => &["image/jpeg", "image/png", "image/gif", "image/webp"],
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            UploadKind::Audio => 20 * 1024 * 1024,
            UploadKind::Image => 5 * 1024 * 1024,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UploadKind::Audio => "audio",
            UploadKind::Image => "image",
        }
    }
}

/// A file part pulled out of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    /// Declared content type, or a guess from the file name
    pub fn mime_type(&self) -> Option<String> {
        if let Some(content_type) = &self.content_type {
            return Some(content_type.clone());
        }
        self.file_name
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| mime.essence_str().to_string())
    }

    /// `.ext` taken from the original file name; empty when there is none
    fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    base_path: PathBuf,
}

impl UploadStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding files of one kind
    pub fn directory(&self, kind: UploadKind) -> PathBuf {
        self.base_path.join(kind.subdirectory())
    }

    /// Initialize upload directories
    pub async fn initialize(&self) -> Result<()> {
        for kind in [UploadKind::Audio, UploadKind::Image] {
            fs::create_dir_all(self.directory(kind)).await?;
        }
        Ok(())
    }

    /// Reject files with a disallowed type or over the size limit
    pub fn validate(&self, kind: UploadKind, file: &UploadedFile) -> Result<()> {
        let mime = file.mime_type().unwrap_or_default();
        if !kind.allowed_mime_types().contains(&mime.as_str()) {
            return Err(ServerError::BadRequest(format!(
                "Invalid file type for {}: expected {}",
                kind.label(),
                kind.allowed_mime_types().join(", ")
            )));
        }

        if file.data.len() > kind.max_bytes() {
            return Err(ServerError::BadRequest(format!(
                "File too large: {} files are limited to {} MB",
                kind.label(),
                kind.max_bytes() / (1024 * 1024)
            )));
        }

        Ok(())
    }

    /// Validate and write the file, returning its public `/uploads/...` path
    pub async fn store(&self, kind: UploadKind, file: &UploadedFile) -> Result<String> {
        self.validate(kind, file)?;

        let file_name = format!(
            "{}-{}-{}{}",
            file.field_name,
            chrono::Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u32),
            file.extension()
        );

        let dir = self.directory(kind);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&file_name), &file.data).await?;

        tracing::debug!(
            kind = kind.subdirectory(),
            bytes = file.data.len(),
            "Stored upload {}",
            file_name
        );

        Ok(format!("/uploads/{}/{}", kind.subdirectory(), file_name))
    }

    /// Delete a file written by [`UploadStore::store`], given its public path
    ///
    /// Used to undo a write when the catalog rejects the record that would
    /// have referenced it. Failures are logged, not returned.
    pub async fn remove(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix("/uploads/") else {
            return;
        };
        if relative.split('/').any(|segment| segment == "..") {
            return;
        }

        if let Err(e) = fs::remove_file(self.base_path.join(relative)).await {
            tracing::warn!("Failed to remove upload {}: {}", public_path, e);
        }
    }
}

/// Stand-in for real audio probing
///
/// Returns a pseudo-random duration in `[120, 300)` seconds. Nothing reads
/// the uploaded audio.
pub fn placeholder_audio_duration() -> i64 {
    rand::thread_rng().gen_range(120..300)
}
