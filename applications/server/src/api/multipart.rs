/// Multipart form parsing shared by the upload endpoints
use crate::{
    error::{Result, ServerError},
    services::UploadedFile,
};
use axum::{
    body::Bytes,
    http::{header, HeaderMap},
};
use std::collections::HashMap;

/// Text fields and file parts of one `multipart/form-data` body
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Parse a buffered request body
    ///
    /// Parts with a file name are files; an empty file part (a form submitted
    /// without choosing a file) is dropped.
    pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<Self> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

        if !content_type.starts_with("multipart/form-data") {
            return Err(ServerError::BadRequest(
                "Expected multipart/form-data".to_string(),
            ));
        }

        let boundary = multer::parse_boundary(content_type)
            .map_err(|_| ServerError::BadRequest("Missing boundary".to_string()))?;

        // Convert Bytes to a stream for multer
        let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(|mime| mime.essence_str().to_string());
                    let data = field.bytes().await.map_err(|e| {
                        ServerError::BadRequest(format!("Failed to read file: {}", e))
                    })?;
                    if data.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name.clone(),
                        UploadedFile {
                            field_name: name,
                            file_name: Some(file_name),
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        ServerError::BadRequest(format!("Failed to read field {}: {}", name, e))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
