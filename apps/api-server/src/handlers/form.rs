//! Multipart form reading for the create and update endpoints.

use std::collections::HashMap;

use actix_multipart::Multipart;
use blog_core::domain::ImageUpload;
use futures::StreamExt;

use crate::middleware::error::{AppError, AppResult};

/// Name of the file field carrying the image.
const IMAGE_FIELD: &str = "imagen";

/// Text fields and the optional image of a `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct PostForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl PostForm {
    /// Drain the multipart stream, rejecting bodies larger than `max_bytes`.
    ///
    /// A file part with an empty filename is treated as "no file".
    pub async fn read(mut payload: Multipart, max_bytes: usize) -> AppResult<Self> {
        let mut form = PostForm::default();
        let mut total = 0usize;

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(invalid_body)?;
            let name = field.name().unwrap_or_default().to_string();
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(invalid_body)?;
                total += chunk.len();
                if total > max_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "El cuerpo supera el máximo de {max_bytes} bytes"
                    )));
                }
                data.extend_from_slice(&chunk);
            }

            match filename {
                Some(filename) if name == IMAGE_FIELD => {
                    if !filename.is_empty() {
                        form.image = Some(ImageUpload::new(filename, data));
                    }
                }
                Some(filename) => {
                    tracing::debug!(field = %name, %filename, "Ignoring unexpected file field");
                }
                None => {
                    let value = String::from_utf8(data).map_err(|_| {
                        AppError::BadRequest(format!("El campo {name} no es texto UTF-8"))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Take a text field out of the form.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Take the uploaded image out of the form.
    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }
}

fn invalid_body(e: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Cuerpo multipart inválido: {e}"))
}
