use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use std::collections::HashMap;

use crate::core::UploadPolicy;
use crate::error::AppError;

pub const PHOTO_FIELD: &str = "photo";
pub const INVITED_USERNAME_FIELD: &str = "invitedUsername";
pub const ACCEPT_FIELD: &str = "accept";

/// Text fields kept from a form; any other part is read and discarded
const TEXT_FIELDS: [&str; 2] = [INVITED_USERNAME_FIELD, ACCEPT_FIELD];

/// Text fields are small; anything bigger is not a form value we expect
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// A parsed multipart form with at most one photo
#[derive(Debug, Default)]
pub struct PhotoForm {
    pub photo: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

impl PhotoForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err))
}

/// Read a multipart body, validating the `photo` part against the upload policy
/// while it streams in.
pub async fn read_photo_form(mut payload: Multipart, policy: &UploadPolicy) -> Result<PhotoForm, AppError> {
    let mut form = PhotoForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PHOTO_FIELD {
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or_default()
                .to_string();
            let content_type = field
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_default();

            policy.check_type(&filename, &content_type)?;

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
                policy.check_size(bytes.len() + chunk.len())?;
                bytes.extend_from_slice(&chunk);
            }

            tracing::debug!("Received photo '{}' ({} bytes)", filename, bytes.len());
            form.photo = Some(bytes);
        } else if TEXT_FIELDS.contains(&name.as_str()) {
            let mut value = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
                if value.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                    return Err(AppError::BadRequest(format!("Field '{}' is too large", name)));
                }
                value.extend_from_slice(&chunk);
            }
            form.fields.insert(name, String::from_utf8_lossy(&value).into_owned());
        } else {
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            tracing::debug!("Ignored form field '{}'", name);
        }
    }

    Ok(form)
}
