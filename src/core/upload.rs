use std::path::Path;
use thiserror::Error;

const ALLOWED_TYPES: [&str; 3] = ["jpeg", "jpg", "png"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Only jpeg, jpg and png files are allowed")]
    UnsupportedType,

    #[error("File is too large. Maximum size is {limit_mb}MB")]
    TooLarge { limit_mb: usize },
}

/// Acceptance rules for uploaded photos
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Both the file extension and the declared MIME type must name an image type
    pub fn check_type(&self, filename: &str, content_type: &str) -> Result<(), UploadError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content_type = content_type.to_ascii_lowercase();

        if names_allowed_type(&extension) && names_allowed_type(&content_type) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedType)
        }
    }

    /// Checked as chunks arrive so oversized uploads are cut off early
    pub fn check_size(&self, received: usize) -> Result<(), UploadError> {
        if received > self.max_bytes {
            Err(UploadError::TooLarge { limit_mb: self.max_bytes / (1024 * 1024) })
        } else {
            Ok(())
        }
    }
}

fn names_allowed_type(s: &str) -> bool {
    !s.is_empty() && ALLOWED_TYPES.iter().any(|t| s.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_images() {
        let policy = UploadPolicy::new(1024);
        assert!(policy.check_type("me.jpg", "image/jpeg").is_ok());
        assert!(policy.check_type("ME.PNG", "image/png").is_ok());
        assert!(policy.check_type("selfie.jpeg", "image/jpeg").is_ok());
    }

    #[test]
    fn test_rejects_mismatched_or_missing_types() {
        let policy = UploadPolicy::new(1024);
        assert_eq!(policy.check_type("me.gif", "image/gif"), Err(UploadError::UnsupportedType));
        assert_eq!(policy.check_type("me.png", "application/pdf"), Err(UploadError::UnsupportedType));
        assert_eq!(policy.check_type("me", "image/png"), Err(UploadError::UnsupportedType));
        assert_eq!(policy.check_type("me.jpg", ""), Err(UploadError::UnsupportedType));
    }

    #[test]
    fn test_size_message_matches_limit() {
        let policy = UploadPolicy::new(50 * 1024 * 1024);
        assert!(policy.check_size(50 * 1024 * 1024).is_ok());
        let err = policy.check_size(50 * 1024 * 1024 + 1).unwrap_err();
        assert_eq!(err.to_string(), "File is too large. Maximum size is 50MB");
    }
}
