//! Upload policy validation.
//!
//! Size and content-kind checks run before anything touches storage: at most
//! 10 MB (configurable) and a small allow-list of content kinds (JPEG, PNG,
//! GIF, WEBP, PDF by default). Rejections are typed so the boundary can map
//! them to 413 / 415.

use std::path::Path;

use docuweave_core::AppError;

/// Upload validator built from the configured policy.
pub struct UploadValidator<'a> {
    max_file_size: usize,
    allowed_extensions: &'a [String],
    allowed_content_types: &'a [String],
}

impl<'a> UploadValidator<'a> {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: &'a [String],
        allowed_content_types: &'a [String],
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), AppError> {
        if size == 0 {
            return Err(AppError::Validation("File is empty".to_string()));
        }
        if size > self.max_file_size {
            return Err(AppError::PayloadTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), AppError> {
        let normalized = content_type.to_lowercase();
        if !self.allowed_content_types.iter().any(|ct| *ct == normalized) {
            return Err(AppError::UnsupportedMedia {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.to_vec(),
            });
        }
        Ok(())
    }

    /// Extension check is advisory when the filename has none; the
    /// content-type check is the gate that always runs.
    pub fn validate_extension(&self, filename: &str) -> Result<(), AppError> {
        let Some(extension) = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
        else {
            return Ok(());
        };
        if !self.allowed_extensions.contains(&extension) {
            return Err(AppError::UnsupportedMedia {
                content_type: format!("file extension '{}'", extension),
                allowed: self.allowed_content_types.to_vec(),
            });
        }
        Ok(())
    }

    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<(), AppError> {
        self.validate_file_size(file_size)?;
        self.validate_content_type(content_type)?;
        self.validate_extension(filename)?;
        Ok(())
    }
}

/// Strip path components and shell-hostile characters from a client-supplied
/// filename, keeping unicode word characters, dots, and dashes.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> (Vec<String>, Vec<String>) {
        (
            vec!["jpg", "jpeg", "png", "gif", "webp", "pdf"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec![
                "image/jpeg",
                "image/png",
                "image/gif",
                "image/webp",
                "application/pdf",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    #[test]
    fn test_validate_all_accepts_allowed_upload() {
        let (exts, types) = policy();
        let validator = UploadValidator::new(10 * 1024 * 1024, &exts, &types);
        assert!(validator
            .validate_all("사업자등록증.pdf", "application/pdf", 1024)
            .is_ok());
    }

    #[test]
    fn test_oversize_file_is_payload_too_large() {
        let (exts, types) = policy();
        let validator = UploadValidator::new(10, &exts, &types);
        let err = validator.validate_all("a.png", "image/png", 11).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge { size: 11, max: 10 }));
    }

    #[test]
    fn test_disallowed_content_type_is_unsupported_media() {
        let (exts, types) = policy();
        let validator = UploadValidator::new(1024, &exts, &types);
        let err = validator
            .validate_all("a.exe", "application/x-msdownload", 10)
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMedia { .. }));
    }

    #[test]
    fn test_empty_file_fails_validation() {
        let (exts, types) = policy();
        let validator = UploadValidator::new(1024, &exts, &types);
        assert!(validator.validate_all("a.png", "image/png", 0).is_err());
    }

    #[test]
    fn test_content_type_check_is_case_insensitive() {
        let (exts, types) = policy();
        let validator = UploadValidator::new(1024, &exts, &types);
        assert!(validator.validate_content_type("IMAGE/PNG").is_ok());
    }

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("a b?.png"), "a_b_.png");
        assert_eq!(sanitize_filename("사업자등록증.pdf"), "사업자등록증.pdf");
        assert_eq!(sanitize_filename("///"), "upload");
    }
}
