//! Acceptance rules for uploaded images.

use crate::error::ClientError;

/// Largest accepted upload: 16 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Image formats the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }
}

/// Check a candidate upload against its declared MIME type and size.
/// Type is checked first.
pub fn validate_upload(mime: &str, size: u64) -> Result<ImageFormat, ClientError> {
    let format =
        ImageFormat::from_mime(mime).ok_or_else(|| ClientError::UnsupportedType(mime.to_string()))?;

    if size > MAX_UPLOAD_BYTES {
        return Err(ClientError::TooLarge(size));
    }

    Ok(format)
}
