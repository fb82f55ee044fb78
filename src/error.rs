use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Display text is shown to the user verbatim.
    #[error("Please upload a valid image file (JPEG, PNG, GIF)")]
    UnsupportedType(String),

    #[error("File size must be less than 16MB")]
    TooLarge(u64),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Failed to read image: {0}")]
    Read(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis service returned status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}
