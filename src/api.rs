//! Client for the remote analysis service.

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{AnalysisResult, CapturedImage, HistoryEntry};

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// The two operations the controller needs from the analysis service.
#[allow(async_fn_in_trait)]
pub trait AnalysisApi {
    /// `POST {base}/analyze` with the image as a multipart file part.
    async fn analyze(&self, image: CapturedImage) -> Result<AnalysisResult, ClientError>;

    /// `GET {base}/history`.
    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
}

pub struct HttpAnalysisApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpAnalysisApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reject non-2xx statuses, then decode the JSON body.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl AnalysisApi for HttpAnalysisApi {
    async fn analyze(&self, image: CapturedImage) -> Result<AnalysisResult, ClientError> {
        let url = self.config.endpoint("analyze");
        info!(
            "Submitting {} ({} bytes, {}) to {}",
            image.file_name,
            image.bytes.len(),
            image.mime_type,
            url
        );

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let result: AnalysisResult = Self::decode(response).await?;

        info!(
            "Analysis complete: {} ({:.2}, {})",
            result.waste_type, result.confidence, result.category
        );
        Ok(result)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let url = self.config.endpoint("history");
        debug!("Fetching history from {}", url);

        let response = self.client.get(&url).send().await?;
        let entries: Vec<HistoryEntry> = Self::decode(response).await?;

        debug!("Loaded {} history entries", entries.len());
        Ok(entries)
    }
}
