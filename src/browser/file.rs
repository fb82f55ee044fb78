use js_sys::{ArrayBuffer, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File};

use crate::controller::UploadFile;
use crate::error::ClientError;
use crate::types::CapturedImage;

/// Read a blob's full contents.
pub async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, ClientError> {
    let array_buffer: ArrayBuffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(|e| ClientError::Read(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| ClientError::Read("Failed to convert to ArrayBuffer".to_string()))?;

    Ok(Uint8Array::new(&array_buffer).to_vec())
}

impl UploadFile for File {
    fn declared_type(&self) -> String {
        Blob::type_(self)
    }

    fn byte_len(&self) -> u64 {
        Blob::size(self) as u64
    }

    async fn read(self) -> Result<CapturedImage, ClientError> {
        let bytes = blob_bytes(&self).await?;
        Ok(CapturedImage::new(bytes, self.type_(), self.name()))
    }
}
