//! Rear camera capture through `getUserMedia`.

use leptos::html::{Canvas, Video};
use leptos::prelude::*;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, HtmlCanvasElement, MediaStream, MediaStreamConstraints,
};

use crate::browser::file::blob_bytes;
use crate::browser::stream::StreamSlot;
use crate::controller::Camera;
use crate::error::ClientError;
use crate::types::CapturedImage;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoConstraints {
    facing_mode: &'static str,
}

/// Owns the live stream between `start` and `stop`.
pub struct BrowserCamera {
    video: NodeRef<Video>,
    canvas: NodeRef<Canvas>,
    stream: StreamSlot<MediaStream>,
}

impl BrowserCamera {
    pub fn new(video: NodeRef<Video>, canvas: NodeRef<Canvas>) -> Self {
        Self {
            video,
            canvas,
            stream: StreamSlot::new(),
        }
    }
}

fn js_error(e: JsValue) -> ClientError {
    ClientError::Camera(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl Camera for BrowserCamera {
    async fn start(&self) -> Result<(), ClientError> {
        let media_devices = window()
            .navigator()
            .media_devices()
            .map_err(|_| ClientError::Camera("Media devices are not available".to_string()))?;

        let video_constraints = serde_wasm_bindgen::to_value(&VideoConstraints {
            facing_mode: "environment",
        })
        .map_err(|e| ClientError::Camera(e.to_string()))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);

        let promise = media_devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_error)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ClientError::Camera("getUserMedia did not return a stream".to_string()))?;

        self.stream.install(stream, |stream| {
            let video = self
                .video
                .get_untracked()
                .ok_or_else(|| ClientError::Camera("Preview element is not mounted".to_string()))?;
            video.set_src_object(Some(stream));
            Ok(())
        })
    }

    async fn snapshot(&self) -> Result<CapturedImage, ClientError> {
        if !self.stream.is_active() {
            return Err(ClientError::Camera("Camera is not running".to_string()));
        }
        let video = self
            .video
            .get_untracked()
            .ok_or_else(|| ClientError::Camera("Preview element is not mounted".to_string()))?;
        let canvas = self
            .canvas
            .get_untracked()
            .ok_or_else(|| ClientError::Camera("Capture canvas is not mounted".to_string()))?;

        canvas.set_width(video.video_width());
        canvas.set_height(video.video_height());

        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| ClientError::Camera("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ClientError::Camera("2d context has unexpected type".to_string()))?;
        ctx.draw_image_with_html_video_element(&video, 0.0, 0.0)
            .map_err(js_error)?;

        let blob = canvas_to_blob(&canvas, "image/jpeg").await?;
        let bytes = blob_bytes(&blob).await?;
        Ok(CapturedImage::camera_snapshot(bytes))
    }

    fn stop(&self) {
        if self.stream.release() {
            debug!("Camera stream stopped");
        }
        if let Some(video) = self.video.get_untracked() {
            video.set_src_object(None);
        }
    }
}

/// Await `canvas.toBlob(cb, mime)`.
async fn canvas_to_blob(canvas: &HtmlCanvasElement, mime: &str) -> Result<Blob, ClientError> {
    let mut outcome: Result<(), JsValue> = Ok(());
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        outcome = canvas.to_blob_with_type(callback.unchecked_ref(), mime);
    });
    outcome.map_err(js_error)?;

    let value = JsFuture::from(promise).await.map_err(js_error)?;
    if value.is_null() || value.is_undefined() {
        return Err(ClientError::Camera("Canvas produced no image".to_string()));
    }
    value
        .dyn_into::<Blob>()
        .map_err(|_| ClientError::Camera("toBlob returned a non-Blob value".to_string()))
}
