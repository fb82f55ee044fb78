//! The client controller: mediates between input sources, the analysis
//! service, and whatever renders the page.
//!
//! Every public operation is an independent async task. Nothing serializes
//! overlapping analyses, so the response that resolves last is the one left on
//! screen.

use std::rc::Rc;

use tracing::{error, info, warn};

use crate::api::AnalysisApi;
use crate::error::ClientError;
use crate::types::CapturedImage;
use crate::validation::validate_upload;
use crate::view::{HistoryView, ResultView};

pub const CAMERA_ALERT: &str = "Unable to access camera. Please check permissions.";
pub const ANALYZE_ALERT: &str = "Error analyzing image. Please try again.";

/// Presentation side effects, driven with plain data.
pub trait Renderer {
    fn set_loading(&self, loading: bool);
    fn show_preview(&self, visible: bool);
    fn show_result(&self, result: ResultView);
    fn show_history(&self, history: HistoryView);
    /// Blocking, user-visible message.
    fn alert(&self, message: &str);
}

/// A rear-facing camera with a live preview.
#[allow(async_fn_in_trait)]
pub trait Camera {
    async fn start(&self) -> Result<(), ClientError>;
    /// Grab the current preview frame as a JPEG.
    async fn snapshot(&self) -> Result<CapturedImage, ClientError>;
    /// Stop every track of the active stream, if any.
    fn stop(&self);
}

/// A user-chosen file that has not been read yet.
#[allow(async_fn_in_trait)]
pub trait UploadFile {
    fn declared_type(&self) -> String;
    fn byte_len(&self) -> u64;
    async fn read(self) -> Result<CapturedImage, ClientError>;
}

pub struct Controller<A, C, R> {
    api: Rc<A>,
    camera: Rc<C>,
    renderer: Rc<R>,
}

impl<A, C, R> Clone for Controller<A, C, R> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            camera: Rc::clone(&self.camera),
            renderer: Rc::clone(&self.renderer),
        }
    }
}

impl<A, C, R> Controller<A, C, R>
where
    A: AnalysisApi,
    C: Camera,
    R: Renderer,
{
    pub fn new(api: A, camera: C, renderer: R) -> Self {
        Self {
            api: Rc::new(api),
            camera: Rc::new(camera),
            renderer: Rc::new(renderer),
        }
    }

    /// Validate a picked or dropped file and analyze it.
    /// Rejected files are never read or sent.
    pub async fn ingest_file<F: UploadFile>(&self, file: F) {
        if let Err(e) = validate_upload(&file.declared_type(), file.byte_len()) {
            warn!("Rejected upload: {:?}", e);
            self.renderer.alert(&e.to_string());
            return;
        }

        match file.read().await {
            Ok(image) => self.analyze(image).await,
            Err(e) => {
                error!("Failed to read upload: {}", e);
                self.renderer.alert(&e.to_string());
            }
        }
    }

    pub async fn start_camera(&self) {
        match self.camera.start().await {
            Ok(()) => {
                info!("Camera stream started");
                self.renderer.show_preview(true);
            }
            Err(e) => {
                error!("Error accessing camera: {}", e);
                self.renderer.alert(CAMERA_ALERT);
            }
        }
    }

    /// Snapshot the preview, release the camera, then analyze the frame.
    /// The stream is released even if the snapshot fails.
    pub async fn capture_frame(&self) {
        let snapshot = self.camera.snapshot().await;
        self.camera.stop();
        self.renderer.show_preview(false);

        match snapshot {
            Ok(image) => self.analyze(image).await,
            Err(e) => {
                error!("Failed to capture frame: {}", e);
                self.renderer.alert(CAMERA_ALERT);
            }
        }
    }

    /// Submit an image. On failure the previous result stays on screen.
    pub async fn analyze(&self, image: CapturedImage) {
        self.renderer.set_loading(true);
        let outcome = self.api.analyze(image).await;
        self.renderer.set_loading(false);

        match outcome {
            Ok(result) => {
                self.renderer.show_result(ResultView::from_result(&result));
                self.load_history().await;
            }
            Err(e) => {
                error!("Error analyzing image: {}", e);
                self.renderer.alert(ANALYZE_ALERT);
            }
        }
    }

    /// Refresh the history list. Failures are logged and the old list kept.
    pub async fn load_history(&self) {
        match self.api.history().await {
            Ok(entries) => self.renderer.show_history(HistoryView::from_entries(&entries)),
            Err(e) => warn!("Error loading history: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, VecDeque};

    use crate::types::{AnalysisResult, HistoryEntry};
    use crate::validation::MAX_UPLOAD_BYTES;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Loading(bool),
        Preview(bool),
        Result(ResultView),
        History(HistoryView),
        Alert(String),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        events: RefCell<Vec<Event>>,
    }

    impl RecordingRenderer {
        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        fn alerts(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Alert(msg) => Some(msg),
                    _ => None,
                })
                .collect()
        }

        fn results(&self) -> Vec<ResultView> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Result(view) => Some(view),
                    _ => None,
                })
                .collect()
        }

        fn histories(&self) -> usize {
            self.events()
                .iter()
                .filter(|e| matches!(e, Event::History(_)))
                .count()
        }
    }

    impl Renderer for RecordingRenderer {
        fn set_loading(&self, loading: bool) {
            self.events.borrow_mut().push(Event::Loading(loading));
        }
        fn show_preview(&self, visible: bool) {
            self.events.borrow_mut().push(Event::Preview(visible));
        }
        fn show_result(&self, result: ResultView) {
            self.events.borrow_mut().push(Event::Result(result));
        }
        fn show_history(&self, history: HistoryView) {
            self.events.borrow_mut().push(Event::History(history));
        }
        fn alert(&self, message: &str) {
            self.events.borrow_mut().push(Event::Alert(message.to_string()));
        }
    }

    /// Scripted service. Each analyze call pops `(yields, response)` and
    /// yields to the runtime that many times before answering.
    #[derive(Default)]
    struct FakeApi {
        analyze_script: RefCell<VecDeque<(usize, Result<AnalysisResult, ClientError>)>>,
        history_script: RefCell<VecDeque<Result<Vec<HistoryEntry>, ClientError>>>,
        submitted: RefCell<Vec<CapturedImage>>,
        history_calls: Cell<usize>,
    }

    impl FakeApi {
        fn respond(self, yields: usize, response: Result<AnalysisResult, ClientError>) -> Self {
            self.analyze_script.borrow_mut().push_back((yields, response));
            self
        }

        fn history_response(self, response: Result<Vec<HistoryEntry>, ClientError>) -> Self {
            self.history_script.borrow_mut().push_back(response);
            self
        }
    }

    impl AnalysisApi for FakeApi {
        async fn analyze(&self, image: CapturedImage) -> Result<AnalysisResult, ClientError> {
            self.submitted.borrow_mut().push(image);
            let (yields, response) = self
                .analyze_script
                .borrow_mut()
                .pop_front()
                .expect("unexpected analyze call");
            for _ in 0..yields {
                tokio::task::yield_now().await;
            }
            response
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
            self.history_calls.set(self.history_calls.get() + 1);
            self.history_script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[derive(Default)]
    struct FakeCamera {
        deny: bool,
        broken_snapshot: bool,
        live: Cell<bool>,
        stop_calls: Cell<usize>,
    }

    impl Camera for FakeCamera {
        async fn start(&self) -> Result<(), ClientError> {
            if self.deny {
                return Err(ClientError::Camera("NotAllowedError".to_string()));
            }
            if self.live.get() {
                self.stop();
            }
            self.live.set(true);
            Ok(())
        }

        async fn snapshot(&self) -> Result<CapturedImage, ClientError> {
            if self.broken_snapshot || !self.live.get() {
                return Err(ClientError::Camera("no frame".to_string()));
            }
            Ok(CapturedImage::camera_snapshot(vec![0xFF, 0xD8, 0xFF]))
        }

        fn stop(&self) {
            self.live.set(false);
            self.stop_calls.set(self.stop_calls.get() + 1);
        }
    }

    struct FakeFile {
        mime: &'static str,
        len: u64,
        fail_read: bool,
        reads: Rc<Cell<usize>>,
    }

    impl FakeFile {
        fn new(mime: &'static str, len: u64) -> Self {
            Self {
                mime,
                len,
                fail_read: false,
                reads: Rc::new(Cell::new(0)),
            }
        }
    }

    impl UploadFile for FakeFile {
        fn declared_type(&self) -> String {
            self.mime.to_string()
        }
        fn byte_len(&self) -> u64 {
            self.len
        }
        async fn read(self) -> Result<CapturedImage, ClientError> {
            self.reads.set(self.reads.get() + 1);
            if self.fail_read {
                return Err(ClientError::Read("NotReadableError".to_string()));
            }
            Ok(CapturedImage::new(vec![0u8; 16], self.mime, "photo"))
        }
    }

    type TestController = Controller<FakeApi, FakeCamera, RecordingRenderer>;

    fn controller(api: FakeApi) -> TestController {
        Controller::new(api, FakeCamera::default(), RecordingRenderer::default())
    }

    fn bottle_result() -> AnalysisResult {
        AnalysisResult {
            waste_type: "plastic_bottle".to_string(),
            confidence: 0.87,
            category: "Recyclable".to_string(),
            disposal_guide: "Clean and dry before recycling.".to_string(),
            all_predictions: Some(BTreeMap::from([
                ("plastic_bottle".to_string(), 0.87),
                ("glass".to_string(), 0.10),
                ("metal".to_string(), 0.03),
            ])),
        }
    }

    fn result_of(waste_type: &str, category: &str) -> AnalysisResult {
        AnalysisResult {
            waste_type: waste_type.to_string(),
            confidence: 0.5,
            category: category.to_string(),
            disposal_guide: String::new(),
            all_predictions: None,
        }
    }

    #[tokio::test]
    async fn test_rejected_type_sends_nothing() {
        let c = controller(FakeApi::default());
        let file = FakeFile::new("image/webp", 1024);
        let reads = Rc::clone(&file.reads);

        c.ingest_file(file).await;

        assert!(c.api.submitted.borrow().is_empty());
        assert_eq!(reads.get(), 0, "Rejected file should not be read");
        assert_eq!(
            c.renderer.alerts(),
            vec!["Please upload a valid image file (JPEG, PNG, GIF)".to_string()]
        );
        assert!(!c.renderer.events().contains(&Event::Loading(true)));
    }

    #[tokio::test]
    async fn test_oversized_file_sends_nothing() {
        let c = controller(FakeApi::default());
        c.ingest_file(FakeFile::new("image/png", MAX_UPLOAD_BYTES + 1)).await;

        assert!(c.api.submitted.borrow().is_empty());
        assert_eq!(c.renderer.alerts(), vec!["File size must be less than 16MB".to_string()]);
    }

    #[tokio::test]
    async fn test_unreadable_file_alerts_and_sends_nothing() {
        let c = controller(FakeApi::default());
        let file = FakeFile {
            fail_read: true,
            ..FakeFile::new("image/jpeg", 4096)
        };
        let reads = Rc::clone(&file.reads);

        c.ingest_file(file).await;

        assert_eq!(reads.get(), 1);
        assert!(c.api.submitted.borrow().is_empty());
        assert_eq!(
            c.renderer.alerts(),
            vec!["Failed to read image: NotReadableError".to_string()]
        );
        assert!(!c.renderer.events().contains(&Event::Loading(true)));
        assert_eq!(c.api.history_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_upload_renders_result_and_reloads_history() {
        let history = vec![HistoryEntry {
            waste_type: "plastic_bottle".to_string(),
            confidence: 0.87,
            timestamp: "2024-05-01T12:30:45".to_string(),
        }];
        let api = FakeApi::default()
            .respond(0, Ok(bottle_result()))
            .history_response(Ok(history));
        let c = controller(api);

        c.ingest_file(FakeFile::new("image/jpeg", 2 * 1024 * 1024)).await;

        assert_eq!(c.api.submitted.borrow().len(), 1);
        assert_eq!(c.api.submitted.borrow()[0].mime_type, "image/jpeg");

        let events = c.renderer.events();
        assert_eq!(events[0], Event::Loading(true));
        assert_eq!(events[1], Event::Loading(false));

        let results = c.renderer.results();
        assert_eq!(results.len(), 1);
        let view = &results[0];
        assert_eq!(view.label, "Plastic Bottle");
        assert_eq!(view.confidence_percent, 87);
        assert_eq!(view.category, "Recyclable");
        assert!(!view.show_safety_notice);
        let order: Vec<&str> = view.bars.iter().map(|b| b.waste_type.as_str()).collect();
        assert_eq!(order, vec!["plastic_bottle", "glass", "metal"]);

        assert_eq!(c.api.history_calls.get(), 1);
        match events.last() {
            Some(Event::History(h)) => {
                assert_eq!(h.rows.len(), 1);
                assert_eq!(h.rows[0].label, "Plastic Bottle");
                assert_eq!(h.rows[0].confidence_percent, 87);
            }
            other => panic!("Expected history refresh last, got {:?}", other),
        }
        assert!(c.renderer.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_medical_result_shows_safety_notice() {
        let api = FakeApi::default().respond(0, Ok(result_of("medical_sharps", "Medical Waste")));
        let c = controller(api);

        c.analyze(CapturedImage::new(vec![1], "image/png", "x.png")).await;

        let results = c.renderer.results();
        assert!(results[0].show_safety_notice);
        assert_eq!(results[0].style.css_class(), Some("medical-waste"));
    }

    #[tokio::test]
    async fn test_failed_analyze_keeps_previous_result() {
        let api = FakeApi::default()
            .respond(0, Ok(bottle_result()))
            .respond(0, Err(ClientError::Status(500)));
        let c = controller(api);

        c.analyze(CapturedImage::new(vec![1], "image/png", "a.png")).await;
        let before = c.renderer.events().len();
        c.analyze(CapturedImage::new(vec![2], "image/png", "b.png")).await;

        let after: Vec<Event> = c.renderer.events()[before..].to_vec();
        assert_eq!(
            after,
            vec![
                Event::Loading(true),
                Event::Loading(false),
                Event::Alert(ANALYZE_ALERT.to_string()),
            ]
        );
        assert_eq!(c.renderer.results().len(), 1);
        assert_eq!(c.api.history_calls.get(), 1, "History reloads only after success");
    }

    #[tokio::test]
    async fn test_decode_failure_alerts_and_clears_loading() {
        let api = FakeApi::default().respond(0, Err(ClientError::Decode("expected value".to_string())));
        let c = controller(api);

        c.analyze(CapturedImage::new(vec![1], "image/gif", "a.gif")).await;

        assert_eq!(c.renderer.alerts(), vec![ANALYZE_ALERT.to_string()]);
        assert!(c.renderer.events().contains(&Event::Loading(false)));
        assert!(c.renderer.results().is_empty());
    }

    #[tokio::test]
    async fn test_start_camera_shows_preview() {
        let c = controller(FakeApi::default());
        c.start_camera().await;

        assert!(c.camera.live.get());
        assert_eq!(c.renderer.events(), vec![Event::Preview(true)]);
    }

    #[tokio::test]
    async fn test_camera_denied_alerts_and_keeps_preview_hidden() {
        let camera = FakeCamera {
            deny: true,
            ..FakeCamera::default()
        };
        let c = Controller::new(FakeApi::default(), camera, RecordingRenderer::default());

        c.start_camera().await;

        assert_eq!(c.renderer.events(), vec![Event::Alert(CAMERA_ALERT.to_string())]);
        assert!(!c.camera.live.get());
    }

    #[tokio::test]
    async fn test_restarting_camera_replaces_stream() {
        let c = controller(FakeApi::default());

        c.start_camera().await;
        c.start_camera().await;

        assert!(c.camera.live.get());
        assert_eq!(c.camera.stop_calls.get(), 1, "Earlier stream is released on restart");
        assert_eq!(c.renderer.events(), vec![Event::Preview(true), Event::Preview(true)]);
    }

    #[tokio::test]
    async fn test_capture_releases_camera_even_when_analyze_fails() {
        let api = FakeApi::default().respond(0, Err(ClientError::Status(503)));
        let c = controller(api);

        c.start_camera().await;
        c.capture_frame().await;

        assert!(!c.camera.live.get(), "Stream must be stopped after capture");
        assert_eq!(c.camera.stop_calls.get(), 1);

        let submitted = c.api.submitted.borrow();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].mime_type, "image/jpeg");
        assert_eq!(submitted[0].file_name, "capture.jpg");

        let events = c.renderer.events();
        assert_eq!(events[0], Event::Preview(true));
        assert_eq!(events[1], Event::Preview(false));
        assert_eq!(c.renderer.alerts(), vec![ANALYZE_ALERT.to_string()]);
    }

    #[tokio::test]
    async fn test_capture_snapshot_failure_still_stops_stream() {
        let camera = FakeCamera {
            broken_snapshot: true,
            ..FakeCamera::default()
        };
        let c = Controller::new(FakeApi::default(), camera, RecordingRenderer::default());

        c.start_camera().await;
        c.capture_frame().await;

        assert!(!c.camera.live.get());
        assert!(c.api.submitted.borrow().is_empty());
        assert!(c.renderer.events().contains(&Event::Preview(false)));
        assert_eq!(c.renderer.alerts(), vec![CAMERA_ALERT.to_string()]);
    }

    #[tokio::test]
    async fn test_history_failure_is_silent() {
        let history = vec![HistoryEntry {
            waste_type: "organic".to_string(),
            confidence: 0.6,
            timestamp: "2024-05-01T10:00:00".to_string(),
        }];
        let api = FakeApi::default()
            .history_response(Ok(history))
            .history_response(Err(ClientError::Status(502)));
        let c = controller(api);

        c.load_history().await;
        c.load_history().await;

        assert_eq!(c.api.history_calls.get(), 2);
        assert_eq!(c.renderer.histories(), 1, "Failed load must not replace the list");
        assert!(c.renderer.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_analyses_last_response_wins() {
        // The first request is slow, the second fast: the first one's
        // response lands last and stays on screen.
        let api = FakeApi::default()
            .respond(3, Ok(result_of("recyclable_glass", "Recyclable")))
            .respond(0, Ok(result_of("recyclable_metal", "Recyclable")));
        let c = controller(api);

        let first = c.clone();
        let second = c.clone();
        tokio::join!(
            first.analyze(CapturedImage::new(vec![1], "image/png", "slow.png")),
            second.analyze(CapturedImage::new(vec![2], "image/png", "fast.png")),
        );

        let labels: Vec<String> = c.renderer.results().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Recyclable Metal", "Recyclable Glass"]);
        assert_eq!(c.api.history_calls.get(), 2);
    }
}
