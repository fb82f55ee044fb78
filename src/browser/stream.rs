//! Ownership of the live camera stream.
//!
//! At most one stream is active. Whatever is replaced, rejected or released
//! has its tracks stopped, so the camera light never outlives the preview.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{MediaStream, MediaStreamTrack};

use crate::error::ClientError;

/// Something holding camera tracks that can be stopped.
pub trait TrackSource {
    fn stop_tracks(&self);
}

impl TrackSource for MediaStream {
    fn stop_tracks(&self) {
        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

pub struct StreamSlot<S> {
    active: RefCell<Option<S>>,
}

impl<S: TrackSource> StreamSlot<S> {
    pub fn new() -> Self {
        Self {
            active: RefCell::new(None),
        }
    }

    /// Bind a freshly granted stream with `attach` and make it the active one.
    ///
    /// If `attach` fails the new stream is stopped and the previous one stays
    /// active. Otherwise the previous stream is stopped.
    pub fn install<F>(&self, stream: S, attach: F) -> Result<(), ClientError>
    where
        F: FnOnce(&S) -> Result<(), ClientError>,
    {
        if let Err(e) = attach(&stream) {
            stream.stop_tracks();
            return Err(e);
        }
        if let Some(previous) = self.active.replace(Some(stream)) {
            previous.stop_tracks();
        }
        Ok(())
    }

    /// Stop and drop the active stream. Returns whether there was one.
    pub fn release(&self) -> bool {
        match self.active.borrow_mut().take() {
            Some(stream) => {
                stream.stop_tracks();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.borrow().is_some()
    }
}

impl<S: TrackSource> Default for StreamSlot<S> {
    fn default() -> Self {
        Self::new()
    }
}
