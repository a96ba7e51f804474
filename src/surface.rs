// src/surface.rs

//! The display surface seam and the input channel feeding the scheduler.
//!
//! Window systems live outside this crate. A `DisplaySurface` only has to
//! report its size in pixels and accept finished frames. Input arrives the
//! other way, through an mpsc channel of `InputEvent`s that the scheduler
//! drains once per tick.

use crate::error::{GridError, Result};
use crate::keys::{KeySymbol, Modifiers};
use crate::rasterizer::PixelImage;
use log::{trace, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait DisplaySurface: Send {
    /// Current drawable size in pixels, width then height.
    fn pixel_size(&self) -> (usize, usize);

    /// Shows a finished frame.
    fn present(&mut self, image: PixelImage) -> Result<()>;
}

/// Input delivered to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A pointer click at pixel coordinates relative to the surface.
    Pointer { x_px: usize, y_px: usize },
    /// A key press. The scheduler attaches the last pointer location.
    Key {
        symbol: KeySymbol,
        modifiers: Modifiers,
    },
}

/// Producer side of the input channel. Cheap to clone and send across threads.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

/// Creates a connected input sender and receiver.
pub fn input_channel() -> (InputSender, Receiver<InputEvent>) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, rx)
}

impl InputSender {
    /// Queues an event.
    ///
    /// # Errors
    /// `GridError::Surface` once the scheduler has dropped its receiver.
    pub fn send(&self, event: InputEvent) -> Result<()> {
        trace!("InputSender: queueing {:?}", event);
        self.tx.send(event).map_err(|err| {
            warn!("InputSender: scheduler is gone, dropping {:?}", err.0);
            GridError::Surface("input channel closed".to_string())
        })
    }

    pub fn click(&self, x_px: usize, y_px: usize) -> Result<()> {
        self.send(InputEvent::Pointer { x_px, y_px })
    }

    pub fn key(&self, symbol: KeySymbol, modifiers: Modifiers) -> Result<()> {
        self.send(InputEvent::Key { symbol, modifiers })
    }
}

#[derive(Debug, Default)]
struct HeadlessState {
    width_px: usize,
    height_px: usize,
    frames: usize,
    last_frame: Option<PixelImage>,
}

/// An in-memory surface that records presented frames.
///
/// Clones share state, so a test or driver thread can resize the surface and
/// inspect frames while the scheduler owns another clone.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    pub fn new(width_px: usize, height_px: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                width_px,
                height_px,
                ..HeadlessState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Changes the size reported to the scheduler.
    pub fn set_pixel_size(&self, width_px: usize, height_px: usize) {
        let mut state = self.lock();
        state.width_px = width_px;
        state.height_px = height_px;
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.lock().frames
    }

    pub fn last_frame(&self) -> Option<PixelImage> {
        self.lock().last_frame.clone()
    }
}

impl DisplaySurface for HeadlessSurface {
    fn pixel_size(&self) -> (usize, usize) {
        let state = self.lock();
        (state.width_px, state.height_px)
    }

    fn present(&mut self, image: PixelImage) -> Result<()> {
        let mut state = self.lock();
        state.frames += 1;
        trace!(
            "HeadlessSurface: frame {} ({}x{})",
            state.frames,
            image.width(),
            image.height()
        );
        state.last_frame = Some(image);
        Ok(())
    }
}
