//! Live camera frame source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::capture_loop::{run_capture_loop, CaptureCommand};
use super::device::{list_devices, select_device};
use super::types::{CameraError, CameraSettings, Frame};
use crate::pipeline::{FrameSource, SourceStatus};

/// A camera streaming on a background thread.
///
/// The thread keeps only the latest decoded frame. [`CameraCapture::open`]
/// checks the device exists, [`CameraCapture::start`] opens the stream, and
/// the render pipeline reads frames through [`FrameSource`].
pub struct CameraCapture {
    latest: Arc<Mutex<Option<Frame>>>,
    worker: Option<JoinHandle<()>>,
    command_tx: Option<Sender<CaptureCommand>>,
    stop_signal: Arc<AtomicBool>,
    settings: CameraSettings,
    /// Set once the stream reported open
    started: bool,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("device", &self.settings.device_index)
            .field("started", &self.started)
            .field("streaming", &self.is_streaming())
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Resolve the configured device without opening its stream.
    ///
    /// # Errors
    /// * `CameraError::NoDevices` - the system has no cameras at all
    /// * `CameraError::DeviceNotFound` - no camera has the configured index
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        let device = select_device(&devices, settings.device_index)?;
        log::info!("Using camera {}", device);

        Ok(Self {
            latest: Arc::new(Mutex::new(None)),
            worker: None,
            command_tx: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            settings,
            started: false,
        })
    }

    /// Open the stream on a background thread.
    ///
    /// Blocks until the thread reports the stream open or failed. The camera
    /// itself is created on that thread, since nokhwa handles are not `Send`
    /// on every backend.
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.is_streaming() {
            return Err(CameraError::AlreadyRunning);
        }
        self.stop_signal.store(false, Ordering::SeqCst);

        let (command_tx, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let latest = Arc::clone(&self.latest);
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();

        self.command_tx = Some(command_tx);
        self.worker = Some(std::thread::spawn(move || {
            run_capture_loop(settings, latest, stop, command_rx, ready_tx);
        }));

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.started = true;
                Ok(())
            }
            Ok(Err(e)) => {
                self.join_worker();
                Err(e)
            }
            Err(_) => {
                self.join_worker();
                Err(CameraError::StreamFailed(
                    "capture thread exited before opening the stream".to_string(),
                ))
            }
        }
    }

    /// Stop the stream and wait for the thread to exit.
    pub fn stop(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(CaptureCommand::Stop);
        }
        self.join_worker();
    }

    fn join_worker(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn is_streaming(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl FrameSource for CameraCapture {
    fn status(&self) -> SourceStatus {
        if !self.started {
            return SourceStatus::NotReady;
        }
        if !self.is_streaming() {
            return SourceStatus::Ended;
        }
        match self.latest.lock() {
            Ok(frame) if frame.is_some() => SourceStatus::Ready,
            Ok(_) => SourceStatus::NotReady,
            // Poisoned: the capture thread panicked
            Err(_) => SourceStatus::Ended,
        }
    }

    fn current_frame(&self) -> Option<Frame> {
        self.latest.lock().ok()?.clone()
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
