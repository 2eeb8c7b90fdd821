//! Frame source abstraction consumed by the render pipeline.

use crate::camera::Frame;

/// Readiness of a frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// No decoded frame available yet
    NotReady,
    /// Frames are available on demand
    Ready,
    /// The source stopped for good (stream ended, device lost)
    Ended,
}

/// Something that can hand out the current decoded video frame.
pub trait FrameSource {
    fn status(&self) -> SourceStatus;

    /// The most recent frame, if any.
    fn current_frame(&self) -> Option<Frame>;
}

impl<S: FrameSource + ?Sized> FrameSource for &S {
    fn status(&self) -> SourceStatus {
        (**self).status()
    }

    fn current_frame(&self) -> Option<Frame> {
        (**self).current_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn status(&self) -> SourceStatus {
        (**self).status()
    }

    fn current_frame(&self) -> Option<Frame> {
        (**self).current_frame()
    }
}
