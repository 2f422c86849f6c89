//! Service traits the bloom controller is generic over.
//!
//! All async methods return `Send` futures so a controller session can run
//! inside a spawned task.

use std::future::Future;
use std::time::Duration;

use bloom_models::DetectionResult;

use crate::error::DetectorResult;

/// One video frame handed to the landmarker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrame {
    /// Zero-based frame counter within the stream
    pub index: u64,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,
}

/// A live camera stream, already bound to its presentable sink.
pub trait CameraStream: Send + 'static {
    /// Grab the most recent frame for inference.
    fn grab_frame(&mut self) -> DetectorResult<VideoFrame>;

    /// Stop every track of the stream. Idempotent.
    fn stop(&mut self);
}

/// Camera capture service.
pub trait VideoSource: Send + 'static {
    type Stream: CameraStream;

    /// Request a live stream and bind it to a presentable sink.
    ///
    /// May wait indefinitely on a permission prompt; there is no timeout.
    fn acquire(&self) -> impl Future<Output = DetectorResult<Self::Stream>> + Send;
}

/// A loaded face-landmarker instance.
pub trait FaceLandmarker: Send + 'static {
    /// Run inference on one frame.
    ///
    /// Timestamps must be strictly increasing across calls; the model rejects
    /// non-increasing values. Fails after `close`.
    fn detect(&mut self, frame: &VideoFrame, timestamp: Duration) -> DetectorResult<DetectionResult>;

    /// Release model resources. Idempotent.
    fn close(&mut self);
}

/// Face-landmarker loading service.
pub trait LandmarkerLoader: Send + 'static {
    type Model: FaceLandmarker;

    /// Fetch the model asset and construct an instance.
    fn load(&self) -> impl Future<Output = DetectorResult<Self::Model>> + Send;
}

/// Frame-scheduling service driving the detection loop cadence.
pub trait FrameScheduler: Send + 'static {
    /// Resolve at the next display-refresh opportunity.
    ///
    /// Dropping the returned future cancels the pending request.
    fn next_frame(&mut self) -> impl Future<Output = ()> + Send;
}
