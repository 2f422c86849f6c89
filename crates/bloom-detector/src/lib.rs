//! Service boundary for the bloom controller's external collaborators.
//!
//! This crate provides:
//! - Traits for the camera, face-landmarker, and frame-scheduling services
//! - The detector error taxonomy
//! - Landmarker and camera configuration
//! - A scripted synthetic backend for demos and tests

pub mod error;
pub mod options;
pub mod scheduler;
pub mod synthetic;
pub mod traits;

pub use error::{DetectorError, DetectorResult};
pub use options::{CameraConstraints, LandmarkerOptions, RunningMode, DEFAULT_MODEL_ASSET_URL};
pub use scheduler::RefreshScheduler;
pub use synthetic::{
    SmileScript, SyntheticCamera, SyntheticLandmarker, SyntheticLoader, SyntheticStream,
};
pub use traits::{
    CameraStream, FaceLandmarker, FrameScheduler, LandmarkerLoader, VideoFrame, VideoSource,
};
