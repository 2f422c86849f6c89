//! Smile-driven bloom controller.
//!
//! This crate provides:
//! - Resource lifecycle management for the camera stream and face landmarker
//! - The per-frame detection loop feeding the bloom integrator
//! - Status publication for the rendering boundary
//! - Graceful, race-safe teardown

pub mod config;
pub mod controller;
pub mod detection;
pub mod error;
pub mod status;

pub use config::ControllerConfig;
pub use controller::BloomController;
pub use error::{ControllerError, ControllerResult};
pub use status::{CAMERA_MESSAGE, MODEL_LOAD_MESSAGE};
