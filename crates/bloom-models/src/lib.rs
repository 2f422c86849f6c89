//! Shared data models for the smile-driven bloom controller.
//!
//! This crate provides Serde-serializable types for:
//! - Face-landmarker detection payloads (parsed defensively)
//! - Smile readings and the bloom level integrator
//! - Lifecycle phases and status snapshots
//! - Pure visual projection of the bloom level

pub mod bloom;
pub mod frame;
pub mod smile;
pub mod status;
pub mod visual;

// Re-export common types
pub use bloom::{BloomState, BLOOM_DECAY, BLOOM_RISE};
pub use frame::{
    BlendshapeCategory, DetectionResult, FaceBlendshapes, MOUTH_SMILE_LEFT, MOUTH_SMILE_RIGHT,
};
pub use smile::{extract_smile, SmileReading, SMILE_THRESHOLD};
pub use status::{LifecyclePhase, StatusSnapshot};
pub use visual::BloomVisual;
