//! Landmarker and camera configuration.

/// Default location of the face-landmarker model asset.
pub const DEFAULT_MODEL_ASSET_URL: &str =
    "https://storage.googleapis.com/mediapipe-models/face_landmarker/face_landmarker/float16/1/face_landmarker.task";

/// Inference mode the landmarker is constructed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunningMode {
    /// Single still images
    Image,
    /// Continuous video frames with monotonically increasing timestamps
    #[default]
    Video,
}

/// Options for loading a face landmarker.
#[derive(Debug, Clone)]
pub struct LandmarkerOptions {
    /// Where to fetch the model asset from
    pub model_asset_url: String,

    /// Maximum faces to detect per frame
    pub num_faces: u32,

    /// Whether to emit blendshape categories alongside landmarks
    pub output_blendshapes: bool,

    /// Inference mode
    pub running_mode: RunningMode,
}

impl Default for LandmarkerOptions {
    fn default() -> Self {
        Self {
            model_asset_url: DEFAULT_MODEL_ASSET_URL.to_string(),
            num_faces: 1,
            output_blendshapes: true,
            running_mode: RunningMode::Video,
        }
    }
}

impl LandmarkerOptions {
    /// Default options with a custom model asset location.
    pub fn with_model_url(model_asset_url: impl Into<String>) -> Self {
        Self {
            model_asset_url: model_asset_url.into(),
            ..Self::default()
        }
    }
}

/// Constraints for requesting a camera stream.
#[derive(Debug, Clone)]
pub struct CameraConstraints {
    /// Which camera to prefer ("user" = front-facing)
    pub facing_mode: String,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing_mode: "user".to_string(),
        }
    }
}

impl CameraConstraints {
    pub fn new(facing_mode: impl Into<String>) -> Self {
        Self {
            facing_mode: facing_mode.into(),
        }
    }
}
