//! Face-landmarker detection payloads.
//!
//! The wire shape mirrors the landmarker's camelCase JSON output. Every field
//! defaults, so a partial or unexpected payload degrades to "no face detected"
//! instead of failing to parse.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Blendshape category name for left-mouth-smile confidence.
pub const MOUTH_SMILE_LEFT: &str = "mouthSmileLeft";

/// Blendshape category name for right-mouth-smile confidence.
pub const MOUTH_SMILE_RIGHT: &str = "mouthSmileRight";

/// A single named blendshape confidence reported for a face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlendshapeCategory {
    /// Category name, matched by exact string identity
    #[serde(default)]
    pub category_name: String,

    /// Confidence in [0,1]
    #[serde(default)]
    pub score: f32,
}

impl BlendshapeCategory {
    pub fn new(category_name: impl Into<String>, score: f32) -> Self {
        Self {
            category_name: category_name.into(),
            score,
        }
    }
}

/// Blendshape categories for one detected face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceBlendshapes {
    /// Named confidence scores for this face
    #[serde(default)]
    pub categories: Vec<BlendshapeCategory>,
}

/// One frame's detection output: zero or more faces with blendshapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Detected faces, primary face first
    #[serde(default)]
    pub face_blendshapes: Vec<FaceBlendshapes>,
}

impl DetectionResult {
    /// Result with no detected face.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result with a single face carrying the given categories.
    pub fn single_face(categories: Vec<BlendshapeCategory>) -> Self {
        Self {
            face_blendshapes: vec![FaceBlendshapes { categories }],
        }
    }

    /// Result with a single face carrying the two mouth-smile categories.
    pub fn smile(left: f32, right: f32) -> Self {
        Self::single_face(vec![
            BlendshapeCategory::new(MOUTH_SMILE_LEFT, left),
            BlendshapeCategory::new(MOUTH_SMILE_RIGHT, right),
        ])
    }
}
