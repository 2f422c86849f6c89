//! Smile scoring.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frame::{DetectionResult, MOUTH_SMILE_LEFT, MOUTH_SMILE_RIGHT};

/// A reading is smiling only when its score is strictly above this.
pub const SMILE_THRESHOLD: f32 = 0.45;

/// Smile decision for one processed frame.
///
/// `Default` is the fail-safe reading: no face, not smiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SmileReading {
    /// Mean of the left/right mouth-smile confidences, in [0,1]
    pub score: f32,

    /// Whether `score` exceeds [`SMILE_THRESHOLD`]
    pub is_smiling: bool,
}

impl SmileReading {
    /// Build a reading from a raw score, applying the threshold.
    pub fn from_score(score: f32) -> Self {
        Self {
            score,
            is_smiling: score > SMILE_THRESHOLD,
        }
    }
}

/// Extract the smile reading from one frame's detection output.
///
/// Only the first detected face is considered. Missing categories score 0;
/// duplicate category names keep the last occurrence.
pub fn extract_smile(result: &DetectionResult) -> SmileReading {
    let Some(face) = result.face_blendshapes.first() else {
        return SmileReading::default();
    };

    let mut scores: HashMap<&str, f32> = HashMap::with_capacity(face.categories.len());
    for category in &face.categories {
        scores.insert(category.category_name.as_str(), category.score);
    }

    let left = scores.get(MOUTH_SMILE_LEFT).copied().unwrap_or(0.0);
    let right = scores.get(MOUTH_SMILE_RIGHT).copied().unwrap_or(0.0);

    SmileReading::from_score((left + right) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::BlendshapeCategory;

    #[test]
    fn test_no_faces_is_zero_reading() {
        let reading = extract_smile(&DetectionResult::empty());
        assert_eq!(reading, SmileReading::default());
    }

    #[test]
    fn test_empty_categories_is_zero_reading() {
        let result = DetectionResult::single_face(vec![]);
        let reading = extract_smile(&result);
        assert_eq!(reading.score, 0.0);
        assert!(!reading.is_smiling);
    }

    #[test]
    fn test_missing_right_category_halves_score() {
        let result =
            DetectionResult::single_face(vec![BlendshapeCategory::new(MOUTH_SMILE_LEFT, 0.8)]);
        let reading = extract_smile(&result);
        assert!((reading.score - 0.4).abs() < 1e-6);
        assert!(!reading.is_smiling);
    }

    #[test]
    fn test_mean_of_both_categories() {
        let reading = extract_smile(&DetectionResult::smile(0.5, 0.5));
        assert!((reading.score - 0.5).abs() < 1e-6);
        assert!(reading.is_smiling);
    }

    #[test]
    fn test_threshold_is_strict() {
        let reading = SmileReading::from_score(0.45);
        assert!(!reading.is_smiling);

        let reading = SmileReading::from_score(0.450001);
        assert!(reading.is_smiling);
    }

    #[test]
    fn test_first_face_only() {
        let mut result = DetectionResult::smile(0.9, 0.9);
        result
            .face_blendshapes
            .push(DetectionResult::smile(0.0, 0.0).face_blendshapes.remove(0));

        let reading = extract_smile(&result);
        assert!(reading.is_smiling);
    }

    #[test]
    fn test_duplicate_category_last_write_wins() {
        let result = DetectionResult::single_face(vec![
            BlendshapeCategory::new(MOUTH_SMILE_LEFT, 0.9),
            BlendshapeCategory::new(MOUTH_SMILE_LEFT, 0.1),
            BlendshapeCategory::new(MOUTH_SMILE_RIGHT, 0.1),
        ]);
        let reading = extract_smile(&result);
        assert!((reading.score - 0.1).abs() < 1e-6);
    }
}
