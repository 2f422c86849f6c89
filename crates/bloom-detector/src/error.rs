//! Detector error types.

use std::time::Duration;

use thiserror::Error;

pub type DetectorResult<T> = Result<T, DetectorError>;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("camera access failed: {0}")]
    CameraAccess(String),

    #[error("frame inference failed: {0}")]
    Inference(String),

    #[error("timestamp {got:?} is not after {last:?}")]
    NonMonotonicTimestamp { last: Duration, got: Duration },

    #[error("resource was already released")]
    Released,
}

impl DetectorError {
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    pub fn camera_access(msg: impl Into<String>) -> Self {
        Self::CameraAccess(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Whether this error ends the session.
    ///
    /// Acquisition failures are fatal; anything raised per frame is absorbed
    /// by the detection loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DetectorError::ModelLoad(_) | DetectorError::CameraAccess(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_acquisition_errors_are_fatal() {
        assert!(DetectorError::model_load("asset fetch").is_fatal());
        assert!(DetectorError::camera_access("denied").is_fatal());
        assert!(!DetectorError::inference("bad frame").is_fatal());
        assert!(!DetectorError::Released.is_fatal());
    }
}
