//! Controller configuration.

use bloom_detector::DEFAULT_MODEL_ASSET_URL;

/// Controller configuration.
///
/// The smile threshold and bloom rates are contract constants in
/// `bloom-models`, not configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Target display refresh rate driving the detection loop
    pub target_fps: u32,
    /// Where to fetch the face-landmarker model asset from
    pub model_asset_url: String,
    /// Which camera to request ("user" = front-facing)
    pub facing_mode: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            model_asset_url: DEFAULT_MODEL_ASSET_URL.to_string(),
            facing_mode: "user".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            target_fps: std::env::var("BLOOM_TARGET_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            model_asset_url: std::env::var("BLOOM_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_MODEL_ASSET_URL.to_string()),
            facing_mode: std::env::var("BLOOM_FACING_MODE")
                .unwrap_or_else(|_| "user".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.facing_mode, "user");
        assert_eq!(config.model_asset_url, DEFAULT_MODEL_ASSET_URL);
    }
}
