//! Controller lifecycle status.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::smile::SmileReading;

/// Coarse controller phase.
///
/// Normal progression is `Idle → Initializing → Running → Stopped`. `Error`
/// is reached from `Initializing` or `Running` and is terminal for the
/// session; recovery requires a fresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Idle,
    Initializing,
    Running,
    Stopped,
    Error,
}

impl LifecyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecyclePhase::Idle => "idle",
            LifecyclePhase::Initializing => "initializing",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Stopped => "stopped",
            LifecyclePhase::Error => "error",
        }
    }

    /// Whether the session can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecyclePhase::Stopped | LifecyclePhase::Error)
    }
}

/// Everything the rendering layer may read, published once per frame and on
/// every phase change.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusSnapshot {
    /// Controller session this snapshot belongs to
    pub session_id: Uuid,

    /// Current lifecycle phase
    pub phase: LifecyclePhase,

    /// Fixed user-facing message, set once when the phase becomes `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Latest smile reading
    pub smile: SmileReading,

    /// Current bloom level in [0,1]
    pub bloom: f64,

    /// Frames processed so far in this session
    pub frames: u64,

    /// When this snapshot was produced
    pub updated_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Initial snapshot for a freshly created controller.
    pub fn idle(session_id: Uuid) -> Self {
        Self {
            session_id,
            phase: LifecyclePhase::Idle,
            error: None,
            smile: SmileReading::default(),
            bloom: 0.0,
            frames: 0,
            updated_at: Utc::now(),
        }
    }

    /// One-line status text for minimal UI display.
    pub fn status_line(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }

        match self.phase {
            LifecyclePhase::Idle | LifecyclePhase::Initializing => "Requesting camera...".to_string(),
            LifecyclePhase::Running => {
                format!("Smile meter: {:.0}%", self.smile.score * 100.0)
            }
            LifecyclePhase::Stopped => "Stopped".to_string(),
            LifecyclePhase::Error => "Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&LifecyclePhase::Initializing).unwrap();
        assert_eq!(json, "\"initializing\"");
    }

    #[test]
    fn test_terminal_phases() {
        assert!(LifecyclePhase::Stopped.is_terminal());
        assert!(LifecyclePhase::Error.is_terminal());
        assert!(!LifecyclePhase::Running.is_terminal());
    }

    #[test]
    fn test_idle_snapshot() {
        let snapshot = StatusSnapshot::idle(Uuid::new_v4());
        assert_eq!(snapshot.phase, LifecyclePhase::Idle);
        assert_eq!(snapshot.bloom, 0.0);
        assert_eq!(snapshot.frames, 0);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_status_line_prefers_error_message() {
        let mut snapshot = StatusSnapshot::idle(Uuid::new_v4());
        snapshot.phase = LifecyclePhase::Error;
        snapshot.error = Some("Camera access is required".to_string());
        assert_eq!(snapshot.status_line(), "Camera access is required");
    }

    #[test]
    fn test_error_field_skipped_when_absent() {
        let snapshot = StatusSnapshot::idle(Uuid::new_v4());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("\"error\""));
    }
}
