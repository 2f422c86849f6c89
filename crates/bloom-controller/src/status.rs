//! Status publication.

use chrono::Utc;
use tokio::sync::watch;

use bloom_models::{LifecyclePhase, SmileReading, StatusSnapshot};

/// Fixed user-facing message for a model-load failure.
pub const MODEL_LOAD_MESSAGE: &str = "Could not load the face detector";

/// Fixed user-facing message for a camera acquisition failure.
pub const CAMERA_MESSAGE: &str = "Camera access is required";

/// Publishes status snapshots to the rendering boundary.
///
/// Single writer: only the session task holds one.
pub(crate) struct StatusPublisher {
    tx: watch::Sender<StatusSnapshot>,
}

impl StatusPublisher {
    pub(crate) fn new(tx: watch::Sender<StatusSnapshot>) -> Self {
        Self { tx }
    }

    /// Record a phase transition.
    pub(crate) fn phase(&self, phase: LifecyclePhase) {
        self.tx.send_modify(|snapshot| {
            snapshot.phase = phase;
            snapshot.updated_at = Utc::now();
        });
    }

    /// Enter the terminal error phase with its fixed message.
    pub(crate) fn error(&self, message: &str) {
        self.tx.send_modify(|snapshot| {
            snapshot.phase = LifecyclePhase::Error;
            snapshot.error = Some(message.to_string());
            snapshot.updated_at = Utc::now();
        });
    }

    /// Publish one processed frame.
    pub(crate) fn frame(&self, smile: SmileReading, bloom: f64) {
        self.tx.send_modify(|snapshot| {
            snapshot.smile = smile;
            snapshot.bloom = bloom;
            snapshot.frames += 1;
            snapshot.updated_at = Utc::now();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn publisher() -> (StatusPublisher, watch::Receiver<StatusSnapshot>) {
        let (tx, rx) = watch::channel(StatusSnapshot::idle(Uuid::new_v4()));
        (StatusPublisher::new(tx), rx)
    }

    #[test]
    fn test_phase_transition() {
        let (publisher, rx) = publisher();
        publisher.phase(LifecyclePhase::Initializing);
        assert_eq!(rx.borrow().phase, LifecyclePhase::Initializing);
        assert!(rx.borrow().error.is_none());
    }

    #[test]
    fn test_error_sets_phase_and_message() {
        let (publisher, rx) = publisher();
        publisher.error(CAMERA_MESSAGE);
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.phase, LifecyclePhase::Error);
        assert_eq!(snapshot.error.as_deref(), Some(CAMERA_MESSAGE));
    }

    #[test]
    fn test_frame_updates_counters() {
        let (publisher, rx) = publisher();
        publisher.phase(LifecyclePhase::Running);
        publisher.frame(SmileReading::from_score(0.6), 0.03);
        publisher.frame(SmileReading::from_score(0.2), 0.005);

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.frames, 2);
        assert!((snapshot.bloom - 0.005).abs() < 1e-9);
        assert!(!snapshot.smile.is_smiling);
    }
}
