//! Scripted detection backend.
//!
//! Stands in for the real camera and landmarker when none is available, the
//! same role a mock inference path plays in a detector with no model asset
//! configured. Used by the demo binary and the controller tests. Cameras and
//! loaders expose shared release/usage counters so tests can assert teardown
//! behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tracing::debug;

use bloom_models::DetectionResult;

use crate::error::{DetectorError, DetectorResult};
use crate::options::{CameraConstraints, LandmarkerOptions};
use crate::traits::{CameraStream, FaceLandmarker, LandmarkerLoader, VideoFrame, VideoSource};

/// Smile score emitted per frame by a synthetic landmarker.
#[derive(Debug, Clone)]
pub enum SmileScript {
    /// Same score on every frame.
    Constant(f32),
    /// Per-frame scores; frames past the end report no face.
    Sequence(Vec<f32>),
    /// Alternating smiling/neutral bursts of the given lengths.
    Pulse { smile_frames: u64, rest_frames: u64 },
    /// No face in any frame.
    NoFace,
}

impl SmileScript {
    fn result_for(&self, frame_index: u64) -> DetectionResult {
        match self {
            SmileScript::Constant(score) => DetectionResult::smile(*score, *score),
            SmileScript::Sequence(scores) => scores
                .get(frame_index as usize)
                .map(|score| DetectionResult::smile(*score, *score))
                .unwrap_or_else(DetectionResult::empty),
            SmileScript::Pulse {
                smile_frames,
                rest_frames,
            } => {
                let period = (smile_frames + rest_frames).max(1);
                if frame_index % period < *smile_frames {
                    DetectionResult::smile(0.8, 0.8)
                } else {
                    DetectionResult::smile(0.1, 0.1)
                }
            }
            SmileScript::NoFace => DetectionResult::empty(),
        }
    }
}

/// Synthetic camera service.
pub struct SyntheticCamera {
    constraints: CameraConstraints,
    deny_access: bool,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    stop_count: Arc<AtomicU64>,
    frame_count: Arc<AtomicU64>,
}

impl SyntheticCamera {
    /// Camera that grants access immediately.
    pub fn new(constraints: CameraConstraints) -> Self {
        Self {
            constraints,
            deny_access: false,
            gate: Mutex::new(None),
            stop_count: Arc::new(AtomicU64::new(0)),
            frame_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Camera that rejects the permission request.
    pub fn denied() -> Self {
        Self {
            deny_access: true,
            ..Self::new(CameraConstraints::default())
        }
    }

    /// Camera whose acquisition resolves only after the returned sender
    /// fires, like a permission prompt left open.
    pub fn gated() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let mut camera = Self::new(CameraConstraints::default());
        camera.gate = Mutex::new(Some(rx));
        (camera, tx)
    }

    /// Times the acquired stream has been stopped.
    pub fn stop_count(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.stop_count)
    }

    /// Frames grabbed from the acquired stream.
    pub fn frame_count(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.frame_count)
    }
}

impl VideoSource for SyntheticCamera {
    type Stream = SyntheticStream;

    async fn acquire(&self) -> DetectorResult<SyntheticStream> {
        let gate = self.gate.lock().await.take();
        if let Some(gate) = gate {
            // Hold until the test or caller answers the "prompt"
            gate.await.ok();
        }

        if self.deny_access {
            return Err(DetectorError::camera_access("permission denied"));
        }

        debug!(facing_mode = %self.constraints.facing_mode, "camera stream acquired");
        Ok(SyntheticStream {
            next_index: 0,
            live: true,
            stop_count: Arc::clone(&self.stop_count),
            frame_count: Arc::clone(&self.frame_count),
        })
    }
}

/// Live stream produced by [`SyntheticCamera`].
#[derive(Debug)]
pub struct SyntheticStream {
    next_index: u64,
    live: bool,
    stop_count: Arc<AtomicU64>,
    frame_count: Arc<AtomicU64>,
}

impl CameraStream for SyntheticStream {
    fn grab_frame(&mut self) -> DetectorResult<VideoFrame> {
        if !self.live {
            return Err(DetectorError::Released);
        }

        let frame = VideoFrame {
            index: self.next_index,
            width: 640,
            height: 480,
        };
        self.next_index += 1;
        self.frame_count.fetch_add(1, Ordering::Relaxed);
        Ok(frame)
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.stop_count.fetch_add(1, Ordering::Relaxed);
            debug!("camera stream tracks stopped");
        }
    }
}

/// Synthetic landmarker loading service.
pub struct SyntheticLoader {
    options: LandmarkerOptions,
    script: SmileScript,
    fail_load: bool,
    fail_frames: Vec<u64>,
    close_count: Arc<AtomicU64>,
    detect_count: Arc<AtomicU64>,
}

impl SyntheticLoader {
    pub fn new(options: LandmarkerOptions, script: SmileScript) -> Self {
        Self {
            options,
            script,
            fail_load: false,
            fail_frames: Vec::new(),
            close_count: Arc::new(AtomicU64::new(0)),
            detect_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Loader emitting the same smile score on every frame.
    pub fn constant(score: f32) -> Self {
        Self::new(LandmarkerOptions::default(), SmileScript::Constant(score))
    }

    /// Loader whose model asset fetch fails.
    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::constant(0.0)
        }
    }

    /// Inject an inference failure at the given frame indices.
    pub fn fail_on_frames(mut self, frames: Vec<u64>) -> Self {
        self.fail_frames = frames;
        self
    }

    /// Times the loaded model has been closed.
    pub fn close_count(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.close_count)
    }

    /// Successful detect calls across loaded models.
    pub fn detect_count(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.detect_count)
    }
}

impl LandmarkerLoader for SyntheticLoader {
    type Model = SyntheticLandmarker;

    async fn load(&self) -> DetectorResult<SyntheticLandmarker> {
        if self.fail_load {
            return Err(DetectorError::model_load("model asset fetch failed"));
        }

        debug!(
            model_asset_url = %self.options.model_asset_url,
            num_faces = self.options.num_faces,
            "synthetic landmarker loaded"
        );
        Ok(SyntheticLandmarker {
            script: self.script.clone(),
            fail_frames: self.fail_frames.clone(),
            last_timestamp: None,
            closed: false,
            close_count: Arc::clone(&self.close_count),
            detect_count: Arc::clone(&self.detect_count),
        })
    }
}

/// Landmarker produced by [`SyntheticLoader`].
pub struct SyntheticLandmarker {
    script: SmileScript,
    fail_frames: Vec<u64>,
    last_timestamp: Option<Duration>,
    closed: bool,
    close_count: Arc<AtomicU64>,
    detect_count: Arc<AtomicU64>,
}

impl FaceLandmarker for SyntheticLandmarker {
    fn detect(&mut self, frame: &VideoFrame, timestamp: Duration) -> DetectorResult<DetectionResult> {
        if self.closed {
            return Err(DetectorError::Released);
        }

        if let Some(last) = self.last_timestamp {
            if timestamp <= last {
                return Err(DetectorError::NonMonotonicTimestamp {
                    last,
                    got: timestamp,
                });
            }
        }
        self.last_timestamp = Some(timestamp);

        if self.fail_frames.contains(&frame.index) {
            return Err(DetectorError::inference(format!(
                "injected failure at frame {}",
                frame.index
            )));
        }

        self.detect_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.script.result_for(frame.index))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.close_count.fetch_add(1, Ordering::Relaxed);
            debug!("synthetic landmarker released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: u64) -> VideoFrame {
        VideoFrame {
            index,
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn test_detect_rejects_non_increasing_timestamps() {
        let loader = SyntheticLoader::constant(0.5);
        let mut model = tokio_test::block_on(loader.load()).unwrap();

        model.detect(&frame(0), Duration::from_millis(10)).unwrap();

        let err = model.detect(&frame(1), Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, DetectorError::NonMonotonicTimestamp { .. }));

        model.detect(&frame(2), Duration::from_millis(11)).unwrap();
    }

    #[test]
    fn test_detect_after_close_fails() {
        let loader = SyntheticLoader::constant(0.5);
        let mut model = tokio_test::block_on(loader.load()).unwrap();

        model.close();
        model.close();
        assert_eq!(loader.close_count().load(Ordering::Relaxed), 1);

        let err = model.detect(&frame(0), Duration::from_millis(1)).unwrap_err();
        assert!(matches!(err, DetectorError::Released));
    }

    #[test]
    fn test_denied_camera() {
        let camera = SyntheticCamera::denied();
        let err = tokio_test::block_on(camera.acquire()).unwrap_err();
        assert!(matches!(err, DetectorError::CameraAccess(_)));
    }

    #[test]
    fn test_stream_stop_is_idempotent() {
        let camera = SyntheticCamera::new(CameraConstraints::default());
        let mut stream = tokio_test::block_on(camera.acquire()).unwrap();

        stream.grab_frame().unwrap();
        stream.stop();
        stream.stop();

        assert_eq!(camera.stop_count().load(Ordering::Relaxed), 1);
        assert!(matches!(stream.grab_frame(), Err(DetectorError::Released)));
    }

    #[test]
    fn test_sequence_script_runs_out_of_faces() {
        let script = SmileScript::Sequence(vec![0.9, 0.2]);
        assert!(!script.result_for(0).face_blendshapes.is_empty());
        assert!(!script.result_for(1).face_blendshapes.is_empty());
        assert!(script.result_for(2).face_blendshapes.is_empty());
    }

    #[test]
    fn test_pulse_script_alternates() {
        let script = SmileScript::Pulse {
            smile_frames: 2,
            rest_frames: 3,
        };
        let smiling = bloom_models::extract_smile(&script.result_for(0));
        assert!(smiling.is_smiling);
        let resting = bloom_models::extract_smile(&script.result_for(2));
        assert!(!resting.is_smiling);
    }

    #[tokio::test]
    async fn test_gated_camera_waits_for_grant() {
        let (camera, grant) = SyntheticCamera::gated();

        let mut acquire = tokio_test::task::spawn(camera.acquire());

        // Not resolved until the prompt is answered
        tokio_test::assert_pending!(acquire.poll());

        grant.send(()).unwrap();
        let stream = acquire.await;
        assert!(stream.is_ok());
    }
}
