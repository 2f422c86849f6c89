//! Resource lifecycle management.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use bloom_detector::{CameraStream, FaceLandmarker, FrameScheduler, LandmarkerLoader, VideoSource};
use bloom_models::{LifecyclePhase, StatusSnapshot};

use crate::config::ControllerConfig;
use crate::detection::run_detection_loop;
use crate::error::{ControllerError, ControllerResult};
use crate::status::{StatusPublisher, CAMERA_MESSAGE, MODEL_LOAD_MESSAGE};

struct Services<V, L, S> {
    video: V,
    loader: L,
    scheduler: S,
}

/// Owns one camera stream, one landmarker, and one detection loop for the
/// lifetime of a session.
///
/// Resources are acquired concurrently on `start`; the loop runs only if both
/// succeed. `stop` is idempotent and safe to call while acquisition is still
/// in flight: a start that resolves after teardown releases what it acquired
/// and never enters `Running`. A controller runs one session; recovery from
/// any failure is a fresh controller.
pub struct BloomController<V, L, S>
where
    V: VideoSource,
    L: LandmarkerLoader,
    S: FrameScheduler,
{
    config: ControllerConfig,
    session_id: Uuid,
    services: Option<Services<V, L, S>>,
    status_tx: watch::Sender<StatusSnapshot>,
    cancel_tx: watch::Sender<bool>,
    session: Option<JoinHandle<()>>,
}

impl<V, L, S> BloomController<V, L, S>
where
    V: VideoSource,
    L: LandmarkerLoader,
    S: FrameScheduler,
{
    /// Create a controller in the `Idle` phase.
    pub fn new(config: ControllerConfig, video: V, loader: L, scheduler: S) -> Self {
        let session_id = Uuid::new_v4();
        let (status_tx, _) = watch::channel(StatusSnapshot::idle(session_id));
        let (cancel_tx, _) = watch::channel(false);

        Self {
            config,
            session_id,
            services: Some(Services {
                video,
                loader,
                scheduler,
            }),
            status_tx,
            cancel_tx,
            session: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Subscribe to status snapshots. This is the only surface the rendering
    /// layer reads.
    pub fn status(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    /// Launch resource acquisition and, once both resources are held, the
    /// detection loop.
    pub fn start(&mut self) -> ControllerResult<()> {
        let services = self
            .services
            .take()
            .ok_or(ControllerError::AlreadyStarted)?;

        info!(
            session_id = %self.session_id,
            target_fps = self.config.target_fps,
            "bloom session starting"
        );

        let status = StatusPublisher::new(self.status_tx.clone());
        status.phase(LifecyclePhase::Initializing);

        let cancel_rx = self.cancel_tx.subscribe();
        self.session = Some(tokio::spawn(run_session(services, cancel_rx, status)));
        Ok(())
    }

    /// Request teardown. Idempotent, callable from any state, and honored
    /// before the next loop iteration. Never blocks on a hung acquisition.
    pub fn stop(&self) {
        let _ = self.cancel_tx.send(true);
        if self.services.is_some() {
            // Never started: no session task exists to publish the terminal phase
            StatusPublisher::new(self.status_tx.clone()).phase(LifecyclePhase::Stopped);
        }
    }

    /// Wait until the session task has released its resources, returning the
    /// final status snapshot. A new controller instance should only start
    /// after this returns.
    pub async fn join(mut self) -> ControllerResult<StatusSnapshot> {
        if let Some(session) = self.session.take() {
            session
                .await
                .map_err(|err| ControllerError::SessionFailed(err.to_string()))?;
        }
        Ok(self.status_tx.borrow().clone())
    }
}

impl<V, L, S> Drop for BloomController<V, L, S>
where
    V: VideoSource,
    L: LandmarkerLoader,
    S: FrameScheduler,
{
    fn drop(&mut self) {
        // The session task outlives the handle; make sure it winds down
        let _ = self.cancel_tx.send(true);
    }
}

/// One controller session: acquire both resources, run the loop, release.
async fn run_session<V, L, S>(
    services: Services<V, L, S>,
    mut cancel_rx: watch::Receiver<bool>,
    status: StatusPublisher,
) where
    V: VideoSource,
    L: LandmarkerLoader,
    S: FrameScheduler,
{
    let Services {
        video,
        loader,
        mut scheduler,
    } = services;

    if *cancel_rx.borrow() {
        status.phase(LifecyclePhase::Stopped);
        return;
    }

    // Both acquisitions run concurrently and neither is dropped mid-flight,
    // so a teardown that races them still releases real resources below.
    let (model, stream) = tokio::join!(loader.load(), video.acquire());

    let (mut model, mut stream) = match (model, stream) {
        (Ok(model), Ok(stream)) => (model, stream),
        (Err(err), stream) => {
            error!(error = %err, "face landmarker failed to load");
            if let Ok(mut stream) = stream {
                stream.stop();
            }
            status.error(MODEL_LOAD_MESSAGE);
            return;
        }
        (Ok(mut model), Err(err)) => {
            error!(error = %err, "camera acquisition failed");
            model.close();
            status.error(CAMERA_MESSAGE);
            return;
        }
    };

    if *cancel_rx.borrow() {
        // stop() arrived while acquiring: release and never enter Running
        debug!("teardown raced acquisition, releasing fresh resources");
        stream.stop();
        model.close();
        status.phase(LifecyclePhase::Stopped);
        return;
    }

    status.phase(LifecyclePhase::Running);
    info!("bloom session running");

    run_detection_loop(&mut stream, &mut model, &mut scheduler, &mut cancel_rx, &status).await;

    stream.stop();
    model.close();
    status.phase(LifecyclePhase::Stopped);
    info!("bloom session stopped");
}
