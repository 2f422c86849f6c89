//! The per-frame detection loop.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::warn;

use bloom_detector::{CameraStream, FaceLandmarker, FrameScheduler};
use bloom_models::{extract_smile, BloomState, SmileReading};

use crate::status::StatusPublisher;

/// Run detections until cancelled.
///
/// The cancellation check at the top of each iteration is the loop's only
/// normal exit; it is honored both before and after the scheduler wait, and
/// the pending frame request is dropped when cancellation wins the wait.
pub(crate) async fn run_detection_loop<C, M, S>(
    stream: &mut C,
    model: &mut M,
    scheduler: &mut S,
    cancel_rx: &mut watch::Receiver<bool>,
    status: &StatusPublisher,
) where
    C: CameraStream,
    M: FaceLandmarker,
    S: FrameScheduler,
{
    let mut bloom = BloomState::new();
    let epoch = Instant::now();
    let mut last_timestamp = Duration::ZERO;

    loop {
        if *cancel_rx.borrow() {
            break;
        }

        tokio::select! {
            changed = cancel_rx.changed() => {
                if changed.is_err() || *cancel_rx.borrow() {
                    break;
                }
                // The flag is still false; a frame runs only on a scheduler tick
                continue;
            }
            _ = scheduler.next_frame() => {}
        }

        if *cancel_rx.borrow() {
            break;
        }

        let timestamp = next_timestamp(&epoch, &mut last_timestamp);

        // A failing frame decays the bloom instead of killing the loop
        let reading = match stream
            .grab_frame()
            .and_then(|frame| model.detect(&frame, timestamp))
        {
            Ok(result) => extract_smile(&result),
            Err(err) => {
                warn!(error = %err, "frame inference failed");
                SmileReading::default()
            }
        };

        let level = bloom.update(reading.is_smiling);
        status.frame(reading, level);
    }
}

/// Wall-clock elapsed time since the loop began, bumped when needed so
/// consecutive timestamps are strictly increasing.
fn next_timestamp(epoch: &Instant, last: &mut Duration) -> Duration {
    let mut timestamp = epoch.elapsed();
    if timestamp <= *last {
        timestamp = *last + Duration::from_micros(1);
    }
    *last = timestamp;
    timestamp
}
