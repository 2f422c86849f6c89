//! Bloom controller demo binary.
//!
//! Runs the controller against the scripted synthetic backend and logs the
//! bloom state until interrupted.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bloom_controller::{BloomController, ControllerConfig};
use bloom_detector::{
    CameraConstraints, LandmarkerOptions, RefreshScheduler, SmileScript, SyntheticCamera,
    SyntheticLoader,
};
use bloom_models::{BloomVisual, LifecyclePhase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("bloom=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let config = ControllerConfig::from_env();
    info!("Controller config: {:?}", config);

    // Scripted backend: smile for ~1.5s, rest for ~2.5s, repeat
    let camera = SyntheticCamera::new(CameraConstraints::new(config.facing_mode.clone()));
    let loader = SyntheticLoader::new(
        LandmarkerOptions::with_model_url(config.model_asset_url.clone()),
        SmileScript::Pulse {
            smile_frames: 90,
            rest_frames: 150,
        },
    );
    let scheduler = RefreshScheduler::new(config.target_fps);

    let mut controller = BloomController::new(config, camera, loader, scheduler);
    let mut status = controller.status();

    if let Err(err) = controller.start() {
        error!("Failed to start controller: {}", err);
        std::process::exit(1);
    }

    let render = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let snapshot = status.borrow().clone();
            if snapshot.phase == LifecyclePhase::Running && snapshot.frames % 30 == 0 {
                let visual = BloomVisual::from_level(snapshot.bloom);
                info!(
                    frames = snapshot.frames,
                    score = snapshot.smile.score,
                    bloom = snapshot.bloom,
                    flower_scale = visual.flower_scale,
                    "{}",
                    snapshot.status_line()
                );
            }
        }
    });

    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");

    controller.stop();
    let last = controller.join().await?;
    render.abort();

    info!("Final status: {}", serde_json::to_string(&last)?);
    Ok(())
}
