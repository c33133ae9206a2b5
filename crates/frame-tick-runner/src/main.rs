//! Frame tick runner
//!
//! This binary:
//! 1. Reads the loop configuration from the environment
//! 2. Attaches a tick handler to a frame dispatcher
//! 3. Pumps frames at `TARGET_FPS` with fixed physics steps until Ctrl-C or
//!    `MAX_FRAMES`
//!
//! Set `RUST_LOG=frame_tick=trace` to see every phase firing.

mod config;
mod frame_loop;
mod tps;

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use frame_tick::prelude::*;
use parking_lot::Mutex;
use tracing::info;

use crate::config::LoopConfig;
use crate::frame_loop::FrameLoop;
use crate::tps::TpsTracker;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frame_tick_runner=info".parse()?)
                .add_directive("frame_tick=info".parse()?),
        )
        .init();

    let config = LoopConfig::from_env()?;
    info!(?config, "starting frame loop");

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;
    }

    let dispatcher = FrameDispatcher::new();
    let handler = TickHandler::new(dispatcher.clone());

    let tps = Arc::new(Mutex::new(TpsTracker::new(config.target_fps())));
    let physics_steps = Arc::new(AtomicU64::new(0));
    let frames = Arc::new(AtomicU64::new(0));

    {
        let tps = Arc::clone(&tps);
        handler.subscribe_on_frame_update(Listener::new(move |dt| tps.lock().update(dt)));
    }
    {
        let physics_steps = Arc::clone(&physics_steps);
        handler.subscribe_on_physic_update(Listener::new(move |_| {
            physics_steps.fetch_add(1, Ordering::Relaxed);
        }));
    }
    {
        // Report roughly once per second of frames.
        let report_every = (config.target_fps().round() as u64).max(1);
        let tps = Arc::clone(&tps);
        let physics_steps = Arc::clone(&physics_steps);
        let frames = Arc::clone(&frames);
        handler.subscribe_on_end_frame_update(Listener::new(move |_| {
            let frame = frames.fetch_add(1, Ordering::Relaxed) + 1;
            if frame.is_multiple_of(report_every) {
                let tps = *tps.lock();
                info!(
                    frame,
                    physics_steps = physics_steps.load(Ordering::Relaxed),
                    tps_5s = tps.tps_5s,
                    tps_15s = tps.tps_15s,
                    tps_1m = tps.tps_1m,
                    "frame stats"
                );
            }
        }));
    }
    handler.subscribe_on_late_update_once(Listener::new(|dt| {
        info!(dt, "first frame complete");
    }));

    let mut frame_loop = FrameLoop::new(dispatcher, config);
    let total = frame_loop.run(&stop);

    handler.dispose();
    frame_loop.hooks().dispose();

    info!(
        frames = total,
        physics_steps = physics_steps.load(Ordering::Relaxed),
        "frame loop stopped"
    );

    Ok(())
}
