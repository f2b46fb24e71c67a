//! Headless radar demo
//!
//! Runs a scripted simulation against a recording backend and logs what the
//! radar did each second. Pass a `.toml` or `.ron` settings file as the
//! first argument; missing files fall back to defaults.
//!
//! ```text
//! RUST_LOG=debug cargo run -p radar_demo -- radar.toml
//! ```

mod world;

use radar_engine::foundation::logging;
use radar_engine::prelude::*;
use std::sync::Arc;
use world::{DemoWorld, RadarContact};

const TICK_RATE: f32 = 60.0;
const RUN_SECONDS: f32 = 12.0;
const KEY_HOLD: f32 = 0.25;

/// A scripted key press
struct Press {
    at: f32,
    key: KeyCode,
}

/// Scripted events other than key presses
enum WorldEvent {
    PlayerDestroyed,
    PlayerRespawned,
}

fn script(keys: &RadarKeyBindings) -> Vec<Press> {
    vec![
        Press { at: 2.0, key: keys.zoom_in },
        Press { at: 3.0, key: keys.zoom_in },
        Press { at: 4.0, key: keys.toggle },
        Press { at: 5.0, key: keys.toggle },
        Press { at: 6.0, key: keys.zoom_out },
    ]
}

fn world_events() -> Vec<(f32, WorldEvent)> {
    vec![(8.0, WorldEvent::PlayerDestroyed), (9.0, WorldEvent::PlayerRespawned)]
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("Radar demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RadarError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "radar.toml".to_string());
    let settings = Arc::new(RadarSettings::load_or_default(&path)?.sanitized());
    log::info!(
        "Settings: {} zoom levels, {} updates/s, {} contacts max",
        settings.zoom_levels,
        settings.update_fps,
        settings.max_contacts
    );

    let mut session = RadarSession::builder(Arc::clone(&settings))
        .with_default_renderers()
        .build()?;
    let mut mapper = RadarInputMapper::new(settings.keys.clone());
    let mut world = DemoWorld::new(7, 120, 200, settings.max_sight_range * 0.6);
    let mut backend = RecordingBackend::new();

    let presses = script(&settings.keys);
    let mut events = world_events().into_iter().peekable();
    let viewport = Viewport::new(1920.0, 1080.0);
    let dt = 1.0 / TICK_RATE;

    let mut drawn = 0u32;
    let mut second = 0u32;
    let total_ticks = (RUN_SECONDS * TICK_RATE) as u32;

    for tick in 0..total_ticks {
        let time = tick as f32 * dt;

        while let Some((_, event)) = events.next_if(|(at, _)| *at <= time) {
            match event {
                WorldEvent::PlayerDestroyed => world.despawn_player(),
                WorldEvent::PlayerRespawned => world.respawn_player(),
            }
        }

        let is_down = |key: KeyCode| presses.iter().any(|p| p.key == key && time >= p.at && time < p.at + KEY_HOLD);
        mapper.poll(is_down, |input| {
            session.handle_input(input);
        });

        world.step(dt);
        if let TickOutcome::Drawn { .. } = session.tick(dt, &world, &mut backend, viewport)? {
            drawn += 1;
        }

        let now = ((tick + 1) as f32 * dt) as u32;
        if now > second {
            second = now;
            report(second, &session, &world, drawn);
            drawn = 0;
        }
    }

    log::info!(
        "Done: {} passes, {} draw calls, {} vertices",
        backend.passes(),
        backend.total_calls(),
        backend.total_vertices()
    );
    Ok(())
}

fn report(second: u32, session: &RadarSession<RadarContact>, world: &DemoWorld, drawn: u32) {
    let stats = session.stats();
    let zoom = session.controller().zoom();
    log::info!(
        "t={}s level {}/{} x{:.2}: {} shown of {} entities ({} out of range, {} hidden), {} frames drawn, scan {}us",
        second,
        zoom.level(),
        zoom.levels(),
        zoom.magnification(),
        stats.last_filter.accepted,
        world.entity_count(),
        stats.last_filter.out_of_range,
        stats.last_filter.excluded,
        drawn,
        stats.last_scan_micros
    );
    log::debug!(
        "ticks {}, update frames {}, skipped {}",
        stats.ticks,
        stats.update_frames,
        stats.skipped_no_viewer
    );
}
