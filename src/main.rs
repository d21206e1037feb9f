//! Elemental Arena entry point
//!
//! Runs one headless session driven by the demo autopilot. Rendering, input
//! devices and real audio are platform collaborators and are not wired here.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use elemental_arena::audio::{AudioSink, LogAudio};
use elemental_arena::consts::*;
use elemental_arena::demo::autopilot;
use elemental_arena::sim::{FrameSnapshot, GameEvent, GamePhase, SimulationState, tick};
use elemental_arena::{Settings, ticks_to_ms};

/// Headless elemental arena session driven by the demo autopilot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON settings file (seed, map layout, audio levels)
    #[arg(value_name = "SETTINGS")]
    settings: Option<PathBuf>,
    /// Pace ticks against the wall clock instead of simulating time
    #[arg(long)]
    realtime: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Elemental Arena (headless) starting...");

    let args = CliArgs::parse();
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let map = match settings.map() {
        Ok(map) => map,
        Err(e) => {
            log::error!("Invalid map layout: {}", e);
            std::process::exit(1);
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = SimulationState::new(map, seed);
    let mut audio = LogAudio::new(&settings);
    log::info!("Game initialized with seed: {}", seed);

    let frame_time = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let started = Instant::now();
    let mut frame: u64 = 0;
    let mut defeated = 0u32;
    let mut hits = 0u32;

    loop {
        let now_ms = if args.realtime {
            started.elapsed().as_millis() as u64
        } else {
            ticks_to_ms(frame)
        };

        let mut input = autopilot(&state);
        // One session per run
        input.quit = state.phase == GamePhase::GameOver;
        tick(&mut state, &input, now_ms);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::EnemyDefeated { .. } => defeated += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                _ => {}
            }
        }
        audio.dispatch(&events);

        if frame % TICK_RATE as u64 == 0 {
            match FrameSnapshot::capture(&state).to_json() {
                Ok(json) => log::debug!("frame {}: {}", frame, json),
                Err(e) => log::warn!("Failed to encode frame: {}", e),
            }
        }

        if state.quit_requested {
            break;
        }

        frame += 1;
        if args.realtime {
            let next = frame_time.mul_f64(frame as f64);
            if let Some(wait) = next.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }

    println!(
        "Session over after {} ticks: {} enemies defeated, {} hits taken, {} health left, {}s remaining",
        state.time_ticks, defeated, hits, state.player.health, state.remaining_secs
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_settings_path_and_realtime_flag() {
        let args = CliArgs::try_parse_from(["elemental-arena", "arena.json", "--realtime"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("arena.json")));
        assert!(args.realtime);

        let args = CliArgs::try_parse_from(["elemental-arena"]).unwrap();
        assert!(args.settings.is_none());
        assert!(!args.realtime);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(CliArgs::try_parse_from(["elemental-arena", "--realtim"]).is_err());
    }
}
