//! Rally game entry point
//!
//! Headless driver for the simulation: loads a track and a car, replays the
//! configured drive script one fixed tick at a time, and logs the car's pose
//! as it goes. Rendering sits on top of the same loop via
//! [`rally_engine::vehicle::Car::body_transform`].

mod config;

use config::GameConfig;
use rally_engine::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rally.toml".to_string());
    let config = GameConfig::load_or_default(&config_path);

    let track = Track::load(&config.assets.track)?;
    let mut car = Car::load(&config.assets.car, CarTuning::default())?;
    let spawn = Vec3::new(
        config.simulation.spawn[0],
        config.simulation.spawn[1],
        config.simulation.spawn[2],
    );
    car.set_position(spawn);
    log::info!("car spawned at {spawn:?}");

    let mut script = ScriptPlayer::new(&config);
    for tick in 0..config.simulation.ticks {
        car.update(script.next_input(), &track);

        if config.simulation.log_interval > 0 && tick % config.simulation.log_interval == 0 {
            let position = car.position();
            log::info!(
                "tick {tick}: position ({:.2}, {:.2}, {:.2}), speed {:.3}, steering {}",
                position.x,
                position.y,
                position.z,
                car.speed().magnitude(),
                car.steering()
            );
        }
    }

    let travelled = (car.position() - spawn).magnitude();
    log::info!(
        "simulation finished after {} ticks, {travelled:.1} units from spawn",
        config.simulation.ticks
    );
    Ok(())
}

/// Replays the configured script segments as per-tick inputs, holding empty
/// input once the script runs out
struct ScriptPlayer {
    segments: Vec<(u32, DriveInput)>,
    current: usize,
    remaining: u32,
}

impl ScriptPlayer {
    fn new(config: &GameConfig) -> Self {
        let segments: Vec<(u32, DriveInput)> = config
            .script
            .iter()
            .map(|segment| {
                let input = DriveInput::from_keys(
                    segment.forward,
                    segment.back,
                    segment.left,
                    segment.right,
                    segment.brake,
                );
                (segment.ticks, input)
            })
            .collect();
        let remaining = segments.first().map_or(0, |segment| segment.0);
        Self {
            segments,
            current: 0,
            remaining,
        }
    }

    fn next_input(&mut self) -> DriveInput {
        while self.remaining == 0 {
            self.current += 1;
            match self.segments.get(self.current) {
                Some(segment) => self.remaining = segment.0,
                None => return DriveInput::empty(),
            }
        }
        self.remaining -= 1;
        self.segments[self.current].1
    }
}
