//! Robo Walk headless runner
//!
//! Builds a scene and drives it with a scripted walk, logging where the robot
//! ends up. Usage: `robo-walk [settings.json] [seed]`.

use robo_walk::Settings;
use robo_walk::sim::{MotionInput, Scene, tick};

/// Simulated frame rate of the scripted run
const FRAME_DT: f32 = 1.0 / 60.0;

/// (input, seconds held)
fn script() -> Vec<(MotionInput, f32)> {
    let walk = MotionInput {
        forward: true,
        ..Default::default()
    };
    vec![
        (walk, 2.0),
        (
            MotionInput {
                turn_left: true,
                ..walk
            },
            1.5,
        ),
        (
            MotionInput {
                run: true,
                ..walk
            },
            1.0,
        ),
        (
            MotionInput {
                backward: true,
                turn_right: true,
                ..Default::default()
            },
            1.0,
        ),
        (
            MotionInput {
                turn_right: true,
                ..Default::default()
            },
            0.75,
        ),
    ]
}

fn main() {
    env_logger::init();
    log::info!("Robo Walk (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut scene = match Scene::new(&settings, seed) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("Scene setup failed: {}", err);
            std::process::exit(1);
        }
    };

    let mut blocked_ticks = 0u32;
    for (input, seconds) in script() {
        let frames = (seconds / FRAME_DT).round() as u32;
        for _ in 0..frames {
            if tick(&mut scene, &input, FRAME_DT).blocked {
                blocked_ticks += 1;
            }
        }
        log::info!(
            "{:?} for {:.2}s -> position {:.2}, forward {:.2}",
            input,
            seconds,
            scene.body.position(),
            scene.body.forward()
        );
    }

    println!("ticks:    {}", scene.time_ticks);
    println!("position: {:.2}", scene.body.position());
    println!("forward:  {:.3}", scene.body.forward());
    println!("eye:      {:.2}", scene.camera.eye());
    println!("blocked:  {} ticks", blocked_ticks);
    println!("walked:   {:.2}s", scene.controller.walk_time());
}
