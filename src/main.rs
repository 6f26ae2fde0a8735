//! Sprite Lab entry point
//!
//! Parses the command line (native) or defers to the browser runner (web).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    sprite_lab::platform::web::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Steps the headless benchmark runs when none are given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_BENCH_STEPS: u64 = 3600;

/// What the command line asked for
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, PartialEq)]
enum Command {
    Window {
        scene: Option<sprite_lab::sim::SceneKind>,
        seed: Option<u64>,
    },
    Bench {
        steps: u64,
    },
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: &[String]) -> Result<Command, String> {
    use sprite_lab::sim::SceneKind;

    if args.first().map(String::as_str) == Some("bench") {
        let steps = match args.get(1) {
            Some(s) => s
                .parse()
                .map_err(|_| format!("invalid step count: {s}"))?,
            None => DEFAULT_BENCH_STEPS,
        };
        return Ok(Command::Bench { steps });
    }

    let mut scene = None;
    let mut seed = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            let value = iter.next().ok_or("--seed needs a value")?;
            seed = Some(value.parse().map_err(|_| format!("invalid seed: {value}"))?);
        } else {
            scene = Some(SceneKind::from_str(arg).ok_or_else(|| {
                let names: Vec<_> = SceneKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown scene '{arg}', expected one of: {}", names.join(", "))
            })?);
        }
    }
    Ok(Command::Window { scene, seed })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sprite_lab::{App, Settings, platform};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            log::error!("{e}");
            log::error!("usage: sprite-lab [scene] [--seed N] | sprite-lab bench [steps]");
            std::process::exit(2);
        }
    };

    match command {
        Command::Bench { steps } => {
            platform::bench::run(steps);
        }
        Command::Window { scene, seed } => {
            let settings = Settings::load();
            let kind = scene.unwrap_or(settings.scene);
            let seed = seed.or(settings.seed).unwrap_or_else(platform::time_seed);
            let app = App::new(kind, seed, settings);
            if let Err(e) = platform::native::run(app) {
                log::error!("Event loop failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use sprite_lab::sim::SceneKind;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_opens_default_window() {
        assert_eq!(
            parse_args(&[]),
            Ok(Command::Window {
                scene: None,
                seed: None
            })
        );
    }

    #[test]
    fn test_scene_and_seed() {
        assert_eq!(
            parse_args(&args(&["meteors", "--seed", "42"])),
            Ok(Command::Window {
                scene: Some(SceneKind::MeteorField),
                seed: Some(42)
            })
        );
    }

    #[test]
    fn test_bench_steps() {
        assert_eq!(
            parse_args(&args(&["bench"])),
            Ok(Command::Bench {
                steps: DEFAULT_BENCH_STEPS
            })
        );
        assert_eq!(parse_args(&args(&["bench", "10"])), Ok(Command::Bench { steps: 10 }));
        assert!(parse_args(&args(&["bench", "many"])).is_err());
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(parse_args(&args(&["nowhere"])).is_err());
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "x"])).is_err());
    }
}
