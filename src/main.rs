//! Solitary Struggle headless entry point
//!
//! Runs an autopilot session at the fixed simulation rate and reports how it
//! went. Set `RUST_LOG=debug` to follow spawns, kills and audio cues.

use std::path::PathBuf;

use clap::Parser;
use solitary_struggle::audio::AudioManager;
use solitary_struggle::consts::SIM_DT_MS;
use solitary_struggle::sim::{GameEvent, GamePhase, TickInput};
use solitary_struggle::{Game, GameError, GameInput, Settings, Tuning};

/// Run a headless autopilot session
#[derive(Debug, Parser)]
#[command(name = "solitary-struggle", version, about)]
struct Cli {
    /// JSON file with balance overrides
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// RNG seed for the run
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Simulated wall time to play
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 120,
        value_parser = clap::value_parser!(u32).range(1..=86_400)
    )]
    seconds: u32,
}

fn run(options: Cli) -> Result<(), GameError> {
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!(
        "Solitary Struggle starting (seed {}, {}s autopilot)",
        options.seed,
        options.seconds
    );

    let settings = Settings::default();
    let audio = AudioManager::logging(settings.clone());
    let mut game = Game::new(options.seed, tuning, settings, audio)?;

    let input = GameInput {
        tick: TickInput {
            idle_mode: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let total_ms = options.seconds as u64 * 1000;
    let mut wall_ms = 0u64;
    let mut kills = 0u32;
    let mut deaths = 0u32;
    while wall_ms < total_ms {
        for event in game.update(SIM_DT_MS, &input) {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::GameOver { .. } => deaths += 1,
                _ => {}
            }
        }
        wall_ms += SIM_DT_MS as u64;

        // Autopilot never presses retry; do it after a game over
        if game.state().phase == GamePhase::GameOver {
            let retry = GameInput {
                tick: TickInput {
                    retry: true,
                    idle_mode: true,
                    ..Default::default()
                },
                ..Default::default()
            };
            game.update(SIM_DT_MS, &retry);
            wall_ms += SIM_DT_MS as u64;
        }
    }

    let state = game.state();
    println!(
        "score {} | level {} | survived {}s | kills {} | deaths {} | enemies alive {}",
        state.score,
        state.progression.level,
        state.elapsed_secs,
        kills,
        deaths,
        state.enemies.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("solitary-struggle").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.tuning, None);
        assert_eq!(cli.seed, 12345);
        assert_eq!(cli.seconds, 120);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&["--tuning", "hard.json", "--seed", "7", "--seconds", "30"]).unwrap();
        assert_eq!(cli.tuning, Some(PathBuf::from("hard.json")));
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.seconds, 30);
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&["--seed"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert_eq!(parse(&["--seed", "abc"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--seconds", "0"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&["--speed", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_short_autopilot_run() {
        let cli = parse(&["--seconds", "2"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_missing_tuning_file_fails() {
        let cli = parse(&["--tuning", "/definitely/not/here.json", "--seconds", "1"]).unwrap();
        assert!(matches!(run(cli), Err(GameError::Io(_))));
    }
}
