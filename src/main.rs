//! Skyflap headless runner
//!
//! Drives the simulation on a synthetic 60 Hz clock with a simple autopilot,
//! plays the sound cues through the log, and records results on the local
//! leaderboard.
//!
//! Usage: `skyflap [--config PATH] [--seed N] [--sessions N] [--data DIR]`

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use skyflap::audio::{AudioManager, LogBackend};
use skyflap::highscores::share_message;
use skyflap::sim::{GameEvent, GapSource, Input, SimConfig, SimObserver, Simulation};
use skyflap::{HighScores, Settings};

/// Milliseconds per frame at 60 Hz
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Stop a session that is still alive after two minutes of game time
const MAX_FRAMES: u32 = 60 * 120;

struct Args {
    config: Option<PathBuf>,
    seed: u64,
    sessions: u32,
    data_dir: PathBuf,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = Args {
            config: None,
            seed: 0x5eed,
            sessions: 1,
            data_dir: PathBuf::from(".skyflap"),
        };

        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().with_context(|| format!("{} needs a value", flag));
            match flag.as_str() {
                "--config" => args.config = Some(PathBuf::from(value()?)),
                "--seed" => args.seed = value()?.parse().context("--seed must be an integer")?,
                "--sessions" => {
                    args.sessions = value()?.parse().context("--sessions must be an integer")?
                }
                "--data" => args.data_dir = PathBuf::from(value()?),
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(args)
    }
}

/// Flap whenever the actor sinks below the middle of the next gap
fn autopilot<G: GapSource>(sim: &Simulation<G>) -> bool {
    let actor = sim.actor();
    let x = actor.pos().x;
    let target = sim
        .obstacles()
        .iter()
        .find(|o| !o.is_behind(x - actor.width() / 2.0))
        .map(|o| (o.gap_top() + o.gap_bottom()) / 2.0)
        .unwrap_or(sim.config().actor_spawn_y());
    actor.vel() >= 0.0 && actor.pos().y > target + 10.0
}

/// Wall-clock Unix time in milliseconds, for leaderboard entries
fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse()?;

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let settings_path = args.data_dir.join("settings.json");
    let scores_path = args.data_dir.join("highscores.json");
    let mut settings = Settings::load(&settings_path);
    if settings.player_name.is_none() {
        settings.set_player_name("Player");
    }
    let player = settings.player_name.clone().unwrap_or_default();
    let mut high_scores = HighScores::load(&scores_path);

    let final_score = Rc::new(Cell::new(None));
    let sink = Rc::clone(&final_score);
    let mut audio = AudioManager::from_settings(LogBackend, &settings);
    let mut sim = Simulation::new(config, args.seed)?.with_observer(move |e: &GameEvent| {
        audio.on_event(e);
        if let GameEvent::GameOver { score } = e {
            sink.set(Some(*score));
        }
    });

    let mut now = 0.0;
    for session in 1..=args.sessions {
        if session > 1 {
            sim.handle_input(Input::Restart);
        }

        let mut frames = 0;
        while !sim.is_game_over() && frames < MAX_FRAMES {
            if autopilot(&sim) {
                sim.handle_input(Input::Flap);
            }
            sim.tick(now);
            now += FRAME_MS;
            frames += 1;
        }

        let Some(score) = final_score.take() else {
            log::info!(
                "Session {} still alive after {} frames with score {}; stopping",
                session,
                frames,
                sim.score()
            );
            break;
        };

        log::info!("Session {}: score {} after {} frames", session, score, frames);
        if let Some(rank) = high_scores.submit(&player, score, unix_millis()) {
            log::info!("New leaderboard entry at rank {}", rank);
        }
        println!("{}", share_message(score));
    }

    println!(
        "Personal best for {}: {}",
        player,
        high_scores.personal_best(&player)
    );

    settings.save(&settings_path).context("saving settings")?;
    high_scores.save(&scores_path).context("saving high scores")?;
    Ok(())
}
