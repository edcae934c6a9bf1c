//! Game state and core simulation types
//!
//! A [`Simulation`] owns one [`World`] at a time. Restart swaps in a fresh
//! world rather than resetting fields one by one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Pose};
use super::config::{ConfigError, SimConfig};
use super::obstacle::{GapSource, Obstacle, SeededGaps};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Notifications emitted by the simulation for audio, UI and score submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump was applied
    Jumped,
    /// An obstacle was cleared; `score` is the new total
    Scored { score: u32 },
    /// The run ended with this final score. Sent once per session.
    GameOver { score: u32 },
}

/// Consumer of [`GameEvent`]s
///
/// Called synchronously from inside `tick`/`jump`. Whatever the consumer does
/// with an event (and whether it fails) has no effect on the simulation.
pub trait SimObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> SimObserver for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SimObserver for NullObserver {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Spawn gate: fires on the first check, then again once `interval` has
/// elapsed since the last firing. Late checks fire once, never in a burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval: f64,
    last: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn is_ready(&self, now: f64) -> bool {
        match self.last {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }

    /// Fire if ready, re-arming from `now`
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.is_ready(now) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}

/// Everything a single play session owns
#[derive(Debug, Clone)]
pub(crate) struct World {
    pub actor: Actor,
    /// Live obstacles in spawn order (which is also descending `x`)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub spawn: SpawnTimer,
    pub phase: GamePhase,
    next_id: u32,
}

impl World {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            actor: Actor::spawn(config),
            obstacles: Vec::new(),
            score: 0,
            spawn: SpawnTimer::new(config.spawn_interval),
            phase: GamePhase::Running,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// The simulation root: actor, obstacles, score and phase
pub struct Simulation<G: GapSource = SeededGaps> {
    pub(crate) config: SimConfig,
    pub(crate) gaps: G,
    pub(crate) observer: Box<dyn SimObserver>,
    pub(crate) world: World,
}

impl Simulation<SeededGaps> {
    /// Create a session whose gap placement is driven by `seed`
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_gap_source(config, SeededGaps::new(seed))
    }
}

impl<G: GapSource> Simulation<G> {
    /// Create a session with a caller-supplied gap source
    pub fn with_gap_source(config: SimConfig, gaps: G) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(&config);
        log::info!(
            "Session started: field {}x{}, spawn every {} ms",
            config.field_width,
            config.field_height,
            config.spawn_interval
        );
        Ok(Self {
            config,
            gaps,
            observer: Box::new(NullObserver),
            world,
        })
    }

    /// Builder-style observer injection
    pub fn with_observer(mut self, observer: impl SimObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.world.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn actor(&self) -> &Actor {
        &self.world.actor
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.obstacles
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        let actor = &self.world.actor;
        Snapshot {
            actor_pos: actor.pos(),
            actor_vel: actor.vel(),
            pose: actor.pose(),
            tilt: actor.tilt(),
            obstacles: self
                .world
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id(),
                    x: o.x(),
                    width: o.width(),
                    gap_top: o.gap_top(),
                    gap_bottom: o.gap_bottom(),
                    passed: o.passed(),
                })
                .collect(),
            score: self.world.score,
            phase: self.world.phase,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.observer.on_event(&event);
    }

    /// The only way into `GameOver`. Re-entering is a no-op.
    pub(crate) fn end_game(&mut self) {
        if self.world.phase == GamePhase::GameOver {
            return;
        }
        self.world.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", self.world.score);
        let score = self.world.score;
        self.emit(GameEvent::GameOver { score });
    }
}

/// Obstacle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub passed: bool,
}

/// Frame snapshot handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub actor_pos: Vec2,
    pub actor_vel: f32,
    pub pose: Pose,
    pub tilt: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub phase: GamePhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_new_session() {
        let sim = Simulation::new(SimConfig::default(), 1).expect("valid config");
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.score(), 0);
        assert!(sim.obstacles().is_empty());
        assert_eq!(sim.actor().pos(), Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Simulation::new(SimConfig::with_field(800.0, 100.0), 1);
        assert!(matches!(result, Err(ConfigError::FieldTooShort { .. })));
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut sim = Simulation::new(SimConfig::default(), 1)
            .expect("valid config")
            .with_observer(move |e: &GameEvent| sink.borrow_mut().push(*e));

        sim.world.score = 4;
        sim.end_game();
        sim.end_game();

        assert!(sim.is_game_over());
        assert_eq!(*events.borrow(), vec![GameEvent::GameOver { score: 4 }]);
    }

    #[test]
    fn test_spawn_timer_first_check_fires() {
        let mut timer = SpawnTimer::new(2000.0);
        assert!(timer.try_fire(12345.0));
        assert_eq!(timer.last, Some(12345.0));
        assert!(!timer.try_fire(13000.0));
        assert!(timer.try_fire(14345.0));
    }

    #[test]
    fn test_spawn_timer_delayed_tick_fires_once() {
        let mut timer = SpawnTimer::new(2000.0);
        assert!(timer.try_fire(0.0));
        // Ten intervals late: exactly one spawn, re-armed from now
        assert!(timer.try_fire(20_000.0));
        assert!(!timer.try_fire(20_001.0));
        assert!(!timer.try_fire(21_999.0));
        assert!(timer.try_fire(22_000.0));
    }

    proptest! {
        /// Ticks on a regular grid that divides the interval spawn exactly
        /// floor((T - t0) / I) + 1 times by time T.
        #[test]
        fn prop_spawn_count_on_regular_ticks(
            t0 in 0u32..10_000,
            step in 1u32..50,
            ratio in 1u32..40,
            ticks in 1usize..2000,
        ) {
            let interval = (step * ratio) as f64;
            let mut timer = SpawnTimer::new(interval);
            let start = t0 as f64;
            let mut spawned = 0u64;
            for i in 0..ticks {
                if timer.try_fire(start + (i as f64) * step as f64) {
                    spawned += 1;
                }
            }
            let elapsed = ((ticks - 1) as f64) * step as f64;
            let expected = (elapsed / interval).floor() as u64 + 1;
            prop_assert_eq!(spawned, expected);
        }

        /// With arbitrary gaps between ticks, firings are at least one
        /// interval apart and never more than one per tick.
        #[test]
        fn prop_spawns_never_bunch(
            deltas in proptest::collection::vec(0u32..7000, 1..300),
        ) {
            let interval = 2000.0;
            let mut timer = SpawnTimer::new(interval);
            let mut now = 0.0;
            let mut last_spawn: Option<f64> = None;
            for d in deltas {
                now += d as f64;
                if timer.try_fire(now) {
                    if let Some(prev) = last_spawn {
                        prop_assert!(now - prev >= interval);
                    }
                    last_spawn = Some(now);
                }
            }
        }
    }
}
