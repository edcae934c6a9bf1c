//! Per-frame simulation tick
//!
//! The frame driver calls [`Simulation::tick`] once per animation frame with a
//! monotonically increasing timestamp in milliseconds, then renders from
//! [`Simulation::snapshot`].

use super::obstacle::{GapSource, Obstacle};
use super::state::{GameEvent, GamePhase, Simulation, World};

/// Player commands, from whatever device the frontend reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Jump; ignored after game over
    Flap,
    /// Start a fresh session; ignored while running
    Restart,
    /// The single "action" button: flap while running, restart after game over
    Primary,
}

impl<G: GapSource> Simulation<G> {
    /// Advance the game by one frame
    ///
    /// Order within a tick: actor physics, spawn gate, obstacles (move,
    /// collide, score), prune, world bounds. A collision ends the tick
    /// immediately. Does nothing once the game is over.
    pub fn tick(&mut self, now: f64) {
        if self.world.phase == GamePhase::GameOver {
            return;
        }

        self.world.actor.advance();

        if self.world.spawn.try_fire(now) {
            let id = self.world.next_obstacle_id();
            let obstacle = Obstacle::spawn(id, &self.config, &mut self.gaps);
            log::debug!(
                "Spawned obstacle {} with gap {:.1}..{:.1}",
                id,
                obstacle.gap_top(),
                obstacle.gap_bottom()
            );
            self.world.obstacles.push(obstacle);
        }

        let bounds = self.world.actor.bounding_box();
        let actor_x = self.world.actor.pos().x;
        let World {
            obstacles, score, ..
        } = &mut self.world;

        let mut collided = false;
        for obstacle in obstacles.iter_mut() {
            obstacle.advance();

            // Checked before scoring so a hit on the clearing frame is still a hit
            if obstacle.collides_with(&bounds) {
                collided = true;
                break;
            }

            if !obstacle.passed && obstacle.is_behind(actor_x) {
                obstacle.passed = true;
                *score += 1;
                self.observer.on_event(&GameEvent::Scored { score: *score });
            }
        }

        if collided {
            self.end_game();
            return;
        }

        let before = self.world.obstacles.len();
        self.world.obstacles.retain(|o| !o.is_offscreen());
        let pruned = before - self.world.obstacles.len();
        if pruned > 0 {
            log::debug!("Pruned {} offscreen obstacle(s)", pruned);
        }

        if bounds.top() <= 0.0 || bounds.bottom() >= self.config.field_height {
            self.end_game();
        }
    }

    /// Apply the jump impulse. Returns false (and does nothing) after game over.
    pub fn jump(&mut self) -> bool {
        if self.world.phase == GamePhase::GameOver {
            return false;
        }
        self.world.actor.apply_impulse();
        self.emit(GameEvent::Jumped);
        true
    }

    /// Replace the finished session with a fresh one
    ///
    /// Only allowed after game over; returns false and leaves state untouched
    /// while running.
    pub fn restart(&mut self) -> bool {
        if self.world.phase != GamePhase::GameOver {
            return false;
        }
        self.world = World::new(&self.config);
        log::info!("Session restarted");
        true
    }

    /// Dispatch a player command. Returns whether it had any effect.
    pub fn handle_input(&mut self, input: Input) -> bool {
        match input {
            Input::Flap => self.jump(),
            Input::Restart => self.restart(),
            Input::Primary => match self.world.phase {
                GamePhase::Running => self.jump(),
                GamePhase::GameOver => self.restart(),
            },
        }
    }
}
