//! The game session: every piece of mutable game state plus the per-frame
//! update and the phase state machine.
//!
//! The session never talks to the terminal or the audio device. Everything
//! worth reacting to is recorded as a [`GameEvent`] and drained by the
//! caller once per frame.

use glam::Vec2;
use log::{debug, info, trace};
use rand::Rng;
use std::time::Instant;

use crate::config::GameplayConfig;
use crate::entities::{Bullet, Enemy, Phase, Player};
use crate::geometry::circles_overlap;
use crate::spawner::{self, SpawnTimer};

/// Movement keys held down this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heading {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Continuous input sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub heading: Heading,
    /// Pointer position in world units
    pub cursor: Vec2,
}

/// Discrete requests, each valid in a single phase only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start control clicked on the menu
    Start,
    /// Quit control clicked on the menu
    Quit,
    /// Primary click while playing, aimed at a world position
    Fire(Vec2),
    Restart,
    ReturnToMenu,
    /// Leave immediately, whatever the phase
    Exit,
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Something that happened during a frame, drained by the app for audio cues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemySpawned,
    /// A bullet struck an enemy
    EnemyHit,
    EnemyDestroyed,
    /// An enemy reached the player
    PlayerHit,
    PhaseChanged { from: Phase, to: Phase },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    phase: Phase,
    spawn_timer: SpawnTimer,
    playfield: Vec2,
    config: GameplayConfig,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(config: GameplayConfig, playfield: Vec2, now: Instant) -> Self {
        Self {
            player: Player::new(playfield / 2.0, config.max_health),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            phase: Phase::Menu,
            spawn_timer: SpawnTimer::new(config.spawn_interval(), now),
            playfield,
            config,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn playfield(&self) -> Vec2 {
        self.playfield
    }

    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    /// Events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Puts the session back to its canonical start state. The phase is
    /// left alone; callers decide where to go next.
    pub fn reset(&mut self, now: Instant) {
        self.player = Player::new(self.playfield / 2.0, self.config.max_health);
        self.bullets.clear();
        self.enemies.clear();
        self.score = 0;
        self.spawn_timer.restart(now);
    }

    /// Adopts new playfield dimensions and pulls the player back inside.
    pub fn resize(&mut self, playfield: Vec2) {
        self.playfield = playfield;
        self.player
            .clamp_to(self.playfield, self.config.player_margin);
    }

    /// Applies a discrete command. Commands that do not belong to the
    /// current phase are ignored.
    pub fn apply(&mut self, command: Command, now: Instant) -> Flow {
        match (self.phase, command) {
            (_, Command::Exit) => return Flow::Exit,
            (Phase::Menu, Command::Start) => {
                self.reset(now);
                self.set_phase(Phase::Playing);
            }
            (Phase::Menu, Command::Quit) => return Flow::Exit,
            (Phase::Playing, Command::Fire(target)) => {
                self.fire(target);
            }
            (Phase::GameOver { .. }, Command::Restart) => {
                self.reset(now);
                self.set_phase(Phase::Playing);
            }
            (Phase::GameOver { .. }, Command::ReturnToMenu) => {
                self.set_phase(Phase::Menu);
            }
            (phase, command) => {
                trace!("ignoring {:?} during {}", command, phase.name());
            }
        }
        Flow::Continue
    }

    /// Fires one bullet from the player towards `target`. Firing at the
    /// player's own position does nothing.
    pub fn fire(&mut self, target: Vec2) -> bool {
        match Bullet::aimed(self.player.pos, target) {
            Some(bullet) => {
                self.bullets.push(bullet);
                self.events.push(GameEvent::ShotFired);
                true
            }
            None => false,
        }
    }

    /// Runs one frame of gameplay. Does nothing outside [`Phase::Playing`].
    ///
    /// All displacements are fixed per-frame steps; `now` only drives the
    /// spawn timer.
    pub fn update<R: Rng + ?Sized>(&mut self, input: &FrameInput, now: Instant, rng: &mut R) {
        if !self.phase.is_playing() {
            return;
        }

        self.move_player(input.heading);
        self.player.face_towards(input.cursor);

        if self.spawn_timer.tick(now) {
            let enemy = spawner::spawn_enemy(rng, self.playfield, &self.config);
            debug!("enemy spawned at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
            self.enemies.push(enemy);
            self.events.push(GameEvent::EnemySpawned);
        }

        self.advance_bullets();
        self.step_enemies();
        self.check_game_over();
    }

    fn move_player(&mut self, heading: Heading) {
        let speed = self.config.player_speed;
        if heading.up {
            self.player.move_up(speed);
        }
        if heading.down {
            self.player.move_down(speed);
        }
        if heading.left {
            self.player.move_left(speed);
        }
        if heading.right {
            self.player.move_right(speed);
        }
        self.player
            .clamp_to(self.playfield, self.config.player_margin);
    }

    fn advance_bullets(&mut self) {
        let speed = self.config.bullet_speed;
        let playfield = self.playfield;
        self.bullets = std::mem::take(&mut self.bullets)
            .into_iter()
            .map(|mut bullet| {
                bullet.update(speed);
                bullet
            })
            .filter(|bullet| !bullet.is_out_of_bounds(playfield))
            .collect();
    }

    /// Moves every enemy, then resolves bullet and player collisions.
    ///
    /// Every enemy is tested against the same bullet snapshot, so a bullet
    /// overlapping two enemies hits both. Every overlapping bullet is spent,
    /// even after the killing hit. Consumed bullets and dead enemies are
    /// dropped once the pass is over.
    fn step_enemies(&mut self) {
        let bullets = std::mem::take(&mut self.bullets);
        let mut consumed = vec![false; bullets.len()];
        let enemies = std::mem::take(&mut self.enemies);
        let mut survivors = Vec::with_capacity(enemies.len());

        for mut enemy in enemies {
            enemy.advance_towards(self.player.pos, self.config.enemy_speed);

            for (idx, bullet) in bullets.iter().enumerate() {
                if !circles_overlap(bullet.pos, self.config.bullet_radius, enemy.pos, enemy.radius)
                {
                    continue;
                }
                consumed[idx] = true;
                // Spent without scoring once the enemy died earlier in this pass
                if enemy.is_alive() {
                    self.events.push(GameEvent::EnemyHit);
                    if enemy.take_hit() {
                        self.score = self.score.saturating_add(self.config.points_per_kill);
                        debug!("enemy destroyed, score {}", self.score);
                        self.events.push(GameEvent::EnemyDestroyed);
                    }
                }
            }

            if circles_overlap(
                self.player.pos,
                self.config.player_radius,
                enemy.pos,
                enemy.radius,
            ) {
                self.player.take_damage(self.config.collision_damage);
                debug!("player hit, health {}", self.player.health);
                self.events.push(GameEvent::PlayerHit);
            } else if enemy.is_alive() {
                survivors.push(enemy);
            }
        }

        self.enemies = survivors;
        self.bullets = bullets
            .into_iter()
            .zip(consumed)
            .filter_map(|(bullet, used)| (!used).then_some(bullet))
            .collect();
    }

    fn check_game_over(&mut self) {
        let next = if !self.player.is_alive() {
            Phase::GameOver { victory: false }
        } else if self.score >= self.config.victory_score {
            Phase::GameOver { victory: true }
        } else {
            return;
        };
        self.bullets.clear();
        self.set_phase(next);
    }

    fn set_phase(&mut self, next: Phase) {
        let from = self.phase;
        self.phase = next;
        info!("phase {} -> {} (score {})", from.name(), next.name(), self.score);
        self.events.push(GameEvent::PhaseChanged { from, to: next });
    }
}
