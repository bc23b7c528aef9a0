//! Timed enemy spawning from the playfield edges.

use glam::Vec2;
use rand::Rng;
use std::time::{Duration, Instant};

use crate::config::GameplayConfig;
use crate::entities::Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// A point `offset` units outside this edge, `along` being the
    /// coordinate on the free axis.
    pub fn point_outside(self, playfield: Vec2, along: f32, offset: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along, -offset),
            Edge::Right => Vec2::new(playfield.x + offset, along),
            Edge::Bottom => Vec2::new(along, playfield.y + offset),
            Edge::Left => Vec2::new(-offset, along),
        }
    }

    /// Length of the free axis along this edge.
    pub fn extent(self, playfield: Vec2) -> f32 {
        match self {
            Edge::Top | Edge::Bottom => playfield.x,
            Edge::Left | Edge::Right => playfield.y,
        }
    }
}

/// Builds a fresh enemy just outside a random edge.
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, playfield: Vec2, config: &GameplayConfig) -> Enemy {
    let edge = Edge::random(rng);
    spawn_enemy_at(rng, edge, playfield, config)
}

pub fn spawn_enemy_at<R: Rng + ?Sized>(
    rng: &mut R,
    edge: Edge,
    playfield: Vec2,
    config: &GameplayConfig,
) -> Enemy {
    let extent = edge.extent(playfield).max(0.0);
    let along = rng.random_range(0.0..=extent);
    Enemy::new(
        edge.point_outside(playfield, along, config.spawn_offset),
        config.enemy_health,
        config.enemy_radius,
    )
}

/// Spawn clock measured against a monotonic `Instant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    interval: Duration,
    last_spawn: Instant,
}

impl SpawnTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_spawn: now,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.last_spawn = now;
    }

    pub fn last_spawn(&self) -> Instant {
        self.last_spawn
    }

    /// True once strictly more than the interval has passed since the last
    /// spawn; the timer then restarts from `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_spawn) > self.interval {
            self.last_spawn = now;
            true
        } else {
            false
        }
    }
}
