use glam::Vec2;

use crate::geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub health: u32,
    pub radius: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, health: u32, radius: f32) -> Self {
        Self {
            pos,
            health,
            radius,
        }
    }

    /// Steps `speed` units straight at `target`. An enemy already sitting on
    /// the target stays put.
    pub fn advance_towards(&mut self, target: Vec2, speed: f32) {
        if let Some(dir) = geometry::normalize(target - self.pos) {
            self.pos += dir * speed;
        }
    }

    /// Removes one point of health. Returns true when this hit was the
    /// killing blow.
    pub fn take_hit(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        self.health == 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
