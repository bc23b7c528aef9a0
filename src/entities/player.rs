use glam::Vec2;

use crate::geometry::{self, clamp_to_margin};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub health: u32,
    /// Facing in degrees, recomputed every frame from the cursor
    pub angle: f32,
}

impl Player {
    pub fn new(pos: Vec2, health: u32) -> Self {
        Self {
            pos,
            health,
            angle: 0.0,
        }
    }

    pub fn move_left(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    pub fn move_right(&mut self, speed: f32) {
        self.pos.x += speed;
    }

    pub fn move_up(&mut self, speed: f32) {
        self.pos.y -= speed;
    }

    pub fn move_down(&mut self, speed: f32) {
        self.pos.y += speed;
    }

    /// Keeps the player `margin` units away from every playfield edge.
    pub fn clamp_to(&mut self, playfield: Vec2, margin: f32) {
        self.pos = clamp_to_margin(self.pos, playfield, margin);
    }

    pub fn face_towards(&mut self, target: Vec2) {
        self.angle = geometry::facing_degrees(self.pos, target);
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
