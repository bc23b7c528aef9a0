use glam::Vec2;

use crate::geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit vector
    pub dir: Vec2,
}

impl Bullet {
    /// Creates a bullet at `origin` heading for `target`.
    ///
    /// Returns `None` when the two points coincide, since there is no
    /// direction to fire in.
    pub fn aimed(origin: Vec2, target: Vec2) -> Option<Self> {
        geometry::normalize(target - origin).map(|dir| Self { pos: origin, dir })
    }

    pub fn update(&mut self, speed: f32) {
        self.pos += self.dir * speed;
    }

    pub fn is_out_of_bounds(&self, playfield: Vec2) -> bool {
        !geometry::within_bounds(self.pos, playfield)
    }
}
