//! 2D vector helpers and circle collision.
//!
//! World space is screen-like: x grows to the right, y grows downward.

use glam::Vec2;

/// Unit vector pointing along `v`, or `None` when `v` has no direction.
pub fn normalize(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Strict overlap test: circles that merely touch do not collide.
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    distance(pos_a, pos_b) < radius_a + radius_b
}

/// Angle in degrees from `from` towards `to`, measured counter-clockwise
/// as seen on screen (the y axis is flipped before `atan2`).
pub fn facing_degrees(from: Vec2, to: Vec2) -> f32 {
    let rel = to - from;
    (-rel.y).atan2(rel.x).to_degrees()
}

/// Clamp `pos` into the box `[margin, size - margin]` on both axes.
///
/// When the box is degenerate (size smaller than twice the margin) the
/// coordinate collapses to the centre of that axis.
pub fn clamp_to_margin(pos: Vec2, size: Vec2, margin: f32) -> Vec2 {
    let clamp_axis = |value: f32, extent: f32| {
        let (lo, hi) = (margin, extent - margin);
        if lo > hi {
            extent / 2.0
        } else {
            value.clamp(lo, hi)
        }
    };
    Vec2::new(clamp_axis(pos.x, size.x), clamp_axis(pos.y, size.y))
}

/// Whether `pos` lies inside `[0, size.x] × [0, size.y]`, edges included.
pub fn within_bounds(pos: Vec2, size: Vec2) -> bool {
    (0.0..=size.x).contains(&pos.x) && (0.0..=size.y).contains(&pos.y)
}
