mod bullet;
mod enemy;
mod phase;
mod player;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use phase::Phase;
pub use player::Player;
