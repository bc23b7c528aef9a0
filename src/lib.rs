// Library exports for testing
pub use config::{ConfigError, GameConfig};
pub use entities::{Bullet, Enemy, Phase, Player};
pub use session::{Command, Flow, FrameInput, GameEvent, Heading, Session};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod session;
pub mod spawner;
