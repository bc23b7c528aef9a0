/// Top-level game mode, deciding which input handlers and update logic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    GameOver { victory: bool },
}

impl Phase {
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// Victory flag; only meaningful once the game is over.
    pub fn victory(&self) -> bool {
        matches!(self, Phase::GameOver { victory: true })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::GameOver { .. } => "game_over",
        }
    }
}
