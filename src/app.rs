use color_eyre::Result;
use glam::Vec2;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::entities::Phase;
use crate::input::{InputAction, InputManager};
use crate::layout::{MenuButton, MenuLayout, Viewport};
use crate::renderer::{GameRenderer, RenderView};
use crate::session::{Command, Flow, FrameInput, Session};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    session: Session,
    /// Terminal surface and its world-space mapping
    viewport: Viewport,
    menu: MenuLayout,
    /// Frames info
    frame_budget: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size.
    pub fn new(
        config: &GameConfig,
        columns: u16,
        rows: u16,
        reports_release: bool,
        audio_manager: AudioManager,
    ) -> Self {
        let display = &config.display;
        let viewport = Viewport::new(columns, rows, display.cell_width, display.cell_height);
        let playfield = viewport.playfield();
        let now = Instant::now();

        Self {
            running: true,
            session: Session::new(config.gameplay.clone(), playfield, now),
            viewport,
            menu: MenuLayout::for_playfield(playfield),
            frame_budget: display.frame_budget(),
            last_frame_time: now,
            fps: 0,
            input_manager: InputManager::new(reports_release, display.key_hold_frames),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn menu(&self) -> &MenuLayout {
        &self.menu
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        self.audio_manager.start_music();

        while self.running {
            let frame_start = Instant::now();

            // Calculate FPS
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Poll input events and process one-shot actions
            self.input_manager.poll_events(self.session.phase())?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions, frame_start);
            if !self.running {
                break;
            }

            // Update game state
            let input = FrameInput {
                heading: self.input_manager.heading(),
                cursor: self.cursor_world(),
            };
            self.session.update(&input, frame_start, &mut rand::rng());
            let events = self.session.take_events();
            self.audio_manager.play_events(&events);

            // Render the frame
            terminal.draw(|frame| {
                let view = self.render_view(frame.area());
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the frame budget
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_budget {
                std::thread::sleep(self.frame_budget - elapsed);
            }
        }

        info!("leaving main loop");
        Ok(())
    }

    fn render_view(&self, area: ratatui::layout::Rect) -> RenderView<'_> {
        let config = self.session.config();
        RenderView {
            phase: self.session.phase(),
            player: &self.session.player,
            bullets: &self.session.bullets,
            enemies: &self.session.enemies,
            score: self.session.score,
            max_health: config.max_health,
            victory_score: config.victory_score,
            bullet_radius: config.bullet_radius,
            menu: &self.menu,
            viewport: self.viewport,
            cursor: self.cursor_world(),
            fps: self.fps,
            area,
        }
    }

    fn cursor_world(&self) -> Vec2 {
        let (column, row) = self.input_manager.cursor_cell();
        self.viewport.cell_to_world(column, row)
    }

    /// Process input actions and update game state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction], now: Instant) {
        for action in actions {
            if let InputAction::Resize { columns, rows } = *action {
                self.resize(columns, rows);
                continue;
            }
            if let Some(command) = self.command_for(*action)
                && self.session.apply(command, now) == Flow::Exit
            {
                self.running = false;
                return;
            }
        }
    }

    /// Translates raw input into a session command for the current phase.
    /// Menu clicks are hit-tested against the control regions here.
    fn command_for(&self, action: InputAction) -> Option<Command> {
        match action {
            InputAction::Quit => Some(Command::Exit),
            InputAction::Restart => Some(Command::Restart),
            InputAction::ReturnToMenu => Some(Command::ReturnToMenu),
            InputAction::Click { column, row } => {
                let point = self.viewport.cell_to_world(column, row);
                match self.session.phase() {
                    Phase::Menu => {
                        self.menu.hit_test(point).map(|button| match button {
                            MenuButton::Start => Command::Start,
                            MenuButton::Quit => Command::Quit,
                        })
                    }
                    Phase::Playing => Some(Command::Fire(point)),
                    Phase::GameOver { .. } => None,
                }
            }
            InputAction::Resize { .. } => None,
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        self.viewport = self.viewport.resized(columns, rows);
        let playfield = self.viewport.playfield();
        self.menu = MenuLayout::for_playfield(playfield);
        self.session.resize(playfield);
        info!("resized to {}x{} cells ({}x{} world)", columns, rows, playfield.x, playfield.y);
    }
}
