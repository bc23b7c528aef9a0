use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::entities::Phase;
use crate::session::Heading;

/// Represents discrete input that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Primary button pressed at a terminal cell
    Click { column: u16, row: u16 },
    Restart,
    ReturnToMenu,
    Resize { columns: u16, rows: u16 },
    Quit,
}

/// A movement key that is either held until released or, on terminals that
/// never report releases, for a few frames after its last press.
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    held: bool,
    frames_left: u8,
}

impl HeldKey {
    fn is_down(&self) -> bool {
        self.held || self.frames_left > 0
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: HeldKey,
    down: HeldKey,
    left: HeldKey,
    right: HeldKey,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl KeyState {
    fn key_mut(&mut self, direction: Direction) -> &mut HeldKey {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Manages input polling and translates raw terminal events into game input
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Last known pointer cell
    cursor: (u16, u16),
    /// Whether the terminal reports key releases
    reports_release: bool,
    hold_frames: u8,
}

impl InputManager {
    /// Creates a new InputManager. Without release reporting a key counts
    /// as held for `hold_frames` frames after each press or repeat.
    pub fn new(reports_release: bool, hold_frames: u8) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            cursor: (0, 0),
            reports_release,
            hold_frames: hold_frames.max(1),
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before reading input
    pub fn poll_events(&mut self, phase: Phase) -> color_eyre::Result<()> {
        self.begin_frame(phase);

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, phase);
        }

        Ok(())
    }

    /// Clears last frame's one-shot actions and ages timed key holds.
    pub fn begin_frame(&mut self, phase: Phase) {
        self.oneshot_actions.clear();

        if !phase.is_playing() {
            self.key_state.clear();
            return;
        }

        for key in [
            &mut self.key_state.up,
            &mut self.key_state.down,
            &mut self.key_state.left,
            &mut self.key_state.right,
        ] {
            key.frames_left = key.frames_left.saturating_sub(1);
        }
    }

    pub fn handle_event(&mut self, event: Event, phase: Phase) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, phase),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Resize(columns, rows) => {
                self.oneshot_actions
                    .push(InputAction::Resize { columns, rows });
            }
            _ => {}
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    fn handle_key_event(&mut self, key_event: KeyEvent, phase: Phase) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase),
            KeyEventKind::Repeat => self.handle_key_repeat(key_event.code, phase),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    /// Handles key press events
    fn handle_key_press(&mut self, key_event: KeyEvent, phase: Phase) {
        // Check for quit keys first (works in any state)
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match phase {
            Phase::GameOver { .. } => match key_event.code {
                KeyCode::Char(' ') => self.oneshot_actions.push(InputAction::Restart),
                KeyCode::Esc => self.oneshot_actions.push(InputAction::ReturnToMenu),
                _ => {}
            },
            Phase::Playing => {
                if let Some(direction) = Direction::from_code(key_event.code) {
                    self.hold(direction);
                }
            }
            Phase::Menu => {}
        }
    }

    fn handle_key_repeat(&mut self, code: KeyCode, phase: Phase) {
        if phase.is_playing()
            && let Some(direction) = Direction::from_code(code)
        {
            self.hold(direction);
        }
    }

    /// Handles key release events
    fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(direction) = Direction::from_code(code) {
            *self.key_state.key_mut(direction) = HeldKey::default();
        }
    }

    fn hold(&mut self, direction: Direction) {
        if self.reports_release {
            self.key_state.key_mut(direction).held = true;
        } else {
            // Without releases a stale countdown on the opposite key would
            // fight the new direction
            *self.key_state.key_mut(direction.opposite()) = HeldKey::default();
            self.key_state.key_mut(direction).frames_left = self.hold_frames;
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let cell = (mouse_event.column, mouse_event.row);
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.cursor = cell;
                self.oneshot_actions.push(InputAction::Click {
                    column: cell.0,
                    row: cell.1,
                });
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.cursor = cell;
            }
            _ => {}
        }
    }

    /// One-shot actions gathered this frame, in arrival order
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Movement keys currently held
    pub fn heading(&self) -> Heading {
        Heading {
            up: self.key_state.up.is_down(),
            down: self.key_state.down.is_down(),
            left: self.key_state.left.is_down(),
            right: self.key_state.right.is_down(),
        }
    }

    pub fn cursor_cell(&self) -> (u16, u16) {
        self.cursor
    }
}
