//! Mapping between terminal cells and world units, and the menu's
//! clickable regions.

use glam::Vec2;
use ratatui::layout::Rect;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl WorldRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Left and top edges are inside, right and bottom edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Start,
    Quit,
}

impl MenuButton {
    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Start => "START",
            MenuButton::Quit => "QUIT",
        }
    }
}

/// Menu control regions; rebuilt whenever the playfield changes size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub start: WorldRect,
    pub quit: WorldRect,
}

impl MenuLayout {
    const BUTTON_WIDTH: f32 = 200.0;
    const BUTTON_HEIGHT: f32 = 50.0;

    pub fn for_playfield(playfield: Vec2) -> Self {
        let center = (playfield / 2.0).floor();
        let left = center.x - Self::BUTTON_WIDTH / 2.0;
        Self {
            start: WorldRect::new(
                left,
                center.y - Self::BUTTON_HEIGHT / 2.0,
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            ),
            quit: WorldRect::new(
                left,
                center.y + Self::BUTTON_HEIGHT,
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            ),
        }
    }

    pub fn hit_test(&self, point: Vec2) -> Option<MenuButton> {
        if self.start.contains(point) {
            Some(MenuButton::Start)
        } else if self.quit.contains(point) {
            Some(MenuButton::Quit)
        } else {
            None
        }
    }

    pub fn buttons(&self) -> [(MenuButton, WorldRect); 2] {
        [(MenuButton::Start, self.start), (MenuButton::Quit, self.quit)]
    }
}

/// The terminal surface: its size in cells and how many world units one
/// cell covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
    pub cell: Vec2,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16, cell_width: f32, cell_height: f32) -> Self {
        Self {
            columns,
            rows,
            cell: Vec2::new(cell_width, cell_height),
        }
    }

    pub fn resized(&self, columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..*self
        }
    }

    /// World-space size of the whole surface.
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(f32::from(self.columns), f32::from(self.rows)) * self.cell
    }

    /// World position at the centre of a terminal cell.
    pub fn cell_to_world(&self, column: u16, row: u16) -> Vec2 {
        (Vec2::new(f32::from(column), f32::from(row)) + 0.5) * self.cell
    }

    /// Cells covered by a world rectangle, clipped to the surface.
    pub fn rect_to_cells(&self, rect: &WorldRect) -> Rect {
        let to_cells = |v: Vec2| (v / self.cell).round();
        let min = to_cells(rect.min).max(Vec2::ZERO);
        let max = to_cells(rect.max())
            .min(Vec2::new(f32::from(self.columns), f32::from(self.rows)))
            .max(min);
        Rect {
            x: min.x as u16,
            y: min.y as u16,
            width: (max.x - min.x) as u16,
            height: (max.y - min.y) as u16,
        }
    }
}
