use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::{Marker, border},
    text::{Line, Span},
    widgets::{
        Block, Borders, Gauge, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
    },
};

use crate::entities::{Bullet, Enemy, Phase, Player};
use crate::layout::{MenuButton, MenuLayout, Viewport};

const MENU_BACKGROUND: Color = Color::Rgb(20, 20, 40);
const PLAY_BACKGROUND: Color = Color::Rgb(30, 30, 30);
const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Read-only snapshot of everything a frame needs to draw
pub struct RenderView<'a> {
    pub phase: Phase,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub score: u32,
    pub max_health: u32,
    pub victory_score: u32,
    pub bullet_radius: f32,
    pub menu: &'a MenuLayout,
    pub viewport: Viewport,
    /// Pointer position in world units
    pub cursor: Vec2,
    pub fps: u32,
    pub area: Rect,
}

/// Colour of an enemy by remaining health
pub fn enemy_color(health: u32) -> Color {
    match health {
        h if h >= 3 => Color::Green,
        2 => ORANGE,
        _ => Color::Red,
    }
}

/// Corners of the player's arrowhead in world space: tip first, then the
/// two rear corners.
pub fn player_outline(player: &Player) -> [Vec2; 3] {
    let angle = player.angle.to_radians();
    // Screen y grows downward, so the facing angle's y component flips
    let forward = Vec2::new(angle.cos(), -angle.sin());
    let side = forward.perp();
    [
        player.pos + forward * 25.0,
        player.pos - forward * 25.0 + side * 15.0,
        player.pos - forward * 25.0 - side * 15.0,
    ]
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            Phase::Menu => self.render_menu(frame, view),
            Phase::Playing => self.render_game(frame, view),
            Phase::GameOver { victory } => self.render_game_over(frame, view, victory),
        }
    }

    fn render_menu(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        frame.render_widget(Block::default().bg(MENU_BACKGROUND), area);

        let playfield = view.viewport.playfield();
        let title_row = self.row_at(view, playfield.y / 5.0);
        self.render_centered(
            frame,
            area,
            title_row,
            Line::from("S H O O T E R").bold().fg(Color::Rgb(255, 50, 50)),
        );

        let goal = format!("Survive and reach {} points!", view.victory_score);
        let instructions = ["WASD - Move", "Left Click - Shoot", goal.as_str()];
        for (i, text) in instructions.iter().enumerate() {
            let row = self.row_at(view, playfield.y / 2.0 - 120.0 + i as f32 * 35.0);
            self.render_centered(frame, area, row, Line::from(*text).fg(Color::Gray));
        }

        // Buttons with hover highlight
        for (button, rect) in view.menu.buttons() {
            let cells = view.viewport.rect_to_cells(&rect).intersection(area);
            if cells.is_empty() {
                continue;
            }
            let hovered = rect.contains(view.cursor);
            let color = match (button, hovered) {
                (MenuButton::Start, false) => Color::Rgb(0, 120, 0),
                (MenuButton::Start, true) => Color::Rgb(0, 180, 0),
                (MenuButton::Quit, false) => Color::Rgb(120, 0, 0),
                (MenuButton::Quit, true) => Color::Rgb(180, 0, 0),
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(Color::White))
                .bg(color);
            let inner = block.inner(cells);
            frame.render_widget(block, cells);
            if inner.height > 0 {
                let label_area = Rect {
                    y: inner.y + inner.height / 2,
                    height: 1,
                    ..inner
                };
                frame.render_widget(
                    Paragraph::new(button.label())
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    label_area,
                );
            }
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let playfield = view.viewport.playfield();
        let height = f64::from(playfield.y);

        let canvas = Canvas::default()
            .background_color(PLAY_BACKGROUND)
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(playfield.x)])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for bullet in view.bullets {
                    let (x, y) = to_canvas(bullet.pos, height);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: f64::from(view.bullet_radius),
                        color: Color::Yellow,
                    });
                }

                for enemy in view.enemies {
                    let (x, y) = to_canvas(enemy.pos, height);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: f64::from(enemy.radius),
                        color: enemy_color(enemy.health),
                    });
                }

                draw_player(ctx, view.player, height);
            });
        frame.render_widget(canvas, area);

        // HUD - score on the first row, health bar on the second
        let score_line = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", view.fps), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(
            Paragraph::new(score_line),
            Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: area.height.min(1),
            },
        );

        if area.height > 2 {
            let ratio = if view.max_health == 0 {
                0.0
            } else {
                f64::from(view.player.health.min(view.max_health)) / f64::from(view.max_health)
            };
            let bar_width = area.width.saturating_sub(2).min(25);
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Red).bg(Color::DarkGray))
                    .ratio(ratio)
                    .label(""),
                Rect {
                    x: area.x + 1,
                    y: area.y + 1,
                    width: bar_width,
                    height: 1,
                },
            );
            let label_x = area.x + 2 + bar_width;
            frame.render_widget(
                Paragraph::new(format!("HP: {}/{}", view.player.health, view.max_health))
                    .style(Style::default().fg(Color::White)),
                Rect {
                    x: label_x,
                    y: area.y + 1,
                    width: area.width.saturating_sub(label_x.saturating_sub(area.x)),
                    height: 1,
                },
            );
        }

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Click: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        if area.height > 3 {
            let controls_area = Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView, victory: bool) {
        let area = view.area;
        frame.render_widget(Block::default().bg(PLAY_BACKGROUND), area);

        let playfield = view.viewport.playfield();
        let center = playfield.y / 2.0;

        let headline = if victory {
            Line::from("VICTORY!").green().bold()
        } else {
            Line::from("GAME OVER").red().bold()
        };
        let lines = [
            (center - 80.0, headline),
            (
                center,
                Line::from(format!("Final Score: {}", view.score)).white().bold(),
            ),
            (center + 60.0, Line::from("Press SPACE to Restart").white()),
            (center + 100.0, Line::from("Press ESC for Menu").gray()),
        ];
        for (world_y, line) in lines {
            let row = self.row_at(view, world_y);
            self.render_centered(frame, area, row, line);
        }
    }

    /// Terminal row holding a world-space y coordinate
    fn row_at(&self, view: &RenderView, world_y: f32) -> u16 {
        let row = (world_y / view.viewport.cell.y).floor().max(0.0) as u16;
        view.area.y + row
    }

    fn render_centered(&self, frame: &mut Frame, area: Rect, row: u16, line: Line) {
        if row < area.y || row >= area.y + area.height {
            return;
        }
        let line_area = Rect {
            x: area.x,
            y: row,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), line_area);
    }
}

/// Canvas space has y growing upward
fn to_canvas(pos: Vec2, height: f64) -> (f64, f64) {
    (f64::from(pos.x), height - f64::from(pos.y))
}

fn draw_player(ctx: &mut Context, player: &Player, height: f64) {
    let corners = player_outline(player).map(|corner| to_canvas(corner, height));
    for i in 0..corners.len() {
        let (x1, y1) = corners[i];
        let (x2, y2) = corners[(i + 1) % corners.len()];
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color: Color::Red,
        });
    }
}
