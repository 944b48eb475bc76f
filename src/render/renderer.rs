use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{CollisionType, Direction, FoodKind, GameState, GameStatus, Position};
use crate::metrics::GameMetrics;

/// Terminal columns used per grid cell, so cells come out roughly square
const CELL_COLUMNS: u16 = 2;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food(FoodKind),
}

/// Classify a single grid cell. The head wins over food and body.
pub fn cell_at(state: &GameState, pos: Position) -> Cell {
    if pos == state.snake.head() {
        Cell::Head
    } else if state.snake.body_segments().any(|&segment| segment == pos) {
        Cell::Body
    } else if pos == state.food.position && state.is_running() {
        Cell::Food(state.food.kind)
    } else {
        Cell::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Redraw the whole screen
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics, paused: bool) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let grid_area = centered_rect(
            framed_extent(state.grid_width, CELL_COLUMNS),
            framed_extent(state.grid_height, 1),
            chunks[1],
        );
        frame.render_widget(self.render_grid(state), grid_area);

        let overlay = match state.status {
            GameStatus::Running if paused => Some(self.render_paused()),
            GameStatus::Running => None,
            GameStatus::GameOver(cause) => Some(self.render_game_over(state, metrics, Some(cause))),
            GameStatus::Won => Some(self.render_game_over(state, metrics, None)),
        };

        if let Some(panel) = overlay {
            let panel_area = centered_rect(36, 8, chunks[1]);
            frame.render_widget(Clear, panel_area);
            frame.render_widget(panel, panel_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let crashed = matches!(state.status, GameStatus::GameOver(_));

        let lines: Vec<Line> = (0..state.grid_height as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid_width as i32)
                    .map(|x| cell_span(cell_at(state, Position::new(x, y)), state.snake.direction, crashed))
                    .collect();
                Line::from(spans)
            })
            .collect();

        // The border is the wall the snake can crash into
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if let Some(active) = state.effect {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("{} ({})", active.effect.name(), active.remaining_ticks),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        cause: Option<CollisionType>,
    ) -> Paragraph<'static> {
        let (title, colour) = match cause {
            Some(CollisionType::Wall) => ("GAME OVER - hit the wall", Color::Red),
            Some(CollisionType::SelfCollision) => ("GAME OVER - bit yourself", Color::Red),
            None => ("YOU WIN - board filled", Color::Green),
        };
        let bold = |c: Color| Style::default().fg(c).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(title, bold(colour))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.score.to_string(), bold(Color::White)),
                Span::styled("   Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), bold(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colour)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let key = Style::default().fg(Color::Cyan);

        Paragraph::new(Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(cell: Cell, heading: Direction, crashed: bool) -> Span<'static> {
    let bold = |c: Color| Style::default().fg(c).add_modifier(Modifier::BOLD);

    match cell {
        Cell::Head if crashed => Span::styled("X ", bold(Color::Red)),
        Cell::Head => {
            let glyph = match heading {
                Direction::Up => "^ ",
                Direction::Down => "v ",
                Direction::Left => "< ",
                Direction::Right => "> ",
            };
            Span::styled(glyph, bold(Color::Cyan))
        }
        Cell::Body if crashed => Span::styled("■ ", Style::default().fg(Color::DarkGray)),
        Cell::Body => Span::styled("■ ", Style::default().fg(Color::Green)),
        Cell::Food(FoodKind::Berry) => Span::styled("● ", bold(Color::Red)),
        Cell::Food(FoodKind::Golden) => Span::styled("$ ", bold(Color::Yellow)),
        Cell::Food(FoodKind::Pepper) => Span::styled("* ", bold(Color::LightRed)),
        Cell::Food(FoodKind::Ice) => Span::styled("+ ", bold(Color::LightBlue)),
        Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
    }
}

/// Terminal cells needed for `cells` grid cells plus the two border lines
fn framed_extent(cells: usize, per_cell: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(per_cell)
        .saturating_add(2)
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
