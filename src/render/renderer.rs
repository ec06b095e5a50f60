use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{EpisodeSummary, Grid, Occupant, Position, Snapshot};
use crate::metrics::GameMetrics;

/// What occupies a cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

impl CellKind {
    pub fn of(snapshot: &Snapshot<'_>, pos: Position) -> Self {
        if pos == snapshot.head() {
            CellKind::Head
        } else if snapshot.covers(pos) {
            CellKind::Body
        } else if pos == snapshot.food {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// Two columns per cell so the board looks roughly square
    fn span(self) -> Span<'static> {
        match self {
            CellKind::Head => Span::styled(
                "■ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
        }
    }
}

/// Banner drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    /// Waiting out the reset cooldown after the given episode
    EpisodeOver(EpisodeSummary),
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        grid: &Grid,
        snapshot: &Snapshot<'_>,
        metrics: &GameMetrics,
        overlay: Overlay,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let board_area = centered(
            chunks[1],
            (grid.width() * 2 + 2) as u16,
            (grid.height() + 2) as u16,
        );
        frame.render_widget(self.render_board(grid, snapshot), board_area);

        match overlay {
            Overlay::None => {}
            Overlay::Paused => {
                let area = centered(board_area, 20, 3);
                frame.render_widget(Clear, area);
                frame.render_widget(
                    self.render_banner(vec![Line::from("PAUSED")], Color::Yellow),
                    area,
                );
            }
            Overlay::EpisodeOver(summary) => {
                let area = centered(board_area, 28, 4);
                frame.render_widget(Clear, area);
                let lines = vec![
                    Line::from(Span::styled(
                        "BITTEN!",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("length {}  score {}", summary.length, summary.score)),
                ];
                frame.render_widget(self.render_banner(lines, Color::Red), area);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, grid: &Grid, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..grid.height() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..grid.width() as i32)
                    .map(|x| CellKind::of(snapshot, Position::new(x, y)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(93, 216, 228)))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let line = Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                snapshot.body.len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value),
            Span::raw("   "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("   "),
            Span::styled("Episode: ", label),
            Span::styled(snapshot.episode.to_string(), value),
            Span::raw("   "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]);

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_banner(&self, lines: Vec<Line<'static>>, color: Color) -> Paragraph<'static> {
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let line = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width`x`height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_kinds() {
        let body = [Position::new(2, 2), Position::new(1, 2)];
        let snapshot = Snapshot {
            body: &body,
            food: Position::new(4, 4),
            score: 0,
            episode: 1,
        };

        assert_eq!(CellKind::of(&snapshot, Position::new(2, 2)), CellKind::Head);
        assert_eq!(CellKind::of(&snapshot, Position::new(1, 2)), CellKind::Body);
        assert_eq!(CellKind::of(&snapshot, Position::new(4, 4)), CellKind::Food);
        assert_eq!(CellKind::of(&snapshot, Position::new(0, 0)), CellKind::Empty);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }

    #[test]
    fn test_render_draws_board_and_overlay() {
        let grid = Grid::new(8, 6).unwrap();
        let body = [Position::new(4, 3)];
        let snapshot = Snapshot {
            body: &body,
            food: Position::new(1, 1),
            score: 3,
            episode: 2,
        };
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &grid, &snapshot, &metrics, Overlay::None))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Snake"));
        assert!(text.contains("■"));
        assert!(text.contains("●"));

        terminal
            .draw(|frame| renderer.render(frame, &grid, &snapshot, &metrics, Overlay::Paused))
            .unwrap();
        assert!(screen_text(&terminal).contains("PAUSED"));
    }
}
