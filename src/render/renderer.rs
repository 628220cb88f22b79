use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::surface::{GridCanvas, draw_board};
use crate::game::{GameOverReason, GameState, Status};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, status: Status) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, status);
        frame.render_widget(stats, chunks[0]);

        match status {
            Status::GameOver(reason) => {
                let game_over = self.render_game_over(state, reason);
                frame.render_widget(game_over, chunks[1]);
            }
            _ => {
                let grid = self.render_grid(state, status);
                frame.render_widget(grid, centered(chunks[1], state));
            }
        }

        let controls = self.render_controls(status);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState, status: Status) -> Paragraph<'static> {
        let mut canvas = GridCanvas::new();
        draw_board(state, &mut canvas);

        let border_color = match status {
            Status::Running => Color::White,
            _ => Color::DarkGray,
        };

        Paragraph::new(canvas.lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, status: Status) -> Paragraph<'static> {
        let (label, color) = match status {
            Status::Ready => ("READY", Color::Cyan),
            Status::Running => ("RUNNING", Color::Green),
            Status::Paused => ("PAUSED", Color::Yellow),
            Status::GameOver(reason) if reason.is_win() => ("BOARD CLEARED", Color::Green),
            Status::GameOver(_) => ("GAME OVER", Color::Red),
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}ms", state.speed_ms), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, reason: GameOverReason) -> Paragraph<'static> {
        let (title, detail, color) = match reason {
            GameOverReason::Wall => ("GAME OVER", "You hit the wall", Color::Red),
            GameOverReason::SelfCollision => ("GAME OVER", "You ran into yourself", Color::Red),
            GameOverReason::BoardFull => ("YOU WIN", "The snake fills the board", Color::Green),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, status: Status) -> Paragraph<'static> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));

        let mut spans = vec![key("↑↓←→"), Span::raw("/"), key("WASD"), Span::raw(" move | ")];
        match status {
            Status::Running => spans.extend([key("Space"), Span::raw("/"), key("P"), Span::raw(" pause | ")]),
            _ => spans.extend([key("Space"), Span::raw("/"), key("G"), Span::raw(" start | ")]),
        }
        spans.extend([
            key("R"),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Board-sized rectangle centered in `area`, borders included
fn centered(area: Rect, state: &GameState) -> Rect {
    let width = state.grid.cols_u16().saturating_mul(2).saturating_add(2);
    let height = state.grid.rows_u16().saturating_add(2);

    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, board, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(column);

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Grid, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        let grid = Grid::new(200, 200, 20).unwrap();
        let snake = Snake::new(Position::new(5, 5), Direction::Right);
        GameState::new(grid, snake, Some(Position::new(1, 1)), 4, 120)
    }

    fn screen(state: &GameState, status: Status) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, status))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hud_shows_scores() {
        let text = screen(&state(), Status::Ready);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Best: 4"));
        assert!(text.contains("120ms"));
        assert!(text.contains("READY"));
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = state();
        state.score = 3;
        state.game_over = Some(GameOverReason::Wall);

        let text = screen(&state, Status::GameOver(GameOverReason::Wall));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 3"));
        assert!(text.contains("Enter"));
    }

    #[test]
    fn test_board_full_shown_as_win() {
        let text = screen(&state(), Status::GameOver(GameOverReason::BoardFull));
        assert!(text.contains("YOU WIN"));
    }
}
