use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameOverReason, GameSnapshot, Phase, Position};
use crate::metrics::GameMetrics;

const OVERLAY_WIDTH: u16 = 36;
const OVERLAY_HEIGHT: u16 = 9;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        // Two columns per cell plus the border on each side
        let cells = snapshot.board_cells.max(0) as u16;
        let game_area = centered_rect(chunks[1], cells * 2 + 2, cells + 2);
        frame.render_widget(self.render_grid(snapshot), game_area);

        if let Some(overlay) = self.render_overlay(snapshot, metrics) {
            let popup = centered_rect(game_area, OVERLAY_WIDTH, OVERLAY_HEIGHT);
            frame.render_widget(Clear, popup);
            frame.render_widget(overlay, popup);
        }

        let controls = self.render_controls(snapshot.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.board_cells.max(0) as usize);

        for y in 0..snapshot.board_cells {
            let spans: Vec<Span> = (0..snapshot.board_cells)
                .map(|x| {
                    let pos = Position::new(x, y);

                    if Some(pos) == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if snapshot.snake.contains(&pos) {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    } else if pos == snapshot.food {
                        Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let border = match snapshot.phase {
            Phase::GameOver => Color::Red,
            Phase::Paused => Color::Yellow,
            Phase::NotStarted | Phase::Running => Color::White,
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(format!(" Snake | {} ", snapshot.phase.as_str())),
        )
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let text = vec![Line::from(vec![
            label("Score: "),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            label("Speed: "),
            value(format!("{}ms", snapshot.speed_ms)),
            Span::raw("    "),
            label("Length: "),
            value(snapshot.snake.len().to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("Best: "),
            value(metrics.high_score.to_string()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(
        &self,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
    ) -> Option<Paragraph<'static>> {
        let (accent, lines) = match snapshot.phase {
            Phase::Running => return None,
            Phase::NotStarted => (
                Color::Green,
                vec![
                    heading("SNAKE", Color::Green),
                    Line::from(""),
                    prompt("Enter", Color::Green, " to start"),
                    prompt("Arrows/WASD", Color::Cyan, " to steer"),
                ],
            ),
            Phase::Paused => (
                Color::Yellow,
                vec![
                    heading("PAUSED", Color::Yellow),
                    Line::from(""),
                    Line::from(format!("Score: {}", snapshot.score)),
                    prompt("Space", Color::Yellow, " to resume"),
                ],
            ),
            Phase::GameOver => {
                let reason = match snapshot.game_over_reason {
                    Some(GameOverReason::Wall) => "Hit the wall",
                    Some(GameOverReason::SelfCollision) => "Ran into yourself",
                    Some(GameOverReason::BoardFilled) => "The board is full",
                    None => "",
                };
                let mut lines = vec![
                    heading("GAME OVER", Color::Red),
                    Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
                    Line::from(vec![
                        Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            snapshot.score.to_string(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                ];
                if metrics.new_best {
                    lines.push(heading("New best!", Color::Magenta));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "R",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "Q",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to quit", Style::default().fg(Color::Gray)),
                ]));
                (Color::Red, lines)
            }
        };

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(accent)),
            ),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let pause_hint = match phase {
            Phase::Paused => " to resume | ",
            _ => " to pause | ",
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading(text: &'static str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn prompt(key: &'static str, color: Color, rest: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Gray)),
        Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(rest, Style::default().fg(Color::Gray)),
    ])
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
