use crate::ui::DashboardState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_ui(f: &mut Frame, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Body
        ])
        .split(f.area());

    // HUD
    let hud = Paragraph::new(Span::styled(
        state.hud.as_str(),
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    // Maze
    let field: Vec<Line> = state
        .field
        .iter()
        .map(|s| Line::from(Span::raw(s.as_str())))
        .collect();
    let field = Paragraph::new(field)
        .block(Block::default().borders(Borders::ALL).title("Maze"))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    f.render_widget(field, columns[0]);

    // Plan
    let plan: Vec<Line> = state
        .plan
        .iter()
        .map(|s| Line::from(Span::raw(s.as_str())))
        .collect();
    let plan = Paragraph::new(plan)
        .block(Block::default().borders(Borders::ALL).title("Plan (q to quit)"))
        .style(Style::default().fg(Color::Green).bg(Color::Black));
    f.render_widget(plan, columns[1]);
}
