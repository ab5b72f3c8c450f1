use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::power::report;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(2),               // Title + prompt
            Constraint::Length(3),               // Input box
            Constraint::Min(5),                  // Results box
            Constraint::Length(1),               // Info line
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    draw_header(f, app, chunks[0]);
    draw_input_box(f, app, chunks[1]);
    draw_results_box(f, app, chunks[2]);
    draw_info_line(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, app),
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            report::TITLE,
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(report::PROMPT, Style::default().fg(theme.text_dim))),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_input_box(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", report::INPUT_LABEL),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let line = Line::from(vec![
        Span::styled(app.input_buffer.as_str(), Style::default().fg(theme.text)),
        Span::styled("█", Style::default().fg(theme.accent)),
        Span::styled(
            format!("  (step {})", app.config.step),
            Style::default().fg(theme.text_dim),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_results_box(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(" Results ", Style::default().fg(theme.inactive)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.inactive));

    let lines: Vec<Line> = match app.results() {
        Ok(powers) => report::lines(&powers)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.success))))
            .collect(),
        Err(e) => vec![Line::from(vec![
            Span::styled("Error: ", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::styled(e.to_string(), Style::default().fg(theme.danger)),
        ])],
    };

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(content, area);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => Line::from(Span::styled(status.as_str(), Style::default().fg(app.theme.accent))),
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hints: [(&str, &str); 5] = [
        ("↑↓", "Step"),
        ("0-9 - .", "Edit"),
        ("r", "Reset"),
        ("h", "Help"),
        ("q", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 50 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(hint_spans)), area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 60 },
        area
    );

    f.render_widget(Clear, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let section = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(theme.header).add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        section("═══ Input ═══"),
        Line::from(vec![key("  0-9 - .   "), Span::raw("Type a value")]),
        Line::from(vec![key("  Backspace "), Span::raw("Delete last character")]),
        Line::from(vec![key("  Delete    "), Span::raw("Clear the field")]),
        Line::from(vec![key("  ↑ / +     "), Span::raw(format!("Add {}", app.config.step))]),
        Line::from(vec![key("  ↓         "), Span::raw(format!("Subtract {}", app.config.step))]),
        Line::from(vec![key("  r         "), Span::raw(format!("Reset to {}", app.config.default_value))]),
        Line::from(""),
        section("═══ General ═══"),
        Line::from(vec![key("  h / ?     "), Span::raw("Toggle this help")]),
        Line::from(vec![key("  q / Esc   "), Span::raw("Quit")]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
