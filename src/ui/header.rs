use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_uptime;
use crate::system::severity::battery_severity;
use crate::system::snapshot::TickView;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(inner);

    render_identity(frame, chunks[0], view, theme);
    render_sensors(frame, chunks[1], view, theme);
}

fn render_identity(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let secondary = Style::default().fg(theme.text_secondary);
    let unknown = || "unknown".to_string();

    let spans = vec![
        Span::styled(
            " xtop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            view.host.hostname.clone().unwrap_or_else(unknown),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view.host.system_name.clone().unwrap_or_else(unknown), secondary),
        Span::raw("  "),
        Span::styled(
            format!(
                "up {}",
                view.host
                    .uptime_secs
                    .map(format_uptime)
                    .unwrap_or_else(|| "?".to_string())
            ),
            secondary,
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_sensors(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let mut spans = Vec::new();

    if let Some(celsius) = view.temperature_celsius {
        spans.push(Span::styled(
            format!("{celsius:.1}\u{b0}C"),
            Style::default().fg(theme.text_primary),
        ));
        spans.push(Span::raw("  "));
    }

    match &view.battery {
        Some(battery) => {
            let color = theme.severity_color(battery_severity(battery.capacity));
            let marker = if battery.is_charging() { "+" } else { "" };
            spans.push(Span::styled(
                format!("BAT {}%{marker}", battery.capacity),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", battery.status),
                Style::default().fg(theme.text_secondary),
            ));
        }
        None => spans.push(Span::styled(
            "no battery",
            Style::default().fg(theme.text_secondary),
        )),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Right),
        area,
    );
}
