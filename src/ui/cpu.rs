use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

use crate::system::history::Series;
use crate::system::severity::usage_severity;
use crate::system::snapshot::CpuView;
use crate::ui::theme::Theme;

const BAR_WIDTH: usize = 20;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    cpu: &CpuView,
    history: &Series,
    show_per_core: bool,
    theme: &Theme,
) {
    let severity = usage_severity(cpu.aggregate_percent.into());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" CPU {:.0}% ", cpu.aggregate_percent),
            Style::default()
                .fg(theme.severity_color(severity))
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !show_per_core || cpu.per_core_percent.is_empty() {
        render_sparkline(frame, inner, history, theme);
        return;
    }

    let core_rows = (cpu.per_core_percent.len() as u16).min(inner.height.saturating_sub(2));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(core_rows)])
        .split(inner);

    render_sparkline(frame, chunks[0], history, theme);

    let lines: Vec<Line> = cpu
        .per_core_percent
        .iter()
        .enumerate()
        .take(core_rows as usize)
        .map(|(id, percent)| core_line(id, *percent, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_sparkline(frame: &mut Frame, area: Rect, history: &Series, theme: &Theme) {
    let data = history.tail(area.width as usize);
    let sparkline = Sparkline::default()
        .data(&data)
        .max(100)
        .style(Style::default().fg(theme.sparkline_color));
    frame.render_widget(sparkline, area);
}

fn core_line(id: usize, percent: f32, theme: &Theme) -> Line<'static> {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f32).round() as usize;
    let color = theme.severity_color(usage_severity(percent.into()));

    Line::from(vec![
        Span::styled(
            format!("cpu{id:<3}"),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "\u{2591}".repeat(BAR_WIDTH - filled),
            Style::default().fg(theme.gauge_unfilled),
        ),
        Span::styled(
            format!(" {percent:>5.1}%"),
            Style::default().fg(theme.text_primary),
        ),
    ])
}
