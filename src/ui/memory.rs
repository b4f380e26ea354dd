use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge};

use crate::format::{format_bytes, format_kib, truncate_unicode};
use crate::system::severity::usage_severity;
use crate::system::snapshot::{TickView, disk_percent};
use crate::ui::theme::Theme;

/// Rows needed for the memory gauge plus one gauge per disk.
pub fn height(view: &TickView) -> u16 {
    3 + if view.disks.is_empty() {
        0
    } else {
        2 + view.disks.len() as u16
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let disk_rows = height(view).saturating_sub(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(disk_rows)])
        .split(area);

    render_memory(frame, chunks[0], view, theme);
    if disk_rows > 0 {
        render_disks(frame, chunks[1], view, theme);
    }
}

fn render_memory(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let percent = view.memory.percent();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Memory ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.severity_color(usage_severity(percent)))
                .bg(theme.gauge_unfilled),
        )
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {} ({percent:.0}%)",
            format_kib(view.memory.used_kib),
            format_kib(view.memory.total_kib),
        ));

    frame.render_widget(gauge, area);
}

fn render_disks(frame: &mut Frame, area: Rect, view: &TickView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Disks ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(view.disks.iter().map(|_| Constraint::Length(1)))
        .split(inner);

    for (disk, row) in view.disks.iter().zip(rows.iter()) {
        let percent = disk_percent(disk);
        let label = format!(
            "{} {} / {} ({percent:.0}%)",
            truncate_unicode(&disk.mount, 16),
            format_bytes(disk.used),
            format_bytes(disk.total),
        );
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(theme.severity_color(usage_severity(percent)))
                    .bg(theme.gauge_unfilled),
            )
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, *row);
    }
}
