//! Top processes table, busiest first.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{format_kib, truncate_unicode};
use crate::system::severity::usage_severity;
use crate::system::tracker::ProcessRow;
use crate::ui::theme::Theme;

const COLS: [Constraint; 6] = [
    Constraint::Length(8),  // PID
    Constraint::Min(12),    // Name
    Constraint::Length(6),  // UID
    Constraint::Length(7),  // CPU %
    Constraint::Length(10), // Mem
    Constraint::Length(2),  // State
];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProcessRow],
    total: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes ({total} total) "),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let name_width = area.width.saturating_sub(8 + 6 + 7 + 10 + 2 + 7) as usize;
    let table_rows = rows.iter().map(|p| {
        let cpu_color = theme.severity_color(usage_severity(p.cpu_percent.into()));
        Row::new(vec![
            Cell::from(p.pid.to_string()).style(Style::default().fg(theme.text_secondary)),
            Cell::from(truncate_unicode(&p.name, name_width.max(4))),
            Cell::from(p.uid.map_or_else(|| "-".to_string(), |uid| uid.to_string())),
            Cell::from(format!("{:>6.1}", p.cpu_percent)).style(Style::default().fg(cpu_color)),
            Cell::from(format_kib(p.memory_kib)),
            Cell::from(p.state.to_string()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let header = Row::new(vec!["PID", "NAME", "UID", "  CPU%", "MEM", "S"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(table_rows, COLS)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}
