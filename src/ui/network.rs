use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

use crate::format::{format_bytes, format_rate};
use crate::system::history::{Series, SeriesHistory};
use crate::system::snapshot::NetworkView;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    network: Option<&NetworkView>,
    history: &SeriesHistory,
    theme: &Theme,
) {
    let Some(network) = network else {
        render_unavailable(frame, area, theme);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rx_title = format!(
        " \u{2193} {}  total {}  ({} if) ",
        format_rate(network.rx_per_sec),
        format_bytes(network.rx_total),
        network.interfaces
    );
    let tx_title = format!(
        " \u{2191} {}  total {} ",
        format_rate(network.tx_per_sec),
        format_bytes(network.tx_total)
    );

    render_spark(frame, chunks[0], &rx_title, &history.rx, theme.rx_color, theme);
    render_spark(frame, chunks[1], &tx_title, &history.tx, theme.tx_color, theme);
}

fn render_unavailable(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Network ",
            Style::default().fg(theme.text_primary),
        ));
    let body = Paragraph::new(Span::styled(
        "unavailable",
        Style::default().fg(theme.text_secondary),
    ))
    .block(block);
    frame.render_widget(body, area);
}

fn render_spark(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &Series,
    color: Color,
    theme: &Theme,
) {
    let data = series.tail(area.width.saturating_sub(2) as usize);
    let spark = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.overlay_border))
                .title(Span::styled(
                    title.to_string(),
                    Style::default().fg(theme.text_primary),
                )),
        )
        .data(&data)
        .style(Style::default().fg(color));
    frame.render_widget(spark, area);
}
