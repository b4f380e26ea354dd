pub mod cpu;
pub mod header;
pub mod help;
pub mod memory;
pub mod network;
pub mod processes;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw<S, C>(frame: &mut Frame, app: &App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(memory::height(&app.view)),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(columns[1]);

    header::render(frame, chunks[0], &app.view, &app.theme);
    cpu::render(
        frame,
        left[0],
        &app.view.cpu,
        &app.history.cpu,
        app.show_per_core,
        &app.theme,
    );
    memory::render(frame, left[1], &app.view, &app.theme);
    network::render(
        frame,
        right[0],
        app.view.network.as_ref(),
        &app.history,
        &app.theme,
    );
    processes::render(
        frame,
        right[1],
        &app.view.processes,
        app.view.process_count,
        &app.theme,
    );
    statusbar::render(frame, chunks[2], &app.keybinds, &app.theme);

    // Help overlay, rendered last to appear on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
