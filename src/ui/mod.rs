//! UI module root: exposes drawing functions for individual panels.

pub mod header;
pub mod table;

use ratatui::layout::{Constraint, Direction, Layout};

use crate::counters::UtilSnapshot;

/// Draw the whole frame: header bar on top, device table below.
pub fn draw(f: &mut ratatui::Frame<'_>, rows: &[(String, UtilSnapshot)], endpoint_count: usize) {
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(f.area());

    header::draw_header(f, areas[0]);
    table::draw_util_table(f, areas[1], rows, endpoint_count);
}
