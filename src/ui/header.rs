//! Top header bar with title and quit hint.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect) {
    let title = "qattop — Intel(R) QuickAssist device utilization  (press 'q' to quit)";
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
