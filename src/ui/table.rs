//! Device utilization table with per-cell coloring by load.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::counters::UtilSnapshot;

const COLS: [Constraint; 8] = [
    Constraint::Min(12),    // Device
    Constraint::Length(8),  // Comp %
    Constraint::Length(8),  // Decomp %
    Constraint::Length(8),  // PKE %
    Constraint::Length(8),  // Cipher %
    Constraint::Length(8),  // Auth %
    Constraint::Length(8),  // UCS %
    Constraint::Length(12), // Latency (ns)
];

pub fn draw_util_table(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    rows: &[(String, UtilSnapshot)],
    endpoint_count: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Devices ({endpoint_count})"));

    let header = Row::new(vec![
        "Device", "Comp %", "Decomp %", "PKE %", "Cipher %", "Auth %", "UCS %", "Lat (ns)",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|(name, s)| {
        Row::new(vec![
            Cell::from(name.clone()),
            pct_cell(s.compression_pct),
            pct_cell(s.decompression_pct),
            pct_cell(s.public_key_pct),
            pct_cell(s.cipher_pct),
            pct_cell(s.auth_pct),
            pct_cell(s.compression_service_pct),
            Cell::from(s.latency_ns.to_string()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(body, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}

fn pct_cell(v: u64) -> Cell<'static> {
    let fg = match v {
        x if x < 25 => Color::Green,
        x if x < 60 => Color::Yellow,
        _ => Color::Red,
    };
    Cell::from(format!("{v:>3}")).style(Style::default().fg(fg))
}
