//! App state and main loop: discovery, counter polling, drawing, cadence.

use std::io;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::sleep;
use tracing::debug;

use crate::config::{Config, DISCOVERY_EVERY_TICKS, RENDER_INTERVAL};
use crate::counters::{read_snapshot, UtilSnapshot};
use crate::endpoints::{correlate, enable_telemetry, Endpoint};
use crate::inventory::{build_inventory, DeviceRecord};
use crate::locator::find_counter_stores;
use crate::ui;

/// One discovery cycle's output. Wholesale-replaced on every periodic
/// re-discovery; nothing in it is mutated in between.
#[derive(Debug)]
pub struct Discovery {
    pub devices: Vec<DeviceRecord>,
    pub endpoints: Vec<Endpoint>,
}

/// Run the full pipeline: status inventory, sysfs walk, correlation,
/// telemetry enable. Zero correlated endpoints is the one unrecoverable
/// condition: there is nothing to display.
pub fn discover(cfg: &Config) -> Result<Discovery> {
    let devices = build_inventory(&cfg.status_cmd);
    let paths = find_counter_stores(&cfg.sysfs_root);
    let endpoints = correlate(&paths, &devices);
    if endpoints.is_empty() {
        bail!("no telemetry-capable QAT endpoints found");
    }
    enable_telemetry(&endpoints);
    debug!(
        "discovery: {} device(s), {} endpoint(s)",
        devices.len(),
        endpoints.len()
    );
    Ok(Discovery { devices, endpoints })
}

pub struct App {
    cfg: Config,
    discovery: Discovery,
    /// Rows that rendered successfully this tick (name, snapshot).
    rows: Vec<(String, UtilSnapshot)>,
    tick: u64,
    should_quit: bool,
}

impl App {
    /// First discovery happens before the terminal enters raw mode so a
    /// fatal zero-endpoint result prints cleanly to stderr.
    pub fn new(cfg: Config) -> Result<Self> {
        let discovery = discover(&cfg)?;
        Ok(Self {
            cfg,
            discovery,
            rows: Vec::new(),
            tick: 0,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown happens even when a periodic discovery turned fatal
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Input (non-blocking); interrupt is only honored here, at the
            // top of the loop, so in-flight polls finish on their own.
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    match k.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            self.should_quit = true;
                        }
                        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                            self.should_quit = true;
                        }
                        _ => {}
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Poll every endpoint, then draw
            self.poll_counters();
            let endpoint_count = self.discovery.endpoints.len();
            terminal.draw(|f| ui::draw(f, &self.rows, endpoint_count))?;

            // Tick rate
            sleep(RENDER_INTERVAL).await;

            // Periodic re-discovery tolerates hot-adds and up/down flaps
            self.tick += 1;
            if self.tick % DISCOVERY_EVERY_TICKS == 0 {
                terminal.clear()?;
                self.discovery = discover(&self.cfg)?;
            }
        }
        Ok(())
    }

    /// A parse failure drops only that endpoint's row for this tick;
    /// other endpoints and the cycle are unaffected.
    fn poll_counters(&mut self) {
        self.rows.clear();
        for ep in &self.discovery.endpoints {
            match read_snapshot(ep) {
                Ok(snap) => self.rows.push((ep.name.clone(), snap)),
                Err(e) => debug!("skipping {} this tick: {e:#}", ep.name),
            }
        }
    }
}
