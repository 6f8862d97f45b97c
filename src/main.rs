//! Entry point for the qattop TUI. No functional flags by design: run it
//! as root on a host with QAT hardware and it finds everything itself.

mod app;
mod config;
mod counters;
mod endpoints;
mod inventory;
mod locator;
mod runner;
mod ui;

use anyhow::Result;
use app::App;
use config::Config;
use std::env;

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog}\n\
         Env overrides: QATTOP_STATUS_CMD (default: adf_ctl status), \
         QATTOP_SYSFS_ROOT (default: /sys/devices), QATTOP_LOG (tracing filter)"
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging stays on stderr and silent by default so the TUI is clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("QATTOP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let prog = args.next().unwrap_or_else(|| "qattop".into());
    if let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                eprintln!("{}", usage(&prog));
                return Ok(());
            }
            _ => {
                eprintln!("Unexpected argument: {arg}\n{}", usage(&prog));
                std::process::exit(2);
            }
        }
    }

    // Fatal discovery failure surfaces here, before the terminal is
    // touched; anything later tears the terminal down first.
    let mut app = App::new(Config::from_env())?;
    app.run().await
}
