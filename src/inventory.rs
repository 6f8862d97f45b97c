//! Builds the device inventory from control-plane status output.

use crate::runner::run_shell;
use tracing::warn;

/// Hardware type token (as the status tool prints it, trailing comma and
/// all) whose devices expose the telemetry feature.
const SUPPORTED_TYPE: &str = "4xxx,";

// bsf: tokens are fixed-width domain:bus:slot.function; the bus number
// sits at byte offsets 5..7.
const BUS_OFFSET: usize = 5;
const BUS_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevState {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub name: String,
    /// Correlation key against telemetry paths; empty when the status
    /// output carried no usable bsf: token.
    pub bus_id: String,
    pub telemetry_capable: bool,
    pub state: DevState,
}

/// Run the status command and parse its output. A failed command is
/// treated as empty output, which yields an empty inventory.
pub fn build_inventory(status_cmd: &str) -> Vec<DeviceRecord> {
    let out = run_shell(status_cmd);
    if !out.success {
        warn!("status command failed: {}", out.stderr.trim());
        return Vec::new();
    }
    parse_status(&out.stdout)
}

/// Token-driven state machine over whitespace-split status output.
/// `qat_dev*` opens a candidate, `type:`/`bsf:` fill it in, `state:`
/// finalizes it. Only telemetry-capable devices in the `up` state are
/// retained; a candidate missing `type:` or `bsf:` finalizes with its
/// defaults. Malformed output yields a short inventory, never an error.
pub fn parse_status(text: &str) -> Vec<DeviceRecord> {
    let mut devices = Vec::new();
    let mut name = String::new();
    let mut bus_id = String::new();
    let mut telemetry_capable = false;

    let mut toks = text.split_whitespace().peekable();
    while let Some(tok) = toks.next() {
        if tok.starts_with("qat_dev") {
            name = tok.to_string();
        } else if tok == "type:" {
            if toks.peek() == Some(&SUPPORTED_TYPE) {
                telemetry_capable = true;
            }
        } else if tok == "bsf:" {
            if let Some(bsf) = toks.peek() {
                bus_id = bsf
                    .get(BUS_OFFSET..BUS_OFFSET + BUS_LEN)
                    .unwrap_or_default()
                    .to_string();
            }
        } else if tok == "state:" {
            let state = if toks.peek() == Some(&"up") {
                DevState::Up
            } else {
                DevState::Down
            };
            let rec = DeviceRecord {
                name: std::mem::take(&mut name),
                bus_id: std::mem::take(&mut bus_id),
                telemetry_capable,
                state,
            };
            if rec.telemetry_capable && rec.state == DevState::Up {
                devices.push(rec);
            }
            telemetry_capable = false;
        }
    }
    devices
}
