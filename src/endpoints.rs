//! Correlates counter stores with device records and enables telemetry.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::inventory::DeviceRecord;

const CONTROL_FILE: &str = "control";
const ENABLE_VALUE: &str = "1";

/// A telemetry-enabled device ready for polling. Rebuilt wholesale on
/// every discovery cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub bus_id: String,
    pub path: PathBuf,
}

/// Pair each counter store with the devices whose bus id appears in its
/// path string. Substring containment is deliberate: the sysfs segments
/// between the PCI address and the telemetry directory are not stable
/// across kernel/driver versions, so exact path construction would be
/// more fragile, not less. Empty bus ids never match.
pub fn correlate(paths: &[PathBuf], devices: &[DeviceRecord]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    for path in paths {
        let s = path.to_string_lossy();
        for dev in devices {
            if !dev.bus_id.is_empty() && s.contains(&dev.bus_id) {
                endpoints.push(Endpoint {
                    name: dev.name.clone(),
                    bus_id: dev.bus_id.clone(),
                    path: path.clone(),
                });
            }
        }
    }
    endpoints
}

/// Best-effort enable: write `1` into each endpoint's control file. A
/// failed write keeps the endpoint in the set; later polls of it just
/// read zeros or stale counters.
pub fn enable_telemetry(endpoints: &[Endpoint]) {
    for ep in endpoints {
        let control = ep.path.join(CONTROL_FILE);
        if let Err(e) = fs::write(&control, ENABLE_VALUE) {
            warn!("telemetry enable failed for {}: {e}", control.display());
        } else {
            debug!("telemetry enabled for {} (bus {})", ep.name, ep.bus_id);
        }
    }
}
