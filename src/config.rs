//! Runtime configuration. qattop takes no flags; the status command and
//! sysfs root can be overridden through the environment (handy for test
//! rigs without real hardware).

use std::path::PathBuf;
use std::time::Duration;

/// One render tick: poll every endpoint and redraw the table.
pub const RENDER_INTERVAL: Duration = Duration::from_secs(2);

/// Full discovery (status command + sysfs walk + correlation) re-runs
/// every Nth render tick to pick up devices going up/down or hot-adds.
pub const DISCOVERY_EVERY_TICKS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Control-plane status command, shell-interpreted.
    pub status_cmd: String,
    /// Root of the sysfs subtree searched for telemetry directories.
    pub sysfs_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let status_cmd =
            std::env::var("QATTOP_STATUS_CMD").unwrap_or_else(|_| "adf_ctl status".into());
        let sysfs_root = std::env::var_os("QATTOP_SYSFS_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/sys/devices"));
        Self {
            status_cmd,
            sysfs_root,
        }
    }
}
