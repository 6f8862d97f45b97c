//! Locates kernel telemetry counter stores under the sysfs device tree.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory name the driver gives each device's telemetry store.
const TELEMETRY_DIR: &str = "telemetry";

/// All `telemetry` directories below `root`, sorted by a bus-like key so
/// correlation order is stable across runs. Unreadable entries are
/// skipped and an empty result is valid (driver built without the
/// telemetry feature, or no hardware at all).
pub fn find_counter_stores(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == TELEMETRY_DIR)
        .map(|e| e.into_path())
        .collect();
    found.sort_by_key(|p| sort_key(p));
    found
}

// The token between the first and second ':' in the path holds the bus
// number in PCI sysfs naming; sorting on it keeps ordering reproducible
// even when the walk order changes between kernels.
fn sort_key(path: &Path) -> String {
    let s = path.to_string_lossy();
    s.split(':').nth(1).unwrap_or_default().to_string()
}
