//! Reads one endpoint's counter dump and aggregates it into per-category
//! utilization percentages.

use std::collections::HashMap;
use std::fs;

use anyhow::{anyhow, Context, Result};

use crate::endpoints::Endpoint;

const DATA_FILE: &str = "device_data";

const LATENCY_KEY: &str = "lat_acc_avg";
const CPR_KEYS: [&str; 1] = ["util_cpr0"];
const DCPR_KEYS: [&str; 3] = ["util_dcpr0", "util_dcpr1", "util_dcpr2"];
const PKE_KEYS: [&str; 6] = [
    "util_pke0", "util_pke1", "util_pke2", "util_pke3", "util_pke4", "util_pke5",
];
const CPH_KEYS: [&str; 4] = ["util_cph0", "util_cph1", "util_cph2", "util_cph3"];
const ATH_KEYS: [&str; 4] = ["util_ath0", "util_ath1", "util_ath2", "util_ath3"];
const UCS_KEYS: [&str; 2] = ["util_ucs0", "util_ucs1"];

/// One tick's aggregated metrics for one endpoint. Computed fresh from
/// the latest dump, never persisted across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilSnapshot {
    pub compression_pct: u64,
    pub decompression_pct: u64,
    pub public_key_pct: u64,
    pub cipher_pct: u64,
    pub auth_pct: u64,
    pub compression_service_pct: u64,
    /// Raw, unrounded; 0 means no samples this interval.
    pub latency_ns: u64,
}

/// Poll an endpoint's `device_data` and aggregate. Errors here fail only
/// this endpoint's row for this tick; the caller skips it and carries on.
pub fn read_snapshot(ep: &Endpoint) -> Result<UtilSnapshot> {
    let text = fs::read_to_string(ep.path.join(DATA_FILE))
        .with_context(|| format!("read counter dump for {}", ep.name))?;
    snapshot_from_dump(&text)
}

/// Aggregate a raw dump. Every sub-unit key of a category must be
/// present before the category is computed; a missing key is an error,
/// never a silently reused stale value.
pub fn snapshot_from_dump(text: &str) -> Result<UtilSnapshot> {
    let map = parse_dump(text);
    Ok(UtilSnapshot {
        compression_pct: category_pct(&map, &CPR_KEYS)?,
        decompression_pct: category_pct(&map, &DCPR_KEYS)?,
        public_key_pct: category_pct(&map, &PKE_KEYS)?,
        cipher_pct: category_pct(&map, &CPH_KEYS)?,
        auth_pct: category_pct(&map, &ATH_KEYS)?,
        compression_service_pct: category_pct(&map, &UCS_KEYS)?,
        latency_ns: *map
            .get(LATENCY_KEY)
            .ok_or_else(|| anyhow!("counter key missing: {LATENCY_KEY}"))?,
    })
}

/// Whitespace key/value pairs: any token followed by an integer token
/// records that pair. Values are numeric so a value token never shadows
/// a key; unknown keys are simply never looked up.
fn parse_dump(text: &str) -> HashMap<String, u64> {
    let toks: Vec<&str> = text.split_whitespace().collect();
    let mut map = HashMap::new();
    for pair in toks.windows(2) {
        if let Ok(v) = pair[1].parse::<u64>() {
            map.insert(pair[0].to_string(), v);
        }
    }
    map
}

/// Mean over the category's sub-units, rounded to the nearest percent.
/// A zero sum reports exactly 0.
fn category_pct(map: &HashMap<String, u64>, keys: &[&str]) -> Result<u64> {
    let mut sum: u64 = 0;
    for key in keys {
        sum += *map
            .get(*key)
            .ok_or_else(|| anyhow!("counter key missing: {key}"))?;
    }
    if sum == 0 {
        return Ok(0);
    }
    Ok((sum as f64 / keys.len() as f64).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // All keys present, everything idle except where a test overrides.
    fn dump_with(overrides: &[(&str, u64)]) -> String {
        let mut parts: Vec<String> = vec![format!("{LATENCY_KEY} 0")];
        for key in CPR_KEYS
            .iter()
            .chain(&DCPR_KEYS)
            .chain(&PKE_KEYS)
            .chain(&CPH_KEYS)
            .chain(&ATH_KEYS)
            .chain(&UCS_KEYS)
        {
            let v = overrides
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v)
                .unwrap_or(0);
            parts.push(format!("{key} {v}"));
        }
        if let Some((_, v)) = overrides.iter().find(|(k, _)| *k == LATENCY_KEY) {
            parts[0] = format!("{LATENCY_KEY} {v}");
        }
        parts.join("\n")
    }

    #[test]
    fn busy_compression_idle_everything_else() {
        let snap = snapshot_from_dump(&dump_with(&[("util_cpr0", 42)])).unwrap();
        assert_eq!(snap.compression_pct, 42);
        assert_eq!(snap.decompression_pct, 0);
        assert_eq!(snap.public_key_pct, 0);
        assert_eq!(snap.cipher_pct, 0);
        assert_eq!(snap.auth_pct, 0);
        assert_eq!(snap.compression_service_pct, 0);
        assert_eq!(snap.latency_ns, 0);
    }

    #[test]
    fn category_mean_rounds_to_nearest() {
        // sum 5 over 3 decompression units -> 5/3 rounds to 2
        let snap = snapshot_from_dump(&dump_with(&[
            ("util_dcpr0", 1),
            ("util_dcpr1", 1),
            ("util_dcpr2", 3),
        ]))
        .unwrap();
        assert_eq!(snap.decompression_pct, 2);
    }

    #[test]
    fn zero_sum_is_exactly_zero() {
        let snap = snapshot_from_dump(&dump_with(&[])).unwrap();
        assert_eq!(snap.public_key_pct, 0);
        assert_eq!(snap.cipher_pct, 0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let text = dump_with(&[("util_pke2", 18), ("util_ath1", 7), (LATENCY_KEY, 950)]);
        let a = snapshot_from_dump(&text).unwrap();
        let b = snapshot_from_dump(&text).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.latency_ns, 950);
    }

    #[test]
    fn missing_subunit_key_fails_the_snapshot() {
        let text = dump_with(&[]).replace("util_cph2 0", "");
        assert!(snapshot_from_dump(&text).is_err());
    }

    #[test]
    fn missing_latency_key_fails_the_snapshot() {
        let text = dump_with(&[]).replacen("lat_acc_avg 0", "", 1);
        assert!(snapshot_from_dump(&text).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let text = format!("bogus_counter 99 {}", dump_with(&[("util_ucs0", 10)]));
        let snap = snapshot_from_dump(&text).unwrap();
        // ucs mean of (10, 0) over 2 units
        assert_eq!(snap.compression_service_pct, 5);
    }
}
