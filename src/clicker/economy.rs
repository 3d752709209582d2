//! Pure economy math: cost scaling, offline earnings and number formatting.

/// Cost of the next unit once `owned` units have been bought:
/// `floor(base_cost × growth^owned)`.
pub fn scaled_cost(base_cost: u64, owned: u32, growth: f64) -> u64 {
    (base_cost as f64 * growth.powf(f64::from(owned))).floor() as u64
}

/// Resource produced at `rate` per second over `elapsed_ms`, with the
/// elapsed window clamped to `cap_ms`.
///
/// Exact integer arithmetic: `floor(rate × min(elapsed, cap) / 1000)`.
pub fn offline_earnings(rate: u64, elapsed_ms: u64, cap_ms: u64) -> u64 {
    let window = u128::from(elapsed_ms.min(cap_ms));
    let earned = u128::from(rate) * window / 1_000;
    u64::try_from(earned).unwrap_or(u64::MAX)
}

const UNITS: [(f64, &str); 4] = [
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "K"),
];

/// Compact display: `999`, `1.5K`, `12.0M`, `3.4B`, `1.2T`.
pub fn format_compact(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    let v = value as f64;
    for (scale, suffix) in UNITS {
        if v >= scale {
            return format!("{:.1}{}", v / scale, suffix);
        }
    }
    value.to_string()
}

/// Human-readable duration: `2h 5m 0s`, `3m 12s`, `45s`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
