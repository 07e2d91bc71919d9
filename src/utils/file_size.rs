const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Byte count in the largest unit that keeps the value at or above 1.
pub fn format_size(bytes: u64) -> String {
    let Some(unit) = (1..UNITS.len())
        .rev()
        .find(|&i| bytes >= 1u64 << (10 * i))
    else {
        return format!("{bytes} B");
    };
    let scaled = bytes as f64 / (1u64 << (10 * unit)) as f64;
    format!("{scaled:.2} {}", UNITS[unit])
}
