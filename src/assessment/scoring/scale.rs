/// Linear remap of a fixed theoretical range onto the standardized scale.
///
/// `min` maps to -2, the midpoint to 0 and `max` to +2. Values outside
/// `[min, max]` land outside ±2 and are left unclamped. This is
/// not a sample Z-score: no population mean or SD is involved. A degenerate
/// range yields 0.
pub fn map_to_z(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    let normalized = (value - min) / span;
    (normalized - 0.5) * 4.0
}
