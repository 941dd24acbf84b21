//! Edge-case-safe percentage arithmetic shared by every builder.

/// `100 * active / population`, rounded to two decimals.
///
/// An empty population resolves to the numeric identity `0.0` — never an
/// error, NaN, or infinity — so degenerate cohorts and category buckets are
/// indistinguishable from true zero retention in the output shape.
pub fn retention_pct(active: usize, population: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    let raw = 100.0 * active as f64 / population as f64;
    (raw * 100.0).round() / 100.0
}
