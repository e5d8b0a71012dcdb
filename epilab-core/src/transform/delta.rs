//! Day-over-day deltas.
//!
//! Upstream occasionally revises cumulative counts downward; a negative raw
//! delta is a data correction, not a negative count, and is clamped to zero.

/// delta[0] = 0; delta[i] = max(0, v[i] - v[i-1]).
pub fn daily_delta(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            out.push(0.0);
        } else {
            out.push((value - values[i - 1]).max(0.0));
        }
    }
    out
}
