//! Boundary resistance for over-dragging past the first/last panel.

/// Elasticity of the over-drag. Higher values stiffen the edge.
pub const RESISTANCE_COEF: f64 = 0.7;

/// Maps a raw fractional index onto the value shown while dragging.
///
/// In range the index passes through untouched. Out of range:
/// - with `enabled`, the overshoot decays exponentially and never reaches a
///   full panel (`(-1, 0)` on the left, `(index_max, index_max + 1)` on the right);
/// - without it, the index is clamped to `[0, index_max]`. Callers must also
///   re-anchor the drag origin, see [`crate::tracker::DragSession::reanchor`].
pub fn resist(index: f64, index_max: f64, enabled: bool) -> f64 {
    if !enabled {
        return index.clamp(0.0, index_max.max(0.0));
    }

    if index < 0.0 {
        (index * RESISTANCE_COEF).exp() - 1.0
    } else if index > index_max {
        index_max + 1.0 - ((index_max - index) * RESISTANCE_COEF).exp()
    } else {
        index
    }
}

/// True when `index` lies outside `[0, index_max]`.
pub fn out_of_bounds(index: f64, index_max: f64) -> bool {
    index < 0.0 || index > index_max
}
