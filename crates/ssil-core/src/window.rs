use crate::StepFeatures;

/// Trailing window `[max(0, i-H+1), i]` as inclusive bounds.
pub fn window_bounds(i: usize, h: usize) -> (usize, usize) {
    let start = (i + 1).saturating_sub(h.max(1));
    (start, i)
}

/// Recovery_H: some accumulator relief in the window, exhaustion no lower at
/// the end than at the start, and exhaustion strictly positive throughout.
pub fn recovery(window: &[StepFeatures]) -> bool {
    let (first, last) = match (window.first(), window.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return false,
    };

    if !window.iter().any(|f| f.d_acc < 0.0) {
        return false;
    }
    if last.exh < first.exh {
        return false;
    }
    let e_min = window.iter().map(|f| f.exh).fold(f64::INFINITY, f64::min);
    e_min > 0.0
}

/// EdgeZero_H: the accumulator never fell and exhaustion never rose across the
/// window, the accumulator ends above exhaustion, and the window is not a
/// recovery.
pub fn edge_zero(window: &[StepFeatures], recovery: bool) -> bool {
    let last = match window.last() {
        Some(l) => l,
        None => return false,
    };

    if window.iter().any(|f| f.d_acc < 0.0) {
        return false;
    }
    if window.iter().any(|f| f.d_exh > 0.0) {
        return false;
    }
    if !(last.acc > last.exh) {
        return false;
    }
    !recovery
}
