use crate::{EngineParams, EngineState, StepFeatures, TraceRecord};

/// `x` unless it lies strictly outside `[lo, hi]`.
///
/// Comparison-based on purpose: `-0.0` passes a `[0, 1]` clamp unchanged and
/// later renders as `-0.000000`.
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        return lo;
    }
    if x > hi {
        return hi;
    }
    x
}

#[inline]
pub fn sgn(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// One causal step of the recurrence.
///
/// `index` is the 0-based position in the ordered trace; step 0 has zero
/// derivatives by definition. Returns the step's features and the state to
/// thread into the next step.
pub fn step(
    params: &EngineParams,
    state: &EngineState,
    rec: &TraceRecord,
    index: usize,
) -> (StepFeatures, EngineState) {
    let alpha = params.alpha();
    let h = f64::from(params.h);

    let a = clamp(rec.a, -1.0, 1.0);
    let s = if rec.s < 0.0 { 0.0 } else { rec.s };

    let da = if index == 0 { 0.0 } else { a - state.prev_a };

    let d = clamp(
        if params.delta_max > 0.0 {
            da.abs() / params.delta_max
        } else {
            0.0
        },
        0.0,
        1.0,
    );
    let b = clamp(a.abs(), 0.0, 1.0);
    let s_norm = clamp(
        if params.s_max > 0.0 { s / params.s_max } else { 0.0 },
        0.0,
        1.0,
    );

    let abs_a = a.abs();
    let out = abs_a > state.prev_abs_a;
    let dir_out = sgn(abs_a - state.prev_abs_a);

    let run_out = if out && dir_out != 0 {
        if dir_out == state.prev_dir_out {
            state.run_out + 1
        } else {
            1
        }
    } else {
        0
    };

    let p_out = clamp(f64::from(run_out) / h, 0.0, 1.0);
    let out_f = if out { 1.0 } else { 0.0 };

    let da_plus = alpha
        * clamp(
            d * out_f + params.beta * p_out + params.gamma * s_norm * out_f,
            0.0,
            1.0,
        );
    let da_relief = params.rho * alpha * clamp((1.0 - d) * (1.0 - b) * (1.0 - s_norm), 0.0, 1.0);

    let acc = clamp(state.a_prev + da_plus - da_relief, 0.0, 1.0);
    let cost = clamp(
        1.0 - (params.w_a * acc + params.w_b * b + params.w_s * s_norm),
        0.0,
        1.0,
    );
    let exh = clamp((1.0 - params.eta) * state.e_prev + params.eta * cost, 0.0, 1.0);

    let (d_acc, d_exh) = if index == 0 {
        (0.0, 0.0)
    } else {
        (acc - state.a_prev, exh - state.e_prev)
    };

    let features = StepFeatures {
        t: rec.t,
        a,
        s,
        da,
        d,
        b,
        s_norm,
        out,
        run_out,
        p_out,
        da_plus,
        da_relief,
        acc,
        cost,
        exh,
        d_acc,
        d_exh,
    };

    let next = EngineState {
        a_prev: acc,
        e_prev: exh,
        prev_a: a,
        prev_abs_a: abs_a,
        prev_dir_out: if out { dir_out } else { 0 },
        run_out,
    };

    (features, next)
}
