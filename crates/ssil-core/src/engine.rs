use crate::{
    admission_for, classify_raw, edge_zero, recovery, step, window_bounds, EngineParams,
    EngineState, RiskRatchet, SsilError, StepFeatures, StepRecord, TraceRecord,
};

/// Causal pass: one `StepFeatures` per record, state threaded explicitly.
///
/// Caller guarantees a non-empty trace.
pub fn evaluate_steps(params: &EngineParams, trace: &[TraceRecord]) -> Vec<StepFeatures> {
    let mut out = Vec::with_capacity(trace.len());
    let mut state = match trace.first() {
        Some(first) => EngineState::initial(first),
        None => return out,
    };

    for (i, rec) in trace.iter().enumerate() {
        let (features, next) = step(params, &state, rec, i);
        out.push(features);
        state = next;
    }
    out
}

/// Full evaluation: causal pass, then window predicates + ratchet over the
/// completed per-step arrays.
pub fn evaluate(params: &EngineParams, trace: &[TraceRecord]) -> Result<Vec<StepRecord>, SsilError> {
    params.validate()?;
    if trace.len() < 2 {
        return Err(SsilError::InsufficientData { rows: trace.len() });
    }
    for (i, rec) in trace.iter().enumerate() {
        if !rec.a.is_finite() || !rec.s.is_finite() {
            return Err(SsilError::invalid_input(format!(
                "non-finite value at record {} (t={})",
                i + 1,
                rec.t
            )));
        }
    }

    let steps = evaluate_steps(params, trace);
    let h = params.window();

    let mut ratchet = RiskRatchet::new();
    let mut records = Vec::with_capacity(steps.len());

    for i in 0..steps.len() {
        let (start, end) = window_bounds(i, h);
        let window = &steps[start..=end];

        let rec_h = recovery(window);
        let ez_h = edge_zero(window, rec_h);

        let f = &steps[i];
        let raw = classify_raw(f.acc, f.exh, ez_h);
        let risk = ratchet.observe(raw);

        records.push(StepRecord {
            features: f.clone(),
            recovery: rec_h,
            edge_zero: ez_h,
            risk,
            admission: admission_for(risk),
        });
    }

    Ok(records)
}
