use crate::SsilError;

/// Default trailing window length.
pub const DEFAULT_H: u32 = 8;

/// Engine-wide constants for one run. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineParams {
    /// Window length H (always >= 1).
    pub h: u32,
    /// Activity delta that saturates D.
    pub delta_max: f64,
    /// Stress value that saturates S.
    pub s_max: f64,
    /// Relief multiplier.
    pub rho: f64,
    /// Weight of the persistence term P_out in dA_plus.
    pub beta: f64,
    /// Weight of the stress term in dA_plus.
    pub gamma: f64,
    /// Smoothing factor of E.
    pub eta: f64,
    /// Composite cost weights.
    pub w_a: f64,
    pub w_b: f64,
    pub w_s: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            h: DEFAULT_H,
            delta_max: 0.15,
            s_max: 10.0,
            rho: 1.0,
            beta: 0.5,
            gamma: 0.5,
            eta: 0.25,
            w_a: 0.6,
            w_b: 0.2,
            w_s: 0.2,
        }
    }
}

impl EngineParams {
    /// Normalize a raw window length: anything below 1 becomes 1.
    pub fn window_from_raw(raw: i64) -> u32 {
        raw.clamp(1, i64::from(u32::MAX)) as u32
    }

    /// alpha = 1/H
    pub fn alpha(&self) -> f64 {
        1.0 / f64::from(self.h)
    }

    pub fn window(&self) -> usize {
        self.h as usize
    }

    /// Reject parameter sets the recurrence cannot evaluate deterministically.
    pub fn validate(&self) -> Result<(), SsilError> {
        if self.h == 0 {
            return Err(SsilError::BadArguments("H must be >= 1".to_string()));
        }
        let reals = [
            ("delta_max", self.delta_max),
            ("s_max", self.s_max),
            ("rho", self.rho),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("eta", self.eta),
            ("wA", self.w_a),
            ("wB", self.w_b),
            ("wS", self.w_s),
        ];
        for (name, v) in reals {
            if !v.is_finite() {
                return Err(SsilError::BadArguments(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        Ok(())
    }
}

/// One input sample. `t` is supplied or defaults to the 1-based row position.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    pub t: i64,
    pub a: f64,
    pub s: f64,
}

impl TraceRecord {
    pub fn new(t: i64, a: f64, s: f64) -> Self {
        Self { t, a, s }
    }
}

/// Recurrence state threaded through the causal pass.
///
/// Initialized once from the first record, replaced once per step,
/// discarded at the end of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    pub a_prev: f64,
    pub e_prev: f64,
    pub prev_a: f64,
    pub prev_abs_a: f64,
    /// -1, 0 or 1.
    pub prev_dir_out: i8,
    pub run_out: u32,
}

impl EngineState {
    pub fn initial(first: &TraceRecord) -> Self {
        let prev_a = crate::clamp(first.a, -1.0, 1.0);
        Self {
            a_prev: 0.0,
            e_prev: 1.0,
            prev_a,
            prev_abs_a: prev_a.abs(),
            prev_dir_out: 0,
            run_out: 0,
        }
    }
}

/// Scalars produced by the causal step update.
#[derive(Clone, Debug, PartialEq)]
pub struct StepFeatures {
    pub t: i64,
    /// Activity clamped to [-1, 1].
    pub a: f64,
    /// Stress floored at 0.
    pub s: f64,
    pub da: f64,
    /// D: normalized activity delta.
    pub d: f64,
    /// B: activity magnitude.
    pub b: f64,
    /// S: normalized stress.
    pub s_norm: f64,
    /// out: |a| moved away from zero this step.
    pub out: bool,
    pub run_out: u32,
    pub p_out: f64,
    pub da_plus: f64,
    pub da_relief: f64,
    /// A: instability accumulator.
    pub acc: f64,
    /// C: composite cost.
    pub cost: f64,
    /// E: exhaustion score.
    pub exh: f64,
    /// dA
    pub d_acc: f64,
    /// dE
    pub d_exh: f64,
}

/// Five-level risk lattice. Declaration order is the lattice order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    R0,
    E0,
    I1,
    I2,
    C,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::R0 => "R0",
            RiskLevel::E0 => "E0",
            RiskLevel::I1 => "I1",
            RiskLevel::I2 => "I2",
            RiskLevel::C => "C",
        }
    }
}

/// Binary downstream admission decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Admission {
    Continue,
    Abstain,
}

impl Admission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Admission::Continue => "CONTINUE",
            Admission::Abstain => "ABSTAIN",
        }
    }
}

/// One fully evaluated step: features, window predicates, classification.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub features: StepFeatures,
    pub recovery: bool,
    pub edge_zero: bool,
    pub risk: RiskLevel,
    pub admission: Admission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_normalization_floors_at_one() {
        assert_eq!(EngineParams::window_from_raw(-3), 1);
        assert_eq!(EngineParams::window_from_raw(0), 1);
        assert_eq!(EngineParams::window_from_raw(8), 8);
    }

    #[test]
    fn non_finite_param_is_bad_arguments() {
        let p = EngineParams {
            eta: f64::NAN,
            ..EngineParams::default()
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.code(), "BAD_ARGUMENTS");
        assert!(err.to_string().contains("eta"));
    }

    #[test]
    fn lattice_order_is_declaration_order() {
        assert!(RiskLevel::R0 < RiskLevel::E0);
        assert!(RiskLevel::E0 < RiskLevel::I1);
        assert!(RiskLevel::I1 < RiskLevel::I2);
        assert!(RiskLevel::I2 < RiskLevel::C);
    }

    #[test]
    fn initial_state_clamps_first_activity() {
        let st = EngineState::initial(&TraceRecord::new(1, -4.0, 0.0));
        assert_eq!(st.prev_a, -1.0);
        assert_eq!(st.prev_abs_a, 1.0);
        assert_eq!(st.a_prev, 0.0);
        assert_eq!(st.e_prev, 1.0);
    }
}
