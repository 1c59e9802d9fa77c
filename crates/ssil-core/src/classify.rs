use crate::{Admission, RiskLevel};

const I1_ACC_CEIL: f64 = 0.85;
const I1_GAP_CEIL: f64 = 0.20;
const I2_ACC_CEIL: f64 = 0.97;
const I2_GAP_CEIL: f64 = 0.35;

/// Raw (pre-ratchet) risk level for one step.
pub fn classify_raw(acc: f64, exh: f64, edge_zero: bool) -> RiskLevel {
    if edge_zero {
        return RiskLevel::E0;
    }
    let gap = acc - exh;
    if gap <= 0.0 {
        RiskLevel::R0
    } else if acc < I1_ACC_CEIL && gap < I1_GAP_CEIL {
        RiskLevel::I1
    } else if acc < I2_ACC_CEIL && gap < I2_GAP_CEIL {
        RiskLevel::I2
    } else {
        RiskLevel::C
    }
}

pub fn admission_for(risk: RiskLevel) -> Admission {
    match risk {
        RiskLevel::R0 => Admission::Continue,
        _ => Admission::Abstain,
    }
}

/// Session-wide escalation ratchet. Starts at R0, never moves back down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskRatchet {
    current: RiskLevel,
}

impl Default for RiskRatchet {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRatchet {
    pub fn new() -> Self {
        Self {
            current: RiskLevel::R0,
        }
    }

    pub fn current(&self) -> RiskLevel {
        self.current
    }

    /// Fold a raw level in and return the latched level.
    pub fn observe(&mut self, raw: RiskLevel) -> RiskLevel {
        self.current = self.current.max(raw);
        self.current
    }
}
