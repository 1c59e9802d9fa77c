//! Classification sequence properties.
//!
//! GREEN when:
//! - classifications are non-decreasing under R0 < E0 < I1 < I2 < C
//! - ADM = CONTINUE exactly when r = R0
//! - a sustained escalation leaves R0 and never returns, even after calm input
//! - an outward drift that stops first latches E0, and a later pullback
//!   escalates past it to I1

use ssil_core::{evaluate, Admission, EngineParams, RiskLevel, TraceRecord};

fn escalate_then_calm() -> Vec<TraceRecord> {
    let mut out = Vec::new();
    let mut t = 1;
    for _ in 0..4 {
        out.push(TraceRecord::new(t, 0.0, 0.0));
        t += 1;
    }
    // steady outward drift with rising stress
    for k in 1..=16 {
        out.push(TraceRecord::new(t, 0.06 * k as f64, 0.5 * k as f64));
        t += 1;
    }
    // back to centre, no stress
    for _ in 0..24 {
        out.push(TraceRecord::new(t, 0.0, 0.0));
        t += 1;
    }
    out
}

/// Quiet start, outward drift under rising stress, then a hold near centre.
fn drift_then_pullback() -> Vec<TraceRecord> {
    let mut out = Vec::new();
    for t in 1..=3 {
        out.push(TraceRecord::new(t, 0.0, 0.0));
    }
    for k in 1..=8 {
        out.push(TraceRecord::new(3 + k, 0.06 * k as f64, 0.5 * k as f64));
    }
    for t in 12..=17 {
        out.push(TraceRecord::new(t, 0.15, 0.0));
    }
    out
}

#[test]
fn edge_zero_is_first_escalation_then_ratchets_to_i1() {
    let params = EngineParams {
        h: 2,
        ..EngineParams::default()
    };
    let recs = evaluate(&params, &drift_then_pullback()).unwrap();
    let risks: Vec<RiskLevel> = recs.iter().map(|r| r.risk).collect();

    let first = risks.iter().position(|r| *r != RiskLevel::R0).unwrap();
    assert_eq!(first, 6, "first escalation at t={}", recs[first].features.t);
    assert_eq!(risks[first], RiskLevel::E0);

    // t=7..12: the window holds no A loss and no E gain while A > E.
    for r in &recs[6..12] {
        assert_eq!(r.risk, RiskLevel::E0, "t={}", r.features.t);
        assert!(r.edge_zero && !r.recovery, "t={}", r.features.t);
    }

    // t=13: relief drops A, E rises, the gap is small and positive.
    let step = &recs[12];
    assert!(!step.edge_zero);
    assert!(step.recovery);
    assert!(step.features.acc > step.features.exh);
    assert!(step.features.acc - step.features.exh < 0.20);
    assert_eq!(step.risk, RiskLevel::I1);

    assert!(recs[12..].iter().all(|r| r.risk == RiskLevel::I1));
    assert!(recs[6..].iter().all(|r| r.admission == Admission::Abstain));
    for w in risks.windows(2) {
        assert!(w[0] <= w[1]);
    }
}

#[test]
fn classifications_are_monotone() {
    let recs = evaluate(&EngineParams::default(), &escalate_then_calm()).unwrap();
    for w in recs.windows(2) {
        assert!(
            w[0].risk <= w[1].risk,
            "ratchet moved down at t={}: {:?} -> {:?}",
            w[1].features.t,
            w[0].risk,
            w[1].risk
        );
    }
}

#[test]
fn admission_matches_risk_level() {
    let recs = evaluate(&EngineParams::default(), &escalate_then_calm()).unwrap();
    for r in &recs {
        assert_eq!(r.admission == Admission::Continue, r.risk == RiskLevel::R0);
    }
}

#[test]
fn escalation_latches_through_calm_tail() {
    let recs = evaluate(&EngineParams::default(), &escalate_then_calm()).unwrap();

    assert_eq!(recs[0].risk, RiskLevel::R0);
    let last = recs.last().unwrap();
    assert!(last.risk > RiskLevel::R0, "expected escalation, got {:?}", last.risk);
    assert_eq!(last.admission, Admission::Abstain);

    // The calm tail relieves A, yet the latched level stays put.
    let tail_start = recs.len() - 24;
    let tail_acc_last = recs[recs.len() - 1].features.acc;
    let tail_acc_first = recs[tail_start].features.acc;
    assert!(tail_acc_last < tail_acc_first);
    assert!(recs[tail_start..].iter().all(|r| r.risk == last.risk));
}

#[test]
fn flat_trace_stays_admitted() {
    let trace: Vec<TraceRecord> = (1..=30).map(|t| TraceRecord::new(t, 0.0, 0.0)).collect();
    let recs = evaluate(&EngineParams::default(), &trace).unwrap();
    assert!(recs.iter().all(|r| r.risk == RiskLevel::R0));
    assert!(recs.iter().all(|r| r.admission == Admission::Continue));
    assert!(recs.iter().all(|r| !r.recovery && !r.edge_zero));
}
