//! Edge behaviour at the start of a run.
//!
//! GREEN when:
//! - the first record has da = dA = dE = 0 regardless of input
//! - fewer than 2 records fails with INSUFFICIENT_DATA
//! - non-finite samples fail with INVALID_INPUT
//! - two evaluations of the same trace are identical

use ssil_core::{evaluate, EngineParams, RiskLevel, SsilError, TraceRecord};

#[test]
fn first_record_has_zero_derivatives() {
    let trace = vec![
        TraceRecord::new(1, 0.95, 25.0),
        TraceRecord::new(2, -0.4, 3.0),
    ];
    let recs = evaluate(&EngineParams::default(), &trace).unwrap();
    let f = &recs[0].features;
    assert_eq!(f.da, 0.0);
    assert_eq!(f.d_acc, 0.0);
    assert_eq!(f.d_exh, 0.0);
    assert!(!f.out);
}

#[test]
fn two_flat_rows_match_reference_values() {
    let trace = vec![TraceRecord::new(1, 0.0, 0.0), TraceRecord::new(2, 0.0, 0.0)];
    let recs = evaluate(&EngineParams::default(), &trace).unwrap();
    assert_eq!(recs.len(), 2);
    for r in &recs {
        let f = &r.features;
        assert!(!f.out);
        assert_eq!((f.d, f.b, f.s_norm), (0.0, 0.0, 0.0));
        assert_eq!(f.da_plus, 0.0);
        assert_eq!(f.da_relief, 0.125);
        assert_eq!(f.acc, 0.0);
        assert_eq!(f.cost, 1.0);
        assert_eq!(f.exh, 1.0);
        assert_eq!((f.da, f.d_acc, f.d_exh), (0.0, 0.0, 0.0));
        assert!(!r.recovery);
        assert!(!r.edge_zero);
        assert_eq!(r.risk, RiskLevel::R0);
    }
}

#[test]
fn single_record_is_insufficient() {
    let err = evaluate(&EngineParams::default(), &[TraceRecord::new(1, 0.0, 0.0)]).unwrap_err();
    assert_eq!(err, SsilError::InsufficientData { rows: 1 });

    let err = evaluate(&EngineParams::default(), &[]).unwrap_err();
    assert_eq!(err, SsilError::InsufficientData { rows: 0 });
}

#[test]
fn non_finite_sample_is_invalid_input() {
    let trace = vec![
        TraceRecord::new(1, 0.0, 0.0),
        TraceRecord::new(2, f64::NAN, 0.0),
    ];
    let err = evaluate(&EngineParams::default(), &trace).unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}

#[test]
fn evaluation_is_repeatable() {
    let trace: Vec<TraceRecord> = (0..64)
        .map(|i| {
            let x = i as f64 * 0.37;
            TraceRecord::new(i + 1, x.sin(), (x * 1.3).cos().abs() * 12.0)
        })
        .collect();
    let a = evaluate(&EngineParams::default(), &trace).unwrap();
    let b = evaluate(&EngineParams::default(), &trace).unwrap();
    assert_eq!(a, b);
}
