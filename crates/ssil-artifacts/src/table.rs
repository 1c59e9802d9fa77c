use ssil_core::{SsilError, StepRecord};

use crate::fixedpoint::{format_q6, SignStyle};

/// Output column order.
pub const HEADER: [&str; 20] = [
    "t",
    "a",
    "s",
    "da",
    "D",
    "B",
    "S",
    "out",
    "run_out",
    "P_out",
    "dA_plus",
    "dA_relief",
    "A",
    "E_rev",
    "dA",
    "dE",
    "Recovery_H",
    "EdgeZero_H",
    "r",
    "IRR_ADM",
];

/// Render the full output table. Rows end with CRLF; no field ever needs quoting.
pub fn render_table(records: &[StepRecord]) -> Result<Vec<u8>, SsilError> {
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    w.write_record(HEADER).map_err(csv_err)?;
    for rec in records {
        w.write_record(render_row(rec)?).map_err(csv_err)?;
    }

    w.into_inner()
        .map_err(|e| SsilError::failure(format!("csv flush: {}", e.error())))
}

fn render_row(rec: &StepRecord) -> Result<Vec<String>, SsilError> {
    let f = &rec.features;
    let signed = |x: f64| format_q6(x, SignStyle::Explicit);
    let unsigned = |x: f64| format_q6(x, SignStyle::NegativeOnly);

    // The s column shows max(0, s): a -0.0 input renders as 0.000000 here.
    let s_shown = if f.s > 0.0 { f.s } else { 0.0 };

    Ok(vec![
        f.t.to_string(),
        signed(f.a)?,
        unsigned(s_shown)?,
        signed(f.da)?,
        unsigned(f.d)?,
        unsigned(f.b)?,
        unsigned(f.s_norm)?,
        u8::from(f.out).to_string(),
        f.run_out.to_string(),
        unsigned(f.p_out)?,
        unsigned(f.da_plus)?,
        unsigned(f.da_relief)?,
        unsigned(f.acc)?,
        unsigned(f.exh)?,
        signed(f.d_acc)?,
        signed(f.d_exh)?,
        bool_token(rec.recovery).to_string(),
        bool_token(rec.edge_zero).to_string(),
        rec.risk.as_str().to_string(),
        rec.admission.as_str().to_string(),
    ])
}

fn bool_token(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn csv_err(e: csv::Error) -> SsilError {
    SsilError::failure(format!("csv write: {e}"))
}
