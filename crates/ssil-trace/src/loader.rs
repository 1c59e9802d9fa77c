use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ssil_core::{SsilError, TraceRecord};

/// The recurrence needs a predecessor to define the first derivative.
pub const MIN_RECORDS: usize = 2;

/// Load a trace from disk.
///
/// A missing path is `MISSING_FILE`; a path that exists but cannot be read
/// (a directory, permissions) is `FAILURE`; bad content is `INVALID_INPUT` or
/// `INSUFFICIENT_DATA`.
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, SsilError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SsilError::MissingFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SsilError::failure(format!(
            "read '{}': not a regular file",
            path.display()
        )));
    }
    let raw = fs::read(path)
        .map_err(|e| SsilError::failure(format!("read '{}': {e}", path.display())))?;
    let src = String::from_utf8(raw).map_err(|_| {
        SsilError::invalid_input(format!("'{}' is not UTF-8 text", path.display()))
    })?;
    parse_trace_csv(&src)
}

/// Parse trace CSV text (pure, deterministic).
pub fn parse_trace_csv(src: &str) -> Result<Vec<TraceRecord>, SsilError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(src.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| SsilError::invalid_input(format!("csv header: {e}")))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(SsilError::invalid_input("CSV has no header"));
    }

    // First occurrence wins for duplicated header names.
    let mut idx: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, h) in headers.iter().enumerate() {
        idx.entry(h).or_insert(i);
    }

    let (col_a, col_s) = match (idx.get("a"), idx.get("s")) {
        (Some(a), Some(s)) => (*a, *s),
        _ => {
            return Err(SsilError::invalid_input(
                "CSV must have columns: a,s (optional: t)",
            ))
        }
    };
    let col_t = idx.get("t").copied();

    let mut out: Vec<TraceRecord> = Vec::new();

    for (row0, rec) in rdr.records().enumerate() {
        let row = row0 + 1; // 1-based data row, header excluded
        let rec = rec.map_err(|e| SsilError::invalid_input(format!("csv row {row}: {e}")))?;

        let cell = |col: usize, name: &str| -> Result<&str, SsilError> {
            rec.get(col).ok_or_else(|| {
                SsilError::invalid_input(format!("row {row}: missing value for column '{name}'"))
            })
        };

        let a = parse_real(cell(col_a, "a")?, row, "a")?;
        let s = parse_real(cell(col_s, "s")?, row, "s")?;
        let t = match col_t.and_then(|c| rec.get(c)).filter(|v| !v.is_empty()) {
            Some(v) => v.parse::<i64>().map_err(|_| {
                SsilError::invalid_input(format!("row {row}: cannot parse t from '{v}'"))
            })?,
            None => row as i64,
        };

        out.push(TraceRecord::new(t, a, s));
    }

    if out.len() < MIN_RECORDS {
        return Err(SsilError::InsufficientData { rows: out.len() });
    }

    // Stable: equal t keeps input order.
    out.sort_by_key(|r| r.t);
    Ok(out)
}

fn parse_real(raw: &str, row: usize, column: &str) -> Result<f64, SsilError> {
    let v: f64 = raw.parse().map_err(|_| {
        SsilError::invalid_input(format!("row {row}: cannot parse {column} from '{raw}'"))
    })?;
    if !v.is_finite() {
        return Err(SsilError::invalid_input(format!(
            "row {row}: {column} must be finite (got '{raw}')"
        )));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_t_to_row_position() {
        let recs = parse_trace_csv("a,s\n0.1,1\n0.2,2\n0.3,3\n").unwrap();
        let ts: Vec<i64> = recs.iter().map(|r| r.t).collect();
        assert_eq!(ts, vec![1, 2, 3]);
        assert_eq!(recs[2].a, 0.3);
        assert_eq!(recs[2].s, 3.0);
    }

    #[test]
    fn sorts_by_t_and_keeps_tie_order() {
        let csv = "t,a,s\n3,0.3,0\n1,0.1,0\n3,0.35,0\n2,0.2,0\n";
        let recs = parse_trace_csv(csv).unwrap();
        let got: Vec<(i64, f64)> = recs.iter().map(|r| (r.t, r.a)).collect();
        assert_eq!(got, vec![(1, 0.1), (2, 0.2), (3, 0.3), (3, 0.35)]);
    }

    #[test]
    fn empty_t_cell_falls_back_to_position() {
        let recs = parse_trace_csv("t,a,s\n10,0,0\n,0.5,0\n").unwrap();
        let ts: Vec<i64> = recs.iter().map(|r| r.t).collect();
        assert_eq!(ts, vec![2, 10]);
    }

    #[test]
    fn extra_columns_bom_and_padding_are_tolerated() {
        let csv = "\u{feff} note , s , a \nx, 1.5 , -0.25 \ny,2,0.5\n";
        let recs = parse_trace_csv(csv).unwrap();
        assert_eq!(recs[0].a, -0.25);
        assert_eq!(recs[0].s, 1.5);
    }

    #[test]
    fn missing_required_column_is_invalid_input() {
        let err = parse_trace_csv("t,a\n1,0\n2,0\n").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn empty_input_is_invalid_input() {
        assert_eq!(parse_trace_csv("").unwrap_err().code(), "INVALID_INPUT");
    }

    #[test]
    fn unparsable_cells_name_row_and_column() {
        let err = parse_trace_csv("a,s\n0,0\n0,abc\n").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.to_string().contains("row 2"), "{err}");
        assert!(err.to_string().contains(" s "), "{err}");

        let err = parse_trace_csv("t,a,s\n1.5,0,0\n2,0,0\n").unwrap_err();
        assert!(err.to_string().contains("cannot parse t"), "{err}");

        let err = parse_trace_csv("a,s\nnan,0\n0,0\n").unwrap_err();
        assert!(err.to_string().contains("finite"), "{err}");
    }

    #[test]
    fn short_row_is_invalid_input() {
        let err = parse_trace_csv("a,s\n0,0\n0.5\n").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn header_only_and_single_row_are_insufficient() {
        assert_eq!(
            parse_trace_csv("a,s\n").unwrap_err(),
            SsilError::InsufficientData { rows: 0 }
        );
        assert_eq!(
            parse_trace_csv("a,s\n0,0\n").unwrap_err(),
            SsilError::InsufficientData { rows: 1 }
        );
    }
}
