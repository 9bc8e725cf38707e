//! Result listings

use crate::error::Result;
use crate::normal_order::CoefficientMap;
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Layout of the written error terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[ i j ... ]  c.cccccccccccccccce+XX`, one term per line
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct TermRecord<'a> {
    term: &'a Term,
    coefficient: f64,
}

/// Write every term with its coefficient in map order.
pub fn write_results<W: Write>(writer: &mut W, terms: &CoefficientMap) -> Result<()> {
    for (term, coeff) in terms {
        writeln!(writer, "{}  {}", term, format_scientific(*coeff))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the terms as a JSON array of `{"term": [...], "coefficient": x}`.
pub fn write_results_json<W: Write>(writer: &mut W, terms: &CoefficientMap) -> Result<()> {
    let records: Vec<TermRecord<'_>> = terms
        .iter()
        .map(|(term, &coefficient)| TermRecord { term, coefficient })
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Scientific notation with 16 digits after the point and a signed,
/// two-digit exponent, e.g. `-1.2500000000000000e-01`.
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.16e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.0), "1.0000000000000000e+00");
        assert_eq!(format_scientific(-0.125), "-1.2500000000000000e-01");
        assert_eq!(format_scientific(0.0), "0.0000000000000000e+00");
        assert_eq!(format_scientific(6.02e23), "6.0200000000000000e+23");
        assert_eq!(format_scientific(1.5e-300), "1.5000000000000001e-300");
        assert_eq!(format_scientific(2f64.powi(-20)), "9.5367431640625000e-07");
    }

    #[test]
    fn test_write_results_text() {
        let mut terms = CoefficientMap::new();
        terms.add_normal_form(Term::from([2, -1]), 0.5);
        terms.add_normal_form(Term::from([1, -1]), -2.0);

        let mut buffer = Vec::new();
        write_results(&mut buffer, &terms).unwrap();

        let listing = String::from_utf8(buffer).unwrap();
        assert_eq!(
            listing,
            "[ 1 -1 ]  -2.0000000000000000e+00\n[ 2 -1 ]  5.0000000000000000e-01\n"
        );
    }

    #[test]
    fn test_write_results_json() {
        let mut terms = CoefficientMap::new();
        terms.add_normal_form(Term::from([2, 1, -1, -2]), 0.25);

        let mut buffer = Vec::new();
        write_results_json(&mut buffer, &terms).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["term"], serde_json::json!([2, 1, -1, -2]));
        assert_eq!(value[0]["coefficient"], 0.25);
    }
}
