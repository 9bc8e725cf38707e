//! Second-quantized molecular Hamiltonian built from integral files
//!
//! Integral files hold one integral per line:
//!
//! ```text
//! p q coeff          one-body integral   ->  coeff      * [p+1, -(q+1)]
//! p q r s coeff      two-body integral   ->  coeff / -2 * [p+1, q+1, -(r+1), -(s+1)]
//! ```
//!
//! Orbitals are 0-indexed in the file and shifted by one so that the sign of an
//! index can carry the raising/lowering distinction. Lines of any other shape are
//! ignored.

use crate::error::{Result, TrotterError};
use crate::normal_order::CoefficientMap;
use crate::term::Term;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Line counts collected while reading an integral file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub one_body: usize,
    pub two_body: usize,
    pub skipped: usize,
}

/// Normal-ordered Hamiltonian terms and the number of orbitals they span
#[derive(Debug, Clone, Default)]
pub struct Hamiltonian {
    terms: CoefficientMap,
    num_orbitals: u32,
    stats: IngestStats,
}

impl Hamiltonian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an integral file and remove complex conjugate redundancy.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TrotterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|source| TrotterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read integrals from any buffered reader.
    ///
    /// Lines that are not valid UTF-8 are skipped like any other malformed line.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut hamiltonian = Self::new();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            match std::str::from_utf8(&buffer) {
                Ok(line) => {
                    hamiltonian.parse_line(line);
                }
                Err(_) => {
                    debug!("Skipping integral line that is not valid UTF-8");
                    hamiltonian.stats.skipped += 1;
                }
            }
        }
        hamiltonian.remove_complex_conjugates();
        Ok(hamiltonian)
    }

    /// Read integrals from an in-memory listing.
    pub fn parse(contents: &str) -> Self {
        let mut hamiltonian = Self::new();
        for line in contents.lines() {
            hamiltonian.parse_line(line);
        }
        hamiltonian.remove_complex_conjugates();
        hamiltonian
    }

    /// Parse one integral line. Returns whether a term was added.
    pub fn parse_line(&mut self, line: &str) -> bool {
        if !line.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let added = match tokens.as_slice() {
            [p, q, coeff] => match parse_one_body(p, q, coeff) {
                Some((p, q, coeff)) => self.add_one_body(p, q, coeff),
                None => false,
            },
            [p, q, r, s, coeff] => match parse_two_body(p, q, r, s, coeff) {
                Some(([p, q, r, s], coeff)) => self.add_two_body(p, q, r, s, coeff),
                None => false,
            },
            _ => false,
        };

        if !added {
            debug!("Skipping integral line: {:?}", line);
            self.stats.skipped += 1;
        }
        added
    }

    /// Add the one-body integral h_pq a_p† a_q (0-indexed orbitals).
    ///
    /// Returns false, leaving the Hamiltonian unchanged, if an orbital has no
    /// signed index representation.
    pub fn add_one_body(&mut self, p: u32, q: u32, coeff: f64) -> bool {
        let (Some(p), Some(q)) = (raising(p), lowering(q)) else {
            return false;
        };
        self.ingest_term(Term::new(vec![p, q]), coeff);
        self.stats.one_body += 1;
        true
    }

    /// Add the two-body integral as -h_pqrs / 2 a_p† a_q† a_r a_s (0-indexed orbitals).
    ///
    /// Returns false if an orbital is out of range, as for `add_one_body`.
    pub fn add_two_body(&mut self, p: u32, q: u32, r: u32, s: u32, coeff: f64) -> bool {
        let (Some(p), Some(q), Some(r), Some(s)) = (raising(p), raising(q), lowering(r), lowering(s))
        else {
            return false;
        };
        self.ingest_term(Term::new(vec![p, q, r, s]), coeff / -2.0);
        self.stats.two_body += 1;
        true
    }

    /// Add an arbitrary operator string in normal order.
    pub fn ingest_term(&mut self, term: Term, coeff: f64) {
        self.num_orbitals = self.num_orbitals.max(term.max_orbital());
        self.terms.add_normal_form(term, coeff);
    }

    /// Keep one representative per conjugate pair; the partner is
    /// reconstructed when the Trotter series is enumerated.
    pub fn remove_complex_conjugates(&mut self) {
        self.terms.remove_complex_conjugates();
    }

    pub fn terms(&self) -> &CoefficientMap {
        &self.terms
    }

    pub fn num_orbitals(&self) -> u32 {
        self.num_orbitals
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}

fn raising(orbital: u32) -> Option<i32> {
    i32::try_from(orbital).ok()?.checked_add(1)
}

fn lowering(orbital: u32) -> Option<i32> {
    raising(orbital).map(|index| -index)
}

fn parse_orbital(token: &str) -> Option<u32> {
    token.parse().ok()
}

fn parse_one_body(p: &str, q: &str, coeff: &str) -> Option<(u32, u32, f64)> {
    Some((parse_orbital(p)?, parse_orbital(q)?, coeff.parse().ok()?))
}

fn parse_two_body(p: &str, q: &str, r: &str, s: &str, coeff: &str) -> Option<([u32; 4], f64)> {
    let orbitals = [
        parse_orbital(p)?,
        parse_orbital(q)?,
        parse_orbital(r)?,
        parse_orbital(s)?,
    ];
    Some((orbitals, coeff.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_body_line() {
        let hamiltonian = Hamiltonian::parse("0 1 0.5\n");
        assert_eq!(hamiltonian.terms().get(&Term::from([1, -2])), Some(0.5));
        assert_eq!(hamiltonian.num_orbitals(), 2);
        assert_eq!(hamiltonian.stats().one_body, 1);
    }

    #[test]
    fn test_two_body_line_is_halved_and_negated() {
        let hamiltonian = Hamiltonian::parse("1 0 0 1 0.25\n");
        // [2, 1, -1, -2] is already normal ordered
        assert_eq!(
            hamiltonian.terms().get(&Term::from([2, 1, -1, -2])),
            Some(-0.125)
        );
        assert_eq!(hamiltonian.stats().two_body, 1);
    }

    #[test]
    fn test_two_body_line_is_normal_ordered() {
        let hamiltonian = Hamiltonian::parse("0 1 1 0 1.0\n");
        // [1, 2, -2, -1] -> [2, 1, -1, -2] with an even number of swaps
        assert_eq!(
            hamiltonian.terms().get(&Term::from([2, 1, -1, -2])),
            Some(-0.5)
        );
        assert_eq!(hamiltonian.terms().len(), 1);
    }

    #[test]
    fn test_degenerate_two_body_line_vanishes() {
        let hamiltonian = Hamiltonian::parse("0 0 1 1 3.0\n");
        assert!(hamiltonian.terms().is_empty());
        assert_eq!(hamiltonian.num_orbitals(), 2);
    }

    #[test]
    fn test_conjugates_are_removed_after_reading() {
        let hamiltonian = Hamiltonian::parse("0 1 0.5\n1 0 0.5\n");
        assert_eq!(hamiltonian.terms().len(), 1);
        assert!(hamiltonian.terms().has_term(&Term::from([1, -2])));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let contents = "\
# integrals
0 0 -1.25
0 1 x
-1 0 0.5
0 1 2 3
1 1 1 1 1 1
";
        let hamiltonian = Hamiltonian::parse(contents);
        assert_eq!(hamiltonian.terms().len(), 1);
        assert_eq!(hamiltonian.terms().get(&Term::from([1, -1])), Some(-1.25));
        let stats = hamiltonian.stats();
        assert_eq!(stats.one_body, 1);
        assert_eq!(stats.skipped, 4);
    }

    #[test]
    fn test_integer_coefficients_are_accepted() {
        let hamiltonian = Hamiltonian::parse("2 2 3\n");
        assert_eq!(hamiltonian.terms().get(&Term::from([3, -3])), Some(3.0));
        assert_eq!(hamiltonian.num_orbitals(), 3);
    }

    #[test]
    fn test_out_of_range_orbitals_are_rejected() {
        let mut hamiltonian = Hamiltonian::new();
        assert!(!hamiltonian.add_one_body(u32::MAX, 0, 1.0));
        assert!(!hamiltonian.add_one_body(0, i32::MAX as u32, 1.0));
        assert!(!hamiltonian.add_two_body(0, 1, 2, u32::MAX, 1.0));
        assert!(hamiltonian.terms().is_empty());
        assert_eq!(hamiltonian.stats(), IngestStats::default());

        assert!(hamiltonian.add_one_body(i32::MAX as u32 - 1, 0, 1.0));
        assert_eq!(hamiltonian.num_orbitals(), i32::MAX as u32);
    }

    #[test]
    fn test_out_of_range_orbital_lines_are_skipped() {
        let hamiltonian = Hamiltonian::parse("2147483647 0 1.0
0 1 2 4294967295 1.0
0 0 1.0
");
        assert_eq!(hamiltonian.terms().len(), 1);
        assert_eq!(hamiltonian.stats().skipped, 2);
        assert_eq!(hamiltonian.stats().one_body, 1);
    }

    #[test]
    fn test_invalid_utf8_lines_are_skipped() {
        let contents: &[u8] = b"# comment \xff\xfe\n0 0 1.0\n0 1 0.5\n";
        let hamiltonian = Hamiltonian::from_reader(contents).unwrap();
        assert_eq!(hamiltonian.terms().get(&Term::from([1, -1])), Some(1.0));
        assert_eq!(hamiltonian.terms().get(&Term::from([1, -2])), Some(0.5));
        assert_eq!(hamiltonian.stats().skipped, 1);
        assert_eq!(hamiltonian.stats().one_body, 2);
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let contents = "0 0 1.0\n0 1 0.5\n1 0 0.5\n0 1 1 0 0.2\n";
        let from_reader = Hamiltonian::from_reader(contents.as_bytes()).unwrap();
        let parsed = Hamiltonian::parse(contents);
        assert_eq!(from_reader.terms(), parsed.terms());
        assert_eq!(from_reader.num_orbitals(), parsed.num_orbitals());
    }
}
