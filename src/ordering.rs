//! Enumeration order of Hamiltonian terms in the Trotter series
//!
//! The expansion engine consumes terms positionally, so the order decides which
//! pairs are treated as diagonal (`a == b`) and which appear as the outer
//! operand of a commutator. The policy is a table, not an algorithm: it only
//! has to list every surviving term exactly once.

use crate::error::Result;
use crate::hamiltonian::Hamiltonian;
use crate::normal_order::CoefficientMap;
use crate::term::Term;
use tracing::{info, warn};

/// Strategy for ordering the conjugate-pruned Hamiltonian terms
pub trait OrderingPolicy {
    fn name(&self) -> &'static str;

    /// Duplicate-free list of terms present in `hamiltonian`.
    fn order(&self, hamiltonian: &Hamiltonian) -> Vec<Term>;
}

/// Diagonal terms first, then hopping terms interleaved with the
/// density-dependent corrections on the same orbital pair, then the
/// remaining two-body terms.
///
/// The order is that of the table
///
/// ```text
/// [p, -p]                       p = 1..=N
/// [p, q, -q, -p]                p = 1..=N, q = 1..=p
/// [p, -q], then [p, r, -r, -q]  p = 1..=N, q = 1..=N, r = 1..=min(p, q)
/// [p, q, -r, -s]                p = 1..=N, q = 1..=p, r = 1..=N, s = r..=N
/// ```
///
/// keeping the first occurrence of every term present in the Hamiltonian.
/// Each term is placed by its position in the table, so the cost depends
/// on the number of terms and not on `N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterleavedOrder;

/// Position of a term in the interleaved table: `(block, i, j, k, l)`
type TablePosition = (u8, u32, u32, u32, u32);

impl InterleavedOrder {
    /// First table position listing `term`, or `None` if the table never
    /// lists it. Keys of a coefficient map are normal ordered, so raising
    /// indices come first and both pairs are strictly decreasing.
    fn table_position(term: &Term) -> Option<TablePosition> {
        match *term.indices() {
            [p, q] if p > 0 && q < 0 => {
                let (p, q) = (p.unsigned_abs(), q.unsigned_abs());
                if p == q {
                    Some((0, p, 0, 0, 0))
                } else {
                    Some((2, p, q, 0, 0))
                }
            }
            [p, q, r, s] if p > 0 && q > 0 && r < 0 && s < 0 => {
                let [p, q, r, s] = [p, q, r, s].map(i32::unsigned_abs);
                if q == r && s == p {
                    Some((1, p, q, 0, 0))
                } else if q == r && q <= p.min(s) {
                    Some((2, p, s, 1, q))
                } else if q <= p && r <= s {
                    Some((3, p, q, r, s))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl OrderingPolicy for InterleavedOrder {
    fn name(&self) -> &'static str {
        "interleaved"
    }

    fn order(&self, hamiltonian: &Hamiltonian) -> Vec<Term> {
        let mut positioned: Vec<(TablePosition, &Term)> = hamiltonian
            .terms()
            .terms()
            .filter_map(|term| Self::table_position(term).map(|position| (position, term)))
            .collect();
        positioned.sort_unstable_by_key(|&(position, _)| position);
        positioned.into_iter().map(|(_, term)| term.clone()).collect()
    }
}

/// Every term in the map order of the Hamiltonian.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicographicOrder;

impl OrderingPolicy for LexicographicOrder {
    fn name(&self) -> &'static str {
        "lexicographic"
    }

    fn order(&self, hamiltonian: &Hamiltonian) -> Vec<Term> {
        hamiltonian.terms().terms().cloned().collect()
    }
}

/// One position of the Trotter series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    /// The stored term, followed by its conjugate if that is distinct
    pub terms: Vec<Term>,
    pub coefficient: f64,
}

/// Ordered terms with their conjugates restored, ready for expansion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrotterSeries {
    entries: Vec<SeriesEntry>,
}

impl TrotterSeries {
    /// Look up every term of `order` in `terms`.
    ///
    /// Fails with `MissingTerm` if the order names a term that was never
    /// ingested.
    pub fn new(order: &[Term], terms: &CoefficientMap) -> Result<Self> {
        let entries = order
            .iter()
            .map(|term| -> Result<SeriesEntry> {
                let coefficient = terms.at(term)?;
                let mut term_and_conjugate = vec![term.clone()];
                term_and_conjugate.extend(term.conjugate());
                Ok(SeriesEntry {
                    terms: term_and_conjugate,
                    coefficient,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Order the Hamiltonian with `policy` and build the series.
    pub fn from_hamiltonian(hamiltonian: &Hamiltonian, policy: &dyn OrderingPolicy) -> Result<Self> {
        let order = policy.order(hamiltonian);
        info!(
            "Number of terms in {} order: {}",
            policy.name(),
            order.len()
        );

        let unreached = hamiltonian.terms().len().saturating_sub(order.len());
        if unreached > 0 {
            warn!(
                "{} Hamiltonian terms are not reached by the {} order",
                unreached,
                policy.name()
            );
        }

        Self::new(&order, hamiltonian.terms())
    }

    /// Term set and coefficient at a position of the series
    pub fn get_term_for_trotter(&self, index: usize) -> &SeriesEntry {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrotterError;
    use std::collections::BTreeSet;

    /// Walk the interleaved table literally over every orbital.
    fn walk_table(hamiltonian: &Hamiltonian) -> Vec<Term> {
        let n = hamiltonian.num_orbitals() as i32;
        let mut candidates = Vec::new();
        for p in 1..=n {
            candidates.push(vec![p, -p]);
        }
        for p in 1..=n {
            for q in 1..=p {
                candidates.push(vec![p, q, -q, -p]);
            }
        }
        for p in 1..=n {
            for q in 1..=n {
                candidates.push(vec![p, -q]);
                for r in 1..=p.min(q) {
                    candidates.push(vec![p, r, -r, -q]);
                }
            }
        }
        for p in 1..=n {
            for q in 1..=p {
                for r in 1..=n {
                    for s in r..=n {
                        candidates.push(vec![p, q, -r, -s]);
                    }
                }
            }
        }

        let mut seen = BTreeSet::new();
        candidates
            .into_iter()
            .map(Term::new)
            .filter(|term| hamiltonian.terms().has_term(term) && seen.insert(term.clone()))
            .collect()
    }

    fn sample_hamiltonian() -> Hamiltonian {
        // Two orbitals: diagonal, hopping (both directions) and Coulomb terms
        Hamiltonian::parse(
            "\
0 0 -1.0
1 1 -0.5
0 1 0.2
1 0 0.2
0 1 1 0 0.6
1 0 0 1 0.6
0 0 0 1 0.1
",
        )
    }

    #[test]
    fn test_interleaved_order() {
        let hamiltonian = sample_hamiltonian();
        let order = InterleavedOrder.order(&hamiltonian);

        let expected: Vec<Term> = vec![
            Term::from([1, -1]),
            Term::from([2, -2]),
            Term::from([2, 1, -1, -2]),
            Term::from([1, -2]),
        ];
        assert_eq!(order, expected);
    }

    #[test]
    fn test_interleaved_order_lists_each_term_once() {
        let hamiltonian = Hamiltonian::parse("0 2 1.0\n1 2 0 2 0.5\n3 1 2 0 0.25\n2 2 1.0\n");
        let order = InterleavedOrder.order(&hamiltonian);
        let unique: BTreeSet<&Term> = order.iter().collect();

        assert_eq!(unique.len(), order.len());
        assert_eq!(order.len(), hamiltonian.terms().len());
        assert_eq!(order[0], Term::from([3, -3]));
    }

    #[test]
    fn test_interleaved_order_follows_table() {
        let hamiltonians = [
            sample_hamiltonian(),
            Hamiltonian::parse("0 2 1.0\n1 2 0 2 0.5\n3 1 2 0 0.25\n2 2 1.0\n"),
            Hamiltonian::parse(
                "\
0 0 -1.2
1 1 -0.4
2 2 -0.3
3 3 -0.2
0 1 0.18
2 1 -0.07
3 0 0.05
0 1 1 0 0.67
1 2 2 1 0.52
0 1 2 0 0.09
0 2 1 1 -0.04
3 2 1 0 0.03
1 3 3 2 0.02
2 0 3 1 0.01
0 3 3 0 0.44
3 1 0 3 0.06
",
            ),
        ];
        for hamiltonian in &hamiltonians {
            assert_eq!(InterleavedOrder.order(hamiltonian), walk_table(hamiltonian));
        }
    }

    #[test]
    fn test_interleaved_order_with_high_orbital() {
        // The table for 5001 orbitals is far too large to walk
        let hamiltonian = Hamiltonian::parse("5000 0 1.0\n5000 0 0 5000 2.0\n");
        assert_eq!(hamiltonian.num_orbitals(), 5001);
        let order = InterleavedOrder.order(&hamiltonian);
        assert_eq!(
            order,
            vec![Term::from([5001, 1, -1, -5001]), Term::from([1, -5001])]
        );
    }

    #[test]
    fn test_lexicographic_order() {
        let hamiltonian = sample_hamiltonian();
        let order = LexicographicOrder.order(&hamiltonian);
        let keys: Vec<Term> = hamiltonian.terms().terms().cloned().collect();
        assert_eq!(order, keys);
    }

    #[test]
    fn test_series_restores_conjugates() {
        let hamiltonian = sample_hamiltonian();
        let series = TrotterSeries::from_hamiltonian(&hamiltonian, &InterleavedOrder).unwrap();
        assert_eq!(series.len(), 4);

        let diagonal = series.get_term_for_trotter(0);
        assert_eq!(diagonal.terms, vec![Term::from([1, -1])]);
        assert_eq!(diagonal.coefficient, -1.0);

        let hopping = series.get_term_for_trotter(3);
        assert_eq!(
            hopping.terms,
            vec![Term::from([1, -2]), Term::from([2, -1])]
        );
        assert_eq!(hopping.coefficient, 0.2);
    }

    #[test]
    fn test_series_rejects_unknown_term() {
        let hamiltonian = sample_hamiltonian();
        let order = vec![Term::from([1, -1]), Term::from([3, -3])];
        let err = TrotterSeries::new(&order, hamiltonian.terms()).unwrap_err();
        assert!(matches!(err, TrotterError::MissingTerm { .. }));
    }
}
