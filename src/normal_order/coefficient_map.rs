//! Coefficient map keyed on normal-ordered terms

use crate::error::{Result, TrotterError};
use crate::term::Term;
use std::collections::btree_map::{self, BTreeMap};
use tracing::debug;

/// Accumulated coefficients of canonical terms
///
/// Every key is normal ordered and free of repeated indices. Both properties
/// hold after each insertion through [`CoefficientMap::add_normal_form`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientMap {
    terms: BTreeMap<Term, f64>,
}

impl CoefficientMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff * term` to the map after bringing it into normal order.
    ///
    /// Contraction terms produced while reordering are queued and reduced in
    /// the same way, so the map receives the full normal-ordered expansion of
    /// the operator string.
    pub fn add_normal_form(&mut self, term: Term, coeff: f64) {
        let mut pending = vec![(term.into_indices(), coeff)];

        while let Some((mut indices, mut coeff)) = pending.pop() {
            for i in 0..indices.len() {
                let mut j = i;
                while j > 0 {
                    let (left, right) = (indices[j - 1], indices[j]);
                    if right <= left {
                        break;
                    }
                    indices.swap(j - 1, j);
                    if left == -right {
                        // a_k a_k† = 1 - a_k† a_k
                        let mut contracted = Vec::with_capacity(indices.len() - 2);
                        contracted.extend_from_slice(&indices[..j - 1]);
                        contracted.extend_from_slice(&indices[j + 1..]);
                        if !contracted.is_empty() {
                            pending.push((contracted, coeff));
                        }
                    }
                    coeff = -coeff;
                    j -= 1;
                }
            }

            // Normal order puts equal indices next to each other
            if indices.windows(2).any(|pair| pair[0] == pair[1]) {
                continue;
            }
            *self.terms.entry(Term::new(indices)).or_insert(0.0) += coeff;
        }
    }

    /// Keep one representative of every conjugate pair.
    ///
    /// When a term and its distinct conjugate are both present, the
    /// lexicographically smaller one survives.
    pub fn remove_complex_conjugates(&mut self) {
        let redundant: Vec<Term> = self
            .terms
            .keys()
            .filter_map(|term| {
                term.conjugate()
                    .filter(|conjugate| conjugate > term && self.terms.contains_key(conjugate))
            })
            .collect();

        debug!("Removing {} complex conjugate terms", redundant.len());
        for conjugate in redundant {
            self.terms.remove(&conjugate);
        }
    }

    /// Add every entry of `other` into this map.
    ///
    /// Keys of `other` are already canonical, so coefficients are summed
    /// without reordering.
    pub fn merge(&mut self, other: CoefficientMap) {
        if self.terms.is_empty() {
            self.terms = other.terms;
            return;
        }
        for (term, coeff) in other.terms {
            *self.terms.entry(term).or_insert(0.0) += coeff;
        }
    }

    pub fn has_term(&self, term: &Term) -> bool {
        self.terms.contains_key(term)
    }

    pub fn get(&self, term: &Term) -> Option<f64> {
        self.terms.get(term).copied()
    }

    /// Coefficient of a term that must be present
    pub fn at(&self, term: &Term) -> Result<f64> {
        self.get(term)
            .ok_or_else(|| TrotterError::MissingTerm { term: term.clone() })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Term, f64> {
        self.terms.iter()
    }

    pub fn terms(&self) -> btree_map::Keys<'_, Term, f64> {
        self.terms.keys()
    }
}

impl<'a> IntoIterator for &'a CoefficientMap {
    type Item = (&'a Term, &'a f64);
    type IntoIter = btree_map::Iter<'a, Term, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
