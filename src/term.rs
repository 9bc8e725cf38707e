//! Fermionic operator strings
//!
//! A term is an ordered product of raising and lowering operators. A positive
//! index `k` is the raising operator on orbital `k`, a negative index `-k` the
//! lowering operator on the same orbital. Orbitals are numbered from 1, so a
//! zero index never appears.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordered sequence of signed orbital indices
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(Vec<i32>);

impl Term {
    pub fn new(indices: Vec<i32>) -> Self {
        debug_assert!(
            indices.iter().all(|&index| index != 0),
            "orbital indices start at 1"
        );
        Term(indices)
    }

    pub fn indices(&self) -> &[i32] {
        &self.0
    }

    pub fn into_indices(self) -> Vec<i32> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hermitian adjoint: reverse the string and swap raising with lowering.
    ///
    /// Returns `None` when the term is its own conjugate, so there is no
    /// distinct partner to account for.
    pub fn conjugate(&self) -> Option<Term> {
        let conjugate: Vec<i32> = self.0.iter().rev().map(|&index| -index).collect();
        if conjugate == self.0 {
            None
        } else {
            Some(Term(conjugate))
        }
    }

    /// Orbitals the term acts on, ignoring raising/lowering.
    pub fn orbitals(&self) -> BTreeSet<u32> {
        self.0.iter().map(|index| index.unsigned_abs()).collect()
    }

    /// True if no adjacent pair has the right index greater than the left.
    pub fn is_normal_ordered(&self) -> bool {
        self.0.windows(2).all(|pair| pair[1] <= pair[0])
    }

    /// True if the same signed index occurs twice, i.e. two raising or two
    /// lowering operators on one orbital. Such a term vanishes.
    pub fn has_repeated_index(&self) -> bool {
        let unique: BTreeSet<i32> = self.0.iter().copied().collect();
        unique.len() != self.0.len()
    }

    /// Largest orbital index the term touches.
    pub fn max_orbital(&self) -> u32 {
        self.0
            .iter()
            .map(|index| index.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<i32>> for Term {
    fn from(indices: Vec<i32>) -> Self {
        Term::new(indices)
    }
}

impl<const N: usize> From<[i32; N]> for Term {
    fn from(indices: [i32; N]) -> Self {
        Term::new(indices.to_vec())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for index in &self.0 {
            write!(f, "{} ", index)?;
        }
        write!(f, "]")
    }
}

/// Check whether the double commutator [A, [B, C]] is trivially zero.
///
/// The triple is only treated as trivial when B and C share no orbital and A
/// shares no orbital with either of them.
pub fn trivially_commutes(first: &Term, second: &Term, third: &Term) -> bool {
    let mut support = second.orbitals();
    let third_support = third.orbitals();
    if !support.is_disjoint(&third_support) {
        return false;
    }
    support.extend(third_support);
    support.is_disjoint(&first.orbitals())
}

/// Operator string for the product ABC.
pub fn concatenate_three_terms(first: &Term, second: &Term, third: &Term) -> Term {
    let mut indices = Vec::with_capacity(first.len() + second.len() + third.len());
    indices.extend_from_slice(first.indices());
    indices.extend_from_slice(second.indices());
    indices.extend_from_slice(third.indices());
    Term(indices)
}
