//! Normal ordering of fermionic operator strings
//!
//! Terms are accumulated into a [`CoefficientMap`] keyed on their canonical
//! (normal-ordered) representative. Inserting an arbitrary operator string
//! reorders it with the anticommutation relations
//!
//! {a_p, a_q†} = δ_pq,    {a_p, a_q} = {a_p†, a_q†} = 0
//!
//! so every transposition flips the sign of the coefficient, and exchanging a
//! lowering and raising operator on the same orbital also produces a
//! contracted term with the pair removed.
//!
//! The canonical order places indices non-increasing, which puts all raising
//! operators first (highest orbital first) followed by the lowering
//! operators (lowest orbital first):
//!
//! ```text
//! [1, -1, 2, -2]  ->  [2, 1, -1, -2]
//! [-2, 2]         ->  -[2, -2] + 1   (the scalar part is not stored)
//! ```
//!
//! Terms with two raising or two lowering operators on one orbital vanish and
//! are never stored.

mod coefficient_map;

pub use coefficient_map::CoefficientMap;
