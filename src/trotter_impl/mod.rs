//! Trotter error from the nested commutator expansion
//!
//! For a Hamiltonian H = Σ_i H_i split into the ordered terms of a
//! [`TrotterSeries`](crate::ordering::TrotterSeries), the leading error
//! operator of the second-order Trotter–Suzuki formula is
//!
//! V = Σ_{b} Σ_{a ≤ b} Σ_{c < b} (1/12) (1 - δ_ab / 2) [H_a, [H_b, H_c]]
//!
//! Each commutator is expanded into concatenated operator strings
//!
//! [A, [B, C]] = ABC - ACB - BCA + CBA
//!
//! and accumulated in normal order. A series entry with a distinct conjugate
//! contributes both the term and its conjugate.
//!
//! # Usage
//!
//! ```ignore
//! let hamiltonian = Hamiltonian::from_file("h2-sto3g.int")?;
//! let series = TrotterSeries::from_hamiltonian(&hamiltonian, &InterleavedOrder)?;
//! let expansion = TrotterErrorCalculator::new(&series).calculate_trotter_error();
//! for (term, coeff) in &expansion.terms {
//!     println!("{} {:.16e}", term, coeff);
//! }
//! ```

mod trotter;

pub use trotter::{
    add_commutator_terms, scale_factor, ErrorExpansion, ExpansionStats, TrotterErrorCalculator,
};
