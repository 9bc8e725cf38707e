// Main library file for Trotter error calculations

pub mod error;
pub mod hamiltonian;
pub mod io;
pub mod normal_order;
pub mod ordering;
pub mod term;
pub mod trotter_impl;

pub use error::{Result, TrotterError};
pub use hamiltonian::{Hamiltonian, IngestStats};
pub use normal_order::CoefficientMap;
pub use ordering::{
    InterleavedOrder, LexicographicOrder, OrderingPolicy, SeriesEntry, TrotterSeries,
};
pub use term::{concatenate_three_terms, trivially_commutes, Term};
pub use trotter_impl::{ErrorExpansion, ExpansionStats, TrotterErrorCalculator};
