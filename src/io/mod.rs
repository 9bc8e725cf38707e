//! Input/Output operations for Trotter error calculations
//!
//! This module handles logging setup and writing the error terms.

mod logging;
mod output;

pub use logging::setup_output;
pub use output::{format_scientific, write_results, write_results_json, OutputFormat};
