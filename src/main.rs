//! Trotter Error Command-Line Interface
//!
//! Reads one- and two-body integrals, expands the nested commutators of the
//! Trotter series and writes the normal-ordered error terms.

use color_eyre::eyre::Result;

mod app;
mod config;

use app::TrotterApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    TrotterApplication::from_cli()?.run()
}
