//! Command-line argument parsing for Trotter error calculations

use clap::Parser;

/// Trotter error terms of a molecular Hamiltonian
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Molecule name, locates `{integral_dir}/{molecule}-{basis}.int`
    pub molecule: Option<String>,

    /// Basis set name
    pub basis: Option<String>,

    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Override the integral file
    #[arg(short, long)]
    pub input: Option<String>,

    /// Override the result file (default: stdout, or derived from molecule and basis)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write log output to a file instead of stderr
    #[arg(long)]
    pub log_file: Option<String>,

    /// Term ordering (interleaved or lexicographic)
    #[arg(long)]
    pub ordering: Option<String>,

    /// Number of worker threads (0 uses all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Run the expansion on a single thread
    #[arg(long)]
    pub serial: bool,

    /// Disable progress reporting
    #[arg(long)]
    pub no_progress: bool,

    /// Result format
    #[arg(long, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Log the order of terms in the Trotter series
    #[arg(short, long)]
    pub verbose: bool,
}
