//! Configuration management for Trotter error calculations
//!
//! This module handles configuration structures and defaults. Every value
//! can be overridden from the command line.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};
use trotter_error::io::OutputFormat;

/// Main configuration structure
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    pub input: Option<String>,
    pub output: Option<String>,
    pub molecule: Option<String>,
    pub basis: Option<String>,
    #[serde(default)]
    pub paths: PathParams,
    #[serde(default)]
    pub expansion: ExpansionParams,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
}

/// Directories used when the files are derived from molecule and basis
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PathParams {
    pub integral_dir: Option<String>,
    pub error_terms_dir: Option<String>,
}

impl Default for PathParams {
    fn default() -> Self {
        PathParams {
            integral_dir: Some("data/from_jarrod".to_string()),
            error_terms_dir: Some("data/error_terms".to_string()),
        }
    }
}

impl PathParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.integral_dir.is_none() {
            self.integral_dir = defaults.integral_dir;
        }
        if self.error_terms_dir.is_none() {
            self.error_terms_dir = defaults.error_terms_dir;
        }
        self
    }
}

/// Commutator expansion parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExpansionParams {
    pub ordering: Option<String>, // "interleaved" or "lexicographic"
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub progress: Option<bool>,
}

impl Default for ExpansionParams {
    fn default() -> Self {
        ExpansionParams {
            ordering: Some("interleaved".to_string()),
            parallel: Some(true),
            threads: Some(0),
            progress: Some(true),
        }
    }
}

impl ExpansionParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.ordering.is_none() {
            self.ordering = defaults.ordering;
        }
        if self.parallel.is_none() {
            self.parallel = defaults.parallel;
        }
        if self.threads.is_none() {
            self.threads = defaults.threads;
        }
        if self.progress.is_none() {
            self.progress = defaults.progress;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.paths = self.paths.with_defaults();
        self.expansion = self.expansion.with_defaults();
        if self.output_format.is_none() {
            self.output_format = Some(OutputFormat::Text);
        }
        if self.verbose.is_none() {
            self.verbose = Some(false);
        }
        self
    }

    /// Get the term ordering name
    pub fn ordering(&self) -> String {
        self.expansion
            .ordering
            .clone()
            .unwrap_or_else(|| "interleaved".to_string())
    }

    /// Check if the parallel expansion is enabled
    pub fn is_parallel(&self) -> bool {
        self.expansion.parallel.unwrap_or(true)
    }

    /// Get the number of worker threads (0 for the rayon default)
    pub fn threads(&self) -> usize {
        self.expansion.threads.unwrap_or(0)
    }

    /// Check if progress reporting is enabled
    pub fn is_progress_enabled(&self) -> bool {
        self.expansion.progress.unwrap_or(true)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn integral_dir(&self) -> String {
        self.paths
            .integral_dir
            .clone()
            .unwrap_or_else(|| "data/from_jarrod".to_string())
    }

    pub fn error_terms_dir(&self) -> String {
        self.paths
            .error_terms_dir
            .clone()
            .unwrap_or_else(|| "data/error_terms".to_string())
    }
}
