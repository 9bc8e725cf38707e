use crate::config::{Args, Config};
use color_eyre::eyre::{eyre, Result};
use std::path::PathBuf;
use trotter_error::io::OutputFormat;

/// Everything needed to run one calculation, with the command line taking
/// precedence over the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub ordering: String,
    pub parallel: bool,
    pub threads: usize,
    pub progress: bool,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: &Config) -> Result<Self> {
        let molecule_and_basis = match (
            args.molecule.as_ref().or(config.molecule.as_ref()),
            args.basis.as_ref().or(config.basis.as_ref()),
        ) {
            (Some(molecule), Some(basis)) => Some((molecule, basis)),
            _ => None,
        };

        let input = match args.input.as_ref().or(config.input.as_ref()) {
            Some(path) => PathBuf::from(path),
            None => {
                let (molecule, basis) = molecule_and_basis.ok_or_else(|| {
                    eyre!("No integral file given: pass --input or a molecule and basis")
                })?;
                PathBuf::from(config.integral_dir()).join(format!("{}-{}.int", molecule, basis))
            }
        };

        let output = match args.output.as_ref().or(config.output.as_ref()) {
            Some(path) => Some(PathBuf::from(path)),
            None => molecule_and_basis.map(|(molecule, basis)| {
                PathBuf::from(config.error_terms_dir()).join(format!("{}_{}.txt", molecule, basis))
            }),
        };

        let format = match args.format.as_deref() {
            Some("json") => OutputFormat::Json,
            Some(_) => OutputFormat::Text,
            None => config.output_format(),
        };

        Ok(Self {
            input,
            output,
            ordering: args.ordering.clone().unwrap_or_else(|| config.ordering()),
            parallel: !args.serial && config.is_parallel(),
            threads: args.threads.unwrap_or_else(|| config.threads()),
            progress: !args.no_progress && config.is_progress_enabled(),
            format,
            verbose: args.verbose || config.is_verbose(),
        })
    }
}
