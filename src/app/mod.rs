mod report;
mod runner;
mod settings;

pub use runner::{run_expansion, select_ordering, write_output};
pub use settings::RunSettings;

use self::report::{report_expansion, report_hamiltonian, report_series};
use crate::config::{Args, Config};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::info;
use trotter_error::io::setup_output;
use trotter_error::{Hamiltonian, TrotterSeries};

pub struct TrotterApplication {
    args: Args,
    config: Config,
}

impl TrotterApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.log_file.as_deref().map(Path::new))
            .wrap_err("Unable to create log file")?;

        let settings = RunSettings::resolve(&self.args, &self.config)?;
        info!("Configuration loaded:\n{:?}", settings);

        info!("Reading integrals from: {}", settings.input.display());
        let hamiltonian = Hamiltonian::from_file(&settings.input)
            .wrap_err("Failed to load the Hamiltonian")?;
        report_hamiltonian(&hamiltonian);

        let policy = select_ordering(&settings.ordering);
        let series = TrotterSeries::from_hamiltonian(&hamiltonian, policy.as_ref())
            .wrap_err("Term ordering is inconsistent with the Hamiltonian")?;
        if settings.verbose {
            report_series(&series);
        }

        let expansion = run_expansion(&series, &settings)?;
        report_expansion(&expansion);

        write_output(&expansion.terms, &settings)
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let Some(config_file) = &args.config_file else {
        return Ok(Config::default().with_defaults());
    };

    let config_content = fs::read_to_string(config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
