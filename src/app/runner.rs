use crate::app::settings::RunSettings;
use color_eyre::eyre::{Result, WrapErr};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};
use trotter_error::io::{write_results, write_results_json, OutputFormat};
use trotter_error::{
    CoefficientMap, ErrorExpansion, InterleavedOrder, LexicographicOrder, OrderingPolicy,
    TrotterErrorCalculator, TrotterSeries,
};

pub fn select_ordering(name: &str) -> Box<dyn OrderingPolicy> {
    match name.to_lowercase().as_str() {
        "interleaved" => Box::new(InterleavedOrder),
        "lexicographic" => Box::new(LexicographicOrder),
        _ => {
            warn!("Unknown term ordering: {}, defaulting to interleaved", name);
            Box::new(InterleavedOrder)
        }
    }
}

pub fn run_expansion(series: &TrotterSeries, settings: &RunSettings) -> Result<ErrorExpansion> {
    let calculator = TrotterErrorCalculator::new(series)
        .with_parallel(settings.parallel)
        .with_progress(settings.progress);

    if !settings.parallel {
        info!("Running the commutator expansion on a single thread");
        return Ok(calculator.calculate_trotter_error());
    }

    if settings.threads == 0 {
        info!(
            "Running the commutator expansion on {} threads",
            rayon::current_num_threads()
        );
        return Ok(calculator.calculate_trotter_error());
    }

    info!(
        "Running the commutator expansion on {} threads",
        settings.threads
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()
        .wrap_err("Failed to build the worker thread pool")?;
    Ok(pool.install(|| calculator.calculate_trotter_error()))
}

pub fn write_output(terms: &CoefficientMap, settings: &RunSettings) -> Result<()> {
    match &settings.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).wrap_err_with(|| {
                    format!("Unable to create output directory: {}", parent.display())
                })?;
            }
            let file = File::create(path)
                .wrap_err_with(|| format!("Unable to create output file: {}", path.display()))?;
            write_terms(&mut BufWriter::new(file), terms, settings.format)?;
            info!("Error terms written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_terms(&mut stdout.lock(), terms, settings.format)?;
        }
    }
    Ok(())
}

fn write_terms<W: Write>(writer: &mut W, terms: &CoefficientMap, format: OutputFormat) -> Result<()> {
    let written = match format {
        OutputFormat::Text => write_results(writer, terms),
        OutputFormat::Json => write_results_json(writer, terms),
    };
    written.wrap_err("Failed to write error terms")
}
