//! Logging setup

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let total_seconds = StdSystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Send log output to a file, or to stderr when no file is given.
///
/// Stdout stays free for the result listing.
pub fn setup_output(log_path: Option<&Path>) -> std::io::Result<()> {
    match log_path {
        Some(path) => {
            let log = File::create(path)?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false);
            Registry::default().with(file_layer).init();
            info!("Log output will be written to: {}", path.display());
        }
        None => {
            let stderr_layer = layer()
                .with_writer(std::io::stderr)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stderr_layer).init();
        }
    }
    Ok(())
}
