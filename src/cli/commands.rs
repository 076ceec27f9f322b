use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::HeaderLanguage;
use crate::processors::Converter;
use crate::readers::DatReader;
use crate::utils::constants::DEFAULT_OUTPUT_DIR;
use crate::utils::progress::ProgressReporter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Convert {
            src_dir,
            output_dir,
            config,
            english_headers,
            mmap,
            quiet,
        } => {
            let mut settings = Settings::load(config.as_deref())?;
            if english_headers {
                settings = settings.with_header_language(HeaderLanguage::English);
            }
            if mmap {
                settings = settings.with_mmap(true);
            }

            let output_dir = prepare_output_dir(output_dir)?;
            println!("Converting DAT files...");
            println!("Input directory: {}", src_dir.display());
            println!("Output directory: {}", output_dir.display());

            let converter = Converter::new(settings)?;
            let years = converter.years(&src_dir)?;
            println!("{} years found", years.len());

            let progress = ProgressReporter::new(years.len() as u64, "Converting...", quiet);
            let summary = converter.convert_years(&src_dir, &years, &output_dir, Some(&progress))?;
            progress.finish_with_message("done");

            println!("\n{}", summary.summary());
        }

        Commands::Inspect {
            file,
            limit,
            config,
        } => {
            let settings = Settings::load(config.as_deref())?;
            let reader = DatReader::from_settings(&settings)?;
            inspect(&reader, &file, limit, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Write the mesh headers of `file` to `out`, one JSON object per line.
pub fn inspect<W: Write>(
    reader: &DatReader,
    file: &Path,
    limit: Option<usize>,
    out: &mut W,
) -> Result<usize> {
    let headers = reader.read_headers(file)?;
    info!("{} mesh headers in {}", headers.len(), file.display());

    let mut written = 0;
    for header in headers.iter().take(limit.unwrap_or(usize::MAX)) {
        serde_json::to_writer(&mut *out, header)?;
        writeln!(out)?;
        written += 1;
    }
    Ok(written)
}

/// Resolve the output directory.
///
/// An explicit directory must not exist yet, so a run never mixes its rows
/// into old results. Without one, `output` next to the executable is used and
/// created on demand.
pub fn prepare_output_dir(output_dir: Option<PathBuf>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            if dir.exists() {
                return Err(ProcessingError::OutputAlreadyExists(dir));
            }
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => {
            let exe = std::env::current_exe()?;
            let base = exe.parent().unwrap_or_else(|| Path::new("."));
            let dir = base.join(DEFAULT_OUTPUT_DIR);
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
    }
}

/// Set up structured logging to stderr, or to `log_file` when given
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dat2csv={}", log_level)));

    // A subscriber may already be installed when run() is called more than once
    let installed = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_level(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}
