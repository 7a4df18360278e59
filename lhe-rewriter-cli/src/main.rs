//! LHE Rewriter CLI Application
//!
//! Command-line front end for the lhe-rewriter library. It adds:
//! - Argument parsing and output path selection
//! - Logging setup
//! - Optional TOML configuration for markers and output naming
//! - Verbose per-event replacement report on stdout

use anyhow::{Context, Result};
use clap::Parser;
use lhe_rewriter::{derive_output_path, rewrite_file};
use std::path::PathBuf;

mod config;

/// Replace the generator weight (XWGTUP) of each LHE event by the first
/// weight of its <weights> block
#[derive(Parser, Debug)]
#[command(name = "lhe-rewriter")]
#[command(about = "Rewrite LHE event weights from the first reweighting entry", long_about = None)]
#[command(version)]
struct Args {
    /// LHE file to rewrite
    #[arg(value_name = "LHEFILE")]
    lhefile: PathBuf,

    /// Report each replacement (-v); more v's raise the log level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Output file (default: <name>_weighted.lhe next to the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML) overriding markers and naming
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("LHE Rewriter CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using rewriter library v{}", lhe_rewriter::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => derive_output_path(&args.lhefile, &app_config.output)
            .with_context(|| format!("Cannot derive output path from {:?}", args.lhefile))?,
    };

    let report = args.verbose > 0 && !args.quiet;
    let stats = rewrite_file(&args.lhefile, &output, app_config.markers, |replacement| {
        if report {
            println!("{}", replacement);
        }
    })
    .with_context(|| format!("Failed to rewrite {:?}", args.lhefile))?;

    log::info!(
        "Done: {} events, {} header lines copied, output {:?}",
        stats.events,
        stats.passthrough_lines,
        output
    );

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
