//! irc2xyz Command-Line Interface
//!
//! Converts a GRRM IRC log into separate forward and backward multi-frame
//! XYZ trajectories.
//!
//! # Usage
//!
//! ```bash
//! # Convert 1.log into irc_forward.xyz and irc_backward.xyz
//! irc2xyz
//!
//! # Convert a specific log
//! irc2xyz calc.log
//!
//! # Choose the output file names too
//! irc2xyz calc.log fwd.xyz bwd.xyz
//! ```
//!
//! All three arguments are positional and optional; unset ones fall back to
//! the configured defaults (see the `settings` module), which out of the box
//! are `1.log`, `irc_forward.xyz` and `irc_backward.xyz`.

use irc2xyz::parser::parse_irc_log;
use irc2xyz::settings::SettingsManager;
use irc2xyz::trajectory::{assemble_trajectories, write_trajectory};
use log::{debug, info};
use std::env;
use std::path::Path;
use std::process;

/// Main entry point for irc2xyz.
///
/// Initializes the logger, resolves the input and output paths from the
/// command line and the settings hierarchy, and runs the conversion.
///
/// # Exit Codes
///
/// - 0 on success (one confirmation line printed per output file)
/// - 1 if the log file does not exist, an option is unknown, or the
///   conversion fails
fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    check_help_flags(&args);

    for arg in &args[1..] {
        if arg.starts_with('-') {
            eprintln!("Error: Unknown option: {}", arg);
            print_usage(&args[0]);
            process::exit(1);
        }
    }

    let manager = SettingsManager::load();
    let settings = manager.settings();
    debug!("configuration source: {}", manager.config_source());

    let logfile = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| settings.general.default_logfile.clone());
    let fwd_out = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| settings.output.forward_file.clone());
    let bwd_out = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| settings.output.backward_file.clone());

    let log_path = Path::new(&logfile);
    if !log_path.exists() {
        eprintln!("Error: {} not found.", logfile);
        process::exit(1);
    }

    match run_convert(log_path, Path::new(&fwd_out), Path::new(&bwd_out)) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Parse the log and write both trajectory files.
fn run_convert(
    log_path: &Path,
    fwd_path: &Path,
    bwd_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("parsing {}", log_path.display());
    let log = parse_irc_log(log_path)?;
    info!(
        "transition state has {} atoms; {} forward and {} backward steps",
        log.transition_state.geometry.num_atoms,
        log.forward.len(),
        log.backward.len()
    );

    let (forward, backward) = assemble_trajectories(&log);

    write_trajectory(&forward, fwd_path)?;
    println!("Written XYZ trajectory: {}", fwd_path.display());
    write_trajectory(&backward, bwd_path)?;
    println!("Written XYZ trajectory: {}", bwd_path.display());

    Ok(())
}

/// Check for help flags and print usage if requested.
fn check_help_flags(args: &[String]) {
    if args[1..].iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        process::exit(0);
    }
}

/// Print command-line usage.
fn print_usage(program: &str) {
    println!("Convert a GRRM IRC log to separate forward/backward .xyz trajectories");
    println!();
    println!("Usage:");
    println!("  {} [logfile] [fwd_out] [bwd_out]", program);
    println!();
    println!("Arguments:");
    println!("  logfile   GRRM log file (default: 1.log)");
    println!("  fwd_out   Forward IRC .xyz file (default: irc_forward.xyz)");
    println!("  bwd_out   Backward IRC .xyz file (default: irc_backward.xyz)");
    println!();
    println!("Defaults can be changed in irc2xyz_config.cfg; command-line");
    println!("arguments take precedence.");
}
