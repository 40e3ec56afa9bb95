use anyhow::Result;
use log::debug;
use std::io;
use std::process;

use gitfame::{app, cli, logging};

fn main() {
    if let Err(e) = run() {
        debug!("Application error: {:?}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();
    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;
    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(path) = config_manager.config_file_path() {
        debug!("Using configuration file: {}", path.display());
    }

    let options = app::build_run_options(&args, &config_manager)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run_fame(&options, &mut out)?;
    Ok(())
}
