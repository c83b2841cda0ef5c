use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::debug;
use std::io;
use std::path::PathBuf;
use stockroom::config::{DEFAULT_DATA_FILE, DEFAULT_LOG_FILE};
use stockroom::{SessionConfig, run_session};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Interactive inventory tracker backed by two JSON files")]
struct Cli {
    /// Catalog file
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Transaction log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.verbose {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::init_from_env(env);

    let config = SessionConfig::new()
        .data_file(cli.data_file)
        .log_file(cli.log_file);
    debug!("using {:?}", config);

    let stdin = io::stdin();
    run_session(&config, stdin.lock(), io::stdout()).with_context(|| {
        format!(
            "inventory session over '{}' and '{}' ended abnormally",
            config.data_file.display(),
            config.log_file.display()
        )
    })?;
    Ok(())
}
