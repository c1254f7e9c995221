mod cli;
mod replay;

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use boxwm_common::{ConfigError, WmError};
use boxwm_config::schema::BoxConfig;
use tracing_subscriber::EnvFilter;

/// Config from `--config` or the default location.
fn load_config(args: &cli::Args) -> Result<BoxConfig, ConfigError> {
    match &args.config {
        Some(path) => boxwm_config::toml_loader::load_from_path(path),
        None => boxwm_config::load_config(),
    }
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "boxwm=info".parse().unwrap()),
            ),
        )
        .init();
}

fn run(args: &cli::Args, config: &BoxConfig) -> Result<(), WmError> {
    if args.print_config {
        println!("{}", boxwm_config::config_to_json(config));
        return Ok(());
    }

    let replay = replay::Replay::new(args.screen, config);
    let summary = match &args.replay {
        Some(path) => {
            tracing::info!("Replaying {}", path.display());
            replay.run(BufReader::new(File::open(path)?))?
        }
        None => {
            tracing::info!("Replaying script from stdin");
            replay.run(std::io::stdin().lock())?
        }
    };

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| WmError::Other(format!("failed to serialize summary: {e}")))?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Logging comes up after the config so `[logging] level` can apply;
    // a load failure is reported once the subscriber exists.
    let loaded = load_config(&args);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.as_filter())
        .unwrap_or("info");
    let directive = args
        .log_level
        .as_deref()
        .map(|l| format!("boxwm={l}"))
        .unwrap_or_else(|| format!("boxwm={level}"));
    init_logging(&directive);

    tracing::info!("boxwm v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BoxConfig::default()
    });

    match run(&args, &config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
