mod components;
mod runner;

use clap::Parser;
use runner::DemoApplication;
use std::sync::Arc;
use weave_core::{init_logging, AppConfig, AppConfigTrait, LoggingConfig, StdoutSink};

#[derive(Parser)]
#[command(name = "weave-demo")]
#[command(about = "Prepare a small container and show its interception proxies at work")]
#[command(version)]
struct Cli {
    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit diagnostics as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level.to_lowercase();
    }
    if cli.json_logs {
        config.json_logs = true;
    }
    config.validate()?;

    init_logging(&LoggingConfig::from_app_config(&config))
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let app = DemoApplication::bootstrap(&config, Arc::new(StdoutSink))?;
    app.run()?;
    tracing::debug!(
        candidates = app.container().candidate_count(),
        state = ?app.container().state(),
        "Demo run finished"
    );

    Ok(())
}
