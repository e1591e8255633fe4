pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod recolor;
pub mod report;
pub mod theme;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use cli::Cli;

pub use config::GeneratorConfig;
pub use error::{IconError, Result};
pub use generator::generate;
pub use recolor::{recolor, RecolorSettings};
pub use theme::Theme;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        // Fallback to the `default_level` log filter if the environment
        // variable is not set _or_ contains an invalid value
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging("info");

    let config = cli.resolve_config().context("failed to build configuration")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let report = generate(&config)
        .with_context(|| format!("icon generation from {} failed", config.base_icon.display()))?;

    if let Some(path) = &cli.report {
        report
            .save(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote report");
    }

    Ok(())
}
