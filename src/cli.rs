use clap::Parser;
use std::path::PathBuf;
use crate::config::GeneratorConfig;
use crate::error::Result;

/// Generate recolored alternate app icons and splash images.
///
/// With no arguments the stock project layout and the four reference themes are used.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// JSON config file; fields left out keep their defaults.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base icon to recolor (overrides the config).
    #[arg(long, short = 'b', value_name = "FILE")]
    pub base: Option<PathBuf>,

    /// Project folder receiving the generated assets (overrides the config).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write a JSON report of every generated file.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long = "print-config", default_value_t = false)]
    pub print_config: bool,
}

impl Cli {
    /// Build the configuration: defaults, then the config file, then flags
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(base) = &self.base {
            config.base_icon = base.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }

        Ok(config)
    }
}
