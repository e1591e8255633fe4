use clap::Parser;
use icon_themes_lib::cli::Cli;

fn main() -> anyhow::Result<()> {
    icon_themes_lib::run(Cli::parse())
}
