use clap::Parser;
use icon_themes_lib::generator::load_image;
use icon_themes_lib::recolor::{band_counts, RecolorSettings};
use std::path::PathBuf;

/// Print how the pixels of an icon split across the background, edge and
/// foreground bands. Handy for checking a new base icon before generating.
#[derive(Parser, Debug)]
struct Args {
    /// Images to inspect
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = RecolorSettings::default();

    for path in &args.images {
        let img = load_image(path)?;
        let counts = band_counts(&img, &settings);
        let total = counts.total().max(1) as f64;

        println!("{} ({}x{})", path.display(), img.width(), img.height());
        println!("  Background: {:>8} ({:.1}%)", counts.background, counts.background as f64 * 100.0 / total);
        println!("  Edge:       {:>8} ({:.1}%)", counts.edge, counts.edge as f64 * 100.0 / total);
        println!("  Foreground: {:>8} ({:.1}%)", counts.foreground, counts.foreground as f64 * 100.0 / total);
        println!();
    }

    Ok(())
}
