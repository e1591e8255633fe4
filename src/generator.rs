//! Themed Icon Generator
//!
//! Loads the base icon once, then for every configured theme:
//! 1. Recolors the background to the theme color
//! 2. Writes loose alternate icon PNGs into the project folder
//! 3. Writes the splash screen `.imageset` (PNGs + Contents.json)
//! 4. Writes the single-size `.appiconset` (PNG + Contents.json)
//!
//! Any load or write failure aborts the run.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::config::GeneratorConfig;
use crate::error::{IconError, Result};
use crate::manifest::AssetContents;
use crate::recolor::{band_counts, recolor};
use crate::report::{hash_bytes, GeneratedFile, GenerationReport, OutputKind, ThemeReport};
use crate::theme::Theme;

// ============================================================================
// IMAGE I/O
// ============================================================================

/// Load an image from disk as RGBA
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| IconError::Processing(format!("Failed to load {}: {}", path.display(), e)))?;
    Ok(img.to_rgba8())
}

/// Encode image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Lanczos resample to a square; same-size requests return a copy
pub fn resize_square(img: &RgbaImage, size: u32) -> RgbaImage {
    if img.dimensions() == (size, size) {
        img.clone()
    } else {
        imageops::resize(img, size, size, FilterType::Lanczos3)
    }
}

fn write_output(
    path: PathBuf,
    data: &[u8],
    kind: OutputKind,
    dimensions: Option<(u32, u32)>,
) -> Result<GeneratedFile> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, data)?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");

    Ok(GeneratedFile {
        sha256: hash_bytes(data),
        bytes: data.len(),
        path,
        kind,
        dimensions,
    })
}

fn write_png(img: &RgbaImage, path: PathBuf, kind: OutputKind) -> Result<GeneratedFile> {
    let data = encode_png(img)?;
    write_output(path, &data, kind, Some(img.dimensions()))
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generate every output for one theme from an already loaded base icon
pub fn generate_theme(base: &RgbaImage, theme: &Theme, config: &GeneratorConfig) -> Result<ThemeReport> {
    info!(theme = %theme.name, color = ?theme.color, "generating icons");

    let recolored = recolor(base, theme.color, &config.recolor);
    let mut files = Vec::with_capacity(config.files_per_theme());

    // Loose alternate icon PNGs
    for icon in &config.alternate_icons {
        let filename = format!("{}{}.png", theme.alternate_icon_name(), icon.suffix);
        let resized = resize_square(&recolored, icon.size);
        files.push(write_png(&resized, config.output_dir.join(filename), OutputKind::AlternateIcon)?);
    }

    // Splash screen image set
    if !config.splash_images.is_empty() {
        let set_dir = config
            .asset_catalog_dir()
            .join(format!("{}.imageset", theme.splash_image_set_name()));

        for splash in &config.splash_images {
            let resized = resize_square(&recolored, splash.size);
            files.push(write_png(&resized, set_dir.join(splash.filename()), OutputKind::SplashImage)?);
        }

        let contents = AssetContents::image_set(&config.splash_images).to_xcode_json()?;
        files.push(write_output(set_dir.join("Contents.json"), contents.as_bytes(), OutputKind::Manifest, None)?);
    }

    // Single-size app icon set
    if let Some(app_icon) = &config.app_icon {
        let set_dir = config
            .asset_catalog_dir()
            .join(format!("{}.appiconset", theme.alternate_icon_name()));

        let resized = resize_square(&recolored, app_icon.size);
        files.push(write_png(&resized, set_dir.join(app_icon.filename()), OutputKind::AppIcon)?);

        let contents = AssetContents::app_icon_set(app_icon).to_xcode_json()?;
        files.push(write_output(set_dir.join("Contents.json"), contents.as_bytes(), OutputKind::Manifest, None)?);
    }

    info!(theme = %theme.name, files = files.len(), "theme done");

    Ok(ThemeReport {
        theme: theme.name.clone(),
        color: theme.color,
        files,
    })
}

/// Run the full generation described by `config`
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    let base = load_image(&config.base_icon)?;
    let bands = band_counts(&base, &config.recolor);
    info!(
        path = %config.base_icon.display(),
        width = base.width(),
        height = base.height(),
        background = bands.background,
        edge = bands.edge,
        foreground = bands.foreground,
        "loaded base icon"
    );

    let mut report = GenerationReport::new(&config.base_icon, base.dimensions(), bands);
    for theme in &config.themes {
        report.themes.push(generate_theme(&base, theme, config)?);
    }

    info!(themes = report.themes.len(), files = report.file_count(), "all icon variants generated");
    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AlternateIconSize, AppIconSize, SplashImageSize};
    use crate::theme::reference_themes;
    use image::Rgba;
    use tempfile::TempDir;

    /// Indigo square with a white block in the middle
    fn base_icon() -> RgbaImage {
        RgbaImage::from_fn(64, 64, |x, y| {
            if (16..48).contains(&x) && (16..48).contains(&y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([88, 81, 229, 255])
            }
        })
    }

    fn small_config(dir: &TempDir) -> GeneratorConfig {
        let base_path = dir.path().join("base.png");
        base_icon().save(&base_path).unwrap();

        GeneratorConfig {
            base_icon: base_path,
            output_dir: dir.path().join("Project"),
            alternate_icons: vec![
                AlternateIconSize { suffix: "@2x".to_string(), size: 12 },
                AlternateIconSize { suffix: "@3x".to_string(), size: 18 },
            ],
            splash_images: vec![
                SplashImageSize { name: "12".to_string(), size: 12, scale: "1x".to_string() },
                SplashImageSize { name: "24".to_string(), size: 24, scale: "2x".to_string() },
                SplashImageSize { name: "36".to_string(), size: 36, scale: "3x".to_string() },
            ],
            app_icon: Some(AppIconSize { size: 64, platform: "ios".to_string() }),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_resize_square() {
        let img = base_icon();
        assert_eq!(resize_square(&img, 64), img);
        assert_eq!(resize_square(&img, 20).dimensions(), (20, 20));
    }

    #[test]
    fn test_encode_png_roundtrip_dimensions() {
        let bytes = encode_png(&base_icon()).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), base_icon());
    }

    #[test]
    fn test_generate_reference_themes_layout() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        let report = generate(&config).unwrap();

        assert_eq!(report.themes.len(), 4);
        assert_eq!(report.file_count(), 4 * config.files_per_theme());
        assert!(report.has_unique_paths());
        for path in report.paths() {
            assert!(path.is_file(), "missing {}", path.display());
        }

        let project = dir.path().join("Project");
        for theme in reference_themes() {
            assert!(project.join(format!("AppIcon-{}@2x.png", theme.name)).is_file());
            assert!(project.join(format!("AppIcon-{}@3x.png", theme.name)).is_file());

            let splash = project.join(format!("Assets.xcassets/AppIconImage-{}.imageset", theme.name));
            for name in ["icon_12.png", "icon_24.png", "icon_36.png", "Contents.json"] {
                assert!(splash.join(name).is_file(), "missing {}", name);
            }

            let app_icon = project.join(format!("Assets.xcassets/AppIcon-{}.appiconset", theme.name));
            assert!(app_icon.join("icon_64.png").is_file());
            assert!(app_icon.join("Contents.json").is_file());
        }
    }

    #[test]
    fn test_generated_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);
        generate(&config).unwrap();

        // Full-size output skips resampling, so pixels are exact
        let ocean = load_image(&dir.path().join("Project/Assets.xcassets/AppIcon-Ocean.appiconset/icon_64.png")).unwrap();
        assert_eq!(ocean.dimensions(), (64, 64));
        assert_eq!(ocean.get_pixel(0, 0).0, [10, 132, 255, 255]);
        assert_eq!(ocean.get_pixel(32, 32).0, [255, 255, 255, 255]);

        let rose = load_image(&dir.path().join("Project/Assets.xcassets/AppIcon-Rose.appiconset/icon_64.png")).unwrap();
        assert_eq!(rose.get_pixel(63, 63).0, [255, 45, 85, 255]);

        let splash = load_image(&dir.path().join("Project/Assets.xcassets/AppIconImage-Emerald.imageset/icon_36.png")).unwrap();
        assert_eq!(splash.dimensions(), (36, 36));
    }

    #[test]
    fn test_report_hashes_match_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);
        let report = generate(&config).unwrap();

        assert_eq!(report.base_size, (64, 64));
        assert_eq!(report.base_bands.foreground, 32 * 32);
        assert_eq!(report.base_bands.background, 64 * 64 - 32 * 32);

        for theme in &report.themes {
            for file in &theme.files {
                let data = fs::read(&file.path).unwrap();
                assert_eq!(file.bytes, data.len());
                assert_eq!(file.sha256, hash_bytes(&data));
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        let first = generate(&config).unwrap();
        let second = generate(&config).unwrap();

        let hashes = |r: &GenerationReport| -> Vec<String> {
            r.themes.iter().flat_map(|t| t.files.iter().map(|f| f.sha256.clone())).collect()
        };
        assert_eq!(hashes(&first), hashes(&second));
    }

    #[test]
    fn test_missing_base_icon_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            base_icon: dir.path().join("missing.png"),
            output_dir: dir.path().join("Project"),
            ..GeneratorConfig::default()
        };

        match generate(&config) {
            Err(IconError::Processing(msg)) => assert!(msg.contains("missing.png")),
            other => panic!("expected Processing error, got {:?}", other.map(|r| r.file_count())),
        }
        assert!(!dir.path().join("Project").exists());
    }

    #[test]
    fn test_write_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);
        // A regular file where the project folder should be
        fs::write(&config.output_dir, b"not a directory").unwrap();

        match generate(&config) {
            Err(IconError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other.map(|r| r.file_count())),
        }
        assert!(config.output_dir.is_file());
    }

    #[test]
    fn test_optional_sets_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            splash_images: Vec::new(),
            app_icon: None,
            themes: vec![Theme::new("Mono", (0, 0, 0))],
            ..small_config(&dir)
        };

        let report = generate(&config).unwrap();
        assert_eq!(report.file_count(), 2);
        assert!(!dir.path().join("Project/Assets.xcassets").exists());
    }
}
