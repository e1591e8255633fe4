//! Generation configuration
//!
//! Everything the generator needs is carried in a `GeneratorConfig` value that
//! is passed explicitly into `generator::generate`. `Default` reproduces the
//! stock layout of the app project; a JSON file may override any field.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{IconError, Result};
use crate::recolor::RecolorSettings;
use crate::theme::{reference_themes, Theme};

// ============================================================================
// SIZE TABLES
// ============================================================================

/// Loose alternate icon PNG (`AppIcon-Ocean@2x.png`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternateIconSize {
    /// Appended to the icon name, e.g. "@2x"
    pub suffix: String,
    pub size: u32,
}

/// One entry of the splash screen image set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplashImageSize {
    /// File is written as `icon_<name>.png`
    pub name: String,
    pub size: u32,
    /// Asset catalog scale, e.g. "2x"
    pub scale: String,
}

impl SplashImageSize {
    pub fn filename(&self) -> String {
        format!("icon_{}.png", self.name)
    }
}

/// Single-size marketing icon inside an `.appiconset`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppIconSize {
    pub size: u32,
    pub platform: String,
}

impl AppIconSize {
    pub fn filename(&self) -> String {
        format!("icon_{}.png", self.size)
    }
}

// ============================================================================
// GENERATOR CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Source icon drawn on the reference background
    pub base_icon: PathBuf,
    /// Project folder receiving the loose alternate icons
    pub output_dir: PathBuf,
    /// Asset catalog folder name inside `output_dir`
    pub asset_catalog: String,
    pub themes: Vec<Theme>,
    pub alternate_icons: Vec<AlternateIconSize>,
    pub splash_images: Vec<SplashImageSize>,
    /// Optional per-theme `.appiconset`
    pub app_icon: Option<AppIconSize>,
    pub recolor: RecolorSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_icon: PathBuf::from("FocusCage/Assets.xcassets/AppIcon.appiconset/icon_1024.png"),
            output_dir: PathBuf::from("FocusCage"),
            asset_catalog: "Assets.xcassets".to_string(),
            themes: reference_themes(),
            alternate_icons: vec![
                AlternateIconSize { suffix: "@2x".to_string(), size: 120 },
                AlternateIconSize { suffix: "@3x".to_string(), size: 180 },
            ],
            splash_images: vec![
                SplashImageSize { name: "120".to_string(), size: 120, scale: "1x".to_string() },
                SplashImageSize { name: "240".to_string(), size: 240, scale: "2x".to_string() },
                SplashImageSize { name: "360".to_string(), size: 360, scale: "3x".to_string() },
            ],
            app_icon: Some(AppIconSize { size: 1024, platform: "ios".to_string() }),
            recolor: RecolorSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a JSON config file. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn asset_catalog_dir(&self) -> PathBuf {
        self.output_dir.join(&self.asset_catalog)
    }

    /// Number of files written for a single theme (PNGs and manifests)
    pub fn files_per_theme(&self) -> usize {
        let splash = if self.splash_images.is_empty() {
            0
        } else {
            self.splash_images.len() + 1
        };
        let app_icon = if self.app_icon.is_some() { 2 } else { 0 };
        self.alternate_icons.len() + splash + app_icon
    }

    /// Reject tables that would produce empty or colliding outputs
    pub fn validate(&self) -> Result<()> {
        if self.themes.is_empty() {
            return Err(IconError::Config("No themes configured".to_string()));
        }

        let mut names = HashSet::new();
        for theme in &self.themes {
            if theme.name.trim().is_empty() {
                return Err(IconError::Config("Theme name must not be empty".to_string()));
            }
            if !names.insert(theme.name.as_str()) {
                return Err(IconError::Config(format!("Duplicate theme name: {}", theme.name)));
            }
        }

        let mut suffixes = HashSet::new();
        for icon in &self.alternate_icons {
            check_size(icon.size, "alternate icon")?;
            if !suffixes.insert(icon.suffix.as_str()) {
                return Err(IconError::Config(format!("Duplicate alternate icon suffix: {}", icon.suffix)));
            }
        }

        let mut splash_names = HashSet::new();
        for splash in &self.splash_images {
            check_size(splash.size, "splash image")?;
            if !splash_names.insert(splash.name.as_str()) {
                return Err(IconError::Config(format!("Duplicate splash image name: {}", splash.name)));
            }
        }

        if let Some(app_icon) = &self.app_icon {
            check_size(app_icon.size, "app icon")?;
        }

        if self.recolor.reference_average() <= 0.0 {
            return Err(IconError::Config(format!(
                "reference_background {:?} is black; background brightness ratios would divide by zero",
                self.recolor.reference_background
            )));
        }

        if self.recolor.edge_max <= self.recolor.background_max {
            return Err(IconError::Config(format!(
                "edge_max ({}) must be greater than background_max ({})",
                self.recolor.edge_max, self.recolor.background_max
            )));
        }

        Ok(())
    }
}

fn check_size(size: u32, what: &str) -> Result<()> {
    if size == 0 {
        return Err(IconError::Config(format!("{} size must be non-zero", what)));
    }
    Ok(())
}
