//! Generation report
//!
//! Records every file a run wrote, with its SHA-256, so two runs can be
//! compared for reproducibility without diffing images.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::recolor::BandCounts;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    AlternateIcon,
    SplashImage,
    AppIcon,
    Manifest,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub kind: OutputKind,
    /// Pixel dimensions, `None` for manifests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    pub bytes: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeReport {
    pub theme: String,
    pub color: (u8, u8, u8),
    pub files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub generated_at: DateTime<Utc>,
    pub base_icon: PathBuf,
    pub base_size: (u32, u32),
    /// Band distribution of the base icon
    pub base_bands: BandCounts,
    pub themes: Vec<ThemeReport>,
}

impl GenerationReport {
    pub fn new(base_icon: &Path, base_size: (u32, u32), base_bands: BandCounts) -> Self {
        Self {
            generated_at: Utc::now(),
            base_icon: base_icon.to_path_buf(),
            base_size,
            base_bands,
            themes: Vec::new(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.themes.iter().map(|t| t.files.len()).sum()
    }

    /// All written paths in generation order
    pub fn paths(&self) -> Vec<&Path> {
        self.themes
            .iter()
            .flat_map(|t| t.files.iter().map(|f| f.path.as_path()))
            .collect()
    }

    /// True when no two entries point at the same path
    pub fn has_unique_paths(&self) -> bool {
        let paths = self.paths();
        paths.iter().collect::<HashSet<_>>().len() == paths.len()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Calculate SHA-256 hash of bytes as lowercase hex
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{:x}", result)
}
