//! Background Recolor Filter
//!
//! Remaps the solid background of a two-tone icon to a new color while
//! keeping the near-white glyph intact. Every pixel is classified by its
//! whiteness (mean of R, G, B) into one of three bands:
//! 1. Background (`< 200`) - scaled to the target color, keeping relative brightness
//! 2. Edge (`200..240`) - blended from the target color toward white
//! 3. Foreground (`>= 240`) - left untouched
//!
//! Alpha is never modified and each output pixel depends only on the
//! matching input pixel, so rows are processed in parallel.

use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// SETTINGS
// ============================================================================

/// Background color of the stock base icon (indigo)
pub const ORIGINAL_BG: (u8, u8, u8) = (88, 81, 229);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecolorSettings {
    /// Background color the base icon was drawn with (default: (88, 81, 229))
    pub reference_background: (u8, u8, u8),
    /// Whiteness below which a pixel is background (default: 200)
    pub background_max: f64,
    /// Whiteness at or above which a pixel is foreground (default: 240)
    pub edge_max: f64,
}

impl Default for RecolorSettings {
    fn default() -> Self {
        Self {
            reference_background: ORIGINAL_BG,
            background_max: 200.0,
            edge_max: 240.0,
        }
    }
}

impl RecolorSettings {
    /// Average brightness of the reference background
    pub fn reference_average(&self) -> f64 {
        let (r, g, b) = self.reference_background;
        whiteness([r, g, b])
    }
}

/// Classification band of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Background,
    Edge,
    Foreground,
}

/// Pixel count per band
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub background: u64,
    pub edge: u64,
    pub foreground: u64,
}

impl BandCounts {
    pub fn total(&self) -> u64 {
        self.background + self.edge + self.foreground
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Mean of the red, green and blue channels
pub fn whiteness(rgb: [u8; 3]) -> f64 {
    (rgb[0] as f64 + rgb[1] as f64 + rgb[2] as f64) / 3.0
}

fn band_for(whiteness: f64, settings: &RecolorSettings) -> Band {
    if whiteness < settings.background_max {
        Band::Background
    } else if whiteness < settings.edge_max {
        Band::Edge
    } else {
        Band::Foreground
    }
}

/// Classify one pixel by its whiteness. Alpha is ignored.
pub fn classify(rgb: [u8; 3], settings: &RecolorSettings) -> Band {
    band_for(whiteness(rgb), settings)
}

/// Count how many pixels of an image fall in each band
pub fn band_counts(img: &RgbaImage, settings: &RecolorSettings) -> BandCounts {
    img.pixels().fold(BandCounts::default(), |mut counts, pixel| {
        match classify([pixel[0], pixel[1], pixel[2]], settings) {
            Band::Background => counts.background += 1,
            Band::Edge => counts.edge += 1,
            Band::Foreground => counts.foreground += 1,
        }
        counts
    })
}

// ============================================================================
// RECOLOR
// ============================================================================

/// Clamp to the channel range and truncate
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// New RGB for one pixel. Reads only the pixel's original channels.
pub fn recolor_rgb(rgb: [u8; 3], target: (u8, u8, u8), settings: &RecolorSettings) -> [u8; 3] {
    let w = whiteness(rgb);
    let target = [target.0 as f64, target.1 as f64, target.2 as f64];

    match band_for(w, settings) {
        Band::Background => {
            let ratio = w / settings.reference_average();
            target.map(|c| to_channel(c * ratio))
        }
        Band::Edge => {
            let blend = (w - settings.background_max) / (settings.edge_max - settings.background_max);
            target.map(|c| to_channel(c * (1.0 - blend) + 255.0 * blend))
        }
        Band::Foreground => rgb,
    }
}

/// Recolor an image in place
///
/// Rows are processed in parallel; the result is identical to a
/// sequential pass since no pixel reads its neighbours.
pub fn recolor_in_place(img: &mut RgbaImage, target: (u8, u8, u8), settings: &RecolorSettings) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let row_len = width as usize * 4;
    let buffer: &mut [u8] = img;

    buffer.par_chunks_mut(row_len).for_each(|row| {
        for pixel in row.chunks_exact_mut(4) {
            let [r, g, b] = recolor_rgb([pixel[0], pixel[1], pixel[2]], target, settings);
            pixel[0] = r;
            pixel[1] = g;
            pixel[2] = b;
        }
    });
}

/// Produce a recolored copy of `img` with the background remapped to `target`
pub fn recolor(img: &RgbaImage, target: (u8, u8, u8), settings: &RecolorSettings) -> RgbaImage {
    let mut out = img.clone();
    recolor_in_place(&mut out, target, settings);
    out
}

// ============================================================================
// TESTS
// ============================================================================
