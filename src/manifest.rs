//! Asset catalog `Contents.json` emission
//!
//! Xcode writes these files with two-space indentation and a `" : "` key
//! separator. The formatter below reproduces that layout so regenerated
//! manifests don't show up as diffs after Xcode touches them.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;
use crate::config::{AppIconSize, SplashImageSize};
use crate::error::{IconError, Result};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssetImage {
    pub filename: String,
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssetInfo {
    pub author: String,
    pub version: u32,
}

impl Default for AssetInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssetContents {
    pub images: Vec<AssetImage>,
    pub info: AssetInfo,
}

impl AssetContents {
    /// `.imageset` listing one universal image per scale
    pub fn image_set(splash_images: &[SplashImageSize]) -> Self {
        let images = splash_images
            .iter()
            .map(|splash| AssetImage {
                filename: splash.filename(),
                idiom: "universal".to_string(),
                platform: None,
                scale: Some(splash.scale.clone()),
                size: None,
            })
            .collect();

        Self {
            images,
            info: AssetInfo::default(),
        }
    }

    /// `.appiconset` with a single-size icon
    pub fn app_icon_set(app_icon: &AppIconSize) -> Self {
        Self {
            images: vec![AssetImage {
                filename: app_icon.filename(),
                idiom: "universal".to_string(),
                platform: Some(app_icon.platform.clone()),
                scale: None,
                size: Some(format!("{}x{}", app_icon.size, app_icon.size)),
            }],
            info: AssetInfo::default(),
        }
    }

    /// Render in Xcode's layout (no trailing newline)
    pub fn to_xcode_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, XcodeFormatter::new());
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer)
            .map_err(|e| IconError::Processing(format!("Manifest is not valid UTF-8: {}", e)))
    }
}

/// Pretty printer with Xcode's `"key" : value` separator
struct XcodeFormatter {
    inner: PrettyFormatter<'static>,
}

impl XcodeFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for XcodeFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_set_matches_xcode_layout() {
        let config = GeneratorConfig::default();
        let json = AssetContents::image_set(&config.splash_images).to_xcode_json().unwrap();

        let expected = r#"{
  "images" : [
    {
      "filename" : "icon_120.png",
      "idiom" : "universal",
      "scale" : "1x"
    },
    {
      "filename" : "icon_240.png",
      "idiom" : "universal",
      "scale" : "2x"
    },
    {
      "filename" : "icon_360.png",
      "idiom" : "universal",
      "scale" : "3x"
    }
  ],
  "info" : {
    "author" : "xcode",
    "version" : 1
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_app_icon_set() {
        let app_icon = AppIconSize { size: 1024, platform: "ios".to_string() };
        let json = AssetContents::app_icon_set(&app_icon).to_xcode_json().unwrap();

        let expected = r#"{
  "images" : [
    {
      "filename" : "icon_1024.png",
      "idiom" : "universal",
      "platform" : "ios",
      "size" : "1024x1024"
    }
  ],
  "info" : {
    "author" : "xcode",
    "version" : 1
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_output_is_valid_json() {
        let config = GeneratorConfig::default();
        let json = AssetContents::image_set(&config.splash_images).to_xcode_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["images"].as_array().unwrap().len(), 3);
        assert_eq!(value["info"]["version"], 1);
    }
}
