use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use crate::error::{IconError, Result};

/// A named background color applied to produce one icon variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Target background color. Accepts `[r, g, b]` or `"#rrggbb"` when deserialized.
    #[serde(deserialize_with = "deserialize_color")]
    pub color: (u8, u8, u8),
}

impl Theme {
    pub fn new(name: impl Into<String>, color: (u8, u8, u8)) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Alternate icon name registered with the app (`AppIcon-Ocean`)
    pub fn alternate_icon_name(&self) -> String {
        format!("AppIcon-{}", self.name)
    }

    /// Image set holding the splash screen icon (`AppIconImage-Ocean`)
    pub fn splash_image_set_name(&self) -> String {
        format!("AppIconImage-{}", self.name)
    }
}

/// The four alternate themes shipped with the app. The stock indigo icon is
/// the base image and is not regenerated.
pub fn reference_themes() -> Vec<Theme> {
    vec![
        Theme::new("Ocean", (10, 132, 255)),
        Theme::new("Emerald", (48, 209, 88)),
        Theme::new("Sunset", (255, 107, 44)),
        Theme::new("Rose", (255, 45, 85)),
    ]
}

/// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form
pub fn parse_hex_color(s: &str) -> Result<(u8, u8, u8)> {
    let rgb = Srgb::<u8>::from_str(s.trim())
        .map_err(|e| IconError::InvalidParameter(format!("Invalid color '{}': {}", s, e)))?;
    Ok((rgb.red, rgb.green, rgb.blue))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels((u8, u8, u8)),
}

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<(u8, u8, u8), D::Error>
where
    D: Deserializer<'de>,
{
    match ColorRepr::deserialize(deserializer)? {
        ColorRepr::Channels(rgb) => Ok(rgb),
        ColorRepr::Hex(s) => parse_hex_color(&s).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_themes() {
        let themes = reference_themes();
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Ocean", "Emerald", "Sunset", "Rose"]);
        assert_eq!(themes[0].color, (10, 132, 255));
        assert_eq!(themes[3].color, (255, 45, 85));
    }

    #[test]
    fn test_asset_names() {
        let theme = Theme::new("Sunset", (255, 107, 44));
        assert_eq!(theme.alternate_icon_name(), "AppIcon-Sunset");
        assert_eq!(theme.splash_image_set_name(), "AppIconImage-Sunset");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#0A84FF").unwrap(), (10, 132, 255));
        assert_eq!(parse_hex_color("30d158").unwrap(), (48, 209, 88));
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_deserialize_color_forms() {
        let hex: Theme = serde_json::from_str(r##"{"name": "Rose", "color": "#FF2D55"}"##).unwrap();
        let array: Theme = serde_json::from_str(r#"{"name": "Rose", "color": [255, 45, 85]}"#).unwrap();
        assert_eq!(hex, array);
        assert_eq!(hex.color, (255, 45, 85));
    }

    #[test]
    fn test_deserialize_rejects_bad_color() {
        assert!(serde_json::from_str::<Theme>(r#"{"name": "X", "color": "blue"}"#).is_err());
        assert!(serde_json::from_str::<Theme>(r#"{"name": "X", "color": [300, 0, 0]}"#).is_err());
    }
}
