use huesmith_core::color::ParseError;
use huesmith_core::{Rgb, SeedPalette};
use serde::{Deserialize, Serialize};

pub type PaletteId = i64;

/// A persisted palette snapshot: millisecond timestamp id, display
/// timestamp, and the six seed colors as hex strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub id: PaletteId,
    pub timestamp: String,
    pub colors: PaletteColors,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColors {
    pub primary: String,
    pub neutral: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl PaletteColors {
    pub fn from_palette(palette: &SeedPalette) -> Self {
        Self {
            primary: palette.primary.to_hex(),
            neutral: palette.neutral.to_hex(),
            accent: palette.accent.to_hex(),
            success: palette.success.to_hex(),
            warning: palette.warning.to_hex(),
            error: palette.error.to_hex(),
        }
    }

    pub fn to_palette(&self) -> Result<SeedPalette, ParseError> {
        Ok(SeedPalette {
            primary: Rgb::from_hex(&self.primary)?,
            neutral: Rgb::from_hex(&self.neutral)?,
            accent: Rgb::from_hex(&self.accent)?,
            success: Rgb::from_hex(&self.success)?,
            warning: Rgb::from_hex(&self.warning)?,
            error: Rgb::from_hex(&self.error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_round_trip_through_hex() {
        let palette = SeedPalette::default();
        let colors = PaletteColors::from_palette(&palette);
        assert_eq!(colors.primary, "#3b82f6");
        assert_eq!(colors.to_palette().unwrap(), palette);
    }

    #[test]
    fn malformed_hex_is_an_error() {
        let mut colors = PaletteColors::from_palette(&SeedPalette::default());
        colors.warning = "not-a-color".to_string();
        assert!(colors.to_palette().is_err());
    }

    #[test]
    fn record_serializes_with_role_names() {
        let record = PaletteRecord {
            id: 1700000000000,
            timestamp: "1/1/2026, 10:00:00 AM".to_string(),
            colors: PaletteColors::from_palette(&SeedPalette::default()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"primary\":\"#3b82f6\""));
        let back: PaletteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
