//! Compact URL share codec for seed palettes.
//!
//! Each seed travels as `<key>=<L>_<C>_<H>` with the single-letter role keys
//! `p n a s w e` and the canonical numeric precisions (lightness percentage
//! to 2 decimals, chroma to 3, hue to 2). Decoding is tolerant: malformed or
//! unknown entries are skipped per-entry, never fatal.

use std::borrow::Cow;

use tracing::debug;

use crate::color::{Oklch, Rgb};
use crate::palette::{Role, SeedPalette};

/// Serialize a palette as a URL query string, roles in canonical order.
pub fn encode(palette: &SeedPalette) -> String {
    let pairs: Vec<String> = palette
        .iter()
        .map(|(role, rgb)| {
            let oklch = Oklch::from_rgb(rgb);
            let value = format!("{:.2}_{:.3}_{:.2}", oklch.l * 100.0, oklch.c, oklch.h);
            format!("{}={}", role.share_key(), urlencoding::encode(&value))
        })
        .collect();
    pairs.join("&")
}

/// Seeds recovered from a share query. Roles the query did not carry (or
/// carried malformed) stay unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSeeds {
    colors: [Option<Rgb>; 6],
}

impl DecodedSeeds {
    pub fn get(&self, role: Role) -> Option<Rgb> {
        self.colors[role as usize]
    }

    /// True iff at least one role decoded successfully.
    pub fn has_any(&self) -> bool {
        self.colors.iter().any(Option::is_some)
    }

    /// Overlay the decoded roles onto a palette, leaving the rest alone.
    pub fn apply(&self, palette: &mut SeedPalette) {
        for role in Role::ALL {
            if let Some(color) = self.get(role) {
                palette.set(role, color);
            }
        }
    }
}

/// Parse a share query (with or without a leading `?`).
pub fn decode(query: &str) -> DecodedSeeds {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut decoded = DecodedSeeds::default();

    for pair in query.split('&') {
        let Some((key, raw_value)) = pair.split_once('=') else {
            continue;
        };
        let mut key_chars = key.chars();
        let (Some(letter), None) = (key_chars.next(), key_chars.next()) else {
            continue;
        };
        let Some(role) = Role::from_share_key(letter) else {
            continue;
        };
        let value: Cow<'_, str> = match urlencoding::decode(raw_value) {
            Ok(value) => value,
            Err(_) => continue,
        };
        let Some(oklch) = parse_triple(&value) else {
            debug!(key = %letter, value = %value, "skipping malformed share entry");
            continue;
        };
        decoded.colors[role as usize] = Some(oklch.to_rgb());
    }

    decoded
}

/// `L_C_H` -> OKLCH. Requires exactly three finite numbers.
fn parse_triple(value: &str) -> Option<Oklch> {
    let mut parts = value.split('_');
    let l: f64 = parts.next()?.parse().ok()?;
    let c: f64 = parts.next()?.parse().ok()?;
    let h: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || ![l, c, h].iter().all(|n| n.is_finite()) {
        return None;
    }
    Some(Oklch::new(l / 100.0, c, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_palette() -> SeedPalette {
        // Seeds chosen away from the gamut edge so the canonical precisions
        // round-trip within +/-1 per channel.
        SeedPalette {
            primary: Rgb::from_hex("#3b82f6").unwrap(),
            neutral: Rgb::from_hex("#6b7280").unwrap(),
            accent: Rgb::from_hex("#8b5cf6").unwrap(),
            success: Rgb::from_hex("#15803d").unwrap(),
            warning: Rgb::from_hex("#b45f12").unwrap(),
            error: Rgb::from_hex("#b91c1c").unwrap(),
        }
    }

    #[test]
    fn encode_emits_all_roles_in_order() {
        let query = encode(&SeedPalette::default());
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap().0)
            .collect();
        assert_eq!(keys, ["p", "n", "a", "s", "w", "e"]);
    }

    #[test]
    fn encode_uses_canonical_precision() {
        let query = encode(&SeedPalette::default());
        assert!(
            query.starts_with("p=62.31_0.188_259.81&n=55.10_0.023_264.36"),
            "unexpected query: {query}"
        );
    }

    #[test]
    fn underscores_and_dots_survive_percent_encoding() {
        let query = encode(&SeedPalette::default());
        assert!(!query.contains('%'), "values should need no escaping: {query}");
    }

    #[test]
    fn decode_encode_identity() {
        let palette = tight_palette();
        let decoded = decode(&encode(&palette));
        assert!(decoded.has_any());
        for (role, original) in palette.iter() {
            let back = decoded.get(role).expect("role missing after round trip");
            for (a, b) in [(back.r, original.r), (back.g, original.g), (back.b, original.b)] {
                assert!(
                    (a as i16 - b as i16).abs() <= 1,
                    "{role:?}: {} -> {}",
                    original.to_hex(),
                    back.to_hex()
                );
            }
        }
    }

    #[test]
    fn malformed_entries_are_skipped_individually() {
        let decoded = decode("p=garbage&n=1_2_3");
        assert!(decoded.has_any());
        assert!(decoded.get(Role::Primary).is_none());
        assert!(decoded.get(Role::Neutral).is_some());
        for role in [Role::Accent, Role::Success, Role::Warning, Role::Error] {
            assert!(decoded.get(role).is_none());
        }
    }

    #[test]
    fn unknown_keys_and_empty_queries() {
        assert!(!decode("").has_any());
        assert!(!decode("x=1_2_3&zz=4_5_6").has_any());
        assert!(!decode("p=1_2").has_any(), "two numbers is not a triple");
        assert!(!decode("p=1_2_3_4").has_any(), "four numbers is not a triple");
        assert!(!decode("p=1_2_NaN").has_any(), "NaN is rejected");
    }

    #[test]
    fn leading_question_mark_is_accepted() {
        let query = format!("?{}", encode(&SeedPalette::default()));
        assert!(decode(&query).has_any());
    }

    #[test]
    fn percent_encoded_values_decode() {
        let decoded = decode("n=55.10%5F0.023%5F264.36");
        assert!(decoded.get(Role::Neutral).is_some());
    }

    #[test]
    fn apply_overlays_only_decoded_roles() {
        let mut palette = SeedPalette::default();
        let original_accent = palette.accent;
        decode("p=55.00_0.100_200.00").apply(&mut palette);
        assert_ne!(palette.primary, SeedPalette::default().primary);
        assert_eq!(palette.accent, original_accent);
    }
}
