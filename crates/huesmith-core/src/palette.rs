//! Seed palette: the six user-chosen colors every theme token derives from.

use rand::Rng;

use crate::color::{Oklch, Rgb};

/// The six fixed seed roles, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Neutral,
    Accent,
    Success,
    Warning,
    Error,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Primary,
        Role::Neutral,
        Role::Accent,
        Role::Success,
        Role::Warning,
        Role::Error,
    ];

    /// Name used in CSS custom properties and persisted records.
    pub fn name(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Neutral => "neutral",
            Role::Accent => "accent",
            Role::Success => "success",
            Role::Warning => "warning",
            Role::Error => "error",
        }
    }

    /// Single-letter key used in share URLs.
    pub fn share_key(self) -> char {
        match self {
            Role::Primary => 'p',
            Role::Neutral => 'n',
            Role::Accent => 'a',
            Role::Success => 's',
            Role::Warning => 'w',
            Role::Error => 'e',
        }
    }

    pub fn from_share_key(key: char) -> Option<Self> {
        match key {
            'p' => Some(Role::Primary),
            'n' => Some(Role::Neutral),
            'a' => Some(Role::Accent),
            's' => Some(Role::Success),
            'w' => Some(Role::Warning),
            'e' => Some(Role::Error),
            _ => None,
        }
    }
}

/// An immutable-by-convention snapshot of all six seed colors.
///
/// Every role is always present; derivation never has to handle a missing
/// seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPalette {
    pub primary: Rgb,
    pub neutral: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
}

impl SeedPalette {
    pub fn get(&self, role: Role) -> Rgb {
        match role {
            Role::Primary => self.primary,
            Role::Neutral => self.neutral,
            Role::Accent => self.accent,
            Role::Success => self.success,
            Role::Warning => self.warning,
            Role::Error => self.error,
        }
    }

    pub fn set(&mut self, role: Role, color: Rgb) {
        match role {
            Role::Primary => self.primary = color,
            Role::Neutral => self.neutral = color,
            Role::Accent => self.accent = color,
            Role::Success => self.success = color,
            Role::Warning => self.warning = color,
            Role::Error => self.error = color,
        }
    }

    /// The seed's OKLCH value (the forward transform of its hex color).
    pub fn seed_oklch(&self, role: Role) -> Oklch {
        Oklch::from_rgb(self.get(role))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, Rgb)> + '_ {
        Role::ALL.iter().map(|&role| (role, self.get(role)))
    }

    /// Replace primary, neutral and accent with a random but coordinated
    /// trio: one random primary hue, a desaturated neutral on the same hue,
    /// and a complementary accent. Lightness stays mid-range so white or
    /// black text keeps reasonable contrast.
    pub fn randomize_brand<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let primary_hue = rng.random_range(0..360) as f64;
        self.primary = hsl_to_rgb(primary_hue, 80.0, 48.0);
        self.neutral = hsl_to_rgb(primary_hue, 10.0, 50.0);
        let accent_hue = (primary_hue + 180.0) % 360.0;
        self.accent = hsl_to_rgb(accent_hue, 90.0, 60.0);
    }

    /// Replace the status seeds with random hues inside their semantic
    /// ranges: success green (120-160), warning amber (30-50, yellow proper
    /// is too light against white), error red wrapping around 0 (350-30).
    pub fn randomize_status<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let success_hue = 120 + rng.random_range(0..40);
        self.success = hsl_to_rgb(success_hue as f64, 85.0, 48.0);

        let warning_hue = 30 + rng.random_range(0..20);
        self.warning = hsl_to_rgb(warning_hue as f64, 95.0, 50.0);

        let mut error_hue = rng.random_range(0..40) - 10;
        if error_hue < 0 {
            error_hue += 360;
        }
        self.error = hsl_to_rgb(error_hue as f64, 90.0, 50.0);
    }
}

impl Default for SeedPalette {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0x3b, 0x82, 0xf6),
            neutral: Rgb::new(0x6b, 0x72, 0x80),
            accent: Rgb::new(0x8b, 0x5c, 0xf6),
            success: Rgb::new(0x10, 0xb9, 0x81),
            warning: Rgb::new(0xf5, 0x9e, 0x0b),
            error: Rgb::new(0xef, 0x44, 0x44),
        }
    }
}

/// HSL (h in degrees, s and l in percent) to 8-bit sRGB.
///
/// Used only by the randomizers; the rest of the system speaks hex and OKLCH.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round() as u8
    };
    Rgb::new(channel(0.0), channel(8.0), channel(4.0))
}
