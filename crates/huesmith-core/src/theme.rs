//! Theme derivation: maps the six seeds to the full design-token set and
//! renders it as a stylesheet.
//!
//! Every token is a pure function of the seed palette and the fixed
//! light/dark coefficient table below; there is no other state. The rendered
//! property names and block nesting are a compatibility contract with
//! consumers that read specific custom properties, so the emitter reproduces
//! them exactly.

use std::fmt::Write;

use tracing::debug;

use crate::color::Oklch;
use crate::contrast::best_text_color;
use crate::palette::{Role, SeedPalette};

/// How the theme is activated on a page root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the OS preference via the media query; no root class.
    Auto,
}

impl ThemeMode {
    /// Class to set on the document root, if any. `Auto` relies on the
    /// `prefers-color-scheme` media block instead.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            ThemeMode::Light => Some("theme-light"),
            ThemeMode::Dark => Some("theme-dark"),
            ThemeMode::Auto => None,
        }
    }
}

/// Which half of the coefficient table a token is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Light,
    Dark,
}

/// How a single token's value is produced from the seeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    /// The seed itself: `var(--seed-<role>)`.
    Seed(Role),
    /// Relative lightness shift keeping chroma and hue:
    /// `oklch(from var(--seed-<role>) calc(l +/- d) c h)`.
    Shift { role: Role, dl: f64 },
    /// Replacement lightness and chroma keeping hue:
    /// `oklch(from var(--seed-<role>) <l>% <c> h)`.
    Rebase { role: Role, l_pct: f64, c: f64 },
    /// A literal value independent of any seed.
    Fixed { l_pct: f64, c: f64, h: f64 },
    /// Contrast-selected text color over the seed (computed, not a formula).
    OnSeed(Role),
}

/// One design token: its custom-property name and its per-variant formula.
/// `dark: None` means the light value holds in both variants.
#[derive(Debug, Clone, Copy)]
pub struct TokenDef {
    pub name: &'static str,
    pub light: TokenValue,
    pub dark: Option<TokenValue>,
}

impl TokenDef {
    pub fn value(&self, variant: Variant) -> TokenValue {
        match variant {
            Variant::Light => self.light,
            Variant::Dark => self.dark.unwrap_or(self.light),
        }
    }
}

const fn shift(role: Role, dl: f64) -> TokenValue {
    TokenValue::Shift { role, dl }
}

const fn rebase(role: Role, l_pct: f64, c: f64) -> TokenValue {
    TokenValue::Rebase { role, l_pct, c }
}

struct TokenGroup {
    light_heading: &'static [&'static str],
    dark_heading: &'static [&'static str],
    tokens: &'static [TokenDef],
}

const fn status_tokens(role: Role) -> [TokenDef; 3] {
    let (bg, text, border) = match role {
        Role::Success => ("bg-success", "text-success", "border-success"),
        Role::Warning => ("bg-warning", "text-warning", "border-warning"),
        _ => ("bg-error", "text-error", "border-error"),
    };
    [
        TokenDef {
            name: bg,
            light: rebase(role, 95.0, 0.05),
            dark: Some(rebase(role, 20.0, 0.05)),
        },
        TokenDef {
            name: text,
            light: rebase(role, 30.0, 0.1),
            dark: Some(rebase(role, 90.0, 0.05)),
        },
        TokenDef {
            name: border,
            light: TokenValue::Seed(role),
            dark: Some(rebase(role, 40.0, 0.1)),
        },
    ]
}

const PRIMARY_TOKENS: [TokenDef; 5] = [
    TokenDef {
        name: "color-primary",
        light: TokenValue::Seed(Role::Primary),
        dark: None,
    },
    TokenDef {
        name: "color-primary-hover",
        light: shift(Role::Primary, -0.05),
        dark: Some(shift(Role::Primary, 0.05)),
    },
    TokenDef {
        name: "color-primary-active",
        light: shift(Role::Primary, -0.1),
        dark: Some(shift(Role::Primary, 0.1)),
    },
    TokenDef {
        name: "color-primary-subtle",
        light: rebase(Role::Primary, 96.0, 0.05),
        dark: Some(rebase(Role::Primary, 25.0, 0.05)),
    },
    TokenDef {
        name: "color-on-primary",
        light: TokenValue::OnSeed(Role::Primary),
        dark: None,
    },
];

const ACCENT_TOKENS: [TokenDef; 2] = [
    TokenDef {
        name: "color-accent",
        light: TokenValue::Seed(Role::Accent),
        dark: None,
    },
    TokenDef {
        name: "color-on-accent",
        light: TokenValue::OnSeed(Role::Accent),
        dark: None,
    },
];

const SURFACE_TOKENS: [TokenDef; 3] = [
    TokenDef {
        name: "bg-canvas",
        light: rebase(Role::Neutral, 99.0, 0.005),
        dark: Some(rebase(Role::Neutral, 12.0, 0.01)),
    },
    TokenDef {
        name: "bg-surface-1",
        light: TokenValue::Fixed {
            l_pct: 100.0,
            c: 0.0,
            h: 0.0,
        },
        dark: Some(rebase(Role::Neutral, 18.0, 0.01)),
    },
    TokenDef {
        name: "bg-surface-2",
        light: rebase(Role::Neutral, 96.0, 0.01),
        dark: Some(rebase(Role::Neutral, 24.0, 0.01)),
    },
];

const BORDER_TOKENS: [TokenDef; 2] = [
    TokenDef {
        name: "border-dim",
        light: rebase(Role::Neutral, 92.0, 0.01),
        dark: Some(rebase(Role::Neutral, 25.0, 0.01)),
    },
    TokenDef {
        name: "border-strong",
        light: rebase(Role::Neutral, 80.0, 0.02),
        dark: Some(rebase(Role::Neutral, 40.0, 0.02)),
    },
];

const TEXT_TOKENS: [TokenDef; 2] = [
    TokenDef {
        name: "text-main",
        light: rebase(Role::Neutral, 15.0, 0.02),
        dark: Some(rebase(Role::Neutral, 98.0, 0.005)),
    },
    TokenDef {
        name: "text-muted",
        light: rebase(Role::Neutral, 45.0, 0.02),
        dark: Some(rebase(Role::Neutral, 70.0, 0.01)),
    },
];

const SUCCESS_TOKENS: [TokenDef; 3] = status_tokens(Role::Success);
const WARNING_TOKENS: [TokenDef; 3] = status_tokens(Role::Warning);
const ERROR_TOKENS: [TokenDef; 3] = status_tokens(Role::Error);

const GROUPS: [TokenGroup; 8] = [
    TokenGroup {
        light_heading: &["Primary Colors"],
        dark_heading: &["Primary Colors"],
        tokens: &PRIMARY_TOKENS,
    },
    TokenGroup {
        light_heading: &["Accent Colors"],
        dark_heading: &[],
        tokens: &ACCENT_TOKENS,
    },
    TokenGroup {
        light_heading: &["Backgrounds & Surfaces"],
        dark_heading: &["Backgrounds & Surfaces"],
        tokens: &SURFACE_TOKENS,
    },
    TokenGroup {
        light_heading: &["Borders"],
        dark_heading: &["Borders"],
        tokens: &BORDER_TOKENS,
    },
    TokenGroup {
        light_heading: &["Text"],
        dark_heading: &["Text"],
        tokens: &TEXT_TOKENS,
    },
    TokenGroup {
        light_heading: &[
            "Status Colors (Semantic)",
            "Light Mode: Light Background, Dark Text",
        ],
        dark_heading: &[
            "Status Colors (Semantic)",
            "Dark Mode: Dark Background, Light Text",
        ],
        tokens: &SUCCESS_TOKENS,
    },
    TokenGroup {
        light_heading: &[],
        dark_heading: &[],
        tokens: &WARNING_TOKENS,
    },
    TokenGroup {
        light_heading: &[],
        dark_heading: &[],
        tokens: &ERROR_TOKENS,
    },
];

/// Every token the theme defines, in emission order.
pub fn token_table() -> impl Iterator<Item = &'static TokenDef> {
    GROUPS.iter().flat_map(|group| group.tokens.iter())
}

/// An immutable derived token set for one seed palette.
///
/// Holds the computed OKLCH seeds and the two contrast-selected text colors;
/// everything else is rendered on demand from the static coefficient table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    seeds: [Oklch; 6],
    on_primary: Oklch,
    on_accent: Oklch,
}

impl Theme {
    pub fn derive(palette: &SeedPalette) -> Self {
        debug!(?palette, "deriving theme tokens");
        let seeds = Role::ALL.map(|role| palette.seed_oklch(role));
        let on_primary = best_text_color(seeds[Role::Primary as usize]);
        let on_accent = best_text_color(seeds[Role::Accent as usize]);
        Self {
            seeds,
            on_primary,
            on_accent,
        }
    }

    pub fn seed(&self, role: Role) -> Oklch {
        self.seeds[role as usize]
    }

    pub fn on_primary(&self) -> Oklch {
        self.on_primary
    }

    pub fn on_accent(&self) -> Oklch {
        self.on_accent
    }

    /// Render one token value as a CSS color value or formula.
    pub fn render(&self, value: TokenValue) -> String {
        match value {
            TokenValue::Seed(role) => format!("var(--seed-{})", role.name()),
            TokenValue::Shift { role, dl } => {
                let (sign, magnitude) = if dl < 0.0 { ('-', -dl) } else { ('+', dl) };
                format!(
                    "oklch(from var(--seed-{}) calc(l {sign} {magnitude}) c h)",
                    role.name()
                )
            }
            TokenValue::Rebase { role, l_pct, c } => {
                format!("oklch(from var(--seed-{}) {l_pct}% {c} h)", role.name())
            }
            TokenValue::Fixed { l_pct, c, h } => format!("oklch({l_pct}% {c} {h})"),
            TokenValue::OnSeed(Role::Primary) => self.on_primary.to_string(),
            TokenValue::OnSeed(Role::Accent) => self.on_accent.to_string(),
            TokenValue::OnSeed(role) => best_text_color(self.seed(role)).to_string(),
        }
    }

    /// The complete stylesheet: seed declarations, light-mode defaults, the
    /// auto dark-mode media block, and both manual override rule sets.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();

        css.push_str("/*\n * DESIGN SYSTEM & VARIABLES\n * Generated by huesmith\n */\n");
        css.push_str(":root {\n");
        css.push_str("    /* 1. SEED COLORS */\n");
        for role in Role::ALL {
            let _ = writeln!(css, "    --seed-{}: {};", role.name(), self.seed(role));
        }
        css.push('\n');
        css.push_str("    /* 2. LIGHT MODE LOGIC (Default) */\n");
        for group in &GROUPS {
            css.push('\n');
            for line in group.light_heading {
                let _ = writeln!(css, "    /* {line} */");
            }
            for token in group.tokens {
                let _ = writeln!(css, "    --{}: {};", token.name, self.render(token.light));
            }
        }
        css.push_str("}\n");

        css.push('\n');
        css.push_str("/* 3. DARK MODE LOGIC */\n");
        css.push_str("@media (prefers-color-scheme: dark) {\n");
        css.push_str("    :root:not(.theme-light) {\n");
        let mut first = true;
        for group in &GROUPS {
            let dark_tokens: Vec<_> = group
                .tokens
                .iter()
                .filter_map(|token| token.dark.map(|value| (token.name, value)))
                .collect();
            if dark_tokens.is_empty() {
                continue;
            }
            if !first {
                css.push('\n');
            }
            first = false;
            for line in group.dark_heading {
                let _ = writeln!(css, "        /* {line} */");
            }
            for (name, value) in dark_tokens {
                let _ = writeln!(css, "        --{}: {};", name, self.render(value));
            }
        }
        css.push_str("    }\n");
        css.push_str("}\n");

        css.push('\n');
        css.push_str("/* Manual Theme Overrides */\n");
        self.override_block(&mut css, ":root.theme-dark", Variant::Dark);
        css.push('\n');
        self.override_block(&mut css, ":root.theme-light", Variant::Light);

        css
    }

    /// A manual override rule set: every variant-dependent token, rendered
    /// for one variant, with the status tokens in their own paragraph.
    fn override_block(&self, css: &mut String, selector: &str, variant: Variant) {
        let _ = writeln!(css, "{selector} {{");
        for (i, group) in GROUPS.iter().enumerate() {
            // Status groups start at index 5; blank line before them.
            if i == 5 {
                css.push('\n');
            }
            for token in group.tokens {
                if token.dark.is_none() {
                    continue;
                }
                let _ = writeln!(
                    css,
                    "    --{}: {};",
                    token.name,
                    self.render(token.value(variant))
                );
            }
        }
        css.push_str("}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn theme() -> Theme {
        Theme::derive(&SeedPalette::default())
    }

    #[test]
    fn mode_classes() {
        assert_eq!(ThemeMode::Light.css_class(), Some("theme-light"));
        assert_eq!(ThemeMode::Dark.css_class(), Some("theme-dark"));
        assert_eq!(ThemeMode::Auto.css_class(), None);
    }

    #[test]
    fn token_names_are_unique_and_complete() {
        let names: Vec<_> = token_table().map(|t| t.name).collect();
        assert_eq!(names.len(), 23);
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len(), "duplicate token names");
        for expected in ["bg-canvas", "text-muted", "border-error", "color-on-accent"] {
            assert!(names.contains(&expected), "missing token {expected}");
        }
    }

    #[test]
    fn seed_declarations_use_canonical_oklch() {
        let css = theme().stylesheet();
        assert!(css.contains("    --seed-primary: oklch(62.31% 0.188 259.81);"));
        assert!(css.contains("    --seed-neutral: oklch(55.10% 0.023 264.36);"));
    }

    #[test]
    fn relative_color_formulas_match_contract() {
        let css = theme().stylesheet();
        assert!(css.contains(
            "    --color-primary-hover: oklch(from var(--seed-primary) calc(l - 0.05) c h);"
        ));
        assert!(css.contains(
            "        --color-primary-active: oklch(from var(--seed-primary) calc(l + 0.1) c h);"
        ));
        assert!(css.contains("    --bg-canvas: oklch(from var(--seed-neutral) 99% 0.005 h);"));
        assert!(css.contains("        --bg-canvas: oklch(from var(--seed-neutral) 12% 0.01 h);"));
        assert!(css.contains("    --bg-surface-1: oklch(100% 0 0);"));
        assert!(css.contains("    --border-success: var(--seed-success);"));
        assert!(css.contains("        --border-success: oklch(from var(--seed-success) 40% 0.1 h);"));
    }

    #[test]
    fn block_nesting_matches_contract() {
        let css = theme().stylesheet();
        assert!(css.contains("@media (prefers-color-scheme: dark) {\n    :root:not(.theme-light) {"));
        assert!(css.contains("\n:root.theme-dark {\n"));
        assert!(css.contains("\n:root.theme-light {\n"));
        // Seeds come first, light values second, dark overrides third.
        let seed_pos = css.find("--seed-primary:").unwrap();
        let light_pos = css.find("--color-primary:").unwrap();
        let dark_pos = css.find("@media").unwrap();
        assert!(seed_pos < light_pos && light_pos < dark_pos);
    }

    #[test]
    fn variant_tokens_appear_in_all_three_override_blocks() {
        let css = theme().stylesheet();
        for name in ["--bg-canvas:", "--text-main:", "--bg-error:", "--border-dim:"] {
            let count = css.matches(name).count();
            assert_eq!(count, 3, "{name} appeared {count} times, expected 3");
        }
        // Base tokens appear only in :root.
        for name in ["--color-primary:", "--color-on-accent:", "--seed-warning:"] {
            let count = css.matches(name).count();
            assert_eq!(count, 1, "{name} appeared {count} times, expected 1");
        }
    }

    #[test]
    fn on_colors_come_from_contrast_engine() {
        let theme = theme();
        assert_eq!(
            theme.on_primary(),
            best_text_color(theme.seed(Role::Primary))
        );
        // Default primary #3b82f6 is light enough that black text wins.
        let css = theme.stylesheet();
        assert!(css.contains("    --color-on-primary: oklch(20.00% 0.020 259.81);"));
    }

    #[test]
    fn on_colors_flip_with_a_dark_seed() {
        let mut palette = SeedPalette::default();
        palette.primary = Rgb::new(16, 32, 64);
        let theme = Theme::derive(&palette);
        assert!(
            (theme.on_primary().l - 0.98).abs() < 1e-12,
            "dark primary should get near-white text"
        );
    }

    #[test]
    fn render_shift_formats_both_signs() {
        let theme = theme();
        assert_eq!(
            theme.render(TokenValue::Shift {
                role: Role::Primary,
                dl: -0.05
            }),
            "oklch(from var(--seed-primary) calc(l - 0.05) c h)"
        );
        assert_eq!(
            theme.render(TokenValue::Shift {
                role: Role::Primary,
                dl: 0.1
            }),
            "oklch(from var(--seed-primary) calc(l + 0.1) c h)"
        );
    }
}
