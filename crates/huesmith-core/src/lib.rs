//! Core color engine for huesmith: sRGB/OKLCH conversion, WCAG contrast,
//! theme-token derivation, and the URL share codec.
//!
//! Everything here is a pure function over value types; no I/O, no shared
//! state. The boundary layers (CLI, catalog) own persistence and output.

pub mod color;
pub mod contrast;
pub mod palette;
pub mod share;
pub mod theme;

pub use color::{Oklch, ParseError, Rgb};
pub use palette::{Role, SeedPalette};
pub use theme::{Theme, ThemeMode};
