//! WCAG relative luminance, contrast ratios, and accessible text color
//! selection.

use crate::color::Oklch;

/// WCAG 2.x channel linearization. The breakpoint here is 0.03928, not the
/// sRGB spec's 0.04045 used by [`crate::color::srgb_to_linear`]; the two
/// standards diverge on this constant and both paths must stay as written or
/// contrast ratios drift off the reference values.
fn wcag_linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of gamma-encoded sRGB channels in [0,1], per WCAG 2.x.
pub fn relative_luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * wcag_linearize(r) + 0.7152 * wcag_linearize(g) + 0.0722 * wcag_linearize(b)
}

/// WCAG contrast ratio between two luminances. Symmetric, always >= 1;
/// black against white is 21.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick a text color that reads well on the given background.
///
/// Compares the background's luminance against ideal white (1.0) and ideal
/// black (0.0) and returns a near-white or near-dark color that keeps the
/// background's hue as a tint. Black wins only when its contrast is strictly
/// higher, so ties go to white. This is a two-candidate heuristic, not a
/// search for a minimal compliant color.
pub fn best_text_color(background: Oklch) -> Oklch {
    let (r, g, b) = background.to_srgb();
    let bg_luminance = relative_luminance(r, g, b);

    let with_white = contrast_ratio(bg_luminance, 1.0);
    let with_black = contrast_ratio(bg_luminance, 0.0);

    if with_black > with_white {
        Oklch::new(0.20, 0.02, background.h)
    } else {
        Oklch::new(0.98, 0.005, background.h)
    }
}

/// String-level wrapper around [`best_text_color`] for canonical OKLCH input.
///
/// A malformed background is a defined fallback, not a failure: the result is
/// canonical pure black.
pub fn best_text_color_css(background: &str) -> String {
    match Oklch::parse(background) {
        Ok(bg) => best_text_color(bg).to_string(),
        Err(_) => Oklch::new(0.0, 0.0, 0.0).to_string(),
    }
}
