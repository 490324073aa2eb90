use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Sequential ramp for value-coloured charts (heatmap cells, scatter
/// points): dark blue through magenta to warm yellow as `t` goes 0 → 1.
pub fn heat(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hsl = Hsl::new(260.0 - 230.0 * t, 0.85, 0.25 + 0.40 * t);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category name → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a chosen vocabulary (e.g. all genres) to distinct
/// colours. Categories missing from the map get a neutral default.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    /// Assign hue-spaced colours to the given categories, in order.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        let palette = generate_palette(categories.len());
        CategoryColors {
            mapping: categories.into_iter().zip(palette).collect(),
        }
    }

    /// Look up the colour for a category.
    pub fn get(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let colors = CategoryColors::new(["Action", "Comedy"]);
        assert_ne!(colors.get("Action"), Color32::GRAY);
        assert_eq!(colors.get("Gourmet"), Color32::GRAY);
    }
}
