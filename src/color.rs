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

/// ColorBrewer "Set2" qualitative scheme, used for the sector bar chart.
const SET2: [Color32; 8] = [
    Color32::from_rgb(0x66, 0xc2, 0xa5),
    Color32::from_rgb(0xfc, 0x8d, 0x62),
    Color32::from_rgb(0x8d, 0xa0, 0xcb),
    Color32::from_rgb(0xe7, 0x8a, 0xc3),
    Color32::from_rgb(0xa6, 0xd8, 0x54),
    Color32::from_rgb(0xff, 0xd9, 0x2f),
    Color32::from_rgb(0xe5, 0xc4, 0x94),
    Color32::from_rgb(0xb3, 0xb3, 0xb3),
];

/// The `i`-th Set2 colour, cycling past the end of the scheme.
pub fn set2(i: usize) -> Color32 {
    SET2[i % SET2.len()]
}

// ---------------------------------------------------------------------------
// Color mapping: sector → Color32
// ---------------------------------------------------------------------------

/// Maps sector names to distinct colours for the scatter plot.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted distinct sectors.
    pub fn new(sectors: &[String]) -> Self {
        let palette = generate_palette(sectors.len());
        let mapping = sectors.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given sector.
    pub fn color_for(&self, sector: &str) -> Color32 {
        self.mapping
            .get(sector)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_distinct() {
        let palette = generate_palette(11);
        assert_eq!(palette.len(), 11);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_unknown_sector_is_gray() {
        let map = ColorMap::new(&["Energy".to_string(), "Tech".to_string()]);
        assert_ne!(map.color_for("Energy"), map.color_for("Tech"));
        assert_eq!(map.color_for("Mining"), Color32::GRAY);
    }

    #[test]
    fn test_set2_cycles() {
        assert_eq!(set2(0), set2(8));
        assert_ne!(set2(0), set2(1));
    }
}
