use std::collections::{BTreeMap, BTreeSet};

use palette::Srgb;

/// Backend-neutral colour. Backends convert at paint time.
pub type Color = Srgb<u8>;

pub const STEELBLUE: Color = Srgb::new(70, 130, 180);
pub const GRAY: Color = Srgb::new(128, 128, 128);
pub const BLACK: Color = Srgb::new(0, 0, 0);
pub const WHITE: Color = Srgb::new(255, 255, 255);
pub const ORANGE: Color = Srgb::new(255, 165, 0);
pub const PURPLE: Color = Srgb::new(128, 0, 128);

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Ten visually distinct colours for categorical data.
pub const CATEGORY10: [Color; 10] = [
    Srgb::new(0x1f, 0x77, 0xb4),
    Srgb::new(0xff, 0x7f, 0x0e),
    Srgb::new(0x2c, 0xa0, 0x2c),
    Srgb::new(0xd6, 0x27, 0x28),
    Srgb::new(0x94, 0x67, 0xbd),
    Srgb::new(0x8c, 0x56, 0x4b),
    Srgb::new(0xe3, 0x77, 0xc2),
    Srgb::new(0x7f, 0x7f, 0x7f),
    Srgb::new(0xbc, 0xbd, 0x22),
    Srgb::new(0x17, 0xbe, 0xcf),
];

/// `#rrggbb` form used by the SVG export.
pub fn to_hex(color: Color) -> String {
    format!("#{color:x}")
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color
// ---------------------------------------------------------------------------

/// Maps categories to palette colours. Categories are sorted before indices
/// are assigned, so the same set always gets the same colours. With more
/// categories than palette slots the palette repeats.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color>,
    default_color: Color,
}

impl ColorMap {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let mapping = categories
            .iter()
            .zip(CATEGORY10.iter().cycle())
            .map(|(cat, c)| (cat.clone(), *c))
            .collect();

        ColorMap {
            mapping,
            default_color: GRAY,
        }
    }

    /// Look up the colour for a category; missing or unknown ones are gray.
    pub fn color_for(&self, category: Option<&str>) -> Color {
        category
            .and_then(|c| self.mapping.get(c))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries in palette order, at most `limit` and never more than
    /// the palette has distinct colours.
    pub fn legend_entries(&self, limit: usize) -> Vec<(String, Color)> {
        self.mapping
            .iter()
            .take(limit.min(CATEGORY10.len()))
            .map(|(cat, c)| (cat.clone(), *c))
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }
}
