// File: crates/metric-chart/src/palette.rs
// Summary: Qualitative ColorBrewer palettes and the cyclic series-to-color rule.

use skia_safe as skia;

use crate::error::{ChartError, Result};

/// Palette used when the configuration does not name one.
pub const DEFAULT_PALETTE: &str = "Dark2";
/// Colors taken from the palette by default; series beyond this cycle.
pub const DEFAULT_PALETTE_SIZE: usize = 8;

// ColorBrewer qualitative schemes need at least three classes.
const MIN_SIZE: usize = 3;

const DARK2: [(u8, u8, u8); 8] = [
    (0x1b, 0x9e, 0x77),
    (0xd9, 0x5f, 0x02),
    (0x75, 0x70, 0xb3),
    (0xe7, 0x29, 0x8a),
    (0x66, 0xa6, 0x1e),
    (0xe6, 0xab, 0x02),
    (0xa6, 0x76, 0x1d),
    (0x66, 0x66, 0x66),
];

const SET1: [(u8, u8, u8); 9] = [
    (0xe4, 0x1a, 0x1c),
    (0x37, 0x7e, 0xb8),
    (0x4d, 0xaf, 0x4a),
    (0x98, 0x4e, 0xa3),
    (0xff, 0x7f, 0x00),
    (0xff, 0xff, 0x33),
    (0xa6, 0x56, 0x28),
    (0xf7, 0x81, 0xbf),
    (0x99, 0x99, 0x99),
];

const SET2: [(u8, u8, u8); 8] = [
    (0x66, 0xc2, 0xa5),
    (0xfc, 0x8d, 0x62),
    (0x8d, 0xa0, 0xcb),
    (0xe7, 0x8a, 0xc3),
    (0xa6, 0xd8, 0x54),
    (0xff, 0xd9, 0x2f),
    (0xe5, 0xc4, 0x94),
    (0xb3, 0xb3, 0xb3),
];

const ACCENT: [(u8, u8, u8); 8] = [
    (0x7f, 0xc9, 0x7f),
    (0xbe, 0xae, 0xd4),
    (0xfd, 0xc0, 0x86),
    (0xff, 0xff, 0x99),
    (0x38, 0x6c, 0xb0),
    (0xf0, 0x02, 0x7f),
    (0xbf, 0x5b, 0x17),
    (0x66, 0x66, 0x66),
];

const PAIRED: [(u8, u8, u8); 12] = [
    (0xa6, 0xce, 0xe3),
    (0x1f, 0x78, 0xb4),
    (0xb2, 0xdf, 0x8a),
    (0x33, 0xa0, 0x2c),
    (0xfb, 0x9a, 0x99),
    (0xe3, 0x1a, 0x1c),
    (0xfd, 0xbf, 0x6f),
    (0xff, 0x7f, 0x00),
    (0xca, 0xb2, 0xd6),
    (0x6a, 0x3d, 0x9a),
    (0xff, 0xff, 0x99),
    (0xb1, 0x59, 0x28),
];

const SCHEMES: [(&str, &[(u8, u8, u8)]); 5] = [
    ("Dark2", &DARK2),
    ("Set1", &SET1),
    ("Set2", &SET2),
    ("Accent", &ACCENT),
    ("Paired", &PAIRED),
];

fn scheme(name: &str) -> Option<(&'static str, &'static [(u8, u8, u8)])> {
    SCHEMES.into_iter().find(|(n, _)| n.eq_ignore_ascii_case(name))
}

/// Names of the built-in palettes.
pub fn names() -> impl Iterator<Item = &'static str> {
    SCHEMES.into_iter().map(|(n, _)| n)
}

/// A resolved, read-only list of series colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: &'static str,
    colors: Vec<skia::Color>,
}

impl Palette {
    /// Take the first `size` colors of the named scheme.
    pub fn resolve(name: &str, size: usize) -> Result<Self> {
        let unavailable = || ChartError::PaletteUnavailable { name: name.to_string(), size };
        let (name, colors) = scheme(name).ok_or_else(unavailable)?;
        if size < MIN_SIZE || size > colors.len() {
            return Err(unavailable());
        }
        let colors = colors[..size]
            .iter()
            .map(|&(r, g, b)| skia::Color::from_rgb(r, g, b))
            .collect();
        Ok(Self { name, colors })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[skia::Color] {
        &self.colors
    }

    /// Color of the series at ordinal `index`; wraps around past the end.
    pub fn color(&self, index: usize) -> skia::Color {
        self.colors[index % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_eight_colors() {
        let p = Palette::resolve(DEFAULT_PALETTE, DEFAULT_PALETTE_SIZE).unwrap();
        assert_eq!(p.len(), 8);
        assert_eq!(p.color(0), skia::Color::from_rgb(0x1b, 0x9e, 0x77));
    }

    #[test]
    fn colors_cycle_modulo_size() {
        let p = Palette::resolve("Dark2", 8).unwrap();
        for i in 0..24 {
            assert_eq!(p.color(i), p.colors()[i % 8]);
        }
        assert_eq!(p.color(3), p.color(11));
        assert_ne!(p.color(3), p.color(4));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Palette::resolve("set1", 9).unwrap().name(), "Set1");
    }

    #[test]
    fn unknown_or_oversized_palette_is_unavailable() {
        for (name, size) in [("Rainbow", 8), ("Dark2", 9), ("Dark2", 2)] {
            let err = Palette::resolve(name, size).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::PaletteUnavailable);
        }
    }

    #[test]
    fn every_builtin_resolves_at_minimum_size() {
        for name in names() {
            assert_eq!(Palette::resolve(name, MIN_SIZE).unwrap().len(), MIN_SIZE);
        }
    }
}
