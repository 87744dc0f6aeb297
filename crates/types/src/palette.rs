//! Ordered palette container.

use std::ops::Index;
use std::slice;

use serde::Serialize;

use crate::color::HslColor;

/// An ordered sequence of generated colors.
///
/// A palette is created whole by the generator and never mutated;
/// regeneration replaces the entire value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<HslColor>,
}

impl Palette {
    /// Wrap an already-ordered list of colors.
    pub fn new(colors: Vec<HslColor>) -> Self {
        Self { colors }
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette holds no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in insertion order.
    pub fn colors(&self) -> &[HslColor] {
        &self.colors
    }

    /// Iterate over the colors in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, HslColor> {
        self.colors.iter()
    }
}

impl Index<usize> for Palette {
    type Output = HslColor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.colors[index]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a HslColor;
    type IntoIter = slice::Iter<'a, HslColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let a = HslColor::new(10.0, 50.0, 50.0);
        let b = HslColor::new(200.0, 60.0, 40.0);
        let c = HslColor::new(320.0, 70.0, 60.0);
        let palette = Palette::new(vec![a, b, c]);

        assert_eq!(palette.len(), 3);
        assert_eq!(palette[0], a);
        assert_eq!(palette[2], c);

        let collected: Vec<&HslColor> = palette.iter().collect();
        assert_eq!(collected, vec![&a, &b, &c]);
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let palette = Palette::new(vec![
            HslColor::new(0.0, 100.0, 50.0),
            HslColor::new(120.0, 100.0, 50.0),
        ]);
        let value = serde_json::to_value(&palette).unwrap();
        let entries = value.as_array().expect("palette must serialize as an array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["hue"], 0.0);
        assert_eq!(entries[1]["hue"], 120.0);
    }
}
