/// Inclusive range of code points baked into the atlas, one tile each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    pub min: u32,
    pub max: u32,
}

impl Default for CharRange {
    fn default() -> Self {
        Self { min: 32, max: 126 }
    }
}

impl CharRange {
    pub const FALLBACK: char = '?';

    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn len(&self) -> u32 {
        if self.max < self.min {
            return 0;
        }
        self.max - self.min + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, ch: char) -> bool {
        (self.min..=self.max).contains(&u32::from(ch))
    }

    /// Atlas tile for `ch`; characters outside the range borrow the `?` tile.
    pub fn tile_index(&self, ch: char) -> u32 {
        if self.contains(ch) {
            return u32::from(ch) - self.min;
        }
        if self.contains(Self::FALLBACK) {
            return u32::from(Self::FALLBACK) - self.min;
        }
        0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> {
        (self.min..=self.max).filter_map(char::from_u32)
    }
}

/// Coverage bitmap for one glyph, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub rows: u32,
    /// Horizontal bearing from the pen position.
    pub left: i32,
    /// Rows above the baseline.
    pub top: i32,
    pub buffer: Vec<u8>,
}

impl GlyphBitmap {
    pub fn coverage(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.rows as i32 {
            return None;
        }
        self.buffer
            .get(x as usize + self.width as usize * y as usize)
            .copied()
    }
}

/// External rasterization service.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char) -> GlyphBitmap;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for &R {
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        (**self).rasterize(ch)
    }
}

/// Fixed tile size shared by every glyph, split at a common baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub width: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self {
            width: 1,
            top: 1,
            bottom: 1,
        }
    }
}

impl GlyphCell {
    pub fn height(&self) -> u32 {
        self.top + self.bottom
    }

    /// Smallest cell holding every glyph in `range` on one baseline.
    pub fn measure<R: GlyphRasterizer + ?Sized>(rasterizer: &R, range: CharRange) -> Self {
        let mut cell = Self::default();
        for ch in range.chars() {
            let bitmap = rasterizer.rasterize(ch);
            let width = i64::from(bitmap.width) + i64::from(bitmap.left);
            let top = i64::from(bitmap.top);
            let bottom = i64::from(bitmap.rows) - top;

            cell.width = cell.width.max(clamp_u32(width));
            cell.top = cell.top.max(clamp_u32(top));
            cell.bottom = cell.bottom.max(clamp_u32(bottom));
        }
        tracing::debug!(
            width = cell.width,
            top = cell.top,
            bottom = cell.bottom,
            "measured glyph cell"
        );
        cell
    }

    /// Pixel size of a rendered cell divided by its atlas size.
    pub fn scale(&self, font_size: i32) -> f32 {
        font_size as f32 / self.height() as f32
    }
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}


#[cfg(test)]
mod cell_tests {
    use super::cell_test_support::BoxRasterizer;
    use super::*;

    #[test]
    fn char_range_maps_tiles_and_falls_back() {
        let range = CharRange::default();
        assert_eq!(range.len(), 95);
        assert_eq!(range.tile_index(' '), 0);
        assert_eq!(range.tile_index('A'), 33);
        assert_eq!(range.tile_index('é'), u32::from('?') - 32);
        assert_eq!(range.chars().count(), 95);
        assert!(CharRange::new(5, 4).is_empty());
        assert_eq!(CharRange::new(65, 70).tile_index('z'), 0);
    }

    #[test]
    fn measure_takes_maximum_extents() {
        let cell = GlyphCell::measure(&BoxRasterizer, CharRange::default());
        assert_eq!(cell.width, 6);
        assert_eq!(cell.top, 7);
        assert_eq!(cell.bottom, 3);
        assert_eq!(cell.height(), 10);
        assert_eq!(cell.scale(20), 2.0);
    }

    #[test]
    fn measure_of_empty_range_keeps_unit_cell() {
        let cell = GlyphCell::measure(&BoxRasterizer, CharRange::new(10, 9));
        assert_eq!(cell, GlyphCell::default());
    }

    #[test]
    fn bitmap_coverage_is_bounds_checked() {
        let bitmap = BoxRasterizer.rasterize('x');
        assert_eq!(bitmap.coverage(0, 0), Some(255));
        assert_eq!(bitmap.coverage(5, 0), None);
        assert_eq!(bitmap.coverage(0, -1), None);
    }
}
