use crate::cell::{CharRange, GlyphCell, GlyphRasterizer};

/// RGBA tile sheet, one cell per character laid out left to right.
///
/// Row 0 is the bottom row so tile coordinates match the vertex tile coords
/// emitted by [`crate::TileStrip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Atlas {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(x as usize + self.width as usize * y as usize)
            .copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

pub fn build_atlas<R: GlyphRasterizer + ?Sized>(
    rasterizer: &R,
    range: CharRange,
    cell: GlyphCell,
) -> Atlas {
    let width = cell.width * range.len();
    let height = cell.height();
    let mut pixels = vec![[0u8; 4]; width as usize * height as usize];

    for (tile, ch) in range.chars().enumerate() {
        let bitmap = rasterizer.rasterize(ch);
        let origin_x = tile * cell.width as usize;

        for y in 0..height as i32 {
            let from_baseline = y - cell.bottom as i32;
            let bitmap_y = bitmap.top - from_baseline;
            for x in 0..cell.width as i32 {
                let bitmap_x = x - bitmap.left;
                if let Some(alpha) = bitmap.coverage(bitmap_x, bitmap_y) {
                    pixels[origin_x + x as usize + width as usize * y as usize] =
                        [0xff, 0xff, 0xff, alpha];
                }
            }
        }
    }

    Atlas {
        width,
        height,
        pixels,
    }
}
