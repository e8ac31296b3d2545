//! Word-wrapped glyph-tile layout with inline `[trigger]` markup.

mod atlas;
mod cell;
mod shaping;
mod text;
mod tile;

pub use atlas::{build_atlas, Atlas};
pub use cell::{CharRange, GlyphBitmap, GlyphCell, GlyphRasterizer};
pub use shaping::{FixedAdvanceShaper, GlyphPosition, GlyphShaper, SUBPIXELS_PER_PIXEL};
pub use text::{LaidLine, TextLayout, TextLayouter};
pub use tile::{Color, TileStrip, TileVertex, VERTICES_PER_TILE};
