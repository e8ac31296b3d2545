use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::cell::GlyphCell;

pub type Color = [u8; 4];

/// Each tile is a 4-vertex quad padded with a repeated first and last vertex,
/// so consecutive tiles chain into one triangle strip through degenerate triangles.
pub const VERTICES_PER_TILE: usize = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct TileVertex {
    pub position: IVec2,
    pub tile_coord: IVec2,
    pub color: Color,
}

impl TileVertex {
    pub fn new(position: IVec2, tile_coord: IVec2, color: Color) -> Self {
        Self {
            position,
            tile_coord,
            color,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileStrip {
    vertices: Vec<TileVertex>,
}

impl TileStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn tile_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_TILE
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Appends the tile for atlas slot `tile_index` with its baseline origin at `lower_left`.
    pub fn push_tile(
        &mut self,
        lower_left: IVec2,
        tile_index: u32,
        color: Color,
        cell: &GlyphCell,
        scale: f32,
    ) {
        let below = (cell.bottom as f32 * scale) as i32;
        let above = (cell.top as f32 * scale) as i32;
        let across = (cell.width as f32 * scale) as i32;

        let tile_x = (tile_index * cell.width) as i32;
        let tile_width = cell.width as i32;
        let tile_height = cell.height() as i32;

        let bottom_left = TileVertex::new(
            IVec2::new(lower_left.x, lower_left.y - below),
            IVec2::new(tile_x, 0),
            color,
        );
        let top_left = TileVertex::new(
            IVec2::new(lower_left.x, lower_left.y + above),
            IVec2::new(tile_x, tile_height),
            color,
        );
        let bottom_right = TileVertex::new(
            IVec2::new(lower_left.x + across, lower_left.y - below),
            IVec2::new(tile_x + tile_width, 0),
            color,
        );
        let top_right = TileVertex::new(
            IVec2::new(lower_left.x + across, lower_left.y + above),
            IVec2::new(tile_x + tile_width, tile_height),
            color,
        );

        self.vertices.extend_from_slice(&[
            bottom_left,
            bottom_left,
            top_left,
            bottom_right,
            top_right,
            top_right,
        ]);
    }
}
