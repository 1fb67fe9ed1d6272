//! Sprite sheet slicing.
//!
//! The crowd is cut out of a single image laid out as a regular grid. A
//! [`SpriteSheet`] knows the image's natural size and the grid, and produces
//! one crop rectangle per cell.
//!
//! Grid naming follows the sheet config: `rows` is the number of cells along
//! the image width and `cols` the number of cells along its height. Cells are
//! numbered so that cell `i` sits in column `i % rows` and row `i / rows`.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Rectangle;

/// Loaded sprite sheet and its grid.
#[derive(Resource, Clone, Debug)]
pub struct SpriteSheet {
    /// Key of the texture in the [`TextureStore`](super::texturestore::TextureStore).
    pub tex_key: String,
    /// Natural image width in pixels.
    pub width: f32,
    /// Natural image height in pixels.
    pub height: f32,
    pub rows: u32,
    pub cols: u32,
}

impl SpriteSheet {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32, rows: u32, cols: u32) -> Self {
        SpriteSheet {
            tex_key: tex_key.into(),
            width,
            height,
            rows,
            cols,
        }
    }

    /// Number of sprites in the sheet.
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of a single cell.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.width / self.rows as f32, self.height / self.cols as f32)
    }

    /// Crop rectangle of cell `index`.
    pub fn rect(&self, index: usize) -> Rectangle {
        let (w, h) = self.cell_size();
        let rows = self.rows as usize;
        Rectangle {
            x: (index % rows) as f32 * w,
            y: (index / rows) as f32 * h,
            width: w,
            height: h,
        }
    }

    /// All crop rectangles, in cell order.
    pub fn rects(&self) -> Vec<Rectangle> {
        (0..self.len()).map(|i| self.rect(i)).collect()
    }
}
