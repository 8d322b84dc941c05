use crate::foundation::error::{BcsError, BcsResult};

/// Top-left corner of one tile, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileOrigin {
    /// Horizontal offset.
    pub x: u32,
    /// Vertical offset.
    pub y: u32,
}

/// Row-major grid of equally sized tiles covering an output frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of tiles.
    pub tiles: u32,
    /// Tiles per row.
    pub columns: u32,
    /// `ceil(tiles / columns)`.
    pub rows: u32,
    /// Output width divided by `columns`.
    pub cell_width: u32,
    /// Output height divided by `rows`.
    pub cell_height: u32,
}

impl Grid {
    /// Lay `tiles` inputs out on a `width`x`height` frame with `columns` tiles per row.
    pub fn new(tiles: usize, columns: u32, width: u32, height: u32) -> BcsResult<Self> {
        if columns == 0 {
            return Err(BcsError::validation("grid needs at least one column"));
        }
        let tiles = u32::try_from(tiles)
            .map_err(|_| BcsError::validation(format!("too many grid tiles: {tiles}")))?;
        if tiles == 0 {
            return Err(BcsError::validation("grid needs at least one tile"));
        }
        if width == 0 || height == 0 {
            return Err(BcsError::validation(format!(
                "grid output must be non-empty, got {width}x{height}"
            )));
        }
        let rows = tiles.div_ceil(columns);
        Ok(Self {
            tiles,
            columns,
            rows,
            cell_width: width / columns,
            cell_height: height / rows,
        })
    }

    /// Origin of tile `index` (row-major).
    pub fn origin(&self, index: u32) -> TileOrigin {
        TileOrigin {
            x: (index % self.columns) * self.cell_width,
            y: (index / self.columns) * self.cell_height,
        }
    }

    /// `xstack` layout string: `x_y` per tile joined with `|`.
    pub fn xstack_layout(&self) -> String {
        (0..self.tiles)
            .map(|i| {
                let o = self.origin(i);
                format!("{}_{}", o.x, o.y)
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/layout.rs"]
mod tests;
