// Layout value types used by the grid fit solver
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TileSize {
    pub width: f64,
    pub height: f64,
}

impl TileSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is unusable as a reference measurement.
    pub fn is_zero(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Content box of the host element, as reported by resize observation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub columns: usize,
    pub rows: usize,
    pub scale: f64,
    pub tile_width: f64,
    pub tile_height: f64,
}

impl FitResult {
    /// Natural-size layout on a single row, used when nothing fits.
    pub fn unscaled(count: usize, reference: TileSize) -> Self {
        Self {
            columns: count,
            rows: usize::from(count > 0),
            scale: 1.0,
            tile_width: reference.width,
            tile_height: reference.height,
        }
    }
}
