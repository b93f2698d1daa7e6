// Grid fit solver - Uniform tile scale that makes the best use of the container
use crate::domain::layout::{Container, FitResult, TileSize};

/// Relative slack for the fit check so exact fits survive float rounding.
const FIT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFitSolver {
    gap: f64,
}

impl GridFitSolver {
    pub fn new(gap: f64) -> Self {
        Self {
            gap: if gap.is_finite() { gap.max(0.0) } else { 0.0 },
        }
    }

    /// Tries every column count, scaling to fill the width, then every row
    /// count, scaling to fill the height, and keeps the candidate with the
    /// largest total tile area. The first candidate wins ties.
    ///
    /// Falls back to an unscaled single row when there is nothing to lay out,
    /// no usable reference size, or no candidate fits.
    pub fn solve(&self, count: usize, reference: TileSize, container: Container) -> FitResult {
        if count == 0 || reference.is_zero() || !usable(container) {
            return FitResult::unscaled(count, reference);
        }

        let mut best: Option<(f64, FitResult)> = None;
        let mut consider = |columns: usize, rows: usize, scale: f64| {
            let area = scale * scale * reference.width * reference.height * count as f64;
            if best.as_ref().is_none_or(|(best_area, _)| area > *best_area) {
                let tile = reference.scaled(scale);
                best = Some((
                    area,
                    FitResult {
                        columns,
                        rows,
                        scale,
                        tile_width: tile.width,
                        tile_height: tile.height,
                    },
                ));
            }
        };

        for columns in 1..=count {
            let rows = count.div_ceil(columns);
            let scale = self.width_budget(container, columns) / reference.width / columns as f64;
            let needed = rows as f64 * scale * reference.height;
            if scale > 0.0 && fits(needed, self.height_budget(container, rows)) {
                consider(columns, rows, scale);
            }
        }

        for rows in 1..=count {
            let columns = count.div_ceil(rows);
            let scale = self.height_budget(container, rows) / reference.height / rows as f64;
            let needed = columns as f64 * scale * reference.width;
            if scale > 0.0 && fits(needed, self.width_budget(container, columns)) {
                consider(columns, rows, scale);
            }
        }

        match best {
            Some((_, fit)) => fit,
            None => {
                tracing::debug!(
                    "No layout for {} tiles fits {}x{}, rendering unscaled",
                    count,
                    container.width,
                    container.height
                );
                FitResult::unscaled(count, reference)
            }
        }
    }

    fn width_budget(&self, container: Container, columns: usize) -> f64 {
        container.width - self.gap * (columns - 1) as f64
    }

    fn height_budget(&self, container: Container, rows: usize) -> f64 {
        container.height - self.gap * (rows - 1) as f64
    }
}

fn usable(container: Container) -> bool {
    container.width.is_finite()
        && container.height.is_finite()
        && container.width > 0.0
        && container.height > 0.0
}

fn fits(needed: f64, budget: f64) -> bool {
    needed.is_finite() && needed <= budget + budget.abs() * FIT_TOLERANCE
}
