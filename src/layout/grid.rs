use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Canvas, Rect},
    error::{BoothError, BoothResult},
};

/// Column/row layout of a print, optionally naming a known layout from the grid catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn validate(&self) -> BoothResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(BoothError::validation(format!(
                "invalid grid configuration: {} columns x {} rows (both must be >= 1)",
                self.columns, self.rows
            )));
        }
        Ok(())
    }

    /// Number of photos the grid holds.
    pub fn cell_count(&self) -> usize {
        (u64::from(self.columns) * u64::from(self.rows)) as usize
    }

    /// `(column, row)` of the photo at `index`.
    ///
    /// Cells fill column-major: one column top to bottom, then the next column.
    pub fn cell_of(&self, index: usize) -> (u32, u32) {
        let rows = self.rows.max(1) as usize;
        ((index / rows) as u32, (index % rows) as u32)
    }
}

/// Integer pixel rectangle inside a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Round a float rectangle to whole pixels. Negative coordinates clamp to zero.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.round();
        let x0 = r.x0.max(0.0);
        let y0 = r.y0.max(0.0);
        Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (r.x1 - x0).max(0.0) as u32,
            height: (r.y1 - y0).max(0.0) as u32,
        }
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Cell geometry of a grid laid over a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub canvas: Canvas,
    pub columns: u32,
    pub rows: u32,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridGeometry {
    pub fn new(canvas: Canvas, grid: &GridSpec) -> BoothResult<Self> {
        grid.validate()?;
        Ok(Self {
            canvas,
            columns: grid.columns,
            rows: grid.rows,
            cell_width: f64::from(canvas.width) / f64::from(grid.columns),
            cell_height: f64::from(canvas.height) / f64::from(grid.rows),
        })
    }

    /// Exact (fractional) bounds of a cell.
    pub fn cell_bounds(&self, column: u32, row: u32) -> Rect {
        let x0 = f64::from(column) * self.cell_width;
        let y0 = f64::from(row) * self.cell_height;
        Rect::new(x0, y0, x0 + self.cell_width, y0 + self.cell_height)
    }

    /// Cell bounds snapped to pixel edges. Adjacent cells share an edge and never overlap.
    pub fn cell_rect(&self, column: u32, row: u32) -> PixelRect {
        PixelRect::from_rect(self.cell_bounds(column, row))
    }
}

/// Largest rectangle with the source aspect ratio that fits inside `cell`, centered on the
/// axis it does not fill.
pub fn fit_within(src_width: u32, src_height: u32, cell: PixelRect) -> PixelRect {
    let src_aspect = f64::from(src_width) / f64::from(src_height.max(1));
    if src_aspect > cell.aspect() {
        let height =
            ((f64::from(cell.width) / src_aspect).round() as u32).clamp(1, cell.height.max(1));
        PixelRect {
            x: cell.x,
            y: cell.y + (cell.height.saturating_sub(height)) / 2,
            width: cell.width,
            height,
        }
    } else {
        let width =
            ((f64::from(cell.height) * src_aspect).round() as u32).clamp(1, cell.width.max(1));
        PixelRect {
            x: cell.x + (cell.width.saturating_sub(width)) / 2,
            y: cell.y,
            width,
            height: cell.height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
