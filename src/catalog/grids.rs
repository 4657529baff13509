use crate::{foundation::core::PrintSize, layout::grid::GridSpec};

/// A named print layout offered by the kiosk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub id: &'static str,
    pub name: &'static str,
    pub columns: u32,
    pub rows: u32,
    pub print: PrintSize,
}

impl GridLayout {
    pub fn spec(&self) -> GridSpec {
        GridSpec::new(self.columns, self.rows).with_id(self.id)
    }
}

/// Known layouts, keyed by id.
pub const GRID_LAYOUTS: [GridLayout; 4] = [
    GridLayout {
        id: "4x6-single",
        name: "Single Photo",
        columns: 1,
        rows: 1,
        print: PrintSize::new(4.0, 6.0),
    },
    GridLayout {
        id: "2x4-vertical-2",
        name: "2 Vertical",
        columns: 2,
        rows: 1,
        print: PrintSize::new(2.0, 4.0),
    },
    GridLayout {
        id: "4x6-4cut",
        name: "4 Cut",
        columns: 2,
        rows: 2,
        print: PrintSize::new(4.0, 6.0),
    },
    GridLayout {
        id: "5x7-6cut",
        name: "6 Cut",
        columns: 3,
        rows: 2,
        print: PrintSize::new(5.0, 7.0),
    },
];

/// Print size used for shapes with no dedicated rule.
pub const FALLBACK_PRINT: PrintSize = PrintSize::new(4.0, 6.0);

pub fn grid_layout(id: &str) -> Option<&'static GridLayout> {
    GRID_LAYOUTS.iter().find(|l| l.id == id)
}

/// Physical print size for a grid.
///
/// A recognized id wins. Otherwise the size follows the grid shape; unrecognized shapes all
/// print at 4x6 whatever their aspect ratio, landscape-leaning shapes such as 4x1 included.
pub fn print_size_for(grid: &GridSpec) -> PrintSize {
    if let Some(layout) = grid.id.as_deref().and_then(grid_layout) {
        return layout.print;
    }
    match (grid.columns, grid.rows) {
        (1, 1) => PrintSize::new(4.0, 6.0),
        (2, 1) => PrintSize::new(2.0, 4.0),
        (2, 2) => PrintSize::new(4.0, 6.0),
        (3, 2) => PrintSize::new(5.0, 7.0),
        (columns, rows) => {
            tracing::warn!(
                columns,
                rows,
                aspect = f64::from(columns) / f64::from(rows.max(1)),
                "no print rule for grid shape, falling back to 4x6"
            );
            FALLBACK_PRINT
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/grids.rs"]
mod tests;
