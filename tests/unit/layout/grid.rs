use super::*;

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn validate_rejects_zero_dimensions() {
    assert!(GridSpec::new(0, 2).validate().unwrap_err().is_validation());
    assert!(GridSpec::new(2, 0).validate().is_err());
    GridSpec::new(1, 1).validate().unwrap();
}

#[test]
fn cells_fill_column_major() {
    let g = GridSpec::new(2, 2);
    assert_eq!(g.cell_of(0), (0, 0));
    assert_eq!(g.cell_of(1), (0, 1));
    assert_eq!(g.cell_of(2), (1, 0));
    assert_eq!(g.cell_of(3), (1, 1));

    let g = GridSpec::new(3, 2);
    let order: Vec<_> = (0..6).map(|i| g.cell_of(i)).collect();
    assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);

    let g = GridSpec::new(2, 1);
    assert_eq!(g.cell_of(1), (1, 0));
}

#[test]
fn cell_rects_tile_without_gaps() {
    let geo = GridGeometry::new(canvas(100, 50), &GridSpec::new(3, 1)).unwrap();
    let cells: Vec<_> = (0..3).map(|c| geo.cell_rect(c, 0)).collect();
    assert_eq!(cells[0].x, 0);
    assert_eq!(cells[0].x + cells[0].width, cells[1].x);
    assert_eq!(cells[1].x + cells[1].width, cells[2].x);
    assert_eq!(cells[2].x + cells[2].width, 100);
    assert!(cells.iter().all(|c| c.height == 50));
}

#[test]
fn wide_source_fills_cell_width_and_centers_vertically() {
    let cell = PixelRect {
        x: 600,
        y: 900,
        width: 600,
        height: 900,
    };
    let fit = fit_within(10, 10, cell);
    assert_eq!(
        fit,
        PixelRect {
            x: 600,
            y: 1050,
            width: 600,
            height: 600
        }
    );
}

#[test]
fn tall_source_fills_cell_height_and_centers_horizontally() {
    let cell = PixelRect {
        x: 0,
        y: 0,
        width: 600,
        height: 400,
    };
    let fit = fit_within(300, 400, cell);
    assert_eq!(
        fit,
        PixelRect {
            x: 150,
            y: 0,
            width: 300,
            height: 400
        }
    );
}

#[test]
fn equal_aspect_fills_cell_exactly() {
    let cell = PixelRect {
        x: 7,
        y: 3,
        width: 40,
        height: 60,
    };
    assert_eq!(fit_within(2, 3, cell), cell);
}
