//! Tests for layout rendering and PNG export

#[cfg(test)]
mod tests {
    use jigsolve::SolverError;
    use jigsolve::io::configuration::{RENDER_CELL_SIZE, RENDER_MARKER_THICKNESS};
    use jigsolve::io::image::{export_layout_png, piece_color, render_layout};
    use jigsolve::puzzle::piece::PieceId;
    use jigsolve::spatial::grid::{Cell, GridBounds, GridPos, PuzzleGrid};
    use jigsolve::spatial::orientation::{Direction, EdgeOrientation};
    use tempfile::TempDir;

    fn two_cells() -> PuzzleGrid {
        let mut grid = PuzzleGrid::new();
        grid.insert(
            GridPos::ORIGIN,
            Cell {
                piece: PieceId(0),
                orientation: EdgeOrientation::facing(0, Direction::Up),
            },
        )
        .unwrap();
        grid.insert(
            GridPos::new(0, 1),
            Cell {
                piece: PieceId(1),
                orientation: EdgeOrientation::facing(0, Direction::Right),
            },
        )
        .unwrap();
        grid
    }

    // Tests piece colours are opaque and differ between neighbours
    // Verified by returning a constant colour
    #[test]
    fn test_piece_colors() {
        for i in 0..16 {
            let color = piece_color(PieceId(i));
            assert_eq!(color.0[3], 255);
            assert_ne!(color, piece_color(PieceId(i + 1)));
        }
        assert_eq!(piece_color(PieceId(7)), piece_color(PieceId(7)));
    }

    // Tests the image covers the bounds and marks edge 0
    // Verified by drawing every marker on the top side
    #[test]
    fn test_render_layout() {
        let grid = two_cells();
        let img = render_layout(&grid, grid.bounds().unwrap());
        let size = RENDER_CELL_SIZE;

        assert_eq!(img.dimensions(), (2 * size, size));
        let mid = size / 2;
        // First cell: marker along the top, fill below it
        assert_eq!(img.get_pixel(mid, 0).0, [32, 32, 32, 255]);
        assert_eq!(*img.get_pixel(mid, mid), piece_color(PieceId(0)));
        // Second cell: marker along the right side
        assert_eq!(img.get_pixel(size + mid, 0).0[3], 255);
        assert_ne!(*img.get_pixel(size + mid, 0), piece_color(PieceId(0)));
        assert_eq!(
            img.get_pixel(2 * size - RENDER_MARKER_THICKNESS, mid).0,
            [32, 32, 32, 255]
        );
        // Gutter between cells stays transparent
        assert_eq!(img.get_pixel(size - 1, mid).0[3], 0);
    }

    // Tests cells outside the requested bounds are left out
    // Verified by ignoring the bounds
    #[test]
    fn test_render_clipped() {
        let grid = two_cells();
        let img = render_layout(&grid, GridBounds::at(GridPos::new(0, 1)));
        assert_eq!(img.dimensions(), (RENDER_CELL_SIZE, RENDER_CELL_SIZE));
        let mid = RENDER_CELL_SIZE / 2;
        assert_eq!(*img.get_pixel(mid, mid), piece_color(PieceId(1)));
    }

    // Tests PNG export writes a file and refuses an empty grid
    // Verified by exporting an empty image
    #[test]
    fn test_export_layout_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("layout.png");

        export_layout_png(&two_cells(), &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2 * RENDER_CELL_SIZE, RENDER_CELL_SIZE));

        let err = export_layout_png(&PuzzleGrid::new(), &temp_dir.path().join("empty.png"))
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }
}
