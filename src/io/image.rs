//! PNG export of a solved layout
//!
//! Each placed piece is drawn as a square cell in its own colour, with a dark
//! bar on the side its local edge 0 faces so the chosen rotation is visible.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::io::configuration::{RENDER_CELL_SIZE, RENDER_MARKER_THICKNESS};
use crate::io::error::{Result, SolverError, file_system, invalid_input};
use crate::puzzle::piece::PieceId;
use crate::spatial::grid::{Cell, GridBounds, PuzzleGrid};
use crate::spatial::orientation::Direction;

const EMPTY_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const MARKER_COLOR: Rgba<u8> = Rgba([32, 32, 32, 255]);

/// Stable, well-spread colour for a piece
pub fn piece_color(piece: PieceId) -> Rgba<u8> {
    // Golden-ratio hue stepping keeps consecutive ids apart
    let hue = (piece.0 as f64 * 0.618_033_988_749_895).fract() * 6.0;
    let sector = hue.floor();
    let rising = hue - sector;
    let (lo, hi) = (64.0, 230.0);
    let up = lo + (hi - lo) * rising;
    let down = hi - (hi - lo) * rising;
    let (r, g, b) = match sector as u8 {
        0 => (hi, up, lo),
        1 => (down, hi, lo),
        2 => (lo, hi, up),
        3 => (lo, down, hi),
        4 => (up, lo, hi),
        _ => (hi, lo, down),
    };
    Rgba([r as u8, g as u8, b as u8, 255])
}

/// Draw `grid` over the area covered by `bounds`
///
/// Cells outside `bounds` are ignored; empty cells stay transparent.
pub fn render_layout(grid: &PuzzleGrid, bounds: GridBounds) -> RgbaImage {
    let width = bounds.cols() as u32 * RENDER_CELL_SIZE;
    let height = bounds.rows() as u32 * RENDER_CELL_SIZE;
    let mut img = RgbaImage::from_pixel(width, height, EMPTY_COLOR);

    for (pos, cell) in grid.iter() {
        if !bounds.contains(pos) {
            continue;
        }
        let x0 = (pos.col - bounds.min.col) as u32 * RENDER_CELL_SIZE;
        let y0 = (pos.row - bounds.min.row) as u32 * RENDER_CELL_SIZE;
        draw_cell(&mut img, x0, y0, cell);
    }
    img
}

fn draw_cell(img: &mut RgbaImage, x0: u32, y0: u32, cell: &Cell) {
    let fill = piece_color(cell.piece);
    let marker = cell.orientation.direction_of(0);
    let last = RENDER_CELL_SIZE - 1;
    let thick = RENDER_MARKER_THICKNESS.min(RENDER_CELL_SIZE);

    for dy in 0..RENDER_CELL_SIZE {
        for dx in 0..RENDER_CELL_SIZE {
            let on_marker = match marker {
                Some(Direction::Up) => dy < thick,
                Some(Direction::Right) => dx > last - thick,
                Some(Direction::Down) => dy > last - thick,
                Some(Direction::Left) => dx < thick,
                None => false,
            };
            // One pixel gutter between neighbouring cells
            let gutter = dx == last || dy == last;
            let color = if gutter {
                EMPTY_COLOR
            } else if on_marker {
                MARKER_COLOR
            } else {
                fill
            };
            if let Some(pixel) = img.get_pixel_mut_checked(x0 + dx, y0 + dy) {
                *pixel = color;
            }
        }
    }
}

/// Export the layout as a PNG image with transparent background
///
/// # Errors
///
/// Returns an error if:
/// - No piece has been placed in the grid
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_png(grid: &PuzzleGrid, output_path: &Path) -> Result<()> {
    let bounds = grid
        .bounds()
        .ok_or_else(|| invalid_input(&"no piece has been placed in the grid"))?;
    let img = render_layout(grid, bounds);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    img.save(output_path)
        .map_err(|source| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })
}
