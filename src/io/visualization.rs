//! Frame capture and GIF generation for assembly visualization

use std::ops::ControlFlow;
use std::path::Path;

use image::{Delay, Frame};

use crate::algorithm::assembler::{AssemblyObserver, MatchKind, Placement};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{Result, SolverError, file_system, invalid_input};
use crate::io::image::render_layout;
use crate::spatial::grid::{Cell, GridBounds, GridPos, PuzzleGrid};

/// Records every placement so the assembly can be replayed as an animation
///
/// The first notification also records the cells that were already on the
/// grid (the seed).
#[derive(Debug, Clone, Default)]
pub struct PlacementCapture {
    events: Vec<(GridPos, Cell)>,
}

impl PlacementCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded cells in placement order
    pub fn events(&self) -> &[(GridPos, Cell)] {
        &self.events
    }

    /// Number of recorded cells
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Export the captured placements as a GIF with automatic frame skipping
    ///
    /// Frames faster than viewers can show are merged so the apparent
    /// animation speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No placements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let bounds = self
            .bounds()
            .ok_or_else(|| invalid_input(&"no placements captured for visualization"))?;

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(bounds, effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
        }
        let file =
            std::fs::File::create(output_path).map_err(file_system(output_path, "create file"))?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|source| SolverError::ImageExport {
                path: output_path.to_path_buf(),
                source,
            })
    }

    fn bounds(&self) -> Option<GridBounds> {
        let (&(first, _), rest) = self.events.split_first()?;
        Some(
            rest.iter()
                .fold(GridBounds::at(first), |b, &(pos, _)| b.including(pos)),
        )
    }

    fn generate_frames(&self, bounds: GridBounds, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        let mut replay = PuzzleGrid::new();
        let mut frames = Vec::new();

        for (count, &(pos, cell)) in self.events.iter().enumerate() {
            // Events were recorded from successful inserts
            let _ = replay.insert(pos, cell);
            if (count + 1) % skip_factor == 0 {
                frames.push(Frame::from_parts(render_layout(&replay, bounds), 0, 0, delay));
            }
        }
        if self.events.len() % skip_factor != 0 {
            frames.push(Frame::from_parts(render_layout(&replay, bounds), 0, 0, delay));
        }

        // Final frame displays longer for better visibility
        if let Some(last) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }
        frames
    }
}

impl AssemblyObserver for PlacementCapture {
    fn on_placement(&mut self, placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()> {
        if self.events.is_empty() {
            self.events.extend(
                grid.iter()
                    .filter(|&(pos, _)| pos != placement.position)
                    .map(|(pos, &cell)| (pos, cell)),
            );
        }
        if let Some(&cell) = grid
            .get(placement.position)
            .filter(|_| placement.kind == MatchKind::Placed)
        {
            self.events.push((placement.position, cell));
        }
        ControlFlow::Continue(())
    }
}
