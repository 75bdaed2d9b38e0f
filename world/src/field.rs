//! Star-field storage and wormhole placement.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use starmaze_core::{Position, Viewport, WorldError};

/// Random draws attempted before placement falls back to scanning.
const PLACEMENT_ATTEMPTS: u32 = 128;

/// One accumulated layer of star obstacles.
///
/// A layer holds one candidate cell per column index in `[1, width)`; the
/// stored cell's own coordinates are drawn independently of its slot, so a
/// column index and the cell it stores are unrelated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StarLayer {
    cells: Vec<Position>,
}

impl StarLayer {
    fn generate(rng: &mut ChaCha8Rng, viewport: Viewport) -> Self {
        if !viewport.has_play_area() {
            return Self { cells: Vec::new() };
        }

        let height = viewport.height();
        let width = viewport.width();
        let mut cells = Vec::with_capacity(usize::from(width.saturating_sub(1)));
        for _ in 1..width {
            let row = rng.gen_range(1..height);
            let column = rng.gen_range(0..width);
            cells.push(Position::new(row, column));
        }
        Self { cells }
    }

    pub(crate) fn cells(&self) -> &[Position] {
        &self.cells
    }
}

/// Accumulated star layers; grows by one per level and never shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StarField {
    layers: Vec<StarLayer>,
}

impl StarField {
    /// Appends one freshly drawn layer. Existing layers are never touched.
    pub(crate) fn generate_layer(&mut self, rng: &mut ChaCha8Rng, viewport: Viewport) {
        self.layers.push(StarLayer::generate(rng, viewport));
    }

    /// Reports whether any layer stores a cell exactly equal to `position`.
    ///
    /// Both coordinates of the same stored pair must match; a row and a
    /// column that only appear in different pairs do not count.
    pub(crate) fn is_star(&self, position: Position) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.cells.iter().any(|cell| *cell == position))
    }

    /// Number of stored cells equal to `position`, across all layers.
    ///
    /// Coincident duplicates each count once; collision checks drain one
    /// power unit per counted cell in the same tick.
    pub(crate) fn collision_count(&self, position: Position) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.cells.iter().filter(|cell| **cell == position).count())
            .sum()
    }

    pub(crate) fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub(crate) fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    #[cfg(test)]
    pub(crate) fn from_cells(layers: Vec<Vec<Position>>) -> Self {
        Self {
            layers: layers
                .into_iter()
                .map(|cells| StarLayer { cells })
                .collect(),
        }
    }
}

/// Chooses a wormhole cell guaranteed not to coincide with any star cell.
///
/// Uniform draws are retried a bounded number of times; exhaustion falls
/// back to a deterministic row-major scan for the first free cell. A field
/// with no free cell at all is a fatal invariant violation.
pub(crate) fn place_wormhole(
    rng: &mut ChaCha8Rng,
    field: &StarField,
    viewport: Viewport,
) -> Result<Position, WorldError> {
    let saturated = WorldError::FieldSaturated {
        height: viewport.height(),
        width: viewport.width(),
    };
    if !viewport.has_play_area() {
        return Err(saturated);
    }

    let height = viewport.height();
    let width = viewport.width();
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(1..height), rng.gen_range(0..width));
        if !field.is_star(candidate) {
            return Ok(candidate);
        }
    }

    log::warn!("wormhole placement exhausted {PLACEMENT_ATTEMPTS} random draws, scanning");
    for row in 1..height {
        for column in 0..width {
            let cell = Position::new(row, column);
            if !field.is_star(cell) {
                return Ok(cell);
            }
        }
    }

    Err(saturated)
}
