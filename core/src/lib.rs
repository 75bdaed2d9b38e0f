#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Starmaze game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! replay as timed draw and audio effects. Systems stay pure: they consume
//! immutable data and respond exclusively with values.

use thiserror::Error;

/// Highest level a run can reach; arriving there triggers the win sequence.
pub const LEVEL_MAX: u32 = 30;

/// Power meter value at the start of every life.
pub const FULL_POWER: u32 = 9;

/// Number of lives a fresh run starts with.
pub const STARTING_LIVES: u32 = 3;

/// Location of a single viewport cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u16,
    column: u16,
}

impl Position {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u16 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u16 {
        self.column
    }

    /// Returns the position displaced by the provided deltas, or `None` when
    /// the result would fall outside the addressable coordinate range.
    #[must_use]
    pub fn offset(self, delta_row: i32, delta_column: i32) -> Option<Self> {
        let row = i32::from(self.row).checked_add(delta_row)?;
        let column = i32::from(self.column).checked_add(delta_column)?;
        match (u16::try_from(row), u16::try_from(column)) {
            (Ok(row), Ok(column)) => Some(Self { row, column }),
            _ => None,
        }
    }
}

/// Dimensions of the terminal play area measured in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    height: u16,
    width: u16,
}

impl Viewport {
    /// Dimensions assumed when the terminal size cannot be determined.
    pub const DEFAULT: Self = Self::new(24, 80);

    /// Creates a new viewport descriptor.
    #[must_use]
    pub const fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    /// Number of rows, including the status row.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Reports whether the cell lies within the playable area. Row 0 hosts
    /// the status display and is never playable.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() >= 1 && position.row() < self.height && position.column() < self.width
    }

    /// Reports whether at least one playable cell exists.
    #[must_use]
    pub const fn has_play_area(&self) -> bool {
        self.height >= 2 && self.width >= 1
    }
}

/// The eight directions available for both ship steps and probe shots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
    /// Diagonal toward the upper-left corner.
    UpLeft,
    /// Diagonal toward the upper-right corner.
    UpRight,
    /// Diagonal toward the lower-left corner.
    DownLeft,
    /// Diagonal toward the lower-right corner.
    DownRight,
}

impl Direction {
    /// Every direction in a fixed order, useful for exhaustive sweeps.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Reports whether the direction belongs to the diagonal family.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }

    /// Row and column deltas applied by a single ship step.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    /// Row and column deltas covered by one probe tick.
    ///
    /// Diagonal probes cross two columns per row to compensate for terminal
    /// cells being taller than they are wide.
    #[must_use]
    pub const fn probe_step(self) -> (i32, i32) {
        let (row, column) = self.step();
        if self.is_diagonal() {
            (row, column * 2)
        } else {
            (row, column)
        }
    }
}

/// Raw key vocabulary delivered by input sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Cursor-up key.
    Up,
    /// Cursor-down key.
    Down,
    /// Cursor-left key.
    Left,
    /// Cursor-right key.
    Right,
    /// Home key.
    Home,
    /// Page-up key.
    PageUp,
    /// End key.
    End,
    /// Page-down key.
    PageDown,
    /// A printable character key.
    Char(char),
    /// The interrupt chord (Ctrl-C) observed at a suspension point.
    Interrupt,
    /// Any key the game does not bind.
    Other,
}

/// Lifecycle phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The run is in progress and commands mutate the world.
    Playing,
    /// All lives are spent; the world ignores further commands.
    GameOver,
    /// The final level was reached; the world ignores further commands.
    Won,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Restarts the simulation against the provided viewport dimensions.
    ConfigureViewport {
        /// Play area measured by the terminal adapter.
        viewport: Viewport,
    },
    /// Requests a single ship step in the given direction.
    MoveShip {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Fires a probe from the ship's cell in the given direction.
    FireProbe {
        /// Direction of the probe's flight.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
///
/// Adapters replay these in order; the probe events carry the inter-tick
/// pacing of a shot, and the terminal events end the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the simulation was restarted for a viewport.
    ViewportConfigured {
        /// Dimensions the world now simulates against.
        viewport: Viewport,
    },
    /// Reports the move counter after an attempted ship step, accepted or not.
    MoveCounted {
        /// Total number of attempted moves so far.
        moves: u32,
    },
    /// Confirms that the ship moved between two cells.
    ShipMoved {
        /// Cell the ship occupied before the step.
        from: Position,
        /// Cell the ship occupies after the step.
        to: Position,
    },
    /// Reports one power decrement caused by a star under the ship.
    ///
    /// Coincident duplicate star cells each raise their own event in the
    /// same check, so power can drop several times per dispatched command.
    StarStruck {
        /// Cell where ship and star coincide.
        cell: Position,
        /// Power remaining after this decrement.
        power: u32,
    },
    /// Reports that power ran out and a life was consumed.
    LifeLost {
        /// Lives remaining after the loss.
        lives: u32,
    },
    /// Announces the defeat terminal state.
    GameOver,
    /// Confirms that a probe left the ship's cell.
    ProbeLaunched {
        /// Cell the probe started from.
        origin: Position,
        /// Direction of the flight.
        direction: Direction,
    },
    /// Reports one probe tick; the adapter draws, waits, and erases.
    ProbeMoved {
        /// Cell the probe occupies for this tick.
        cell: Position,
    },
    /// Reports that a probe reached the viewport boundary without a hit.
    ProbeExpired {
        /// Last cell the probe occupied.
        cell: Position,
    },
    /// Reports that a probe landed exactly on the wormhole.
    WormholeReached {
        /// The wormhole cell that was struck.
        cell: Position,
    },
    /// Announces the new level after a wormhole transit.
    LevelAdvanced {
        /// Level now in progress.
        level: u32,
    },
    /// Reports that a fresh star layer was appended to the field.
    StarFieldGrown {
        /// Total number of accumulated layers.
        layers: usize,
    },
    /// Reports the wormhole's new hiding place.
    WormholeRelocated {
        /// Cell the wormhole now occupies.
        cell: Position,
    },
    /// Announces the victory terminal state.
    GameWon {
        /// Total attempted moves across the winning run.
        moves: u32,
    },
}

/// Read-only snapshot of the progression counters shown by the status row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Power units remaining in the current life.
    pub power: u32,
    /// Lives remaining.
    pub lives: u32,
    /// Level currently in progress.
    pub level: u32,
    /// Attempted moves so far.
    pub moves: u32,
}

/// Fatal invariant violations surfaced by the world.
///
/// These are distinct from gameplay transitions: defeat and victory are
/// ordinary events, while a saturated star field makes the wormhole
/// invariant unsatisfiable and ends the process with a failure.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// Every playable cell holds a star; no wormhole placement exists.
    #[error("star field saturated: no free cell for the wormhole in a {height}x{width} viewport")]
    FieldSaturated {
        /// Viewport height at the time of placement.
        height: u16,
        /// Viewport width at the time of placement.
        width: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::{Direction, Position, Viewport};

    #[test]
    fn offset_rejects_moves_below_zero() {
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(0, 0).offset(0, -1), None);
        assert_eq!(Position::new(3, 4).offset(-1, -2), Some(Position::new(2, 2)));
    }

    #[test]
    fn viewport_excludes_status_row_and_outer_edge() {
        let viewport = Viewport::new(24, 80);
        assert!(!viewport.contains(Position::new(0, 10)));
        assert!(viewport.contains(Position::new(1, 0)));
        assert!(viewport.contains(Position::new(23, 79)));
        assert!(!viewport.contains(Position::new(24, 0)));
        assert!(!viewport.contains(Position::new(5, 80)));
    }

    #[test]
    fn diagonal_probe_steps_cover_two_columns_per_row() {
        for direction in Direction::ALL {
            let (step_row, step_column) = direction.step();
            let (probe_row, probe_column) = direction.probe_step();
            assert_eq!(probe_row, step_row);
            if direction.is_diagonal() {
                assert_eq!(probe_column, step_column * 2);
            } else {
                assert_eq!(probe_column, step_column);
            }
        }
    }

    #[test]
    fn orthogonal_steps_touch_one_axis() {
        for direction in Direction::ALL {
            let (row, column) = direction.step();
            if direction.is_diagonal() {
                assert_eq!(row.abs() + column.abs(), 2);
            } else {
                assert_eq!(row.abs() + column.abs(), 1);
            }
        }
    }
}
