#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless probe flight simulation.
//!
//! A probe advances from the ship's cell one tick at a time along one of the
//! eight directions until it would leave the viewport or lands exactly on
//! the wormhole. The simulation is pure: the adapter replays the resulting
//! steps with its own pacing, so the same inputs always yield the same
//! flight regardless of rendering.

use starmaze_core::{Direction, Position, Viewport};

/// How a probe's flight came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightOutcome {
    /// The next tick would have left the viewport.
    Boundary,
    /// A tick landed exactly on the wormhole cell.
    Wormhole,
}

/// Completed flight of a single probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flight {
    steps: Vec<Position>,
    outcome: FlightOutcome,
}

impl Flight {
    /// Cells the probe occupied, one per tick, in flight order.
    #[must_use]
    pub fn steps(&self) -> &[Position] {
        &self.steps
    }

    /// How the flight ended.
    #[must_use]
    pub const fn outcome(&self) -> FlightOutcome {
        self.outcome
    }

    /// Last cell the probe occupied, or the origin for an empty flight.
    #[must_use]
    pub fn final_cell(&self, origin: Position) -> Position {
        self.steps.last().copied().unwrap_or(origin)
    }
}

/// Simulates one probe fired from `origin` along `direction`.
///
/// The wormhole check runs after each tick, so a probe fired while the ship
/// already sits on the wormhole still has to fly back onto it. Orthogonal
/// probes advance one cell per tick; diagonal probes advance one row and
/// two columns per tick.
#[must_use]
pub fn simulate(
    origin: Position,
    direction: Direction,
    viewport: Viewport,
    wormhole: Position,
) -> Flight {
    let (delta_row, delta_column) = direction.probe_step();
    let mut steps = Vec::new();
    let mut cursor = origin;

    loop {
        let next = match cursor.offset(delta_row, delta_column) {
            Some(position) if viewport.contains(position) => position,
            _ => {
                return Flight {
                    steps,
                    outcome: FlightOutcome::Boundary,
                }
            }
        };

        cursor = next;
        steps.push(next);

        if next == wormhole {
            return Flight {
                steps,
                outcome: FlightOutcome::Wormhole,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{simulate, FlightOutcome};
    use starmaze_core::{Direction, Position, Viewport};

    const OFF_BOARD: Position = Position::new(0, 0);

    #[test]
    fn probe_from_the_boundary_never_leaves_the_pad() {
        let viewport = Viewport::new(24, 80);
        let flight = simulate(Position::new(5, 79), Direction::Right, viewport, OFF_BOARD);
        assert!(flight.steps().is_empty());
        assert_eq!(flight.outcome(), FlightOutcome::Boundary);
        assert_eq!(flight.final_cell(Position::new(5, 79)), Position::new(5, 79));
    }

    #[test]
    fn upward_probe_stops_on_the_first_playable_row() {
        let viewport = Viewport::new(24, 80);
        let flight = simulate(Position::new(6, 10), Direction::Up, viewport, OFF_BOARD);
        assert_eq!(flight.outcome(), FlightOutcome::Boundary);
        assert_eq!(flight.final_cell(Position::new(6, 10)), Position::new(1, 10));
        assert_eq!(flight.steps().len(), 5);
    }
}
