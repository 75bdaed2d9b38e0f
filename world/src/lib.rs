#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Starmaze game.
//!
//! The world owns the star field, the wormhole, the ship, and the
//! progression counters, and mutates them only through [`apply`]. Every
//! mutation is broadcast as [`Event`] values that adapters replay with
//! their own pacing; the simulation itself never draws, sleeps, or reads
//! input, which keeps all of it deterministic under a fixed seed.

mod field;

use field::{place_wormhole, StarField};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starmaze_core::{
    Command, Event, Phase, Position, Viewport, WorldError, FULL_POWER, LEVEL_MAX, STARTING_LIVES,
};
use starmaze_system_shooting::{simulate, FlightOutcome};

/// Represents the authoritative Starmaze world state.
#[derive(Clone, Debug)]
pub struct World {
    viewport: Viewport,
    ship: Position,
    wormhole: Position,
    star_field: StarField,
    progression: Progression,
    phase: Phase,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world simulating the default viewport, seeded once from
    /// the provided value.
    ///
    /// The seed is the only source of randomness for the whole run: star
    /// layers and wormhole placements all draw from it, so equal seeds
    /// produce equal worlds.
    pub fn new(seed: u64) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let viewport = Viewport::DEFAULT;
        let mut star_field = StarField::default();
        star_field.generate_layer(&mut rng, viewport);
        let wormhole = place_wormhole(&mut rng, &star_field, viewport)?;
        Ok(Self {
            viewport,
            ship: start_position(viewport),
            wormhole,
            star_field,
            progression: Progression::new(),
            phase: Phase::Playing,
            rng,
        })
    }

    fn reset(&mut self, viewport: Viewport) -> Result<(), WorldError> {
        self.viewport = viewport;
        self.star_field = StarField::default();
        self.star_field.generate_layer(&mut self.rng, viewport);
        self.wormhole = place_wormhole(&mut self.rng, &self.star_field, viewport)?;
        self.ship = start_position(viewport);
        self.progression = Progression::new();
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Collision, power, and wormhole checks shared by every dispatch.
    ///
    /// The ship does not have to move to pay for a star underneath it:
    /// these checks run after each command, so a ship parked on a star
    /// drains power on every subsequent input.
    fn post_dispatch(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let hits = self.star_field.collision_count(self.ship);
        for _ in 0..hits {
            self.progression.power = self.progression.power.saturating_sub(1);
            out_events.push(Event::StarStruck {
                cell: self.ship,
                power: self.progression.power,
            });
        }

        if self.progression.power < 1 {
            self.progression.lives = self.progression.lives.saturating_sub(1);
            self.progression.power = FULL_POWER;
            out_events.push(Event::LifeLost {
                lives: self.progression.lives,
            });
            if self.progression.lives < 1 {
                self.phase = Phase::GameOver;
                out_events.push(Event::GameOver);
                return Ok(());
            }
        }

        if self.ship == self.wormhole {
            self.enter_wormhole(out_events)?;
        }
        Ok(())
    }

    /// Level-up sequence shared by probe hits and ship transits.
    fn enter_wormhole(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        self.progression.level += 1;
        out_events.push(Event::LevelAdvanced {
            level: self.progression.level,
        });

        self.star_field.generate_layer(&mut self.rng, self.viewport);
        out_events.push(Event::StarFieldGrown {
            layers: self.star_field.layer_count(),
        });

        self.wormhole = place_wormhole(&mut self.rng, &self.star_field, self.viewport)?;
        out_events.push(Event::WormholeRelocated {
            cell: self.wormhole,
        });

        if self.progression.level >= LEVEL_MAX {
            self.phase = Phase::Won;
            out_events.push(Event::GameWon {
                moves: self.progression.moves,
            });
        }
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Emitted events are appended to `out_events` in replay order. The only
/// fatal outcome is a saturated star field during wormhole placement; all
/// gameplay endings arrive as ordinary events. Commands applied after a
/// terminal event are ignored.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    if world.phase != Phase::Playing && !matches!(command, Command::ConfigureViewport { .. }) {
        return Ok(());
    }

    match command {
        Command::ConfigureViewport { viewport } => {
            world.reset(viewport)?;
            out_events.push(Event::ViewportConfigured { viewport });
        }
        Command::MoveShip { direction } => {
            world.progression.moves += 1;
            out_events.push(Event::MoveCounted {
                moves: world.progression.moves,
            });

            let (delta_row, delta_column) = direction.step();
            if let Some(destination) = world
                .ship
                .offset(delta_row, delta_column)
                .filter(|cell| world.viewport.contains(*cell))
            {
                out_events.push(Event::ShipMoved {
                    from: world.ship,
                    to: destination,
                });
                world.ship = destination;
            }

            world.post_dispatch(out_events)?;
        }
        Command::FireProbe { direction } => {
            let flight = simulate(world.ship, direction, world.viewport, world.wormhole);
            out_events.push(Event::ProbeLaunched {
                origin: world.ship,
                direction,
            });
            for step in flight.steps() {
                out_events.push(Event::ProbeMoved { cell: *step });
            }
            match flight.outcome() {
                FlightOutcome::Boundary => out_events.push(Event::ProbeExpired {
                    cell: flight.final_cell(world.ship),
                }),
                FlightOutcome::Wormhole => {
                    out_events.push(Event::WormholeReached {
                        cell: world.wormhole,
                    });
                    world.enter_wormhole(out_events)?;
                }
            }

            if world.phase == Phase::Playing {
                world.post_dispatch(out_events)?;
            }
        }
    }
    Ok(())
}

fn start_position(viewport: Viewport) -> Position {
    Position::new((viewport.height() / 2).max(1), viewport.width() / 2)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Progression {
    power: u32,
    lives: u32,
    level: u32,
    moves: u32,
}

impl Progression {
    const fn new() -> Self {
        Self {
            power: FULL_POWER,
            lives: STARTING_LIVES,
            level: 1,
            moves: 0,
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use starmaze_core::{HudSnapshot, Phase, Position, Viewport};

    /// Current ship cell.
    #[must_use]
    pub fn ship(world: &World) -> Position {
        world.ship
    }

    /// Current wormhole cell.
    #[must_use]
    pub fn wormhole(world: &World) -> Position {
        world.wormhole
    }

    /// Viewport the world currently simulates against.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        world.viewport
    }

    /// Lifecycle phase of the run.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Snapshot of the progression counters for the status display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            power: world.progression.power,
            lives: world.progression.lives,
            level: world.progression.level,
            moves: world.progression.moves,
        }
    }

    /// Reports whether any star layer stores exactly this cell.
    #[must_use]
    pub fn is_star(world: &World, position: Position) -> bool {
        world.star_field.is_star(position)
    }

    /// Number of accumulated star layers.
    #[must_use]
    pub fn layer_count(world: &World) -> usize {
        world.star_field.layer_count()
    }

    /// Every stored star cell across every layer, in layer order.
    ///
    /// Adapters redraw all of these whenever ship or probe drawing may have
    /// overwritten a star glyph.
    #[must_use]
    pub fn star_cells(world: &World) -> Vec<Position> {
        world
            .star_field
            .layers()
            .iter()
            .flat_map(|layer| layer.cells().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, start_position, World};
    use crate::field::StarField;
    use starmaze_core::{
        Command, Direction, Event, Phase, Position, Viewport, FULL_POWER, LEVEL_MAX,
    };

    fn playing_world(seed: u64) -> World {
        World::new(seed).expect("fresh field cannot be saturated")
    }

    fn configured(seed: u64, viewport: Viewport) -> World {
        let mut world = playing_world(seed);
        let mut events = Vec::new();
        apply(&mut world, Command::ConfigureViewport { viewport }, &mut events)
            .expect("fresh field cannot be saturated");
        world
    }

    fn move_ship(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::MoveShip { direction }, &mut events).expect("placement succeeds");
        events
    }

    fn fire(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::FireProbe { direction }, &mut events).expect("placement succeeds");
        events
    }

    #[test]
    fn equal_seeds_produce_equal_worlds() {
        let first = playing_world(42);
        let second = playing_world(42);
        assert_eq!(query::star_cells(&first), query::star_cells(&second));
        assert_eq!(query::wormhole(&first), query::wormhole(&second));

        let third = playing_world(43);
        assert_ne!(query::star_cells(&first), query::star_cells(&third));
    }

    #[test]
    fn up_move_from_the_first_row_is_rejected_but_counted() {
        let mut world = configured(5, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(1, 40);

        let events = move_ship(&mut world, Direction::Up);

        assert_eq!(query::ship(&world), Position::new(1, 40));
        assert_eq!(events, vec![Event::MoveCounted { moves: 1 }]);
        assert_eq!(query::hud(&world).moves, 1);
    }

    #[test]
    fn right_move_from_the_last_column_is_rejected_but_counted() {
        let mut world = configured(5, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.wormhole = Position::new(23, 0);
        world.ship = Position::new(10, 79);

        let events = move_ship(&mut world, Direction::Right);

        assert_eq!(query::ship(&world), Position::new(10, 79));
        assert_eq!(events, vec![Event::MoveCounted { moves: 1 }]);
    }

    #[test]
    fn diagonal_move_needs_both_axes_in_bounds() {
        let mut world = configured(5, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(1, 20);

        let _ = move_ship(&mut world, Direction::UpRight);
        assert_eq!(query::ship(&world), Position::new(1, 20), "row axis blocks");

        world.ship = Position::new(10, 0);
        let _ = move_ship(&mut world, Direction::DownLeft);
        assert_eq!(query::ship(&world), Position::new(10, 0), "column axis blocks");

        world.ship = Position::new(10, 20);
        let _ = move_ship(&mut world, Direction::DownRight);
        assert_eq!(query::ship(&world), Position::new(11, 21));
    }

    #[test]
    fn accepted_move_reports_both_cells() {
        let mut world = configured(9, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(10, 20);

        let events = move_ship(&mut world, Direction::Left);
        assert_eq!(
            events,
            vec![
                Event::MoveCounted { moves: 1 },
                Event::ShipMoved {
                    from: Position::new(10, 20),
                    to: Position::new(10, 19),
                },
            ]
        );
    }

    #[test]
    fn coincident_duplicate_stars_compound_in_one_check() {
        let mut world = configured(3, Viewport::new(24, 80));
        let target = Position::new(10, 21);
        world.star_field = StarField::from_cells(vec![vec![target, target], vec![target]]);
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(10, 20);

        let events = move_ship(&mut world, Direction::Right);
        let strikes: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                Event::StarStruck { power, .. } => Some(*power),
                _ => None,
            })
            .collect();

        assert_eq!(strikes, vec![8, 7, 6]);
        assert_eq!(query::hud(&world).power, 6);
    }

    #[test]
    fn exhausted_power_costs_a_life_and_refills() {
        let mut world = configured(3, Viewport::new(24, 80));
        let target = Position::new(10, 21);
        world.star_field = StarField::from_cells(vec![vec![target]]);
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(10, 20);
        world.progression.power = 1;

        let events = move_ship(&mut world, Direction::Right);

        assert!(events.contains(&Event::StarStruck {
            cell: target,
            power: 0
        }));
        assert!(events.contains(&Event::LifeLost { lives: 2 }));
        assert_eq!(query::hud(&world).power, FULL_POWER);
        assert_eq!(query::hud(&world).lives, 2);
        assert_eq!(query::phase(&world), Phase::Playing);
    }

    #[test]
    fn last_life_ends_the_run() {
        let mut world = configured(3, Viewport::new(24, 80));
        let target = Position::new(10, 21);
        world.star_field = StarField::from_cells(vec![vec![target]]);
        world.wormhole = Position::new(23, 79);
        world.ship = Position::new(10, 20);
        world.progression.power = 1;
        world.progression.lives = 1;

        let events = move_ship(&mut world, Direction::Right);

        assert!(events.contains(&Event::LifeLost { lives: 0 }));
        assert_eq!(events.last(), Some(&Event::GameOver));
        assert_eq!(query::phase(&world), Phase::GameOver);
    }

    #[test]
    fn probe_hit_advances_exactly_one_level() {
        let mut world = configured(3, Viewport::new(24, 80));
        // A star under the ship keeps the relocated wormhole off the ship's
        // cell, so the transit check cannot chain a second level-up here.
        world.star_field = StarField::from_cells(vec![vec![Position::new(10, 10)]]);
        world.ship = Position::new(10, 10);
        world.wormhole = Position::new(10, 30);

        let events = fire(&mut world, Direction::Right);

        assert!(events.contains(&Event::WormholeReached {
            cell: Position::new(10, 30)
        }));
        let level_ups = events
            .iter()
            .filter(|event| matches!(event, Event::LevelAdvanced { .. }))
            .count();
        assert_eq!(level_ups, 1);
        assert_eq!(query::hud(&world).level, 2);
        assert_eq!(query::layer_count(&world), 2);

        let relocated = events.iter().any(|event| {
            matches!(event, Event::WormholeRelocated { cell } if !query::is_star(&world, *cell))
        });
        assert!(relocated, "relocation must avoid the grown field");
    }

    #[test]
    fn probe_ticks_stop_at_the_wormhole_cell() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.ship = Position::new(10, 10);
        world.wormhole = Position::new(10, 13);

        let events = fire(&mut world, Direction::Right);
        let ticks: Vec<Position> = events
            .iter()
            .filter_map(|event| match event {
                Event::ProbeMoved { cell } => Some(*cell),
                _ => None,
            })
            .collect();

        assert_eq!(
            ticks,
            vec![
                Position::new(10, 11),
                Position::new(10, 12),
                Position::new(10, 13),
            ]
        );
    }

    #[test]
    fn missed_probe_expires_on_the_boundary() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.ship = Position::new(10, 70);
        world.wormhole = Position::new(23, 0);

        let events = fire(&mut world, Direction::Right);
        assert!(events.contains(&Event::ProbeExpired {
            cell: Position::new(10, 79)
        }));
        assert_eq!(query::hud(&world).level, 1, "boundary shots never level up");
    }

    #[test]
    fn firing_does_not_touch_the_move_counter() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.ship = Position::new(10, 10);
        world.wormhole = Position::new(23, 79);

        let _ = fire(&mut world, Direction::Up);
        assert_eq!(query::hud(&world).moves, 0);
    }

    #[test]
    fn ship_transit_through_the_wormhole_levels_up() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.ship = Position::new(10, 10);
        world.wormhole = Position::new(10, 11);

        let events = move_ship(&mut world, Direction::Right);
        assert!(events.contains(&Event::LevelAdvanced { level: 2 }));
    }

    #[test]
    fn final_level_wins_with_the_move_count() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.star_field = StarField::default();
        world.ship = Position::new(10, 10);
        world.wormhole = Position::new(10, 12);
        world.progression.level = LEVEL_MAX - 1;
        world.progression.moves = 250;

        let events = fire(&mut world, Direction::Right);

        assert!(events.contains(&Event::LevelAdvanced { level: LEVEL_MAX }));
        assert_eq!(events.last(), Some(&Event::GameWon { moves: 250 }));
        assert_eq!(query::phase(&world), Phase::Won);
    }

    #[test]
    fn terminal_worlds_ignore_further_commands() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.phase = Phase::GameOver;
        let before = query::hud(&world);

        let events = move_ship(&mut world, Direction::Down);
        assert!(events.is_empty());
        assert_eq!(query::hud(&world), before);
    }

    #[test]
    fn configure_restarts_the_progression() {
        let mut world = configured(3, Viewport::new(24, 80));
        world.progression.moves = 40;
        world.progression.level = 7;

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureViewport {
                viewport: Viewport::new(30, 100),
            },
            &mut events,
        )
        .expect("fresh field cannot be saturated");

        let hud = query::hud(&world);
        assert_eq!((hud.power, hud.lives, hud.level, hud.moves), (9, 3, 1, 0));
        assert_eq!(query::layer_count(&world), 1);
        assert_eq!(query::viewport(&world), Viewport::new(30, 100));
        assert_eq!(query::ship(&world), start_position(Viewport::new(30, 100)));
    }

    #[test]
    fn start_position_scales_with_the_viewport() {
        assert_eq!(start_position(Viewport::new(24, 80)), Position::new(12, 40));
        assert_eq!(start_position(Viewport::new(2, 2)), Position::new(1, 1));
    }
}
