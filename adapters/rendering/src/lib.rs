#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Starmaze adapters.
//!
//! The simulation never draws; adapters replay world events through the
//! capability traits defined here. Glyphs and the status-row layout are
//! fixed so every backend presents the same game.

use std::time::Duration;

use anyhow::Result as AnyResult;
use starmaze_core::{Key, Position, Viewport, FULL_POWER};

/// Glyph used for the player's ship.
pub const SHIP_GLYPH: char = 'X';

/// Glyph used for a star obstacle.
pub const STAR_GLYPH: char = '.';

/// Glyph used for the wormhole.
pub const WORMHOLE_GLYPH: char = '@';

/// Glyph used for a probe in flight.
pub const PROBE_GLYPH: char = '+';

/// Glyph used to erase a cell.
pub const BLANK_GLYPH: char = ' ';

/// Row hosting the status display; never part of the playable area.
pub const HUD_ROW: u16 = 0;

/// Column where the power label starts.
pub const HUD_POWER_LABEL_COLUMN: u16 = 11;

/// First column of the power gauge marks.
pub const HUD_GAUGE_COLUMN: u16 = 18;

/// Column where the lives field starts.
pub const HUD_LIVES_COLUMN: u16 = 30;

/// Column where the level field starts.
pub const HUD_LEVEL_COLUMN: u16 = 40;

/// Column where the moves field starts.
pub const HUD_MOVES_COLUMN: u16 = 50;

/// Label preceding the power gauge.
pub const POWER_LABEL: &str = "Power: ";

/// Visual emphasis applied when presenting a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Default presentation.
    Plain,
    /// Red highlight used for collision flashes.
    Alert,
    /// Bold presentation used by the terminal sequences.
    Emphasis,
}

/// Renders the power gauge: one mark per power unit followed by a single
/// blank, which erases the mark left behind by the preceding decrement.
#[must_use]
pub fn power_gauge(power: u32) -> String {
    let marks = power.min(FULL_POWER) as usize;
    let mut gauge = "|".repeat(marks);
    gauge.push(BLANK_GLYPH);
    gauge
}

/// Formats the lives field of the status row.
#[must_use]
pub fn lives_field(lives: u32) -> String {
    format!("Lives: {lives}")
}

/// Formats the level field of the status row.
#[must_use]
pub fn level_field(level: u32) -> String {
    format!("Level: {level}")
}

/// Formats the moves field of the status row.
#[must_use]
pub fn moves_field(moves: u32) -> String {
    format!("Moves: {moves}")
}

/// Drawing surface capable of placing glyphs at viewport cells.
pub trait Surface {
    /// Places a single glyph at the given cell.
    fn draw(&mut self, position: Position, glyph: char, style: Style) -> AnyResult<()>;

    /// Writes a string starting at the given row and column.
    fn draw_text(&mut self, row: u16, column: u16, text: &str, style: Style) -> AnyResult<()>;

    /// Erases a single cell.
    fn clear(&mut self, position: Position) -> AnyResult<()>;

    /// Erases the whole screen.
    fn clear_all(&mut self) -> AnyResult<()>;

    /// Reports the current viewport dimensions.
    fn size(&self) -> AnyResult<Viewport>;

    /// Pushes queued drawing to the terminal.
    fn flush(&mut self) -> AnyResult<()>;
}

/// Blocking keyboard input with an interrupt-aware bounded wait.
pub trait InputSource {
    /// Blocks until the next key event arrives.
    fn next_key(&mut self) -> AnyResult<Key>;

    /// Waits up to `timeout` for input, returning `None` once it elapses.
    ///
    /// This is the game's delay primitive: animations wait through it so
    /// the interrupt chord stays observable at every suspension point.
    /// Implementations surface [`Key::Interrupt`] immediately and retain
    /// other keys for the next blocking read, preserving type-ahead.
    fn poll_key(&mut self, timeout: Duration) -> AnyResult<Option<Key>>;
}

/// Tone generation for the win and defeat sequences.
pub trait Audio {
    /// Starts a tone at roughly the given frequency in hertz.
    fn tone(&mut self, frequency: u32) -> AnyResult<()>;

    /// Silences any playing tone.
    fn tone_off(&mut self) -> AnyResult<()>;
}
