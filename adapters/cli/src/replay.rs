//! Replays world events as timed terminal draw and audio effects.
//!
//! The world computes a whole dispatch — including every tick of a probe's
//! flight — before anything is drawn; this module restores the pacing. Each
//! probe tick blocks for a short delay, and each collision flash blocks for
//! an acknowledgment key, so the loop stays cooperative while the interrupt
//! chord remains observable at every wait.

use std::time::Duration;

use anyhow::Result;
use starmaze_core::{Event, HudSnapshot, Key, FULL_POWER};
use starmaze_rendering::{
    level_field, lives_field, moves_field, power_gauge, InputSource, Style, Surface,
    HUD_GAUGE_COLUMN, HUD_LEVEL_COLUMN, HUD_LIVES_COLUMN, HUD_MOVES_COLUMN,
    HUD_POWER_LABEL_COLUMN, HUD_ROW, POWER_LABEL, PROBE_GLYPH, SHIP_GLYPH, STAR_GLYPH,
    WORMHOLE_GLYPH,
};
use starmaze_rendering_crossterm::TerminalSession;
use starmaze_world::{query, World};

use crate::finale;

/// Delay between probe ticks.
const PROBE_TICK: Duration = Duration::from_millis(5);

/// How a session ended. Every variant exits the process successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// All lives were spent.
    GameOver,
    /// The final level was reached.
    Won,
    /// The interrupt chord was pressed.
    Aborted,
}

/// Replays the events of one dispatch in order.
///
/// Returns the session outcome as soon as a terminal event is reached, or
/// when the interrupt chord arrives at one of the replay's waits.
pub(crate) fn replay(
    world: &World,
    session: &mut TerminalSession,
    events: &[Event],
) -> Result<Option<Outcome>> {
    for event in events {
        match event {
            Event::ViewportConfigured { .. } => draw_scene(world, session)?,
            Event::MoveCounted { moves } => {
                session.draw_text(HUD_ROW, HUD_MOVES_COLUMN, &moves_field(*moves), Style::Plain)?;
            }
            Event::ShipMoved { from, to } => {
                session.clear(*from)?;
                session.draw(*to, SHIP_GLYPH, Style::Plain)?;
            }
            Event::StarStruck { cell, power } => {
                session.draw(*cell, SHIP_GLYPH, Style::Alert)?;
                session.flush()?;
                if session.next_key()? == Key::Interrupt {
                    return finale::farewell(session).map(Some);
                }
                session.draw_text(
                    HUD_ROW,
                    HUD_GAUGE_COLUMN,
                    &power_gauge(*power),
                    Style::Plain,
                )?;
                draw_stars(world, session)?;
                session.draw(*cell, SHIP_GLYPH, Style::Plain)?;
            }
            Event::LifeLost { lives } => {
                session.draw_text(HUD_ROW, HUD_LIVES_COLUMN, &lives_field(*lives), Style::Plain)?;
                session.draw_text(
                    HUD_ROW,
                    HUD_GAUGE_COLUMN,
                    &power_gauge(FULL_POWER),
                    Style::Plain,
                )?;
            }
            Event::GameOver => {
                return finale::game_over(session, query::ship(world)).map(Some);
            }
            Event::ProbeLaunched { .. } | Event::ProbeExpired { .. } => {}
            Event::ProbeMoved { cell } => {
                session.draw(*cell, PROBE_GLYPH, Style::Plain)?;
                session.flush()?;
                if let Some(Key::Interrupt) = session.poll_key(PROBE_TICK)? {
                    return finale::farewell(session).map(Some);
                }
                session.clear(*cell)?;
                draw_stars(world, session)?;
            }
            Event::WormholeReached { cell } => {
                log::debug!("wormhole struck at {cell:?}");
            }
            Event::LevelAdvanced { level } => {
                session.draw_text(HUD_ROW, HUD_LEVEL_COLUMN, &level_field(*level), Style::Plain)?;
            }
            Event::StarFieldGrown { layers } => {
                log::debug!("star field grew to {layers} layers");
                draw_stars(world, session)?;
            }
            Event::WormholeRelocated { cell } => {
                session.draw(*cell, WORMHOLE_GLYPH, Style::Plain)?;
            }
            Event::GameWon { moves } => {
                return finale::winner(session, *moves).map(Some);
            }
        }
    }
    Ok(None)
}

/// Draws the full status row.
pub(crate) fn draw_hud(session: &mut TerminalSession, hud: &HudSnapshot) -> Result<()> {
    session.draw_text(HUD_ROW, HUD_POWER_LABEL_COLUMN, POWER_LABEL, Style::Plain)?;
    session.draw_text(
        HUD_ROW,
        HUD_GAUGE_COLUMN,
        &power_gauge(hud.power),
        Style::Plain,
    )?;
    session.draw_text(
        HUD_ROW,
        HUD_LIVES_COLUMN,
        &lives_field(hud.lives),
        Style::Plain,
    )?;
    session.draw_text(
        HUD_ROW,
        HUD_LEVEL_COLUMN,
        &level_field(hud.level),
        Style::Plain,
    )?;
    session.draw_text(
        HUD_ROW,
        HUD_MOVES_COLUMN,
        &moves_field(hud.moves),
        Style::Plain,
    )?;
    Ok(())
}

/// Redraws every star cell.
///
/// Ship and probe glyphs overwrite stars as they pass; the field is redrawn
/// after any such drawing — and once per loop iteration — so it stays
/// visually complete.
pub(crate) fn draw_stars(world: &World, session: &mut TerminalSession) -> Result<()> {
    for cell in query::star_cells(world) {
        session.draw(cell, STAR_GLYPH, Style::Plain)?;
    }
    Ok(())
}

/// Draws the whole scene from scratch after a viewport (re)configuration.
fn draw_scene(world: &World, session: &mut TerminalSession) -> Result<()> {
    session.clear_all()?;
    draw_hud(session, &query::hud(world))?;
    draw_stars(world, session)?;
    session.draw(query::wormhole(world), WORMHOLE_GLYPH, Style::Plain)?;
    session.draw(query::ship(world), SHIP_GLYPH, Style::Plain)?;
    session.flush()
}
