//! Terminal sequences for defeat, victory, and abandonment.

use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use starmaze_core::{Key, Position, Viewport};
use starmaze_rendering::{Audio, InputSource, Style, Surface, SHIP_GLYPH};
use starmaze_rendering_crossterm::TerminalSession;

use crate::replay::Outcome;

const FRAME_DELAY: Duration = Duration::from_millis(100);
const TYPE_DELAY: Duration = Duration::from_millis(200);
const FAREWELL_DELAY: Duration = Duration::from_secs(1);

const WIN_TONE_BASE: u32 = 100;
const WIN_TONE_STEP: u32 = 22;

const ENDING: &str = "You are a true starmazer.";
const TOP_LETTERS: [char; 4] = ['G', 'A', 'M', 'E'];
const BOTTOM_LETTERS: [char; 4] = ['O', 'V', 'E', 'R'];

/// Prints the farewell and leaves without any animation.
pub(crate) fn farewell(session: &mut TerminalSession) -> Result<Outcome> {
    session.draw_text(5, 10, "Bye Bye!", Style::Plain)?;
    session.flush()?;
    let _ = session.poll_key(FAREWELL_DELAY)?;
    Ok(Outcome::Aborted)
}

/// Defeat sequence: the "GAME" and "OVER" letters close in on the vertical
/// center, one row per frame, each frame with its own random tone.
pub(crate) fn game_over(session: &mut TerminalSession, ship: Position) -> Result<Outcome> {
    session.draw(ship, SHIP_GLYPH, Style::Emphasis)?;
    session.flush()?;
    if session.next_key()? == Key::Interrupt {
        return farewell(session);
    }
    session.clear(ship)?;

    let viewport = session.size().unwrap_or(Viewport::DEFAULT);
    let center_column = viewport.width() / 2;
    let columns = [
        center_column.saturating_sub(30),
        center_column.saturating_sub(20),
        center_column.saturating_sub(10),
        center_column,
    ];

    let mut rng = rand::thread_rng();
    let mut top = 1_u16;
    let mut bottom = viewport.height();
    while top < (viewport.height() / 2).saturating_sub(2) {
        top += 1;
        bottom = bottom.saturating_sub(1);
        session.tone(rng.gen_range(100..250))?;
        for (index, column) in columns.iter().enumerate() {
            session.clear(Position::new(top, *column))?;
            session.draw(
                Position::new(top + 1, *column),
                TOP_LETTERS[index],
                Style::Emphasis,
            )?;
            session.clear(Position::new(bottom, *column))?;
            session.draw(
                Position::new(bottom.saturating_sub(1), *column),
                BOTTOM_LETTERS[index],
                Style::Emphasis,
            )?;
        }
        session.flush()?;
        if let Some(Key::Interrupt) = session.poll_key(FRAME_DELAY)? {
            session.tone_off()?;
            return farewell(session);
        }
    }

    session.tone_off()?;
    let _ = session.next_key()?;
    Ok(Outcome::GameOver)
}

/// Victory sequence: the personalized banner, then the ending line typed out
/// character by character under an ascending tone ramp.
pub(crate) fn winner(session: &mut TerminalSession, moves: u32) -> Result<Outcome> {
    session.clear_all()?;
    let viewport = session.size().unwrap_or(Viewport::DEFAULT);
    let center_column = viewport.width() / 2;

    let name = player_name().unwrap_or_else(|| String::from(" "));
    let banner = format!("You win {name}, in {moves} moves");
    let banner_column = center_column.saturating_sub(banner.len() as u16 / 2);
    session.draw_text(4, banner_column, &banner, Style::Emphasis)?;
    session.flush()?;

    let start_column = center_column.saturating_sub(12);
    for (index, glyph) in ENDING.chars().enumerate() {
        session.tone(WIN_TONE_BASE + WIN_TONE_STEP * index as u32)?;
        session.draw(
            Position::new(12, start_column + index as u16),
            glyph,
            Style::Emphasis,
        )?;
        session.flush()?;
        if let Some(Key::Interrupt) = session.poll_key(TYPE_DELAY)? {
            session.tone_off()?;
            return farewell(session);
        }
    }

    session.tone_off()?;
    let _ = session.next_key()?;
    Ok(Outcome::Won)
}

/// Player identity for the win banner; a blank placeholder when unknown.
fn player_name() -> Option<String> {
    ["LOGNAME", "USER"]
        .iter()
        .find_map(|variable| std::env::var(variable).ok().filter(|name| !name.is_empty()))
}
