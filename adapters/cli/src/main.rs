#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Starmaze game.
//!
//! The loop is single-threaded and cooperative: draw the status row and the
//! wormhole, block for a key, dispatch it as a world command, then replay
//! the emitted events as timed draw and audio effects. The loop itself never
//! exits; it ends through one of the terminal outcomes — defeat, victory, or
//! an interrupt — each of which terminates the process successfully. The
//! only failure path is a saturated star field, which surfaces as an error.

mod finale;
mod replay;

use anyhow::Result;
use starmaze_core::{Command, Viewport};
use starmaze_rendering::{InputSource, Style, Surface, WORMHOLE_GLYPH};
use starmaze_rendering_crossterm::TerminalSession;
use starmaze_system_control::{action_for, Action};
use starmaze_world::{apply, query, World};

use crate::replay::Outcome;

/// Entry point for the Starmaze terminal game.
fn main() -> Result<()> {
    env_logger::init();

    let seed: u64 = rand::random();
    log::debug!("world seeded with {seed:#018x}");

    let mut world = World::new(seed)?;
    let mut session = TerminalSession::new()?;
    let outcome = run(&mut world, &mut session)?;
    drop(session);
    log::debug!("session ended: {outcome:?}");
    Ok(())
}

fn run(world: &mut World, session: &mut TerminalSession) -> Result<Outcome> {
    let viewport = session.size().unwrap_or(Viewport::DEFAULT);
    let mut events = Vec::new();
    apply(world, Command::ConfigureViewport { viewport }, &mut events)?;
    if let Some(outcome) = replay::replay(world, session, &events)? {
        return Ok(outcome);
    }

    loop {
        replay::draw_hud(session, &query::hud(world))?;
        replay::draw_stars(world, session)?;
        session.draw(query::wormhole(world), WORMHOLE_GLYPH, Style::Plain)?;
        session.flush()?;

        let key = session.next_key()?;
        match action_for(key) {
            Some(Action::Abort) => return finale::farewell(session),
            Some(Action::Dispatch(command)) => {
                events.clear();
                apply(world, command, &mut events)?;
                if let Some(outcome) = replay::replay(world, session, &events)? {
                    return Ok(outcome);
                }
            }
            None => {}
        }
    }
}
