#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure key dispatch for the Starmaze game loop.
//!
//! Bindings are fixed: the cursor keys step the ship, the Home/PageUp/End/
//! PageDown block steps it diagonally, and two four-key rows fire probes —
//! `d`/`a`/`s`/`f` for right/left/up/down and `z`/`x`/`c`/`v` for the four
//! diagonals. Ctrl-C abandons the session from any suspension point.

use starmaze_core::{Command, Direction, Key};

/// Outcome of dispatching a single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Forward a command to the world.
    Dispatch(Command),
    /// Abandon the session immediately.
    Abort,
}

/// Maps a key press onto the action it is bound to, if any.
///
/// Unbound keys yield `None`: the loop neither dispatches a command nor
/// runs the post-dispatch checks for them.
#[must_use]
pub fn action_for(key: Key) -> Option<Action> {
    let action = match key {
        Key::Interrupt => Action::Abort,
        Key::Up => step(Direction::Up),
        Key::Down => step(Direction::Down),
        Key::Left => step(Direction::Left),
        Key::Right => step(Direction::Right),
        Key::Home => step(Direction::UpLeft),
        Key::PageUp => step(Direction::UpRight),
        Key::End => step(Direction::DownLeft),
        Key::PageDown => step(Direction::DownRight),
        Key::Char('d') => fire(Direction::Right),
        Key::Char('a') => fire(Direction::Left),
        Key::Char('s') => fire(Direction::Up),
        Key::Char('f') => fire(Direction::Down),
        Key::Char('z') => fire(Direction::UpLeft),
        Key::Char('x') => fire(Direction::UpRight),
        Key::Char('c') => fire(Direction::DownLeft),
        Key::Char('v') => fire(Direction::DownRight),
        Key::Char(_) | Key::Other => return None,
    };
    Some(action)
}

const fn step(direction: Direction) -> Action {
    Action::Dispatch(Command::MoveShip { direction })
}

const fn fire(direction: Direction) -> Action {
    Action::Dispatch(Command::FireProbe { direction })
}

#[cfg(test)]
mod tests {
    use super::{action_for, Action};
    use starmaze_core::{Command, Direction, Key};

    #[test]
    fn interrupt_always_aborts() {
        assert_eq!(action_for(Key::Interrupt), Some(Action::Abort));
    }

    #[test]
    fn unbound_keys_dispatch_nothing() {
        assert_eq!(action_for(Key::Char('q')), None);
        assert_eq!(action_for(Key::Char('D')), None);
        assert_eq!(action_for(Key::Other), None);
    }

    #[test]
    fn shoot_row_matches_its_directions() {
        assert_eq!(
            action_for(Key::Char('d')),
            Some(Action::Dispatch(Command::FireProbe {
                direction: Direction::Right
            }))
        );
        assert_eq!(
            action_for(Key::Char('s')),
            Some(Action::Dispatch(Command::FireProbe {
                direction: Direction::Up
            }))
        );
    }
}
