#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed terminal adapter for Starmaze.
//!
//! [`TerminalSession`] owns the terminal for the lifetime of a run: raw
//! mode, the alternate screen, and a hidden cursor are entered on
//! construction and restored on drop, so every exit path — victory, defeat,
//! abort, or error — leaves the user's shell intact. Under raw mode the
//! interrupt arrives as the Ctrl-C key event rather than a signal, which is
//! how the game observes it at every suspension point.

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::queue;
use starmaze_core::{Key, Position, Viewport};
use starmaze_rendering::{Audio, InputSource, Style, Surface, BLANK_GLYPH};

/// Terminal session owning raw mode; restores the terminal on drop.
pub struct TerminalSession {
    out: Stdout,
    pending: VecDeque<Key>,
}

impl TerminalSession {
    /// Enters raw mode and the alternate screen with a hidden cursor.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        let mut out = io::stdout();
        queue!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("prepare alternate screen")?;
        out.flush().context("flush terminal setup")?;
        Ok(Self {
            out,
            pending: VecDeque::new(),
        })
    }

    fn set_style(&mut self, style: Style) -> Result<()> {
        match style {
            Style::Plain => queue!(self.out, SetForegroundColor(Color::White))?,
            Style::Alert => queue!(
                self.out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold)
            )?,
            Style::Emphasis => queue!(self.out, SetAttribute(Attribute::Bold))?,
        }
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = queue!(self.out, Show, LeaveAlternateScreen);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Surface for TerminalSession {
    fn draw(&mut self, position: Position, glyph: char, style: Style) -> Result<()> {
        self.set_style(style)?;
        queue!(
            self.out,
            MoveTo(position.column(), position.row()),
            Print(glyph)
        )
        .context("draw glyph")?;
        self.reset_style()
    }

    fn draw_text(&mut self, row: u16, column: u16, text: &str, style: Style) -> Result<()> {
        self.set_style(style)?;
        queue!(self.out, MoveTo(column, row), Print(text)).context("draw text")?;
        self.reset_style()
    }

    fn clear(&mut self, position: Position) -> Result<()> {
        queue!(
            self.out,
            MoveTo(position.column(), position.row()),
            Print(BLANK_GLYPH)
        )
        .context("clear cell")?;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All)).context("clear screen")?;
        Ok(())
    }

    fn size(&self) -> Result<Viewport> {
        let (columns, rows) = terminal::size().context("query terminal size")?;
        Ok(Viewport::new(rows, columns))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush terminal output")?;
        Ok(())
    }
}

impl InputSource for TerminalSession {
    fn next_key(&mut self) -> Result<Key> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(key);
        }
        loop {
            match event::read().context("read terminal event")? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    return Ok(translate(key_event));
                }
                _ => {}
            }
        }
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining).context("poll terminal event")? {
                return Ok(None);
            }
            match event::read().context("read terminal event")? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    let key = translate(key_event);
                    if key == Key::Interrupt {
                        return Ok(Some(Key::Interrupt));
                    }
                    // Type-ahead entered during an animation is kept for the
                    // next blocking read instead of being dropped.
                    self.pending.push_back(key);
                }
                _ => {}
            }
        }
    }
}

impl Audio for TerminalSession {
    fn tone(&mut self, frequency: u32) -> Result<()> {
        // Terminals expose no frequency control; the bell is the closest
        // audible effect available without a sound device.
        log::debug!("tone {frequency} Hz");
        queue!(self.out, Print('\u{7}')).context("ring terminal bell")?;
        self.out.flush().context("flush terminal bell")?;
        Ok(())
    }

    fn tone_off(&mut self) -> Result<()> {
        Ok(())
    }
}

fn translate(key_event: KeyEvent) -> Key {
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Key::Interrupt;
    }
    match key_event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::End => Key::End,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(character) => Key::Char(character),
        _ => Key::Other,
    }
}
