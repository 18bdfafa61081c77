//! Crossterm terminal driver.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::canvas::{Color, Frame};
use crate::driver::{Context, Driver};
use crate::messages::{Key, Msg, MouseAction};

/// Maps a canvas [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    match c.rgb() {
        Some((r, g, b)) => CtColor::Rgb { r, g, b },
        None => CtColor::Reset,
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn to_action(button: MouseButton) -> Option<MouseAction> {
    match button {
        MouseButton::Left => Some(MouseAction::Main),
        MouseButton::Right => Some(MouseAction::Secondary),
        MouseButton::Middle => None,
    }
}

/// Translate one crossterm event. Drags report the held button so that
/// painting across cells behaves like repeated presses.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            to_key(code).map(Msg::key)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                MouseEventKind::Down(b) | MouseEventKind::Drag(b) => to_action(b)?,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::mouse(action, column as i32, row as i32))
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm, with mouse capture.
#[derive(Debug, Default)]
pub struct CrosstermDriver;

impl CrosstermDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();

        for fc in &frame.cells {
            queue!(
                stdout,
                cursor::MoveTo(fc.pos.col as u16, fc.pos.row as u16),
                SetForegroundColor(to_ct_color(fc.glyph.fg)),
                SetBackgroundColor(to_ct_color(fc.glyph.bg)),
                Print(fc.glyph.ch)
            )?;
        }
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let _ = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use gridstar_core::Coord;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_messages() {
        assert_eq!(
            to_msg(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(Msg::key(Key::Char('c')))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Quit)
        );
        assert_eq!(
            to_msg(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Msg::key(Key::Escape))
        );
        assert_eq!(to_msg(press(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(to_msg(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let ev = Event::Key(KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_msg(ev), None);
    }

    #[test]
    fn drags_report_their_button() {
        assert_eq!(
            to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 3)),
            Some(Msg::Mouse {
                action: MouseAction::Main,
                pos: Coord::new(3, 7),
            })
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            Some(Msg::mouse(MouseAction::Secondary, 0, 0))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Up(MouseButton::Left), 1, 2)),
            Some(Msg::mouse(MouseAction::Release, 1, 2))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Moved, 4, 0)),
            Some(Msg::mouse(MouseAction::Move, 4, 0))
        );
        assert_eq!(to_msg(mouse(MouseEventKind::Down(MouseButton::Middle), 0, 0)), None);
        assert_eq!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn default_colour_resets() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
