//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`Driver`] on the alternate screen in raw
//! mode, with optional mouse capture.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};

use gridsearch_core::Point;

use crate::app::Driver;
use crate::canvas::Frame;
use crate::messages::{Key, ModMask, MouseAction, Msg};
use crate::style::{AttrMask, Color, Style};

fn to_ct_color(c: Color) -> CtColor {
    match c.rgb() {
        Some((r, g, b)) => CtColor::Rgb { r, g, b },
        None => CtColor::Reset,
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn to_mouse(me: MouseEvent) -> Option<Msg> {
    let action = match me.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
        MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::ScrollUp => MouseAction::WheelUp,
        MouseEventKind::ScrollDown => MouseAction::WheelDown,
        _ => return None,
    };
    Some(Msg::Mouse {
        action,
        pos: Point::new(me.row as i32, me.column as i32),
    })
}

/// Translate a terminal event. Key releases and repeats are dropped, so one
/// physical press is one [`Msg::KeyDown`] on every platform.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
            })
        }
        Event::Mouse(me) => to_mouse(me),
        Event::Resize(cols, rows) => Some(Msg::Screen {
            rows: rows as i32,
            cols: cols as i32,
        }),
        _ => None,
    }
}

fn queue_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_ct_color(style.fg)),
        SetBackgroundColor(to_ct_color(style.bg))
    )?;
    let attrs = style.attrs;
    if attrs.contains(AttrMask::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(AttrMask::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(AttrMask::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if attrs.contains(AttrMask::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// A terminal back-end using crossterm.
#[derive(Debug)]
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        log::debug!("terminal initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                let mut stdout = io::stdout();
                execute!(stdout, terminal::Clear(ClearType::All))?;
            }
            if let Some(msg) = to_msg(ev) {
                tx.send(msg)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();
        let mut current: Option<Style> = None;
        for fc in &frame.cells {
            queue!(stdout, cursor::MoveTo(fc.pos.col as u16, fc.pos.row as u16))?;
            if current != Some(fc.glyph.style) {
                queue_style(&mut stdout, fc.glyph.style)?;
                current = Some(fc.glyph.style);
            }
            queue!(stdout, Print(fc.glyph.ch))?;
        }
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            if let Err(e) = execute!(stdout, event::DisableMouseCapture) {
                log::warn!("could not disable mouse capture: {e}");
            }
        }
        if let Err(e) = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen) {
            log::warn!("could not leave the alternate screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("could not disable raw mode: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn keys_are_translated() {
        assert_eq!(
            to_msg(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Msg::key(Key::Char('n')))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Quit)
        );
        assert_eq!(to_msg(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_dropped() {
        let ev = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_msg(ev), None);
    }

    #[test]
    fn mouse_uses_row_col() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(to_msg(ev), Some(Msg::click(4, 12)));
        assert_eq!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen { rows: 24, cols: 80 })
        );
    }

    #[test]
    fn colors_map_to_crossterm() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
