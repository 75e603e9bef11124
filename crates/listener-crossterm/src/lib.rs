//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`listener_core::Driver`]: it owns raw
//! mode and the alternate screen, turns terminal events into [`Msg`]s, and
//! redraws every frame in full.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, ClearType, EndSynchronizedUpdate},
};

use listener_core::{
    AttrMask, Color, Frame, Style, Viewport,
    app::{Context, Driver},
    messages::{Key, Msg},
};

/// Poll interval used when ticks are disabled, so cancellation is noticed.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::DarkGray => CtColor::DarkGrey,
        Color::Gray => CtColor::Grey,
        Color::White => CtColor::White,
        Color::Red => CtColor::Red,
        Color::Green => CtColor::Green,
        Color::Yellow => CtColor::Yellow,
        Color::Blue => CtColor::Blue,
        Color::Magenta => CtColor::Magenta,
        Color::Cyan => CtColor::Cyan,
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
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

/// Translate one terminal event. Only key presses count; repeats and
/// releases are dropped.
fn translate(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                Some(Msg::Quit)
            } else {
                to_key(code).map(Msg::key)
            }
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            cols: usize::from(w),
            rows: usize::from(h),
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
#[derive(Debug)]
pub struct CrosstermDriver {
    tick: Option<Duration>,
}

impl CrosstermDriver {
    /// A driver that sends [`Msg::Tick`] every `tick` without input.
    pub fn new(tick: Option<Duration>) -> Self {
        Self { tick }
    }

    fn queue_style(out: &mut impl Write, style: Style) -> io::Result<()> {
        queue!(out, SetAttribute(Attribute::Reset), SetForegroundColor(to_ct_color(style.fg)))?;
        let attrs = style.attrs;
        if attrs.contains(AttrMask::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.contains(AttrMask::DIM) {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new(Some(Duration::from_millis(150)))
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::info!("terminal initialized, tick {:?}", self.tick);
        Ok(())
    }

    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>) -> Result<(), Box<dyn std::error::Error>> {
        let wait = self.tick.unwrap_or(IDLE_POLL);
        if !event::poll(wait)? {
            if self.tick.is_some() {
                tx.send(Msg::Tick).ok();
            }
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = translate(event::read()?) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn viewport(&mut self) -> Result<Viewport, Box<dyn std::error::Error>> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(usize::from(cols), usize::from(rows)))
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let (cols, rows) = terminal::size()?;
        let (cols, rows) = (usize::from(cols), usize::from(rows));
        let mut out = io::stdout().lock();

        queue!(out, BeginSynchronizedUpdate, terminal::Clear(ClearType::All))?;
        for (y, row) in frame.rows().iter().take(rows).enumerate() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            let mut current: Option<Style> = None;
            let mut text = String::new();
            for g in row.glyphs().iter().take(cols) {
                if current != Some(g.style) {
                    if !text.is_empty() {
                        queue!(out, Print(&text))?;
                        text.clear();
                    }
                    Self::queue_style(&mut out, g.style)?;
                    current = Some(g.style);
                }
                g.push_to(&mut text);
            }
            if !text.is_empty() {
                queue!(out, Print(&text))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;
        Ok(())
    }

    fn bell(&mut self, count: u8) -> Result<(), Box<dyn std::error::Error>> {
        let mut out = io::stdout();
        for _ in 0..count {
            out.write_all(b"\x07")?;
        }
        out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::info!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn presses_become_key_messages() {
        let ev = key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Press);
        assert!(matches!(translate(ev), Some(Msg::KeyDown { key: Key::Char('w'), .. })));
        let ev = key(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Press);
        assert!(matches!(translate(ev), Some(Msg::KeyDown { key: Key::ArrowUp, .. })));
    }

    #[test]
    fn releases_and_unmapped_keys_are_dropped() {
        let ev = key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release);
        assert!(translate(ev).is_none());
        let ev = key(KeyCode::F(5), KeyModifiers::NONE, KeyEventKind::Press);
        assert!(translate(ev).is_none());
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert!(matches!(translate(ev), Some(Msg::Quit)));
    }

    #[test]
    fn resize_reports_screen() {
        assert!(matches!(
            translate(Event::Resize(100, 30)),
            Some(Msg::Screen { cols: 100, rows: 30 })
        ));
    }

    #[test]
    fn colors_map_to_named_palette() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(to_ct_color(Color::DarkGray), CtColor::DarkGrey);
        assert_eq!(to_ct_color(Color::Magenta), CtColor::Magenta);
    }
}
