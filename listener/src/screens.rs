//! Full-screen frames other than the first-person view.

use listener_core::{AttrMask, Color, Frame, Glyph, Mode, Point, Row, Style, TileKind, Viewport};
use listener_render::palette::{gauge_color, tile_color};

use crate::msglog::LogEntry;
use crate::session::Session;

/// Narrowest frame any screen is laid out for.
pub const MIN_SCREEN_COLS: usize = 40;

/// Log lines shown on the terminal screen.
const TERMINAL_LOG_LINES: usize = 6;

pub const HELP_TEXT: &str = "\
EXPLORATION CONTROLS

  W / Up       step forward
  S / Down     step backward
  A / Left     turn left
  D / Right    turn right
  M            station map
  H / ?        this help
  Q / Esc      return to the terminal (only while standing on it)

Every step costs oxygen. The station is quieter when you are calm.

Press any key to return.";

fn screen_cols(viewport: Viewport) -> usize {
    viewport.cols.max(MIN_SCREEN_COLS)
}

fn header(frame: &mut Frame, title: &str) {
    let cols = frame.width();
    let style = Style::fg(Color::Cyan);
    let inner = cols.saturating_sub(2);

    let mut top = Row::new(cols);
    top.set(0, Glyph::colored('╔', Color::Cyan));
    top.fill(1..cols - 1, Glyph::colored('═', Color::Cyan));
    top.set(cols - 1, Glyph::colored('╗', Color::Cyan));
    frame.push(top);

    let mut mid = Row::new(cols);
    mid.set(0, Glyph::colored('║', Color::Cyan));
    let x = 1 + inner.saturating_sub(title.chars().count()) / 2;
    mid.put_str(x, title, style.with_attrs(AttrMask::BOLD));
    mid.set(cols - 1, Glyph::colored('║', Color::Cyan));
    frame.push(mid);

    let mut bottom = Row::new(cols);
    bottom.set(0, Glyph::colored('╚', Color::Cyan));
    bottom.fill(1..cols - 1, Glyph::colored('═', Color::Cyan));
    bottom.set(cols - 1, Glyph::colored('╝', Color::Cyan));
    frame.push(bottom);
}

fn log_row(cols: usize, entry: &LogEntry) -> Row {
    Row::text(cols, &entry.display(), Style::fg(entry.style.color()))
}

/// `Sanity: 80% | Oxygen: 97% | Mode: TERMINAL`.
fn gauges_row(cols: usize, session: &Session) -> Row {
    let sanity = session.sanity();
    let oxygen = session.oxygen();
    let mode = session.mode().name().to_ascii_uppercase();
    let sep = Style::fg(Color::DarkGray);
    let parts = [
        ("Sanity: ".to_string(), Style::fg(Color::Blue)),
        (sanity.to_string(), Style::fg(gauge_color(sanity.value()))),
        (" | ".to_string(), sep),
        ("Oxygen: ".to_string(), Style::fg(Color::Blue)),
        (oxygen.to_string(), Style::fg(gauge_color(oxygen.value()))),
        (" | ".to_string(), sep),
        ("Mode: ".to_string(), Style::fg(Color::Blue)),
        (mode, Style::fg(Color::Yellow)),
    ];
    let mut row = Row::new(cols);
    let mut x = 0;
    for (text, style) in &parts {
        row.put_str(x, text, *style);
        x += text.chars().count();
    }
    row
}

/// The terminal screen shown in [`Mode::Terminal`].
pub fn terminal_screen(session: &Session, viewport: Viewport) -> Frame {
    let cols = screen_cols(viewport);
    let mut f = Frame::new(cols);
    header(&mut f, "THE LISTENER :: DEEP SPACE RELAY");
    f.push_blank();
    f.push(gauges_row(cols, session));
    f.push_blank();
    f.push_text(
        "TERMINAL READY",
        Style::fg(Color::Green).with_attrs(AttrMask::BOLD),
    );
    f.push_blank();
    f.push_text("[E] Explore the station   [H] Help   [Q] Quit", Style::fg(Color::Gray));
    f.push_blank();
    for entry in session.log().recent(TERMINAL_LOG_LINES) {
        f.push(log_row(cols, entry));
    }
    f
}

pub fn help_screen(viewport: Viewport) -> Frame {
    let cols = screen_cols(viewport);
    let mut f = Frame::new(cols);
    header(&mut f, "HELP");
    f.push_blank();
    for line in HELP_TEXT.lines() {
        f.push_text(line, Style::fg(Color::White));
    }
    f
}

/// Top-down station map with the observer drawn as a facing arrow.
pub fn map_screen(session: &Session, viewport: Viewport) -> Frame {
    let cols = screen_cols(viewport);
    let mut f = Frame::new(cols);
    header(&mut f, "STATION MAP");
    f.push_blank();

    let map = session.map();
    let here = session.orientation();
    let left = cols.saturating_sub(map.width() as usize) / 2;
    for y in 0..map.height() {
        let mut row = Row::new(cols);
        for x in 0..map.width() {
            let p = Point::new(x, y);
            let g = if p == here.pos() {
                Glyph::new(here.facing().arrow())
                    .with_style(Style::fg(Color::Yellow).with_attrs(AttrMask::BOLD))
            } else {
                let tile = map.tile_at(p);
                let fg = match tile {
                    TileKind::Wall => Color::DarkGray,
                    TileKind::Floor => Color::Gray,
                    other => tile_color(other),
                };
                Glyph::colored(tile.rune(), fg)
            };
            row.set(left + x as usize, g);
        }
        f.push(row);
    }

    f.push_blank();
    f.push_text(
        "T terminal  G generator  S storage  D door  # wall",
        Style::fg(Color::Gray),
    );
    let status = format!(
        "You: {} facing {}{}",
        here.pos(),
        here.facing().name(),
        if session.mode() == Mode::Exploration {
            ""
        } else {
            " (at terminal)"
        }
    );
    f.push_text(&status, Style::fg(Color::Cyan));
    f.push_text("Press any key to return.", Style::fg(Color::DarkGray));
    f
}
