//! Elm-architecture [`Model`] for the game.

use listener_core::{
    AttrMask, Effect, ExplorationInput, Frame, InputError, Mode, Model, Row, Style, Viewport,
    messages::{Key, Msg},
};
use listener_render::{RenderConfig, Renderer};

use crate::screens::{self, MIN_SCREEN_COLS};
use crate::session::{Reaction, Session};

/// Full-screen overlays drawn instead of the current mode's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Help,
    Map,
}

/// The Listener game model.
pub struct ListenerModel {
    session: Session,
    renderer: Renderer,
    overlay: Option<Overlay>,
}

impl ListenerModel {
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self {
            session,
            renderer,
            overlay: None,
        }
    }

    /// A model with a renderer seeded from `seed`, or randomly.
    pub fn with_seed(session: Session, config: RenderConfig, seed: Option<u64>) -> Self {
        let renderer = match seed {
            Some(seed) => Renderer::seeded(config, seed),
            None => Renderer::new(config),
        };
        Self::new(session, renderer)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

/// Map an exploration key to a command.
fn exploration_input(key: &Key) -> Result<ExplorationInput, InputError> {
    match key {
        Key::ArrowUp => Ok(ExplorationInput::Forward),
        Key::ArrowDown => Ok(ExplorationInput::Backward),
        Key::ArrowLeft => Ok(ExplorationInput::TurnLeft),
        Key::ArrowRight => Ok(ExplorationInput::TurnRight),
        Key::Escape => Ok(ExplorationInput::ExitToTerminal),
        Key::Char(c) => ExplorationInput::parse(&c.to_string()),
        other => Err(InputError::Unrecognized(format!("{other:?}"))),
    }
}

impl Model for ListenerModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!("model init, mode {}", self.session.mode().name());
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Tick | Msg::Screen { .. } => None,
            Msg::KeyDown { key, .. } => {
                if self.overlay.take().is_some() {
                    return None;
                }
                self.session.log_mut().mark_seen();
                match self.session.mode() {
                    Mode::Terminal => self.terminal_key(&key),
                    Mode::Exploration => self.exploration_key(&key),
                }
            }
        }
    }

    fn draw(&mut self, viewport: Viewport) -> Frame {
        match (self.overlay, self.session.mode()) {
            (Some(Overlay::Help), _) => screens::help_screen(viewport),
            (Some(Overlay::Map), _) => screens::map_screen(&self.session, viewport),
            (None, Mode::Terminal) => screens::terminal_screen(&self.session, viewport),
            (None, Mode::Exploration) => self.draw_exploration(viewport),
        }
    }
}

impl ListenerModel {
    fn terminal_key(&mut self, key: &Key) -> Option<Effect> {
        match key {
            Key::Char('e' | 'E') | Key::Enter => {
                self.session.explore();
                None
            }
            Key::Char('h' | 'H' | '?') => {
                self.overlay = Some(Overlay::Help);
                None
            }
            Key::Char('m' | 'M') => {
                self.overlay = Some(Overlay::Map);
                None
            }
            Key::Char('q' | 'Q') | Key::Escape => Some(Effect::End),
            _ => None,
        }
    }

    fn exploration_key(&mut self, key: &Key) -> Option<Effect> {
        let reaction = match exploration_input(key) {
            Ok(cmd) => self.session.apply(cmd),
            Err(err) => self.session.reject(&err),
        };
        match reaction {
            Reaction::ShowHelp => self.overlay = Some(Overlay::Help),
            Reaction::ShowMap => self.overlay = Some(Overlay::Map),
            Reaction::Moved { bell: true } => return Some(Effect::Bell(1)),
            _ => {}
        }
        None
    }

    /// The first-person frame plus one message line.
    fn draw_exploration(&mut self, viewport: Viewport) -> Frame {
        let scene = self.session.scene();
        let mut frame = self.renderer.render(&scene, viewport.shrink_rows(1));
        let cols = frame.width().max(MIN_SCREEN_COLS);
        let row = match self.session.log().fresh() {
            Some(entry) => Row::text(
                cols,
                &entry.display(),
                Style::fg(entry.style.color()).with_attrs(AttrMask::BOLD),
            ),
            None => Row::new(cols),
        };
        frame.push(row);
        frame
    }
}
