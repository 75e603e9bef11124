//! The game session: sole owner of every piece of mutable game state.
//!
//! [`Session`] holds the station map, the observer, the mode machine, the
//! sanity and oxygen gauges, the message log and the session's random
//! source. The renderer only ever sees a borrowed [`SceneView`].

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use listener_core::orientation::ambient_sound_chance;
use listener_core::{
    Direction, ExplorationInput, GridMap, InputError, Mode, ModeMachine, MoveOutcome, Orientation,
    Oxygen, Point, Sanity, SpawnError, TileKind,
};
use listener_render::SceneView;

use crate::msglog::{LogStyle, MessageLog};

/// Where a new session starts.
pub const SPAWN: Point = Point::new(2, 2);
pub const SPAWN_FACING: Direction = Direction::North;

/// Chance that an ambient sound also rings the terminal bell.
pub const SOUND_BELL_CHANCE: f64 = 0.5;

/// Sounds the station makes while the player walks at low sanity.
pub const SOUND_LOGS: [&str; 8] = [
    "[LOG]: A faint scratching sound is heard from inside the walls.",
    "[LOG]: The low hum of life support seems to form words before returning to normal.",
    "[LOG]: Three distinct, slow knocks echo from the exterior hull.",
    "[LOG]: A sound like breathing comes through the ventilation system.",
    "[LOG]: The lights flicker. Did something move in the corner?",
    "[LOG]: A voice whispers your name. The station AI reports no anomalies.",
    "[LOG]: The generator's rhythm changes. It sounds almost... deliberate.",
    "[LOG]: Metal groans throughout the station. No structural damage detected.",
];

/// Starting values for a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub sanity: Sanity,
    pub oxygen: Oxygen,
    /// `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sanity: Sanity::MAX,
            oxygen: Oxygen::MAX,
            seed: None,
        }
    }
}

/// What an applied exploration input did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Stepped onto a new tile. `bell` is set when an ambient sound asked
    /// for the terminal bell.
    Moved { bell: bool },
    Blocked,
    Turned,
    ShowMap,
    ShowHelp,
    /// Back at the terminal.
    Exited,
    /// Not standing on a terminal; still exploring.
    ExitRejected,
    /// Input outside exploration mode, or not a command.
    Ignored,
}

pub struct Session {
    map: GridMap,
    orientation: Orientation,
    modes: ModeMachine,
    sanity: Sanity,
    oxygen: Oxygen,
    log: MessageLog,
    rng: StdRng,
}

impl Session {
    /// A session on the default station, at the terminal.
    pub fn new(config: SessionConfig) -> Result<Self, SpawnError> {
        Self::with_map(GridMap::station(), SPAWN, SPAWN_FACING, config)
    }

    pub fn with_map(
        map: GridMap,
        spawn: Point,
        facing: Direction,
        config: SessionConfig,
    ) -> Result<Self, SpawnError> {
        let orientation = Orientation::spawn(&map, spawn, facing)?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random::<u64>());
        log::info!(
            "session start at {spawn} facing {facing}, sanity {}, oxygen {}, seed {seed}",
            config.sanity,
            config.oxygen
        );
        let mut log = MessageLog::new();
        log.push("TERMINAL READY. Listening on all frequencies.", LogStyle::System);
        log.mark_seen();
        Ok(Self {
            map,
            orientation,
            modes: ModeMachine::default(),
            sanity: config.sanity,
            oxygen: config.oxygen,
            log,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn sanity(&self) -> Sanity {
        self.sanity
    }

    pub fn oxygen(&self) -> Oxygen {
        self.oxygen
    }

    /// Sanity is owned by the wider game; this is its write access.
    pub fn set_sanity(&mut self, sanity: Sanity) {
        self.sanity = sanity;
    }

    pub fn set_oxygen(&mut self, oxygen: Oxygen) {
        self.oxygen = oxygen;
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    /// The tile under the observer.
    pub fn current_tile(&self) -> TileKind {
        self.map.tile_at(self.orientation.pos())
    }

    /// Borrowed view for the renderer.
    pub fn scene(&self) -> SceneView<'_> {
        SceneView::new(&self.map, &self.orientation, self.sanity).with_oxygen(self.oxygen)
    }

    /// Leave the terminal and start walking.
    pub fn explore(&mut self) {
        if self.modes.mode() == Mode::Exploration {
            return;
        }
        self.modes.enter_exploration();
        self.log.push(
            "Entering EXPLORATION MODE. The corridors are dark.",
            LogStyle::System,
        );
    }

    /// Parse and apply a typed exploration command.
    pub fn apply_text(&mut self, input: &str) -> Reaction {
        match ExplorationInput::parse(input) {
            Ok(cmd) => self.apply(cmd),
            Err(err) => self.reject(&err),
        }
    }

    /// Record invalid input. Nothing else changes.
    pub fn reject(&mut self, err: &InputError) -> Reaction {
        log::debug!("rejected input: {err:?}");
        self.log.push(&err.to_string(), LogStyle::Error);
        Reaction::Ignored
    }

    pub fn apply(&mut self, input: ExplorationInput) -> Reaction {
        if self.modes.mode() != Mode::Exploration {
            return Reaction::Ignored;
        }
        match input {
            ExplorationInput::Forward => self.step(true),
            ExplorationInput::Backward => self.step(false),
            ExplorationInput::TurnLeft => {
                self.orientation.turn(false);
                Reaction::Turned
            }
            ExplorationInput::TurnRight => {
                self.orientation.turn(true);
                Reaction::Turned
            }
            ExplorationInput::ShowMap => Reaction::ShowMap,
            ExplorationInput::Help => Reaction::ShowHelp,
            ExplorationInput::ExitToTerminal => match self.modes.exit_to_terminal(self.current_tile()) {
                Ok(_) => {
                    self.log.push("Back at the TERMINAL.", LogStyle::System);
                    Reaction::Exited
                }
                Err(err) => {
                    self.log.push(&err.to_string(), LogStyle::Error);
                    Reaction::ExitRejected
                }
            },
        }
    }

    fn step(&mut self, forward: bool) -> Reaction {
        let outcome = self.orientation.step(&self.map, forward);
        match outcome {
            MoveOutcome::Moved { oxygen_cost, .. } => {
                self.oxygen = self.oxygen.saturating_sub(oxygen_cost);
                let bell = self.ambient_sound();
                Reaction::Moved { bell }
            }
            MoveOutcome::Blocked { .. } => {
                if let Some(msg) = outcome.message() {
                    self.log.push(msg, LogStyle::Error);
                }
                Reaction::Blocked
            }
        }
    }

    /// Roll the ambient-sound hook after a committed step. Returns whether
    /// the bell should ring.
    fn ambient_sound(&mut self) -> bool {
        let chance = ambient_sound_chance(self.sanity);
        if chance <= 0.0 || self.rng.random::<f64>() >= chance {
            return false;
        }
        let line = SOUND_LOGS[self.rng.random_range(0..SOUND_LOGS.len())];
        log::debug!("ambient sound at sanity {}", self.sanity);
        self.log.push(line, LogStyle::Sound);
        self.rng.random::<f64>() < SOUND_BELL_CHANCE
    }
}
