//! Session state for the REPL and the CLI.
//!
//! A session owns one game and the tracer that records it.

use delve_debug::{ObservabilityConfig, Tracer};
use delve_dungeon::{ContentTables, GeneratorConfig};
use delve_engine::{ActionSource, GameState, RoundReport};
use delve_foundation::{Error, Result, seeded};
use log::info;

use crate::autopilot::AutoPilot;
use crate::content;
use crate::serialize;

// =============================================================================
// Session Configuration
// =============================================================================

/// How to start a game.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seed for the game's random source.
    pub seed: u64,
    /// Class ids, in turn order.
    pub classes: Vec<String>,
    /// Two heroes instead of one.
    pub coop: bool,
    /// First floor generation settings.
    pub generator: GeneratorConfig,
    /// Tracing settings.
    pub observability: ObservabilityConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            classes: vec![content::CLASSES[0].to_string()],
            coop: false,
            generator: GeneratorConfig::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to replace the class list.
    #[must_use]
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to enable cooperative play.
    #[must_use]
    pub fn coop(mut self) -> Self {
        self.coop = true;
        self
    }

    /// Builder method to set generation settings.
    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Builder method to set tracing settings.
    #[must_use]
    pub fn with_observability(mut self, observability: ObservabilityConfig) -> Self {
        self.observability = observability;
        self
    }

    /// The class of each hero, in turn order.
    ///
    /// Solo play uses the first class. Cooperative play uses the first two,
    /// repeating the first when only one is given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no class is given.
    pub fn actor_classes(&self) -> Result<Vec<&str>> {
        let first = self
            .classes
            .first()
            .ok_or_else(|| Error::invalid_config("classes", "at least one class is required"))?;
        if !self.coop {
            return Ok(vec![first.as_str()]);
        }
        let second = self.classes.get(1).unwrap_or(first);
        Ok(vec![first.as_str(), second.as_str()])
    }
}

// =============================================================================
// Session
// =============================================================================

/// A running game with its trace.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    tracer: Tracer,
    seed: u64,
}

impl Session {
    /// Starts a game with the built-in content.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or names an unknown
    /// class.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_tables(config, content::builtin())
    }

    /// Starts a game with the given content.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or names a class the
    /// tables do not have.
    pub fn with_tables(config: SessionConfig, tables: ContentTables) -> Result<Self> {
        let classes = config.actor_classes()?;
        let state = GameState::new(
            config.generator.clone(),
            tables,
            &classes,
            seeded(config.seed),
        )?;
        info!(
            "session started: seed {}, classes {}",
            config.seed,
            classes.join(", ")
        );
        Ok(Self {
            state,
            tracer: config.observability.tracer(),
            seed: config.seed,
        })
    }

    /// The game.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the game.
    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The tracer.
    #[must_use]
    pub const fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Mutable access to the tracer.
    pub const fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// The seed the game started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Plays one round with one source per hero and traces it.
    pub fn play_round(&mut self, sources: &mut [&mut dyn ActionSource]) -> RoundReport {
        let report = self.state.play_round(sources);
        self.tracer.record_round(&report);
        report
    }

    /// Plays one round with a single source for every hero and traces it.
    pub fn play_round_with(&mut self, source: &mut dyn ActionSource) -> RoundReport {
        let report = self.state.play_round_with(source);
        self.tracer.record_round(&report);
        report
    }

    /// Lets the autopilot play up to `rounds` rounds, stopping early once
    /// every hero is dead.
    pub fn run_auto(&mut self, rounds: u64) -> Vec<RoundReport> {
        let mut pilot = AutoPilot::new(self.seed ^ 0x9e37_79b9_7f4a_7c15);
        let mut reports = Vec::new();
        for _ in 0..rounds {
            if self.state.is_over() {
                info!("all heroes are dead after round {}", self.state.round());
                break;
            }
            reports.push(self.play_round_with(&mut pilot));
        }
        reports
    }

    /// Fingerprint of the current floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the level cannot be encoded.
    pub fn fingerprint(&self) -> Result<u64> {
        serialize::level_fingerprint(self.state.level())
    }
}
