//! crates/levelog/src/options.rs
//! Per-level configuration records and the override deltas folded over them.

use levelog_sink::{Destination, Flags};

use crate::level::Level;

/// Settings for a single level. Every field left at its empty value is
/// filled in during resolution.
///
/// - an empty destination list falls back to the global defaults, or to no
///   destinations when the level sits below the minimum level;
/// - an empty prefix falls back to the level label;
/// - [`Flags::NONE`] falls back to the default flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelConfig {
    /// Destinations written by this level, in order.
    pub destinations: Vec<Destination>,
    /// Text placed before each line.
    pub prefix: String,
    /// Header flags.
    pub flags: Flags,
}

impl LevelConfig {
    /// An all-unset configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the destination list.
    pub fn destinations(mut self, destinations: impl IntoIterator<Item = Destination>) -> Self {
        self.destinations = destinations.into_iter().collect();
        self
    }

    /// Appends one destination.
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the header flags.
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }
}

/// The full pre-resolution state: one [`LevelConfig`] per level plus the
/// global defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    levels: [LevelConfig; 6],
    /// Fallback destinations for [`Level::Error`] and [`Level::Critical`].
    pub default_error_destinations: Vec<Destination>,
    /// Fallback destinations for levels below [`Level::Error`].
    pub default_non_error_destinations: Vec<Destination>,
    /// Fallback header flags.
    pub default_flags: Flags,
}

impl Default for Settings {
    /// Empty per-level records, stderr for error-class levels, stdout for the
    /// rest, and [`Flags::DEFAULT`].
    fn default() -> Self {
        Self {
            levels: Default::default(),
            default_error_destinations: vec![Destination::stderr()],
            default_non_error_destinations: vec![Destination::stdout()],
            default_flags: Flags::DEFAULT,
        }
    }
}

impl Settings {
    /// The configuration record for `level`.
    #[must_use]
    pub fn level(&self, level: Level) -> &LevelConfig {
        &self.levels[level.index()]
    }

    /// Applies one override, consuming and returning the settings.
    #[must_use]
    pub fn apply(mut self, delta: Override) -> Self {
        match delta {
            Override::Level { level, config } => self.levels[level.index()] = config,
            Override::DefaultErrorDestinations(destinations) => {
                self.default_error_destinations = destinations;
            }
            Override::DefaultNonErrorDestinations(destinations) => {
                self.default_non_error_destinations = destinations;
            }
            Override::DefaultFlags(flags) => self.default_flags = flags,
        }
        self
    }

    /// Folds `overrides` over the baseline settings, in order.
    pub fn from_overrides(overrides: impl IntoIterator<Item = Override>) -> Self {
        overrides.into_iter().fold(Self::default(), Self::apply)
    }
}

/// A single configuration change applied while building a logger.
///
/// Overrides replace rather than merge: a level override swaps in a whole
/// [`LevelConfig`], and a default override swaps in a whole value. When
/// several overrides target the same slot, the last one applied wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Override {
    /// Replace one level's configuration.
    Level {
        /// Target level.
        level: Level,
        /// Replacement record.
        config: LevelConfig,
    },
    /// Replace the error-class default destinations.
    DefaultErrorDestinations(Vec<Destination>),
    /// Replace the non-error default destinations.
    DefaultNonErrorDestinations(Vec<Destination>),
    /// Replace the default flags.
    DefaultFlags(Flags),
}

impl Override {
    /// Sets the configuration of `level`.
    #[must_use]
    pub fn level(level: Level, config: LevelConfig) -> Self {
        Self::Level { level, config }
    }

    /// Sets the [`Level::Critical`] configuration.
    #[must_use]
    pub fn critical(config: LevelConfig) -> Self {
        Self::level(Level::Critical, config)
    }

    /// Sets the [`Level::Error`] configuration.
    #[must_use]
    pub fn error(config: LevelConfig) -> Self {
        Self::level(Level::Error, config)
    }

    /// Sets the [`Level::Warning`] configuration.
    #[must_use]
    pub fn warning(config: LevelConfig) -> Self {
        Self::level(Level::Warning, config)
    }

    /// Sets the [`Level::Notice`] configuration.
    #[must_use]
    pub fn notice(config: LevelConfig) -> Self {
        Self::level(Level::Notice, config)
    }

    /// Sets the [`Level::Info`] configuration.
    #[must_use]
    pub fn info(config: LevelConfig) -> Self {
        Self::level(Level::Info, config)
    }

    /// Sets the [`Level::Debug`] configuration.
    #[must_use]
    pub fn debug(config: LevelConfig) -> Self {
        Self::level(Level::Debug, config)
    }

    /// Sets the destinations used by error-class levels without their own.
    #[must_use]
    pub fn default_error_destinations(destinations: impl IntoIterator<Item = Destination>) -> Self {
        Self::DefaultErrorDestinations(destinations.into_iter().collect())
    }

    /// Sets the destinations used by the remaining levels without their own.
    #[must_use]
    pub fn default_non_error_destinations(
        destinations: impl IntoIterator<Item = Destination>,
    ) -> Self {
        Self::DefaultNonErrorDestinations(destinations.into_iter().collect())
    }

    /// Sets the flags used by levels without their own.
    #[must_use]
    pub const fn default_flags(flags: Flags) -> Self {
        Self::DefaultFlags(flags)
    }
}
