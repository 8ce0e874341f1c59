//! crates/levelog/src/resolve.rs
//! Turns folded [`Settings`] into one fully specified record per level.

use levelog_sink::{Destination, Flags, Pipeline};

use crate::level::Level;
use crate::options::Settings;

/// The final destinations, prefix and flags for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLevel {
    /// Destinations the level writes to; empty means the level is suppressed.
    pub destinations: Vec<Destination>,
    /// Line prefix.
    pub prefix: String,
    /// Header flags.
    pub flags: Flags,
}

impl ResolvedLevel {
    pub(crate) fn into_pipeline(self) -> Pipeline {
        Pipeline::new(self.destinations, self.prefix, self.flags)
    }
}

/// Resolved records for all six levels, indexed by [`Level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    levels: [ResolvedLevel; 6],
}

impl Resolution {
    /// The resolved record for `level`.
    #[must_use]
    pub fn level(&self, level: Level) -> &ResolvedLevel {
        &self.levels[level.index()]
    }

    pub(crate) const fn from_levels(levels: [ResolvedLevel; 6]) -> Self {
        Self { levels }
    }

    pub(crate) fn into_pipelines(self) -> [Pipeline; 6] {
        self.levels.map(ResolvedLevel::into_pipeline)
    }
}

/// Resolves every level of `settings` against `min_level`.
///
/// Each field falls back independently. A level's own destinations always
/// win; without them, levels at or above `min_level` take the error-class or
/// non-error default set and levels below it get no destinations at all.
#[must_use]
pub fn resolve(min_level: Level, settings: &Settings) -> Resolution {
    Resolution {
        levels: Level::ALL.map(|level| resolve_level(level, min_level, settings)),
    }
}

fn resolve_level(level: Level, min_level: Level, settings: &Settings) -> ResolvedLevel {
    let config = settings.level(level);

    let flags = config.flags.or(settings.default_flags);

    let prefix = if config.prefix.is_empty() {
        level.label().to_owned()
    } else {
        config.prefix.clone()
    };

    let destinations = if !config.destinations.is_empty() {
        config.destinations.clone()
    } else if level < min_level {
        Vec::new()
    } else if level.is_error_class() {
        settings.default_error_destinations.clone()
    } else {
        settings.default_non_error_destinations.clone()
    };

    ResolvedLevel {
        destinations,
        prefix,
        flags,
    }
}
