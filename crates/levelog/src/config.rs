//! crates/levelog/src/config.rs
//! Declarative logger description, lowered into the override sequence.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use levelog_sink::{Destination, Flags, ParseFlagsError};

use crate::level::Level;
use crate::logger::Logger;
use crate::options::{LevelConfig, Override};

/// A named output sink.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DestinationSpec {
    /// Process standard output.
    Stdout,
    /// Process standard error.
    Stderr,
    /// Drop everything.
    Discard,
    /// Append to a file, creating it when missing.
    File(PathBuf),
}

/// Per-level section of a [`LoggingConfig`]. Empty fields stay unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LevelSpec {
    /// Line prefix.
    pub prefix: String,
    /// Flag expression such as `"date|time|shortfile"`.
    pub flags: Option<String>,
    /// Destinations, in order.
    pub destinations: Vec<DestinationSpec>,
}

/// A complete logger description.
///
/// ```
/// use levelog::config::{DestinationSpec, LevelSpec, LoggingConfig};
/// use levelog::Level;
///
/// let mut config = LoggingConfig::new(Level::Warning);
/// config.default_flags = Some("std".to_owned());
/// config.levels.insert(
///     Level::Critical,
///     LevelSpec {
///         prefix: "[FATAL]".to_owned(),
///         destinations: vec![DestinationSpec::Discard],
///         ..LevelSpec::default()
///     },
/// );
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.pipeline(Level::Critical).prefix(), "[FATAL]");
/// assert!(!logger.enabled(Level::Info));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LoggingConfig {
    /// Levels below this one are suppressed unless they name destinations.
    pub min_level: Level,
    /// Replacement for the default flags.
    pub default_flags: Option<String>,
    /// Replacement for the error-class default destinations.
    pub default_error_destinations: Option<Vec<DestinationSpec>>,
    /// Replacement for the non-error default destinations.
    pub default_non_error_destinations: Option<Vec<DestinationSpec>>,
    /// Per-level sections.
    pub levels: BTreeMap<Level, LevelSpec>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

/// Errors raised while turning a [`LoggingConfig`] into a logger.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A flag expression named an unknown flag.
    #[error("invalid flags for {scope}: {source}")]
    Flags {
        /// Which section held the expression.
        scope: String,
        /// Parse failure.
        #[source]
        source: ParseFlagsError,
    },
    /// A file destination could not be opened.
    #[error("cannot open log destination {}: {source}", .path.display())]
    Open {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("cannot read logging config {}: {source}", .path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration text was not valid JSON for this schema.
    #[cfg(feature = "serde")]
    #[error("malformed logging config: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggingConfig {
    /// A configuration with no overrides.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        Self {
            min_level,
            default_flags: None,
            default_error_destinations: None,
            default_non_error_destinations: None,
            levels: BTreeMap::new(),
        }
    }

    /// Parses a JSON document.
    #[cfg(feature = "serde")]
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON file.
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Lowers the description into overrides, opening file destinations.
    ///
    /// A file named more than once is opened once and shared, so every level
    /// writing to it contends on the same lock.
    pub fn overrides(&self) -> Result<Vec<Override>, ConfigError> {
        let mut files = FileCache::default();
        let mut overrides = Vec::new();

        if let Some(flags) = &self.default_flags {
            overrides.push(Override::default_flags(parse_flags("defaults", flags)?));
        }
        if let Some(specs) = &self.default_error_destinations {
            overrides.push(Override::default_error_destinations(files.open_all(specs)?));
        }
        if let Some(specs) = &self.default_non_error_destinations {
            overrides.push(Override::default_non_error_destinations(
                files.open_all(specs)?,
            ));
        }

        for (level, spec) in &self.levels {
            let flags = match &spec.flags {
                Some(flags) => parse_flags(level.name(), flags)?,
                None => Flags::NONE,
            };
            let config = LevelConfig::new()
                .destinations(files.open_all(&spec.destinations)?)
                .prefix(spec.prefix.clone())
                .flags(flags);
            overrides.push(Override::level(*level, config));
        }

        Ok(overrides)
    }

    /// Builds the described logger.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        Ok(Logger::build(self.min_level, self.overrides()?))
    }
}

fn parse_flags(scope: &str, text: &str) -> Result<Flags, ConfigError> {
    text.parse::<Flags>().map_err(|source| ConfigError::Flags {
        scope: scope.to_owned(),
        source,
    })
}

#[derive(Default)]
struct FileCache {
    open: HashMap<PathBuf, Destination>,
}

impl FileCache {
    fn open_all(&mut self, specs: &[DestinationSpec]) -> Result<Vec<Destination>, ConfigError> {
        specs.iter().map(|spec| self.open(spec)).collect()
    }

    fn open(&mut self, spec: &DestinationSpec) -> Result<Destination, ConfigError> {
        match spec {
            DestinationSpec::Stdout => Ok(Destination::stdout()),
            DestinationSpec::Stderr => Ok(Destination::stderr()),
            DestinationSpec::Discard => Ok(Destination::discard()),
            DestinationSpec::File(path) => self.open_file(path),
        }
    }

    fn open_file(&mut self, path: &Path) -> Result<Destination, ConfigError> {
        if let Some(existing) = self.open.get(path) {
            return Ok(existing.clone());
        }
        let destination = Destination::append_file(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.open.insert(path.to_path_buf(), destination.clone());
        Ok(destination)
    }
}
