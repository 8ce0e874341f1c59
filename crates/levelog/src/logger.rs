//! crates/levelog/src/logger.rs
//! The resolved logger and its per-level call surface.

use std::fmt::{self, Display};

use levelog_sink::{Pipeline, Source};

use crate::level::Level;
use crate::options::{Override, Settings};
use crate::resolve::{Resolution, ResolvedLevel, resolve};

/// An immutable table of six writer pipelines, one per [`Level`].
///
/// Every logging method is infallible and safe to call from any thread. The
/// plain forms concatenate their arguments without separators; the `*f`
/// forms take pre-built [`fmt::Arguments`], usually through the
/// [`info_log!`](crate::info_log) family of macros.
///
/// ```
/// use levelog::{Level, LevelConfig, Logger, Override};
/// use levelog_sink::{Destination, Flags, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::build(
///     Level::Warning,
///     [Override::default_error_destinations([Destination::new(buffer.clone())]),
///      Override::default_flags(Flags::SHORT_FILE)],
/// );
///
/// logger.info(&[&"dropped"]);
/// logger.error(&[&"disk ", &3, &" failed"]);
///
/// assert!(buffer.contents_lossy().starts_with("[ERROR]"));
/// assert!(buffer.contents_lossy().ends_with(": disk 3 failed\n"));
/// ```
#[derive(Debug)]
pub struct Logger {
    min_level: Level,
    pipelines: [Pipeline; 6],
}

impl Logger {
    /// Builds a logger from a minimum level and an ordered override list.
    pub fn build(min_level: Level, overrides: impl IntoIterator<Item = Override>) -> Self {
        Self::from_settings(min_level, &Settings::from_overrides(overrides))
    }

    /// Builds a logger with no overrides.
    #[must_use]
    pub fn with_defaults(min_level: Level) -> Self {
        Self::from_settings(min_level, &Settings::default())
    }

    /// Starts a chained builder.
    #[must_use]
    pub fn builder(min_level: Level) -> LoggerBuilder {
        LoggerBuilder {
            min_level,
            settings: Settings::default(),
        }
    }

    /// Builds a logger from already folded settings.
    #[must_use]
    pub fn from_settings(min_level: Level, settings: &Settings) -> Self {
        let resolution = resolve(min_level, settings);

        #[cfg(feature = "tracing")]
        for level in Level::ALL {
            let resolved = resolution.level(level);
            tracing::debug!(
                target: "levelog::resolve",
                level = level.name(),
                destinations = resolved.destinations.len(),
                prefix = %resolved.prefix,
                flags = %resolved.flags,
                "resolved level pipeline"
            );
        }

        Self {
            min_level,
            pipelines: resolution.into_pipelines(),
        }
    }

    /// Minimum level the logger was built with.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// The pipeline serving `level`.
    #[must_use]
    pub fn pipeline(&self, level: Level) -> &Pipeline {
        &self.pipelines[level.index()]
    }

    /// Reports whether a call at `level` writes anywhere.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        !self.pipeline(level).is_silent()
    }

    /// Snapshot of the resolved configuration of every level.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        Resolution::from_levels(Level::ALL.map(|level| {
            let pipeline = self.pipeline(level);
            ResolvedLevel {
                destinations: pipeline.destinations().to_vec(),
                prefix: pipeline.prefix().to_owned(),
                flags: pipeline.flags(),
            }
        }))
    }

    /// Writes the concatenation of `values` at `level`.
    #[track_caller]
    pub fn log(&self, level: Level, values: &[&dyn Display]) {
        self.pipeline(level)
            .output(Source::caller(), format_args!("{}", Concat(values)));
    }

    /// Writes pre-formatted `args` at `level`.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.pipeline(level).output(Source::caller(), args);
    }

    /// Writes `args` at `level`, attributed to an explicit `source`.
    ///
    /// Used when the call site is known from elsewhere, such as the metadata
    /// of a forwarded `tracing` event.
    pub fn log_from(&self, level: Level, source: Source<'_>, args: fmt::Arguments<'_>) {
        self.pipeline(level).output(source, args);
    }

    /// Writes at [`Level::Critical`].
    #[track_caller]
    pub fn critical(&self, values: &[&dyn Display]) {
        self.log(Level::Critical, values);
    }

    /// Writes formatted output at [`Level::Critical`].
    #[track_caller]
    pub fn criticalf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Critical, args);
    }

    /// Writes at [`Level::Error`].
    #[track_caller]
    pub fn error(&self, values: &[&dyn Display]) {
        self.log(Level::Error, values);
    }

    /// Writes formatted output at [`Level::Error`].
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    /// Writes at [`Level::Warning`].
    #[track_caller]
    pub fn warning(&self, values: &[&dyn Display]) {
        self.log(Level::Warning, values);
    }

    /// Writes formatted output at [`Level::Warning`].
    #[track_caller]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warning, args);
    }

    /// Writes at [`Level::Notice`].
    #[track_caller]
    pub fn notice(&self, values: &[&dyn Display]) {
        self.log(Level::Notice, values);
    }

    /// Writes formatted output at [`Level::Notice`].
    #[track_caller]
    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Notice, args);
    }

    /// Writes at [`Level::Info`].
    #[track_caller]
    pub fn info(&self, values: &[&dyn Display]) {
        self.log(Level::Info, values);
    }

    /// Writes formatted output at [`Level::Info`].
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    /// Writes at [`Level::Debug`].
    #[track_caller]
    pub fn debug(&self, values: &[&dyn Display]) {
        self.log(Level::Debug, values);
    }

    /// Writes formatted output at [`Level::Debug`].
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }
}

/// Chained alternative to [`Logger::build`].
///
/// Each [`with`](Self::with) call applies its override immediately.
#[derive(Clone, Debug)]
pub struct LoggerBuilder {
    min_level: Level,
    settings: Settings,
}

impl LoggerBuilder {
    /// Applies one override.
    pub fn with(mut self, delta: Override) -> Self {
        self.settings = self.settings.apply(delta);
        self
    }

    /// Applies each override in order.
    pub fn with_all(self, overrides: impl IntoIterator<Item = Override>) -> Self {
        overrides.into_iter().fold(self, Self::with)
    }

    /// Replaces the minimum level.
    pub fn min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    /// Settings folded so far.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves the settings into a logger.
    #[must_use]
    pub fn build(self) -> Logger {
        Logger::from_settings(self.min_level, &self.settings)
    }
}

struct Concat<'a>(&'a [&'a dyn Display]);

impl Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|value| value.fmt(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LevelConfig;
    use levelog_sink::{Destination, Flags, SharedBuffer};

    fn capture(level: Level) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::build(
            Level::Debug,
            [
                Override::default_error_destinations([Destination::discard()]),
                Override::default_non_error_destinations([Destination::discard()]),
                Override::level(
                    level,
                    LevelConfig::new()
                        .destination(Destination::new(buffer.clone()))
                        .flags(Flags::MSG_PREFIX),
                ),
            ],
        );
        (logger, buffer)
    }

    #[test]
    fn plain_form_concatenates_without_separators() {
        let (logger, buffer) = capture(Level::Info);
        logger.info(&[&"a", &1, &'b', &2.5]);
        assert_eq!(buffer.contents_lossy(), "[INFO]a1b2.5\n");
    }

    #[test]
    fn plain_form_with_no_values_writes_prefix_line() {
        let (logger, buffer) = capture(Level::Debug);
        logger.debug(&[]);
        assert_eq!(buffer.contents_lossy(), "[DEBUG]\n");
    }

    #[test]
    fn formatted_form_substitutes_positionally() {
        let (logger, buffer) = capture(Level::Warning);
        logger.warningf(format_args!("{1} before {0}", "second", "first"));
        assert_eq!(buffer.contents_lossy(), "[WARNING]first before second\n");
    }

    #[test]
    fn each_method_writes_to_its_own_level() {
        type Plain = fn(&Logger, &[&dyn Display]);
        let methods: [(Level, Plain); 6] = [
            (Level::Debug, Logger::debug),
            (Level::Info, Logger::info),
            (Level::Notice, Logger::notice),
            (Level::Warning, Logger::warning),
            (Level::Error, Logger::error),
            (Level::Critical, Logger::critical),
        ];
        for (level, method) in methods {
            let (logger, buffer) = capture(level);
            for other in Level::ALL.into_iter().filter(|other| *other != level) {
                logger.log(other, &[&"elsewhere"]);
            }
            method(&logger, &[&"here"]);

            let expected = format!("{}here\n", level.label());
            assert_eq!(buffer.contents_lossy(), expected);
        }
    }

    #[test]
    fn builder_matches_build() {
        let buffer = Destination::new(SharedBuffer::new());
        let overrides = [
            Override::error(LevelConfig::new().prefix("[E]")),
            Override::default_non_error_destinations([buffer]),
        ];

        let built = Logger::build(Level::Info, overrides.clone());
        let chained = Logger::builder(Level::Debug)
            .with_all(overrides)
            .min_level(Level::Info)
            .build();

        assert_eq!(built.resolution(), chained.resolution());
        assert_eq!(chained.min_level(), Level::Info);
    }

    #[test]
    fn explicit_source_is_rendered() {
        let buffer = SharedBuffer::new();
        let logger = Logger::build(
            Level::Debug,
            [Override::notice(
                LevelConfig::new()
                    .destination(Destination::new(buffer.clone()))
                    .flags(Flags::SHORT_FILE),
            )],
        );

        logger.log_from(
            Level::Notice,
            Source::new("net/listener.rs", 88),
            format_args!("bound"),
        );

        assert_eq!(buffer.contents_lossy(), "[NOTICE]listener.rs:88: bound\n");
    }

    #[test]
    fn enabled_reflects_suppression() {
        let logger = Logger::with_defaults(Level::Notice);
        assert!(!logger.enabled(Level::Debug));
        assert!(!logger.enabled(Level::Info));
        assert!(logger.enabled(Level::Notice));
        assert!(logger.enabled(Level::Critical));
    }
}
