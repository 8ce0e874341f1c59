//! crates/levelog/src/tracing_bridge.rs
//! Bridge between the tracing crate and a [`Logger`].
//!
//! [`LevelogLayer`] is a tracing-subscriber layer that writes every event it
//! sees through the matching level pipeline of a shared logger, so libraries
//! instrumented with `tracing` end up in the same destinations as direct
//! logger calls.
//!
//! # Level mapping
//!
//! | tracing          | levelog      |
//! |------------------|--------------|
//! | `ERROR`          | `Error`      |
//! | `WARN`           | `Warning`    |
//! | `INFO`           | `Info`       |
//! | `DEBUG`, `TRACE` | `Debug`      |
//!
//! `tracing` has no notice or critical level. An event with a `critical =
//! true` field goes to `Critical`; one with `notice = true` goes to `Notice`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use levelog::{Level, Logger};
//! use levelog::tracing_bridge::init_tracing;
//!
//! init_tracing(Arc::new(Logger::with_defaults(Level::Info)));
//!
//! tracing::warn!(peer = "10.0.0.7", "handshake timed out");
//! tracing::info!(notice = true, "configuration reloaded");
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use levelog_sink::Source;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::level::Level;
use crate::logger::Logger;

/// A tracing layer that forwards events into a [`Logger`].
#[derive(Clone, Debug)]
pub struct LevelogLayer {
    logger: Arc<Logger>,
}

impl LevelogLayer {
    /// Creates a layer writing through `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// The logger events are written to.
    #[must_use]
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Maps a tracing level to a logger level.
    const fn map_level(level: tracing::Level) -> Level {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
        }
    }
}

impl<S> Layer<S> for LevelogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = if visitor.critical {
            Level::Critical
        } else if visitor.notice {
            Level::Notice
        } else {
            Self::map_level(*metadata.level())
        };
        if !self.logger.enabled(level) {
            return;
        }

        let source = Source::new(
            metadata.file().unwrap_or_else(|| metadata.target()),
            metadata.line().unwrap_or(0),
        );
        self.logger
            .log_from(level, source, format_args!("{}", visitor.rendered()));
    }
}

/// Collects the message and remaining fields of one event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
    notice: bool,
    critical: bool,
}

impl EventVisitor {
    fn rendered(&self) -> String {
        let mut line = self.message.clone();
        if !self.fields.is_empty() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&self.fields);
        }
        line
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for EventVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "notice" => self.notice = value,
            "critical" => self.critical = value,
            name => self.push_field(name, format_args!("{value}")),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

/// Installs a [`LevelogLayer`] for `logger` as the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing(logger: Arc<Logger>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LevelogLayer::new(logger))
        .init();
}

/// Installs a [`LevelogLayer`] behind an additional filter layer, such as an
/// `EnvFilter`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing_with_filter<F>(logger: Arc<Logger>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LevelogLayer::new(logger))
        .init();
}
