#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `levelog` is a six-level leveled logger. Each level (Debug, Info, Notice,
//! Warning, Error, Critical) owns a pipeline with its own destinations, line
//! prefix and header flags. A [`Logger`] is built once from a minimum level
//! and an ordered list of [`Override`]s, and is immutable afterwards.
//!
//! # Design
//!
//! Construction is split in three steps:
//!
//! 1. Overrides are folded over default [`Settings`]; a later override of the
//!    same slot replaces an earlier one.
//! 2. [`resolve`] turns the settings into one [`ResolvedLevel`] per level,
//!    filling unset fields from the defaults and suppressing levels below the
//!    minimum that name no destinations of their own.
//! 3. Each resolved level becomes a [`Pipeline`](levelog_sink::Pipeline) from
//!    `levelog-sink`, stored in a fixed table indexed by level.
//!
//! Logging never fails. Calls at a suppressed level return after a single
//! emptiness check, and destination write errors are dropped.
//!
//! # Invariants
//!
//! - Error and Critical fall back to the error-class default destinations;
//!   every other level falls back to the non-error defaults.
//! - An unset prefix is the bracketed level label, such as `[NOTICE]`.
//! - Concurrent calls never interleave bytes within a line on a shared
//!   destination.
//!
//! # Features
//!
//! - `serde`: (de)serialization for [`Level`] and the declarative
//!   [`config::LoggingConfig`], plus JSON loading.
//! - `tracing`: the [`tracing_bridge`] layer and resolution diagnostics under
//!   the `levelog::resolve` target.
//!
//! # Examples
//!
//! ```
//! use levelog::{Level, LevelConfig, Logger, Override, notice_log};
//! use levelog_sink::{Destination, Flags, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::build(
//!     Level::Info,
//!     [Override::notice(
//!         LevelConfig::new()
//!             .destination(Destination::new(buffer.clone()))
//!             .prefix("[CUSTOM]")
//!             .flags(Flags::MSG_PREFIX),
//!     )],
//! );
//!
//! notice_log!(logger, "{} {}", "a", "b");
//! logger.debug(&[&"suppressed"]);
//!
//! assert_eq!(buffer.contents_lossy(), "[CUSTOM]a b\n");
//! ```

pub mod config;
pub mod level;
mod logger;
mod macros;
mod options;
mod resolve;
#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use levelog_sink::{Destination, Flags, ParseFlagsError, Pipeline, SharedBuffer, Source};

pub use level::{InvalidLevel, Level, ParseLevelError, label_for_raw};
pub use logger::{Logger, LoggerBuilder};
pub use options::{LevelConfig, Override, Settings};
pub use resolve::{Resolution, ResolvedLevel, resolve};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LevelogLayer, init_tracing};
