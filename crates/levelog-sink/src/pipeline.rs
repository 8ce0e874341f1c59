//! crates/levelog-sink/src/pipeline.rs
//! The per-level writer: one header layout fanned out to a destination set.

use std::any::Any;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use time::OffsetDateTime;

use crate::destination::Destination;
use crate::flags::Flags;
use crate::header;
use crate::source::Source;

/// Writes complete lines, each made of a header, the message and a newline,
/// to every destination in its set.
///
/// Each line is rendered into its own buffer before any lock is taken, so a
/// message whose `Display` logs through the same pipeline completes normally.
/// Only the fan-out runs under the pipeline lock, which keeps concurrent
/// callers from interleaving partial lines and keeps their relative order
/// identical across destinations.
///
/// A pipeline with no destinations is silent: [`output`](Self::output)
/// returns before rendering anything.
pub struct Pipeline {
    destinations: Vec<Destination>,
    prefix: String,
    flags: Flags,
    fanout: Mutex<()>,
}

impl Pipeline {
    /// Creates a pipeline from its resolved parts.
    #[must_use]
    pub fn new(destinations: Vec<Destination>, prefix: impl Into<String>, flags: Flags) -> Self {
        if !flags.contains(Flags::UTC) {
            header::local_offset();
        }
        Self {
            destinations,
            prefix: prefix.into(),
            flags,
            fanout: Mutex::new(()),
        }
    }

    /// Destinations each line is written to, in order.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Prefix rendered on every line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Header flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Reports whether the pipeline writes nowhere.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Writes one line for `message`, attributed to `source`.
    ///
    /// Destination errors are ignored; the call always completes.
    pub fn output(&self, source: Source<'_>, message: fmt::Arguments<'_>) {
        if self.is_silent() {
            return;
        }
        self.output_at(header::timestamp(self.flags), source, message);
    }

    /// Writes one line for `message` using an explicit timestamp.
    ///
    /// A `Display` impl that panics while the message is formatted does not
    /// unwind into the caller; the line carries a `<message panicked: ..>`
    /// marker in place of the message.
    pub fn output_at(
        &self,
        now: OffsetDateTime,
        source: Source<'_>,
        message: fmt::Arguments<'_>,
    ) {
        if self.is_silent() {
            return;
        }

        let mut line = String::with_capacity(self.prefix.len() + 64);
        header::render(&mut line, &self.prefix, self.flags, now, source);
        let header_len = line.len();
        let formatted = panic::catch_unwind(AssertUnwindSafe(|| {
            // A failing Display impl leaves whatever it wrote so far.
            let _ = line.write_fmt(message);
        }));
        if let Err(payload) = formatted {
            line.truncate(header_len);
            let _ = write!(line, "<message panicked: {}>", panic_text(payload.as_ref()));
        }
        if !line.ends_with('\n') {
            line.push('\n');
        }

        let _fanout = self.fanout.lock().unwrap_or_else(PoisonError::into_inner);
        for destination in &self.destinations {
            let _ = destination.write_line(line.as_bytes());
        }
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "non-string payload"
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("destinations", &self.destinations)
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
