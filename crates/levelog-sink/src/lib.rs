#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/levelog-sink/src/lib.rs
//!
//! # Overview
//!
//! `levelog-sink` provides the output half of the `levelog` workspace: the
//! [`Destination`] handles that lines are written to, the [`Flags`] bitmask
//! selecting header fields, the [`Source`] position shown by the file flags,
//! and the [`Pipeline`] that assembles a complete line and fans it out to a
//! destination set.
//!
//! # Design
//!
//! A [`Destination`] is a cloneable handle around a mutex-protected
//! [`std::io::Write`] implementor. Handles compare by identity, so the process
//! standard streams are exposed as singletons that every pipeline shares.
//! Each [`Pipeline`] renders a line completely before taking its lock, then
//! writes it with a single `write_all` per destination.
//!
//! # Invariants
//!
//! - Every line ends with exactly one newline unless the message already
//!   supplied one.
//! - A pipeline with no destinations never renders.
//! - Writing never fails from the caller's point of view; destination errors
//!   are dropped.
//!
//! # Examples
//!
//! ```
//! use levelog_sink::{Destination, Flags, Pipeline, SharedBuffer, Source};
//!
//! let buffer = SharedBuffer::new();
//! let pipeline = Pipeline::new(vec![Destination::new(buffer.clone())], "[NOTICE]", Flags::NONE);
//! pipeline.output(Source::caller(), format_args!("a {}", "b"));
//!
//! assert_eq!(buffer.contents_lossy(), "[NOTICE]a b\n");
//! ```

mod destination;
mod flags;
mod header;
mod pipeline;
mod source;

pub use destination::{Destination, SharedBuffer};
pub use flags::{Flags, ParseFlagsError};
pub use pipeline::Pipeline;
pub use source::Source;
