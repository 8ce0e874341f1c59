//! crates/levelog-sink/src/source.rs
//! Source position rendered by the file flags.

use std::panic::Location;

/// File and line a line of output is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Source<'a> {
    /// Path of the source file, as recorded by the compiler or event metadata.
    pub file: &'a str,
    /// One-based line number.
    pub line: u32,
}

impl<'a> Source<'a> {
    /// Creates a source position.
    #[must_use]
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Final path component of [`file`](Self::file).
    #[must_use]
    pub fn short_file(&self) -> &'a str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

impl Source<'static> {
    /// Position of the nearest caller not marked `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl<'a> From<&'a Location<'a>> for Source<'a> {
    fn from(location: &'a Location<'a>) -> Self {
        Self::new(location.file(), location.line())
    }
}
