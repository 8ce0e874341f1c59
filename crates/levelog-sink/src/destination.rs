//! crates/levelog-sink/src/destination.rs
//! Shared, lock-protected output sinks.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// A cloneable handle to an output sink.
///
/// Clones share the same writer and the same lock, so a destination placed in
/// several level pipelines serializes every write made through any of them.
/// Equality is identity: two handles are equal when they refer to the same
/// underlying writer.
#[derive(Clone)]
pub struct Destination {
    writer: SharedWriter,
    name: Arc<str>,
}

impl Destination {
    /// Wraps an arbitrary writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::named("writer", writer)
    }

    /// Wraps a writer and records a name shown by the [`Debug`](fmt::Debug) output.
    pub fn named<W>(name: impl Into<Arc<str>>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            name: name.into(),
        }
    }

    /// Opens `path` for appending, creating it when missing.
    pub fn append_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::named(path.display().to_string(), file))
    }

    /// The process's standard output stream.
    ///
    /// Every call returns a handle to the same destination.
    pub fn stdout() -> Self {
        static STDOUT: OnceLock<Destination> = OnceLock::new();
        STDOUT
            .get_or_init(|| Self::named("stdout", io::stdout()))
            .clone()
    }

    /// The process's standard error stream.
    ///
    /// Every call returns a handle to the same destination.
    pub fn stderr() -> Self {
        static STDERR: OnceLock<Destination> = OnceLock::new();
        STDERR
            .get_or_init(|| Self::named("stderr", io::stderr()))
            .clone()
    }

    /// A destination that accepts and drops every byte.
    pub fn discard() -> Self {
        static DISCARD: OnceLock<Destination> = OnceLock::new();
        DISCARD
            .get_or_init(|| Self::named("discard", io::sink()))
            .clone()
    }

    /// Name recorded at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes `bytes` in full while holding the destination lock, then flushes.
    ///
    /// A poisoned lock is recovered rather than propagated.
    pub fn write_line(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(bytes)?;
        writer.flush()
    }

    fn lock(&self) -> MutexGuard<'_, dyn Write + Send + 'static> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl Eq for Destination {}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Destination").field(&self.name).finish()
    }
}

/// An in-memory destination whose contents stay readable after it is handed
/// to a [`Destination`].
///
/// ```
/// use levelog_sink::{Destination, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let destination = Destination::new(buffer.clone());
/// destination.write_line(b"hello\n").unwrap();
/// assert_eq!(buffer.contents_lossy(), "hello\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out the bytes written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// The bytes written so far, decoded as UTF-8 with replacement.
    #[must_use]
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains and returns the buffered bytes.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
