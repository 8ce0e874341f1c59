//! crates/levelog-sink/src/flags.rs
//! Header formatting flags applied to every line a pipeline writes.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Bitmask selecting which header fields precede each logged line.
///
/// The empty mask is meaningful to the resolution layer: a per-level
/// configuration with [`Flags::NONE`] means "unset, use the default flags".
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Flags(u32);

impl Flags {
    /// No header fields.
    pub const NONE: Self = Self(0);
    /// Local date, `2009/01/23`.
    pub const DATE: Self = Self(1 << 0);
    /// Local time, `01:23:23`.
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution, `01:23:23.123123`. Implies [`Flags::TIME`].
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Full source path and line, `src/service/worker.rs:23: `.
    pub const LONG_FILE: Self = Self(1 << 3);
    /// Final path component and line, `worker.rs:23: `. Overrides [`Flags::LONG_FILE`].
    pub const SHORT_FILE: Self = Self(1 << 4);
    /// Render date and time in UTC rather than the local time zone.
    pub const UTC: Self = Self(1 << 5);
    /// Move the prefix from the start of the line to just before the message.
    pub const MSG_PREFIX: Self = Self(1 << 6);
    /// Date and time.
    pub const STD: Self = Self(Self::DATE.0 | Self::TIME.0);
    /// Date, time and full source location.
    pub const DEFAULT: Self = Self(Self::DATE.0 | Self::TIME.0 | Self::LONG_FILE.0);

    const ALL_BITS: u32 = (1 << 7) - 1;

    const NAMES: [(&'static str, Self); 9] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
        ("msgprefix", Self::MSG_PREFIX),
        ("std", Self::STD),
        ("default", Self::DEFAULT),
    ];

    /// Builds a mask from raw bits, dropping bits that name no flag.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reports whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Reports whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reports whether `self` and `other` share any bit.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `self` when non-empty, `fallback` otherwise.
    #[must_use]
    pub const fn or(self, fallback: Self) -> Self {
        if self.is_empty() { fallback } else { self }
    }

    /// Looks up a single flag by its lowercase name (`"date"`, `"shortfile"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, flags)| *flags)
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({self})")
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        // Composite names (std, default) are skipped so output stays canonical.
        for (name, flag) in &Self::NAMES[..7] {
            if self.contains(*flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Error returned when a flag expression names an unknown flag.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log flag: {name}")]
pub struct ParseFlagsError {
    name: String,
}

impl ParseFlagsError {
    /// The offending flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Flags {
    type Err = ParseFlagsError;

    /// Parses `|`- or `,`-separated flag names such as `"date|time|shortfile"`.
    ///
    /// `"none"` and the empty string parse to [`Flags::NONE`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::NONE;
        for token in s.split(['|', ',']) {
            let token = token.trim();
            if token.is_empty() || token.eq_ignore_ascii_case("none") {
                continue;
            }
            flags |= Self::from_name(token).ok_or_else(|| ParseFlagsError {
                name: token.to_owned(),
            })?;
        }
        Ok(flags)
    }
}
