//! crates/levelog/src/level.rs
//! The six severity levels and their labels.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from least to most severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Level {
    /// Diagnostic detail for developers.
    Debug = 1,
    /// Routine progress.
    Info = 2,
    /// Normal but significant conditions.
    Notice = 3,
    /// Something unexpected that the program recovered from.
    Warning = 4,
    /// An operation failed.
    Error = 5,
    /// The program cannot continue as intended.
    Critical = 6,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Canonical bracketed label, used as the default line prefix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Notice => "[NOTICE]",
            Self::Warning => "[WARNING]",
            Self::Error => "[ERROR]",
            Self::Critical => "[CRITICAL]",
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Numeric value, 1 for [`Level::Debug`] through 6 for [`Level::Critical`].
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Reports whether the level routes to the error-class default destinations.
    #[must_use]
    pub const fn is_error_class(self) -> bool {
        self.as_u8() >= Self::Error.as_u8()
    }

    /// Position of the level in [`Level::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the label for a raw level value.
///
/// Values outside 1..=6 yield `"invalid log level: <value>"` instead of
/// failing.
///
/// ```
/// use levelog::level::label_for_raw;
///
/// assert_eq!(label_for_raw(5), "[ERROR]");
/// assert_eq!(label_for_raw(99), "invalid log level: 99");
/// ```
#[must_use]
pub fn label_for_raw(raw: i64) -> Cow<'static, str> {
    match u8::try_from(raw).ok().map(Level::try_from) {
        Some(Ok(level)) => Cow::Borrowed(level.label()),
        _ => Cow::Owned(InvalidLevel(raw).to_string()),
    }
}

/// A raw value that names no level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level: {0}")]
pub struct InvalidLevel(pub i64);

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, InvalidLevel> {
        Self::ALL
            .get(usize::from(value).wrapping_sub(1))
            .copied()
            .ok_or(InvalidLevel(i64::from(value)))
    }
}

/// Error returned when parsing a level name fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts names case-insensitively, with or without brackets, plus the
    /// common aliases `warn`, `err` and `crit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        match name.as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "notice" => Ok(Self::Notice),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "critical" | "crit" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_each_level() {
        let labels: Vec<_> = Level::ALL.iter().map(|level| level.label()).collect();
        assert_eq!(
            labels,
            [
                "[DEBUG]",
                "[INFO]",
                "[NOTICE]",
                "[WARNING]",
                "[ERROR]",
                "[CRITICAL]"
            ]
        );
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn only_error_and_critical_are_error_class() {
        let error_class: Vec<_> = Level::ALL
            .into_iter()
            .filter(|level| level.is_error_class())
            .collect();
        assert_eq!(error_class, [Level::Error, Level::Critical]);
    }

    #[test]
    fn raw_values_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::try_from(level.as_u8()), Ok(level));
            assert_eq!(label_for_raw(i64::from(level.as_u8())), level.label());
        }
    }

    #[test]
    fn out_of_range_values_are_described() {
        assert_eq!(Level::try_from(0u8), Err(InvalidLevel(0)));
        assert_eq!(Level::try_from(7u8), Err(InvalidLevel(7)));
        assert_eq!(label_for_raw(0), "invalid log level: 0");
        assert_eq!(label_for_raw(-3), "invalid log level: -3");
        assert_eq!(label_for_raw(300), "invalid log level: 300");
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("Warning".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("[CRITICAL]".parse::<Level>(), Ok(Level::Critical));
        assert_eq!(" notice ".parse::<Level>(), Ok(Level::Notice));
        assert_eq!(
            "verbose".parse::<Level>(),
            Err(ParseLevelError("verbose".to_owned()))
        );
    }

    #[test]
    fn names_parse_back() {
        for level in Level::ALL {
            assert_eq!(level.name().parse::<Level>(), Ok(level));
        }
    }
}
