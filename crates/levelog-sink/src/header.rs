//! crates/levelog-sink/src/header.rs
//! Line header rendering: prefix, date, time and source location.

use std::fmt::Write as _;
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};

use crate::flags::Flags;
use crate::source::Source;

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// The local UTC offset, sampled once on first use.
///
/// The platform lookup fails once other threads are running; UTC stands in
/// when it does.
pub(crate) fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Captures the wall clock in the zone selected by `flags`.
pub(crate) fn timestamp(flags: Flags) -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    if flags.contains(Flags::UTC) {
        now
    } else {
        now.to_offset(local_offset())
    }
}

/// Appends the header for one line to `out`.
///
/// Without [`Flags::MSG_PREFIX`] the prefix opens the line; with it the prefix
/// follows the date, time and location fields.
pub(crate) fn render(
    out: &mut String,
    prefix: &str,
    flags: Flags,
    now: OffsetDateTime,
    source: Source<'_>,
) {
    if !flags.contains(Flags::MSG_PREFIX) {
        out.push_str(prefix);
    }

    if flags.contains(Flags::DATE) {
        let _ = write!(
            out,
            "{:04}/{:02}/{:02} ",
            now.year(),
            u8::from(now.month()),
            now.day()
        );
    }

    if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            now.hour(),
            now.minute(),
            now.second()
        );
        if flags.contains(Flags::MICROSECONDS) {
            let _ = write!(out, ".{:06}", now.microsecond());
        }
        out.push(' ');
    }

    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        let file = if flags.contains(Flags::SHORT_FILE) {
            source.short_file()
        } else {
            source.file
        };
        let _ = write!(out, "{file}:{}: ", source.line);
    }

    if flags.contains(Flags::MSG_PREFIX) {
        out.push_str(prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn fixed_time() -> OffsetDateTime {
        datetime!(2009-01-23 01:23:23.123123 UTC)
    }

    const SOURCE: Source<'static> = Source::new("src/service/worker.rs", 42);

    fn header(prefix: &str, flags: Flags) -> String {
        let mut out = String::new();
        render(&mut out, prefix, flags, fixed_time(), SOURCE);
        out
    }

    #[test]
    fn no_flags_renders_prefix_only() {
        assert_eq!(header("[INFO]", Flags::NONE), "[INFO]");
    }

    #[test]
    fn std_flags_render_date_and_time() {
        assert_eq!(
            header("[INFO]", Flags::STD),
            "[INFO]2009/01/23 01:23:23 "
        );
    }

    #[test]
    fn microseconds_extend_the_time_field() {
        assert_eq!(
            header("", Flags::MICROSECONDS),
            "01:23:23.123123 "
        );
    }

    #[test]
    fn short_file_strips_directories_and_wins_over_long_file() {
        assert_eq!(
            header("", Flags::SHORT_FILE | Flags::LONG_FILE),
            "worker.rs:42: "
        );
    }

    #[test]
    fn long_file_keeps_the_full_path() {
        assert_eq!(header("", Flags::LONG_FILE), "src/service/worker.rs:42: ");
    }

    #[test]
    fn utc_flag_keeps_the_utc_offset() {
        assert_eq!(timestamp(Flags::UTC).offset(), UtcOffset::UTC);
    }

    #[test]
    fn msg_prefix_moves_prefix_after_header() {
        assert_eq!(
            header("[WARNING] ", Flags::STD | Flags::MSG_PREFIX),
            "2009/01/23 01:23:23 [WARNING] "
        );
    }
}
