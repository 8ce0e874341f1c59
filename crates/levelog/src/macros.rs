//! crates/levelog/src/macros.rs
//! Formatting macros forwarding to the `*f` logger methods.
//!
//! The source location recorded in the line header is the macro call site.

/// Log a formatted message at [`Level::Critical`](crate::Level::Critical).
///
/// # Example
/// ```
/// # let logger = levelog::Logger::build(levelog::Level::Critical, [levelog::Override::default_error_destinations([levelog_sink::Destination::discard()])]);
/// levelog::critical_log!(logger, "shutting down after {} failures", 3);
/// ```
#[macro_export]
macro_rules! critical_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.criticalf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Error`](crate::Level::Error).
///
/// # Example
/// ```ignore
/// error_log!(logger, "write to {} failed: {}", path, err);
/// ```
#[macro_export]
macro_rules! error_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Warning`](crate::Level::Warning).
///
/// # Example
/// ```ignore
/// warning_log!(logger, "retrying in {}s", delay);
/// ```
#[macro_export]
macro_rules! warning_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Notice`](crate::Level::Notice).
///
/// # Example
/// ```ignore
/// notice_log!(logger, "config reloaded from {}", path);
/// ```
#[macro_export]
macro_rules! notice_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.noticef(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Info`](crate::Level::Info).
///
/// # Example
/// ```ignore
/// info_log!(logger, "listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Debug`](crate::Level::Debug).
///
/// # Example
/// ```ignore
/// debug_log!(logger, "cache hit for {key}");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::{Level, LevelConfig, Logger, Override};
    use levelog_sink::{Destination, Flags, SharedBuffer};

    #[test]
    fn macros_route_to_matching_levels() {
        let buffer = SharedBuffer::new();
        let destination = Destination::new(buffer.clone());
        let logger = Logger::build(
            Level::Debug,
            Level::ALL.map(|level| {
                Override::level(
                    level,
                    LevelConfig::new()
                        .destination(destination.clone())
                        .flags(Flags::MSG_PREFIX),
                )
            }),
        );

        let name = "cache";
        debug_log!(logger, "{name} miss");
        info_log!(logger, "{} warm", name);
        notice_log!(logger, "{0}{0}", "x");
        warning_log!(logger, "{:>4}", 7);
        error_log!(logger, "{:.2}", 1.5);
        critical_log!(logger, "{}", "done");

        assert_eq!(
            buffer.contents_lossy(),
            "[DEBUG]cache miss\n\
             [INFO]cache warm\n\
             [NOTICE]xx\n\
             [WARNING]   7\n\
             [ERROR]1.50\n\
             [CRITICAL]done\n"
        );
    }

    #[test]
    fn macros_accept_logger_references() {
        let buffer = SharedBuffer::new();
        let logger = Logger::build(
            Level::Debug,
            [Override::info(
                LevelConfig::new()
                    .destination(Destination::new(buffer.clone()))
                    .flags(Flags::MSG_PREFIX),
            )],
        );
        let shared = std::sync::Arc::new(logger);
        let by_ref = &shared;

        info_log!(by_ref, "through {}", "an Arc");

        assert_eq!(buffer.contents_lossy(), "[INFO]through an Arc\n");
    }
}
