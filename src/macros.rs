//! Logging macros for ergonomic log message formatting.
//!
//! These macros format the message like `format!` and pass it to any
//! [`Logger`](crate::Logger), including tee loggers. Fields may be given
//! before the message, separated by a semicolon.
//!
//! # Examples
//!
//! ```
//! use rust_tee_logger::prelude::*;
//! use rust_tee_logger::info;
//!
//! let logger = tee_or_nop(Vec::new());
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let fields = Fields::new().with_field("port", port);
//! info!(logger, fields; "Listening");
//! ```
//!
//! Panic and Fatal have no macros; call [`Logger::panic`](crate::Logger::panic)
//! or [`Logger::fatal`](crate::Logger::fatal) so the terminal call is explicit.

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = NopLogger;
/// use rust_tee_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log($level, &format!($($arg)+), &$fields)
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, $crate::Fields::new(); $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.debug(&format!($($arg)+), &$fields)
    }};
    ($logger:expr, $($arg:tt)+) => {
        $crate::debug!($logger, $crate::Fields::new(); $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.info(&format!($($arg)+), &$fields)
    }};
    ($logger:expr, $($arg:tt)+) => {
        $crate::info!($logger, $crate::Fields::new(); $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = NopLogger;
/// use rust_tee_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.warn(&format!($($arg)+), &$fields)
    }};
    ($logger:expr, $($arg:tt)+) => {
        $crate::warn!($logger, $crate::Fields::new(); $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.error(&format!($($arg)+), &$fields)
    }};
    ($logger:expr, $($arg:tt)+) => {
        $crate::error!($logger, $crate::Fields::new(); $($arg)+)
    };
}

/// Log through `dfatal`: each sink decides between Error and Fatal.
#[macro_export]
macro_rules! dfatal {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.dfatal(&format!($($arg)+), &$fields)
    }};
    ($logger:expr, $($arg:tt)+) => {
        $crate::dfatal!($logger, $crate::Fields::new(); $($arg)+)
    };
}
