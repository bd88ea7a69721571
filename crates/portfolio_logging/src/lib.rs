#![deny(missing_docs)]
//! Shared logging utilities for the portfolio workspace.
//!
//! Every crate logs through the `portfolio_*` macros below so that records
//! carry one common target and can be filtered as a group.

#[doc(hidden)]
pub use log;

use log::LevelFilter;

/// Target attached to every record emitted through the `portfolio_*` macros.
pub const TARGET: &str = "portfolio";

/// Environment variable consulted by [`level_from_env`].
pub const LEVEL_ENV: &str = "PORTFOLIO_LOG";

/// Logs a trace-level message under the portfolio target.
#[macro_export]
macro_rules! portfolio_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the portfolio target.
#[macro_export]
macro_rules! portfolio_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the portfolio target.
#[macro_export]
macro_rules! portfolio_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the portfolio target.
#[macro_export]
macro_rules! portfolio_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the portfolio target.
#[macro_export]
macro_rules! portfolio_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Parses a level name such as `"debug"` or `"WARN"`.
///
/// Returns `None` for anything `log` does not recognise.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

/// Reads the level from `PORTFOLIO_LOG`, falling back to `default`.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(default)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let default = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(default),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
