//! Result type used throughout relcut.
//!
//! A type alias for `color_eyre::eyre::Result<T>`, giving colorized error
//! output and chain-able contexts via `.wrap_err()`.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout relcut.
pub type Result<T> = EyreResult<T>;
