//! Printing macros shared by all commands.
//!
//! Each macro checks [`is_debug_mode`] once per call site: with `PONTO_DEBUG`
//! or `RUST_LOG` set, text is emitted as a `tracing` event so it interleaves
//! with the library's structured logs; otherwise it goes straight to the
//! terminal (errors to stderr).
//!
//! ```text
//! msg_info!(..) ──▶ debug mode? ──yes──▶ tracing::info!
//!                        │
//!                        no ──────────▶ println!
//! ```
//!
//! ```rust
//! use ponto::libs::messages::Message;
//! use ponto::{msg_info, msg_success};
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::NoRecordsFound, true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether debug output is requested. Read from the environment once.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("PONTO_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Emits one line, either as a `tracing` event at `$level` or on `$stream`.
///
/// The `spaced` form surrounds the line with blank lines.
#[doc(hidden)]
#[macro_export]
macro_rules! msg_emit {
    ($level:ident, $stream:ident, $prefix:expr, $msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}{}", $prefix, $msg);
        } else {
            $stream!("{}{}", $prefix, $msg);
        }
    };
    ($level:ident, $stream:ident, $prefix:expr, $msg:expr, spaced) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("\n{}{}\n", $prefix, $msg);
        } else {
            $stream!("\n{}{}\n", $prefix, $msg);
        }
    };
}

/// Prints a message as is.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::msg_emit!(info, println, "", $msg)
    };
    ($msg:expr, true) => {
        $crate::msg_emit!(info, println, "", $msg, spaced)
    };
}

/// Prints a message with a ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::msg_emit!(info, println, "✅ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::msg_emit!(info, println, "✅ ", $msg, spaced)
    };
}

/// Prints a message with a ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::msg_emit!(error, eprintln, "❌ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::msg_emit!(error, eprintln, "❌ ", $msg, spaced)
    };
}

/// Prints a message with a ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::msg_emit!(warn, println, "⚠️ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::msg_emit!(warn, println, "⚠️ ", $msg, spaced)
    };
}

/// Prints a message with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::msg_emit!(info, println, "ℹ️ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::msg_emit!(info, println, "ℹ️ ", $msg, spaced)
    };
}

/// Debug-only output; silent unless debug mode is on.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}
