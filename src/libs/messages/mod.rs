//! User-facing text and the macros that print it.
//!
//! Every message the CLI shows is a [`Message`] variant; its `Display`
//! implementation in [`display`] holds the wording. The `msg_*` macros in
//! [`macros`] decide whether text goes to the terminal or to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
