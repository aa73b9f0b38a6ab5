//! # Ponto - attendance tracking
//!
//! A command-line utility that records employee clock-in/clock-out events
//! and breaks, and computes worked time and banked-hours balances.
//!
//! ## Features
//!
//! - **Event Recording**: Clock-in, clock-out and breaks, from explicit
//!   commands, chat messages or presence changes
//! - **Worked Time**: Per-day worked and break minutes from raw clock values
//! - **Banked Hours**: Daily balance against the expected workday, with
//!   credited hours from approved justifications
//! - **Timezone Correction**: Shifting of clock values stored in another offset
//! - **Paged Listing**: Newest-first record pages with opaque cursors
//! - **Data Export**: Records and balances to CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ponto::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
