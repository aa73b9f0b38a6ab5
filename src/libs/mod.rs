//! Domain logic and application plumbing.
//!
//! The attendance rules are pure functions over already-fetched data:
//! [`duration`] parses and formats `"Xh Ym"` texts, [`clock`] handles
//! `HH:MM` values and timezone shifts, [`attendance`] derives worked and
//! break minutes, [`balance`] the banked hours and [`pagination`] walks the
//! store page by page. [`record`] ties them together for one day.

pub mod attendance;
pub mod balance;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod event;
pub mod export;
pub mod justification;
pub mod messages;
pub mod pagination;
pub mod presence;
pub mod record;
pub mod view;
