//! Presence-driven break detection.
//!
//! When an employee's chat status changes, [`decide_action`] tells whether a
//! break should start or end. The decision is a pure function of the previous
//! status, the new status and whether a break is already open; executing it
//! against the store is the caller's job.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Idle,
    #[value(name = "dnd")]
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Offline,
}

impl PresenceStatus {
    /// Any status other than online counts as stepping away.
    pub fn is_away(self) -> bool {
        self != PresenceStatus::Online
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Idle => "idle",
            PresenceStatus::DoNotDisturb => "dnd",
            PresenceStatus::Offline => "offline",
        };
        f.write_str(label)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PresenceAction {
    StartBreak,
    EndBreak,
    None,
}

/// Decides what a status change means for the current break.
///
/// | previous | new     | open break | action       |
/// |----------|---------|------------|--------------|
/// | online   | away    | no         | `StartBreak` |
/// | away     | online  | yes        | `EndBreak`   |
/// | anything else                  || `None`       |
pub fn decide_action(prev: PresenceStatus, new: PresenceStatus, has_open_break: bool) -> PresenceAction {
    match (prev.is_away(), new.is_away(), has_open_break) {
        (false, true, false) => PresenceAction::StartBreak,
        (true, false, true) => PresenceAction::EndBreak,
        _ => PresenceAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::PresenceStatus::*;
    use super::*;

    #[test]
    fn test_going_away_starts_a_break() {
        for away in [Idle, DoNotDisturb, Offline] {
            assert_eq!(decide_action(Online, away, false), PresenceAction::StartBreak);
            assert_eq!(decide_action(Online, away, true), PresenceAction::None);
        }
    }

    #[test]
    fn test_coming_back_ends_an_open_break() {
        for away in [Idle, DoNotDisturb, Offline] {
            assert_eq!(decide_action(away, Online, true), PresenceAction::EndBreak);
            assert_eq!(decide_action(away, Online, false), PresenceAction::None);
        }
    }

    #[test]
    fn test_unchanged_or_away_to_away_does_nothing() {
        assert_eq!(decide_action(Online, Online, false), PresenceAction::None);
        assert_eq!(decide_action(Online, Online, true), PresenceAction::None);
        assert_eq!(decide_action(Idle, Offline, true), PresenceAction::None);
        assert_eq!(decide_action(Offline, Idle, false), PresenceAction::None);
    }
}
