//! Wording of every [`Message`].
//!
//! Kept in one `match` so that each variant must be given text explicitly and
//! parameters are interpolated with their types checked.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ATTENDANCE EVENTS ===
            Message::ClockInRecorded(user, time) => format!("{} clocked in at {}", user, time),
            Message::ClockOutRecorded(user, time, total) => format!("{} clocked out at {} ({} worked)", user, time, total),
            Message::BreakStarted(user, time) => format!("{} started a break at {}", user, time),
            Message::BreakEnded(user, total) => format!("{} is back from the break ({} of breaks today)", user, total),
            Message::EventRejected(event, reason) => format!("Event '{}' not recorded: {}", event, reason),
            Message::NoEventInMessage => "The message does not express an attendance event".to_string(),
            Message::EventDetected(event) => format!("Detected event: {}", event),

            // === PRESENCE ===
            Message::PresenceNoAction(from, to) => format!("Status change {} -> {} does not affect breaks", from, to),
            Message::PresenceWithoutRecord(user) => format!("{} has not clocked in today, status change ignored", user),

            // === JUSTIFICATIONS ===
            Message::JustificationSaved(user, date, status) => format!("Justification for {} on {} saved as {}", user, date, status),

            // === RECORDS ===
            Message::RecordsHeader(from, to) => format!("Attendance records from {} to {}", from, to),
            Message::NoRecordsFound => "No records found".to_string(),
            Message::NextPageCursor(cursor) => format!("More records available, continue with --cursor-doc {}", cursor),
            Message::LastPage => "End of records".to_string(),

            // === BALANCE ===
            Message::BalanceHeader(from, to) => format!("Banked hours from {} to {}", from, to),
            Message::NoUsersFound => "No users with records found".to_string(),
            Message::BalanceUserFailed(user, error) => format!("Failed to compute the balance of {}: {}", user, error),

            // === TIMEZONE CORRECTION ===
            Message::TimezoneFixPreview(count, offset) => format!("{} record(s) will have their clock values shifted by {}h", count, -offset),
            Message::TimezoneFixNothingToDo => "No clock values to correct in this range".to_string(),
            Message::TimezoneFixApplied(count) => format!("Corrected {} record(s)", count),
            Message::TimezoneFixCancelled => "Timezone correction cancelled".to_string(),
            Message::TimezoneFixModeWarning(mode) => {
                format!("Timezone mode is '{}': corrected values will be shifted again when displayed", mode.label())
            }
            Message::ConfirmTimezoneFix => "Apply the correction? This rewrites the stored values".to_string(),

            // === REMOTE BACKEND ===
            Message::RemoteEventSent(url) => format!("Event sent to {}", url),
            Message::RemoteEventFailed(error) => format!("Failed to send the event to the server, kept locally: {}", error),
            Message::RemoteEventRejected(status) => format!("Server rejected the event with status {}, kept locally", status),

            // === EXPORT ===
            Message::ExportingRecords(from, to) => format!("Exporting records from {} to {}...", from, to),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::NoDataToExport => "No data to export".to_string(),

            // === CONFIGURATION ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleAttendance => "Attendance settings".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptWorkdayHours => "Expected hours per weekday".to_string(),
            Message::PromptLookbackDays => "Default lookback window (days)".to_string(),
            Message::PromptTimezoneOffset => "Timezone offset of stored clock values (hours)".to_string(),
            Message::PromptTimezoneMode => "Apply the timezone offset".to_string(),
            Message::PromptServerApiUrl => "Enter server API URL".to_string(),
            Message::PromptServerAuthToken => "Enter server auth token".to_string(),

            // === DATABASE MIGRATIONS ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),

            // === GENERAL ===
            Message::CommandFailed(error) => format!("Command failed: {}", error),
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::presence::PresenceStatus;

    #[test]
    fn test_parameters_are_interpolated() {
        let msg = Message::ClockOutRecorded("Ana".into(), "18:00".into(), "8h 0m".into());
        assert_eq!(msg.to_string(), "Ana clocked out at 18:00 (8h 0m worked)");
        assert_eq!(
            Message::PresenceNoAction(PresenceStatus::Idle, PresenceStatus::DoNotDisturb).to_string(),
            "Status change idle -> dnd does not affect breaks"
        );
        assert_eq!(Message::TimezoneFixPreview(2, -3).to_string(), "2 record(s) will have their clock values shifted by 3h");
    }
}
