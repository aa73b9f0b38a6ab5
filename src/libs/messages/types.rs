use crate::libs::clock::TimezoneMode;
use crate::libs::event::EventType;
use crate::libs::justification::JustificationStatus;
use crate::libs::presence::PresenceStatus;

#[derive(Debug, Clone)]
pub enum Message {
    // === ATTENDANCE EVENTS ===
    ClockInRecorded(String, String),          // user, time
    ClockOutRecorded(String, String, String), // user, time, total worked
    BreakStarted(String, String),             // user, time
    BreakEnded(String, String),               // user, total breaks
    EventRejected(EventType, String),         // event, reason
    NoEventInMessage,
    EventDetected(EventType),

    // === PRESENCE ===
    PresenceNoAction(PresenceStatus, PresenceStatus),
    PresenceWithoutRecord(String), // user

    // === JUSTIFICATIONS ===
    JustificationSaved(String, String, JustificationStatus), // user, date, status

    // === RECORDS ===
    RecordsHeader(String, String), // from, to
    NoRecordsFound,
    NextPageCursor(String),
    LastPage,

    // === BALANCE ===
    BalanceHeader(String, String), // from, to
    NoUsersFound,
    BalanceUserFailed(String, String), // user, error

    // === TIMEZONE CORRECTION ===
    TimezoneFixPreview(usize, i64), // records, offset
    TimezoneFixNothingToDo,
    TimezoneFixApplied(usize),
    TimezoneFixCancelled,
    TimezoneFixModeWarning(TimezoneMode),
    ConfirmTimezoneFix,

    // === REMOTE BACKEND ===
    RemoteEventSent(String),   // url
    RemoteEventFailed(String), // error
    RemoteEventRejected(u16),  // status

    // === EXPORT ===
    ExportingRecords(String, String), // from, to
    ExportCompleted(String),          // path
    NoDataToExport,

    // === CONFIGURATION ===
    ConfigSaved,
    ConfigModuleAttendance,
    ConfigModuleServer,
    PromptSelectModules,
    PromptWorkdayHours,
    PromptLookbackDays,
    PromptTimezoneOffset,
    PromptTimezoneMode,
    PromptServerApiUrl,
    PromptServerAuthToken,

    // === DATABASE MIGRATIONS ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),

    // === GENERAL ===
    CommandFailed(String),
}
