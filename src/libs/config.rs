//! Configuration for the ponto application.
//!
//! Settings live in `config.json` in the data directory resolved by
//! [`DataStorage`]. Every section is optional; a missing file yields
//! [`Config::default`], and sections left out fall back to their defaults
//! when read through the accessors.
//!
//! ## Sections
//!
//! - **attendance**: workday length, default lookback window and timezone
//!   correction of stored clock values.
//! - **server**: remote ponto backend that receives attendance events.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ponto::libs::config::Config;
//!
//! let config = Config::read()?;
//! let settings = config.view_settings();
//! println!("workday: {} min", settings.workday_minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::balance::workday_minutes_from_hours;
use crate::libs::clock::{TimezoneMode, TimezonePolicy, DEFAULT_OFFSET_HOURS};
use crate::libs::messages::Message;
use crate::libs::pagination::DEFAULT_LOOKBACK_DAYS;
use crate::libs::record::ViewSettings;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// How attendance is measured and displayed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttendanceConfig {
    /// Expected hours on a weekday.
    pub workday_hours: f64,
    /// Days covered by `records` and `balance` when no start date is given.
    pub lookback_days: i64,
    /// Offset subtracted from stored clock values when correcting them.
    pub timezone_offset_hours: i64,
    #[serde(default)]
    pub timezone_mode: TimezoneMode,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        AttendanceConfig {
            workday_hours: 8.0,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            timezone_offset_hours: DEFAULT_OFFSET_HOURS,
            timezone_mode: TimezoneMode::Never,
        }
    }
}

impl AttendanceConfig {
    pub fn timezone_policy(&self) -> TimezonePolicy {
        TimezonePolicy::new(self.timezone_mode, self.timezone_offset_hours)
    }

    pub fn workday_minutes(&self) -> i64 {
        workday_minutes_from_hours(self.workday_hours)
    }
}

/// Remote ponto backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://ponto.example.com/api`.
    pub api_url: String,
    /// Sent as a bearer token.
    pub auth_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Reads the configuration from the data directory.
    ///
    /// A missing file is not an error and yields the default configuration;
    /// a file that exists but does not parse is.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The attendance section, or its defaults when not configured.
    pub fn attendance(&self) -> AttendanceConfig {
        self.attendance.clone().unwrap_or_default()
    }

    pub fn view_settings(&self) -> ViewSettings {
        let attendance = self.attendance();
        ViewSettings {
            workday_minutes: attendance.workday_minutes(),
            timezone: attendance.timezone_policy(),
        }
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "attendance".to_string(),
                name: "Attendance".to_string(),
            },
            ConfigModule {
                key: "server".to_string(),
                name: "Server".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "attendance" => {
                    let default = config.attendance();
                    msg_print!(Message::ConfigModuleAttendance);

                    let modes = TimezoneMode::ALL;
                    let current_mode = modes.iter().position(|m| *m == default.timezone_mode).unwrap_or(0);

                    config.attendance = Some(AttendanceConfig {
                        workday_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWorkdayHours.to_string())
                            .default(default.workday_hours)
                            .interact_text()?,
                        lookback_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLookbackDays.to_string())
                            .default(default.lookback_days)
                            .interact_text()?,
                        timezone_offset_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTimezoneOffset.to_string())
                            .default(default.timezone_offset_hours)
                            .interact_text()?,
                        timezone_mode: modes[Select::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTimezoneMode.to_string())
                            .items(&modes.iter().map(|m| m.label()).collect::<Vec<_>>())
                            .default(current_mode)
                            .interact()?],
                    });
                }
                "server" => {
                    let default = config.server.clone().unwrap_or(ServerConfig {
                        api_url: "".to_string(),
                        auth_token: "".to_string(),
                    });
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                        auth_token: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerAuthToken.to_string())
                            .default(default.auth_token)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
