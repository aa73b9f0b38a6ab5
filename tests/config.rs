#[cfg(test)]
mod tests {
    use ponto::libs::clock::{TimezoneMode, TimezonePolicy};
    use ponto::libs::config::{AttendanceConfig, Config, ServerConfig, CONFIG_FILE_NAME};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
        api_url: String,
        auth_token: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
                api_url: "https://ponto.example.com/api".to_string(),
                auth_token: "token123".to_string(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.server.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            attendance: Some(AttendanceConfig {
                workday_hours: 6.5,
                lookback_days: 14,
                timezone_offset_hours: -3,
                timezone_mode: TimezoneMode::OnRead,
            }),
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
                auth_token: ctx.auth_token.clone(),
            }),
        };
        config.save_to(&ctx.config_path).unwrap();

        let read = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(read, config);

        let settings = read.view_settings();
        assert_eq!(settings.workday_minutes, 390);
        assert_eq!(settings.timezone, TimezonePolicy::new(TimezoneMode::OnRead, -3));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.config_path, "{ not json").unwrap();
        assert!(Config::read_from(&ctx.config_path).is_err());
    }
}
