#[cfg(test)]
mod tests {
    use punchclock::libs::config::{Config, ServerConfig, API_URL_ENV, CONFIG_FILE_NAME, DEFAULT_API_URL};
    use punchclock::libs::data_storage::DataStorage;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the data directory at a fresh temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
        api_url: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base_path(temp_dir.path().join("punchclock"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
                api_url: "https://attendance.example.com/api".to_string(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.server.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
            }),
        };
        config.save_to(&ctx.storage).unwrap();

        assert!(ctx.storage.base_path().join(CONFIG_FILE_NAME).exists());
        assert_eq!(Config::read_from(&ctx.storage).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_empty_config_omits_server(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.storage).unwrap();
        let raw = fs::read_to_string(ctx.storage.get_path(CONFIG_FILE_NAME).unwrap()).unwrap();
        assert!(!raw.contains("server"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupted_config_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.storage.get_path(CONFIG_FILE_NAME).unwrap(), "{ not json").unwrap();
        assert!(Config::read_from(&ctx.storage).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_api_url_resolution(ctx: &mut ConfigTestContext) {
        std::env::remove_var(API_URL_ENV);
        assert_eq!(Config::default().api_url(), DEFAULT_API_URL);

        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
            }),
        };
        assert_eq!(config.api_url(), ctx.api_url);

        std::env::set_var(API_URL_ENV, "http://localhost:9000/api");
        assert_eq!(config.api_url(), "http://localhost:9000/api");
        std::env::remove_var(API_URL_ENV);
    }
}
