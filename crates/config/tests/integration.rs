//! Integration tests for config

#[cfg(test)]
mod tests {
    use bitcheck_config::*;
    use bitcheck_types::{ColorChoice, OutputFormat, WarningKind};
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "BITCHECK_OUTPUT",
        "BITCHECK_COLOR",
        "BITCHECK_INTEGRITY",
        "BITCHECK_JOBS",
        "BITCHECK_TOOL_TIMEOUT",
        "BITCHECK_IGNORE",
        "BITCHECK_LIBRARY",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[check]
integrity = false
jobs = 3
ignore = ["other", "stream_error"]
tool_timeout = 30

[paths]
library_path = "/srv/music/library.db"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert!(!config.check.integrity);
        assert_eq!(config.jobs(), 3);
        assert_eq!(
            config.check.ignore,
            vec![WarningKind::Other, WarningKind::StreamError]
        );
        assert_eq!(config.tool_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            config.library_path(),
            std::path::PathBuf::from("/srv/music/library.db")
        );
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[check]\njobs = 1").unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert!(config.check.integrity);
        assert!(config.check.ignore.is_empty());
        assert_eq!(config.tool_timeout(), None);
        assert_eq!(config.general.color, ColorChoice::Auto);
    }

    #[tokio::test]
    async fn test_zero_timeout_in_file_means_no_limit() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[check]\ntool_timeout = 0").unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.tool_timeout(), None);
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[check]\nintegrity = \"sometimes\"").unwrap();

        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            bitcheck_errors::Error::Config(bitcheck_errors::ConfigError::ParseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let result =
            Config::load_or_default(Some(std::path::Path::new("/nonexistent/bitcheck.toml")))
                .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("BITCHECK_OUTPUT", "json");
        std::env::set_var("BITCHECK_COLOR", "always");
        std::env::set_var("BITCHECK_INTEGRITY", "no");
        std::env::set_var("BITCHECK_JOBS", "2");
        std::env::set_var("BITCHECK_IGNORE", "other, truncated");
        std::env::set_var("BITCHECK_LIBRARY", "/tmp/lib.db");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert!(!config.check.integrity);
        assert_eq!(config.jobs(), 2);
        assert_eq!(
            config.check.ignore,
            vec![WarningKind::Other, WarningKind::Truncated]
        );
        assert_eq!(
            config.library_path(),
            std::path::PathBuf::from("/tmp/lib.db")
        );

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("BITCHECK_INTEGRITY", "sometimes");
        let mut config = Config::default();
        assert!(config.merge_env().is_err());
        clear_env();

        std::env::set_var("BITCHECK_IGNORE", "corrupt,bogus");
        let mut config = Config::default();
        assert!(config.merge_env().is_err());
        clear_env();
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("BITCHECK_TOOL_TIMEOUT", "0");
        let mut config = Config::default();
        config.check.tool_timeout = Some(10);
        config.merge_env().unwrap();
        assert_eq!(config.tool_timeout(), None);

        clear_env();
    }

    #[test]
    fn test_auto_jobs_is_positive() {
        assert!(calculate_jobs(0) >= 1);
        assert_eq!(calculate_jobs(5), 5);
    }
}
