use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `npm-rank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file, which parses and validates it, and reports the outcome
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, parsed, or validated
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_config_in(host, Utf8Path::new("."), args)
}

fn validate_config_in<H: Host>(host: &mut H, base_dir: &Utf8Path, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match Config::load(base_dir, config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else if base_dir.join(CONFIG_FILE_NAME).exists() {
                let _ = writeln!(host.output(), "Config file: {}", base_dir.join(CONFIG_FILE_NAME));
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }

            let _ = writeln!(
                host.output(),
                "Package names per request: up to {} characters",
                config.planner()?.max_batch_len()
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e:#}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir should be UTF-8");
        (dir, path)
    }

    fn validate_file(contents: &str) -> (TestHost, Result<()>) {
        let (_dir, base) = temp_dir();
        let config_path = base.join("config.toml");
        std::fs::write(&config_path, contents).expect("Failed to write test config");

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config_in(&mut host, &base, &args);
        (host, result)
    }

    #[test]
    fn test_default_config_is_valid() {
        let (_dir, base) = temp_dir();
        let config_path = base.join(CONFIG_FILE_NAME);

        let mut init_host = TestHost::new();
        let init_args = InitArgs {
            output: Some(config_path.clone()),
        };
        init_config(&mut init_host, &init_args).expect("init_config should succeed");
        assert!(init_host.output_str().contains("Generated default configuration file"));

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config_in(&mut host, &base, &args);

        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");
        assert!(host.output_str().contains("Configuration file is valid"));
        assert!(host.output_str().contains("up to 1999 characters"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let default_config = Config::default();
        let parsed_config: Config =
            toml::from_str(super::super::config::DEFAULT_CONFIG_TOML).expect("DEFAULT_CONFIG_TOML should parse successfully");

        let default_toml = toml::to_string(&default_config).expect("default config should serialize");
        let parsed_toml = toml::to_string(&parsed_config).expect("parsed config should serialize");

        assert_eq!(default_toml, parsed_toml, "Config::default() should match parsing DEFAULT_CONFIG_TOML");
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let (_dir, base) = temp_dir();

        let mut host = TestHost::new();
        let result = validate_config_in(&mut host, &base, &ValidateArgs { config: None });

        assert!(result.is_ok());
        assert!(host.output_str().contains("Using default configuration"));
    }

    #[test]
    fn test_config_file_found_in_base_dir() {
        let (_dir, base) = temp_dir();
        std::fs::write(base.join(CONFIG_FILE_NAME), "max_concurrent_requests = 1\n").expect("Failed to write test config");

        let mut host = TestHost::new();
        let result = validate_config_in(&mut host, &base, &ValidateArgs { config: None });

        assert!(result.is_ok());
        assert!(host.output_str().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let (host, result) = validate_file("stats_hosts = [\"https://api.npmjs.org\"\n");

        assert!(result.is_err(), "Invalid TOML syntax should fail validation");
        assert!(host.error_str().contains("Configuration validation failed"));
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    fn test_unknown_field() {
        let (host, result) = validate_file("unknown_field = \"value\"\n");

        assert!(result.is_err(), "Unknown field should fail validation");
        assert!(host.error_str().contains("unknown_field"));
    }

    #[test]
    fn test_invalid_duration_format() {
        let (_host, result) = validate_file("request_timeout = \"not a valid duration\"\n");
        assert!(result.is_err(), "Invalid duration format should fail validation");
    }

    #[test]
    fn test_empty_stats_hosts() {
        let (host, result) = validate_file("stats_hosts = []\n");

        assert!(result.is_err(), "Empty stats_hosts should fail validation");
        assert!(host.error_str().contains("stats_hosts"));
    }

    #[test]
    fn test_request_length_too_small() {
        let (_host, result) = validate_file("max_request_length = 10\n");
        assert!(result.is_err(), "A request length with no room for names should fail validation");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let (_host, result) = validate_file("# Empty config file\n");
        assert!(result.is_ok(), "Empty config should be valid (uses defaults)");
    }

    #[test]
    fn test_config_with_only_limits() {
        let (host, result) = validate_file(
            r#"
max_request_length = 4096
max_concurrent_requests = 2
request_timeout = "5s"
"#,
        );

        assert!(result.is_ok(), "Config with only limits should be valid: {result:?}");
        assert!(host.output_str().contains("up to 4047 characters"));
    }
}
