#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use clap::Parser;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quill").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default_config();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.readme_name, "README.md");
        assert!(!config.confirm.enabled);
        assert_eq!(config.confirm.timeout(), Duration::from_secs(300));
        assert_eq!(config.confirm.port, 8080);
        assert!(config.confirm.browser);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_value(QuillConfig::default_config()).unwrap();
        assert!(json.get("readmeName").is_some());
        assert!(json.get("readme_name").is_none());
        assert!(json.get("template").is_none());
        assert_eq!(json["render"]["skipEmpty"], false);
    }

    #[test]
    fn test_validation() {
        let mut config = QuillConfig::default_config();
        config.confirm.timeout = 0;
        assert!(config.validate().is_err());

        let mut config = QuillConfig::default_config();
        config.readme_name = "docs/README.md".to_string();
        assert!(config.validate().is_err());

        let mut config = QuillConfig::default_config();
        config.env = vec!["OS".to_string()];
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::InvalidValue { .. }))
        ));

        config.env = vec!["OS=linux".to_string(), "ARCH=".to_string()];
        assert_eq!(
            config.env_assignments().unwrap(),
            vec![
                ("OS".to_string(), "linux".to_string()),
                ("ARCH".to_string(), String::new())
            ]
        );
    }

    #[test]
    #[serial]
    fn test_file_then_cli_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("quill.config.json"),
            r#"{
                "pattern": "pkg/...",
                "readmeName": "DOCS.md",
                "render": { "skipImports": true },
                "confirm": { "enabled": true, "port": 9000 }
            }"#,
        )
        .unwrap();

        let config = QuillConfig::load_from(&parse(&[]), temp.path()).unwrap();
        assert_eq!(config.pattern, "pkg/...");
        assert_eq!(config.readme_name, "DOCS.md");
        assert!(config.render.skip_imports);
        assert!(config.confirm.enabled);
        assert_eq!(config.confirm.port, 9000);
        assert_eq!(config.confirm.timeout, 300);

        let cli = parse(&["-p", "other", "--skip-empty", "--port", "9100", "--no-browser"]);
        let config = QuillConfig::load_from(&cli, temp.path()).unwrap();
        assert_eq!(config.pattern, "other");
        assert!(config.render.skip_imports);
        assert!(config.render.skip_empty);
        assert!(config.confirm.enabled);
        assert_eq!(config.confirm.port, 9100);
        assert!(!config.confirm.browser);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("quill.config.json"),
            r#"{ "pattern": "from-file" }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("QUILL_PATTERN", "from-env");
        }
        let from_env = QuillConfig::load_from(&parse(&[]), temp.path());
        let from_cli = QuillConfig::load_from(&parse(&["-p", "from-cli"]), temp.path());
        unsafe {
            std::env::remove_var("QUILL_PATTERN");
        }

        assert_eq!(from_env.unwrap().pattern, "from-env");
        assert_eq!(from_cli.unwrap().pattern, "from-cli");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        let cli = parse(&["--config", missing.to_str().unwrap()]);
        assert!(matches!(
            QuillConfig::load_from(&cli, temp.path()),
            Err(CliError::Config(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_unknown_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("quill.config.json"), r#"{ "entry": [] }"#).unwrap();
        assert!(QuillConfig::load_from(&parse(&[]), temp.path()).is_err());
    }
}
