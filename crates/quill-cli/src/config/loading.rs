use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;

use crate::cli::Cli;
use crate::config::QuillConfig;
use crate::error::{ConfigError, Result};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "quill.config.json";

/// Environment variables read with the `QUILL_` prefix.
const ENV_KEYS: [&str; 3] = ["root", "pattern", "template"];

impl QuillConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &Cli) -> Result<Self> {
        Self::load_from(args, Path::new("."))
    }

    /// Like [`QuillConfig::load`], looking for the default config file in
    /// `cwd`.
    pub fn load_from(args: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match &args.config {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = cwd.join(CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };
        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Json::file(path));
        }

        // QUILL_ROOT, QUILL_PATTERN, QUILL_TEMPLATE
        figment = figment.merge(Env::prefixed("QUILL_").only(&ENV_KEYS));

        // Only flags that were actually given override earlier sources.
        figment = figment.merge(Serialized::defaults(CliOverrides::from_args(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check quill.config.json syntax and field types".to_string(),
            }
            .into()
        })
    }

    /// Get default configuration values.
    pub fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            root: default_root(),
            pattern: String::new(),
            recursive: false,
            template: None,
            readme_name: default_readme_name(),
            env: Vec::new(),
            render: Default::default(),
            confirm: Default::default(),
        }
    }
}

/// The subset of [`QuillConfig`] set on the command line.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recursive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    render: BTreeMap<&'static str, bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    confirm: BTreeMap<&'static str, serde_json::Value>,
}

impl CliOverrides {
    fn from_args(args: &Cli) -> Self {
        let set = |flag: bool| flag.then_some(true);

        let render: BTreeMap<&'static str, bool> = [
            ("skipImports", args.skip_imports),
            ("skipExamples", args.skip_examples),
            ("skipVars", args.skip_vars),
            ("skipTypes", args.skip_types),
            ("skipFuncs", args.skip_funcs),
            ("skipMethods", args.skip_methods),
            ("skipFilenames", args.skip_filenames),
            ("skipConsts", args.skip_consts),
            ("skipEmpty", args.skip_empty),
            ("skipAll", args.skip_all),
        ]
        .into_iter()
        .filter(|(_, flag)| *flag)
        .collect();

        let mut confirm = BTreeMap::new();
        if args.confirm {
            confirm.insert("enabled", serde_json::Value::Bool(true));
        }
        if let Some(timeout) = args.timeout {
            confirm.insert("timeout", timeout.into());
        }
        if let Some(port) = args.port {
            confirm.insert("port", port.into());
        }
        if args.no_browser {
            confirm.insert("browser", serde_json::Value::Bool(false));
        }

        Self {
            root: args.root.clone(),
            pattern: args.package.clone(),
            recursive: set(args.recursive),
            template: args.template.clone(),
            env: args.env.as_ref().map(|env| env.0.clone()),
            render,
            confirm,
        }
    }
}
