//! Configuration for Quill with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use std::path::PathBuf;
use std::time::Duration;

use quill_docs::{LoadRequest, RenderFlags, TemplateSource};
use serde::{Deserialize, Serialize};

pub use defaults::*;

/// Quill configuration - loaded from quill.config.json, `QUILL_*` variables
/// and CLI args.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuillConfig {
    /// Directory package patterns are resolved against
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Package directory pattern (`""`, `dir` or `dir/...`)
    #[serde(default)]
    pub pattern: String,

    /// Search subdirectories of the matched directory
    #[serde(default)]
    pub recursive: bool,

    /// Template file replacing the builtin layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// File name of the generated document in each package directory
    #[serde(default = "default_readme_name")]
    pub readme_name: String,

    /// `KEY=VALUE` assignments used to evaluate package constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,

    /// Section toggles
    #[serde(default)]
    pub render: RenderFlags,

    /// Update confirmation settings
    #[serde(default)]
    pub confirm: ConfirmConfig,
}

/// Settings of the update gatekeeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfirmConfig {
    /// Ask before overwriting existing files
    #[serde(default)]
    pub enabled: bool,

    /// Seconds to wait for an answer
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Localhost port of the confirmation page
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the confirmation page in a browser
    #[serde(default = "default_browser")]
    pub browser: bool,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: default_timeout(),
            port: default_port(),
            browser: default_browser(),
        }
    }
}

impl ConfirmConfig {
    /// Deadline for one confirmation session.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl QuillConfig {
    /// Load request for the source model provider.
    pub fn load_request(&self) -> crate::error::Result<LoadRequest> {
        Ok(LoadRequest {
            root: self.root.clone(),
            pattern: self.pattern.clone(),
            recursive: self.recursive,
            env: self.env_assignments()?,
        })
    }

    /// Layout source for the renderer.
    pub fn template_source(&self) -> TemplateSource {
        match &self.template {
            Some(path) => TemplateSource::File(path.clone()),
            None => TemplateSource::Builtin,
        }
    }
}
