use crate::cli::parse_env_assignment;
use crate::config::QuillConfig;
use crate::error::{ConfigError, Result};

impl QuillConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.confirm.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirm.timeout".to_string(),
                value: "0".to_string(),
                hint: "Use a timeout of at least one second".to_string(),
            }
            .into());
        }

        let readme_name = self.readme_name.trim();
        if readme_name.is_empty() || readme_name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "readmeName".to_string(),
                value: self.readme_name.clone(),
                hint: "Use a plain file name such as README.md".to_string(),
            }
            .into());
        }

        self.env_assignments()?;
        Ok(())
    }

    /// Parsed `env` assignments, in the order given.
    pub fn env_assignments(&self) -> Result<Vec<(String, String)>> {
        self.env
            .iter()
            .map(|assignment| {
                parse_env_assignment(assignment).map_err(|hint| {
                    ConfigError::InvalidValue {
                        field: "env".to_string(),
                        value: assignment.clone(),
                        hint,
                    }
                    .into()
                })
            })
            .collect()
    }
}
