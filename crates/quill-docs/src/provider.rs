//! Loading of package documentation models.
//!
//! Extracting documentation from source code is left to external tooling; the
//! bundled [`ManifestProvider`] reads the `docmodel.json` manifests that such
//! tooling writes next to each package.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{DocsError, Result};
use crate::model::PackageDoc;

/// File name of a package documentation manifest.
pub const MANIFEST_FILE: &str = "docmodel.json";

const RECURSIVE_SUFFIX: &str = "...";

/// Parameters for a load.
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    /// Directory patterns are resolved against.
    pub root: PathBuf,
    /// Directory pattern: empty for the root, `dir` for one directory,
    /// `dir/...` for a directory and everything below it.
    pub pattern: String,
    /// Walk subdirectories even without a `/...` suffix.
    pub recursive: bool,
    /// Environment assignments that take precedence over the process
    /// environment when evaluating package constraints.
    pub env: Vec<(String, String)>,
}

impl LoadRequest {
    /// Creates a request for `pattern` under `root`.
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Directory to search and whether to descend into subdirectories.
    pub fn search_dir(&self) -> (PathBuf, bool) {
        let pattern = self.pattern.trim();
        let (base, recursive) = match pattern.strip_suffix(RECURSIVE_SUFFIX) {
            Some(base) => (base.trim_end_matches('/'), true),
            None => (pattern, self.recursive),
        };

        let dir = match base {
            "" | "." | "./" => self.root.clone(),
            base => self.root.join(base),
        };
        (dir, recursive)
    }

    /// Value of `key`: the last passthrough assignment wins, then the process
    /// environment.
    pub fn env_value(&self, key: &str) -> Option<String> {
        self.env
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .or_else(|| std::env::var(key).ok())
    }
}

/// Supplies the documentation model for every package matched by a request.
pub trait SourceModelProvider {
    /// Loads the matched packages, sorted by name.
    fn load(&self, request: &LoadRequest) -> Result<Vec<PackageDoc>>;
}

/// Loads packages from `docmodel.json` manifests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestProvider;

impl ManifestProvider {
    pub fn new() -> Self {
        Self
    }

    fn manifests(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if !recursive || !dir.is_dir() {
            let manifest = dir.join(MANIFEST_FILE);
            return Ok(if manifest.is_file() {
                vec![manifest]
            } else {
                Vec::new()
            });
        }

        let mut manifests = Vec::new();
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry));
        for entry in walker {
            let entry = entry.map_err(|error| DocsError::Io {
                path: error.path().unwrap_or(dir).to_path_buf(),
                error: error.into(),
            })?;
            if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE {
                manifests.push(entry.into_path());
            }
        }
        Ok(manifests)
    }

    fn read_manifest(path: &Path) -> Result<PackageDoc> {
        let contents = std::fs::read_to_string(path).map_err(|error| DocsError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let mut package: PackageDoc =
            serde_json::from_str(&contents).map_err(|error| DocsError::Manifest {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?;

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if package.name.trim().is_empty() {
            return Err(DocsError::Manifest {
                path: path.to_path_buf(),
                message: "package name is empty".to_string(),
            });
        }
        package.dir = dir;
        Ok(package)
    }
}

impl SourceModelProvider for ManifestProvider {
    fn load(&self, request: &LoadRequest) -> Result<Vec<PackageDoc>> {
        let (dir, recursive) = request.search_dir();
        tracing::debug!(dir = %dir.display(), recursive, "Searching for documentation manifests");

        let mut packages = Vec::new();
        for manifest in Self::manifests(&dir, recursive)? {
            let package = Self::read_manifest(&manifest)?;
            if let Some((key, expected)) = unmet_constraint(&package, request) {
                tracing::debug!(
                    package = %package.name,
                    key,
                    expected,
                    "Skipping package excluded by environment"
                );
                continue;
            }
            packages.push(package);
        }

        if packages.is_empty() {
            return Err(DocsError::NoPackages {
                root: request.root.clone(),
                pattern: request.pattern.clone(),
            });
        }

        packages.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.import_path.cmp(&b.import_path))
        });
        Ok(packages)
    }
}

fn unmet_constraint<'a>(
    package: &'a PackageDoc,
    request: &LoadRequest,
) -> Option<(&'a str, &'a str)> {
    package
        .requires_env
        .iter()
        .find(|(key, expected)| request.env_value(key).as_deref() != Some(expected.as_str()))
        .map(|(key, expected)| (key.as_str(), expected.as_str()))
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}
