//! Rendering of a package documentation model into one markdown document.
//!
//! The builtin layout lives in [`markdown`]; a `minijinja` template can
//! replace it. Both are driven by the same [`RenderCapabilities`].

pub mod capabilities;
mod markdown;
mod template;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::alerts::AlertIndex;
use crate::error::{DocsError, Result};
use crate::model::PackageDoc;

pub use capabilities::{PackageCapabilities, RenderCapabilities, strip_declaration};

/// Toggles that control which sections of a package are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderFlags {
    pub skip_imports: bool,
    pub skip_examples: bool,
    pub skip_vars: bool,
    pub skip_types: bool,
    pub skip_funcs: bool,
    pub skip_methods: bool,
    pub skip_filenames: bool,
    pub skip_consts: bool,
    /// Elide members whose documentation is blank.
    pub skip_empty: bool,
    /// Render only the title, package documentation and package alerts.
    pub skip_all: bool,
}

/// Sections of the rendered document that can be toggled off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Types,
    Funcs,
    Methods,
    Consts,
    Vars,
    Examples,
    Filenames,
    Imports,
}

impl Section {
    /// Parses a section name as used by templates (`types`, `funcs`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "types" => Some(Section::Types),
            "funcs" => Some(Section::Funcs),
            "methods" => Some(Section::Methods),
            "consts" => Some(Section::Consts),
            "vars" => Some(Section::Vars),
            "examples" => Some(Section::Examples),
            "filenames" => Some(Section::Filenames),
            "imports" => Some(Section::Imports),
            _ => None,
        }
    }
}

impl RenderFlags {
    /// Returns `true` when `section` should be rendered.
    pub fn shows(&self, section: Section) -> bool {
        if self.skip_all {
            return false;
        }
        !match section {
            Section::Types => self.skip_types,
            Section::Funcs => self.skip_funcs,
            Section::Methods => self.skip_methods,
            Section::Consts => self.skip_consts,
            Section::Vars => self.skip_vars,
            Section::Examples => self.skip_examples,
            Section::Filenames => self.skip_filenames,
            Section::Imports => self.skip_imports,
        }
    }

    /// Returns `true` when a member with documentation `doc` should be
    /// rendered.
    pub fn shows_doc(&self, doc: &str) -> bool {
        !(self.skip_empty && doc.trim().is_empty())
    }
}

/// Where the document layout comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The builtin section renderer.
    #[default]
    Builtin,
    /// A `minijinja` template file.
    File(PathBuf),
}

#[derive(Debug, Clone)]
struct LoadedTemplate {
    path: PathBuf,
    source: String,
}

/// Renders packages with a fixed set of flags and layout.
#[derive(Debug, Clone)]
pub struct Renderer {
    flags: RenderFlags,
    template: Option<LoadedTemplate>,
}

impl Renderer {
    /// Creates a renderer, reading the template file up front when one is
    /// configured.
    pub fn new(flags: RenderFlags, source: TemplateSource) -> Result<Self> {
        let template = match source {
            TemplateSource::Builtin => None,
            TemplateSource::File(path) => {
                let source =
                    std::fs::read_to_string(&path).map_err(|error| DocsError::Template {
                        path: path.clone(),
                        message: error.to_string(),
                    })?;
                Some(LoadedTemplate { path, source })
            }
        };
        Ok(Self { flags, template })
    }

    /// Creates a renderer with the builtin layout.
    pub fn builtin(flags: RenderFlags) -> Self {
        Self {
            flags,
            template: None,
        }
    }

    /// Renders `package` into markdown. The output is not yet normalized; run
    /// it through [`crate::format_markdown`] before writing.
    pub fn render(&self, package: &PackageDoc, alerts: &AlertIndex) -> Result<String> {
        let capabilities = PackageCapabilities::new(package, alerts.clone());
        match &self.template {
            None => Ok(markdown::render_package(package, &capabilities, self.flags)),
            Some(template) => template::render_package(
                &template.path,
                &template.source,
                package,
                capabilities,
                self.flags,
            ),
        }
    }
}
