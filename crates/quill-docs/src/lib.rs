#![deny(clippy::all)]

//! Documentation model, alert classification and markdown rendering for Quill.
//!
//! This crate provides:
//! - A documentation model for packages and their documentable units.
//! - A classifier that turns `KIND(target): text` directives into GitHub alerts.
//! - A renderer that produces one README-style markdown document per package.
//! - A formatter that normalizes whitespace in the rendered markdown.
//! - A source model provider that loads packages from `docmodel.json` manifests.

pub mod alerts;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod render;

pub use alerts::{AlertIndex, AlertKind, Directive};
pub use error::{DocsError, Result};
pub use format::format_markdown;
pub use model::{Comment, DocUnit, ExampleDoc, PackageDoc, SourceLocation, TypeDoc, UnitKind};
pub use provider::{LoadRequest, ManifestProvider, SourceModelProvider, MANIFEST_FILE};
pub use render::{RenderFlags, Renderer, TemplateSource};
