use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Documentation model for a single package: the package unit and every member
/// that can carry documentation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDoc {
    /// Package name; also the alert target for package-level directives.
    pub name: String,
    /// Fully qualified import path, used to break ordering ties.
    #[serde(default)]
    pub import_path: String,
    /// Directory holding the package sources. Filled in by the provider.
    #[serde(default)]
    pub dir: PathBuf,
    /// Raw package documentation text.
    #[serde(default)]
    pub doc: String,
    /// Language used for fenced code blocks (e.g. `go`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Source files of the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
    /// Imported package paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Exported types with their associated members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDoc>,
    /// Package-level functions not associated with a type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<DocUnit>,
    /// Package-level constant declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consts: Vec<DocUnit>,
    /// Package-level variable declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<DocUnit>,
    /// Runnable examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleDoc>,
    /// Comments that are not attached to any unit but still belong to the
    /// documentation corpus (targeted directives may live here).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    /// Environment constraints; the package only loads when all of them match.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires_env: BTreeMap<String, String>,
}

impl PackageDoc {
    /// Creates an empty package rooted at `dir`.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Language tag for fenced code blocks, empty when unknown.
    pub fn fence_language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }

    /// Every documentation text of the package in source-encounter order.
    ///
    /// The package documentation always comes first; member documentation and
    /// loose comments follow, ordered by file and start line.
    pub fn documentation_corpus(&self) -> Vec<&str> {
        let mut located: Vec<(&SourceLocation, &str)> = Vec::new();

        for ty in &self.types {
            located.push((&ty.unit.location, ty.unit.doc.as_str()));
            for member in ty.members() {
                located.push((&member.location, member.doc.as_str()));
            }
        }
        for unit in self.funcs.iter().chain(&self.consts).chain(&self.vars) {
            located.push((&unit.location, unit.doc.as_str()));
        }
        for example in &self.examples {
            located.push((&example.location, example.doc.as_str()));
        }
        for comment in &self.comments {
            located.push((&comment.location, comment.text.as_str()));
        }

        // Stable sort keeps declaration order for units sharing a position.
        located.sort_by(|(a, _), (b, _)| a.file.cmp(&b.file).then(a.start_line.cmp(&b.start_line)));

        std::iter::once(self.doc.as_str())
            .chain(located.into_iter().map(|(_, text)| text))
            .collect()
    }
}

/// A named source entity carrying a free-form documentation comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocUnit {
    /// Identifier of the unit.
    pub name: String,
    /// Unit kind.
    pub kind: UnitKind,
    /// Receiver type for methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Raw declaration text as it appears in the source.
    #[serde(default)]
    pub decl: String,
    /// Raw documentation text.
    #[serde(default)]
    pub doc: String,
    /// Where the declaration lives.
    pub location: SourceLocation,
}

impl DocUnit {
    /// Creates a unit without declaration or documentation text.
    pub fn new(name: impl Into<String>, kind: UnitKind, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            receiver: None,
            decl: String::new(),
            doc: String::new(),
            location,
        }
    }

    /// Sets the declaration text.
    pub fn with_decl(mut self, decl: impl Into<String>) -> Self {
        self.decl = decl.into();
        self
    }

    /// Sets the documentation text.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Sets the receiver type, turning the unit into a method.
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Identifier used to target the unit with alerts. Methods are addressed
    /// as `Receiver.Method`.
    pub fn uid(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{}.{}", receiver.trim_start_matches('*'), self.name),
            None => self.name.clone(),
        }
    }

    /// Returns `true` when the documentation text is blank.
    pub fn is_undocumented(&self) -> bool {
        self.doc.trim().is_empty()
    }
}

/// A type declaration with the members grouped under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDoc {
    /// The type unit itself.
    #[serde(flatten)]
    pub unit: DocUnit,
    /// Constants typed with this type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consts: Vec<DocUnit>,
    /// Variables typed with this type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<DocUnit>,
    /// Constructor functions returning this type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<DocUnit>,
    /// Methods with this type as receiver.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<DocUnit>,
}

impl TypeDoc {
    /// Wraps a type unit with no members.
    pub fn new(unit: DocUnit) -> Self {
        Self {
            unit,
            consts: Vec::new(),
            vars: Vec::new(),
            funcs: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// All member units in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &DocUnit> {
        self.consts
            .iter()
            .chain(&self.vars)
            .chain(&self.funcs)
            .chain(&self.methods)
    }
}

/// A runnable example.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleDoc {
    /// Example function name (e.g. `ExampleReader_Read`).
    pub name: String,
    /// Example documentation text.
    #[serde(default)]
    pub doc: String,
    /// Example source code.
    pub code: String,
    /// Expected output, one entry per line when split on `\n`.
    #[serde(default)]
    pub output: String,
    /// Where the example is declared.
    pub location: SourceLocation,
}

/// A comment that is not attached to any declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Raw comment text.
    pub text: String,
    /// Where the comment starts.
    pub location: SourceLocation,
}

/// Enumerates documentable unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Package,
    Type,
    Func,
    Method,
    Const,
    Var,
    Example,
}

impl UnitKind {
    /// Keyword used in section link titles.
    pub fn keyword(self) -> &'static str {
        match self {
            UnitKind::Package => "package",
            UnitKind::Type => "type",
            UnitKind::Func | UnitKind::Method => "func",
            UnitKind::Const => "const",
            UnitKind::Var => "var",
            UnitKind::Example => "example",
        }
    }
}

/// Source position of a unit: file plus an inclusive, one-based line range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Source file, relative to the package directory or absolute.
    pub file: PathBuf,
    /// One-based first line.
    pub start_line: u32,
    /// One-based last line.
    pub end_line: u32,
}

impl SourceLocation {
    /// Creates a location spanning `start_line..=end_line` of `file`.
    pub fn new(file: impl Into<PathBuf>, start_line: u32, end_line: u32) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_uid_includes_receiver() {
        let method = DocUnit::new("Close", UnitKind::Method, SourceLocation::new("r.go", 3, 5))
            .with_receiver("*Reader");
        assert_eq!(method.uid(), "Reader.Close");
    }

    #[test]
    fn corpus_starts_with_package_doc_and_follows_source_order() {
        let mut pkg = PackageDoc::new("demo", "/tmp/demo");
        pkg.doc = "package doc".to_string();
        pkg.funcs.push(
            DocUnit::new("Late", UnitKind::Func, SourceLocation::new("a.go", 40, 42))
                .with_doc("late"),
        );
        pkg.funcs.push(
            DocUnit::new("Early", UnitKind::Func, SourceLocation::new("a.go", 10, 12))
                .with_doc("early"),
        );
        pkg.comments.push(Comment {
            text: "loose".to_string(),
            location: SourceLocation::new("a.go", 20, 20),
        });

        assert_eq!(
            pkg.documentation_corpus(),
            vec!["package doc", "early", "loose", "late"]
        );
    }

    #[test]
    fn type_doc_deserializes_flattened_unit() {
        let json = r#"{
            "name": "Reader",
            "kind": "type",
            "decl": "type Reader struct{}",
            "location": { "file": "r.go", "startLine": 1, "endLine": 1 },
            "methods": [{
                "name": "Read",
                "kind": "method",
                "receiver": "*Reader",
                "location": { "file": "r.go", "startLine": 3, "endLine": 6 }
            }]
        }"#;
        let ty: TypeDoc = serde_json::from_str(json).expect("valid type json");
        assert_eq!(ty.unit.name, "Reader");
        assert_eq!(ty.methods[0].uid(), "Reader.Read");
    }
}
