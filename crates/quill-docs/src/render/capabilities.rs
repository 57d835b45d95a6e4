use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::alerts::{self, AlertIndex};
use crate::model::{DocUnit, ExampleDoc, PackageDoc, SourceLocation, UnitKind};

/// Named operations the renderers are built from.
///
/// Both the builtin renderer and template overrides go through this interface,
/// so a template sees exactly the same link, declaration and alert output as
/// the default layout.
pub trait RenderCapabilities {
    /// Document title.
    fn title(&self) -> String;

    /// Documentation text with inline directives rewritten into callouts.
    fn resolve_doc(&self, doc: &str) -> String;

    /// Fenced code block with the unit's signature.
    fn format_node(&self, unit: &DocUnit) -> String;

    /// Markdown link to a source range.
    fn build_link(&self, title: &str, location: &SourceLocation) -> String;

    /// Collapsible block for a runnable example.
    fn render_example(&self, example: &ExampleDoc) -> String;

    /// Targeted alerts for `target`, empty when there are none.
    fn lookup_alert(&self, target: &str) -> String;
}

/// Capabilities bound to one package and its alert index.
#[derive(Debug, Clone)]
pub struct PackageCapabilities {
    name: String,
    doc: String,
    dir: PathBuf,
    language: String,
    alerts: AlertIndex,
}

impl PackageCapabilities {
    /// Binds the capabilities to `package`.
    pub fn new(package: &PackageDoc, alerts: AlertIndex) -> Self {
        Self {
            name: package.name.clone(),
            doc: package.doc.clone(),
            dir: package.dir.clone(),
            language: package.fence_language().to_string(),
            alerts,
        }
    }

    /// Package documentation without the line used as title.
    pub fn body(&self) -> &str {
        match title_line(&self.doc) {
            Some(_) => self.doc.split_once('\n').map_or("", |(_, rest)| rest),
            None => &self.doc,
        }
    }

    /// Link target for `file`, relative to the package directory and prefixed
    /// with `./`.
    pub fn relative_file(&self, file: &Path) -> String {
        let relative = if file.is_absolute() {
            file.strip_prefix(&self.dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| file.file_name().map(PathBuf::from).unwrap_or_default())
        } else {
            file.to_path_buf()
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        format!("./{}", relative.trim_start_matches("./"))
    }
}

impl RenderCapabilities for PackageCapabilities {
    fn title(&self) -> String {
        match title_line(&self.doc) {
            Some(line) => line.to_string(),
            None => format!("Package `{}`", self.name),
        }
    }

    fn resolve_doc(&self, doc: &str) -> String {
        alerts::resolve_inline(doc)
    }

    fn format_node(&self, unit: &DocUnit) -> String {
        format!(
            "```{}\n{}\n```\n",
            self.language,
            strip_declaration(&unit.decl, unit.kind)
        )
    }

    fn build_link(&self, title: &str, location: &SourceLocation) -> String {
        format!(
            "[{}]({}#L{}-L{})",
            title,
            self.relative_file(&location.file),
            location.start_line,
            location.end_line
        )
    }

    fn render_example(&self, example: &ExampleDoc) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "<details>");
        let _ = writeln!(buffer, "<summary>{}</summary>\n", example.name);

        let doc = self.resolve_doc(&example.doc);
        if !doc.trim().is_empty() {
            let _ = writeln!(buffer, "{}\n", doc.trim_end());
        }

        let _ = writeln!(buffer, "```{}", self.language);
        let _ = writeln!(buffer, "{}", example.code.trim_end());
        if !example.output.trim().is_empty() {
            let _ = writeln!(buffer, "// Output:");
            for line in example.output.trim_end_matches('\n').split('\n') {
                let _ = writeln!(buffer, "// {line}");
            }
        }
        let _ = writeln!(buffer, "```\n");
        let _ = writeln!(buffer, "</details>");
        buffer
    }

    fn lookup_alert(&self, target: &str) -> String {
        self.alerts.render(target)
    }
}

fn title_line(doc: &str) -> Option<&str> {
    let first = doc.split('\n').next().unwrap_or("").trim();
    (!first.is_empty()).then_some(first)
}

/// Strips the leading doc comment from a declaration and, for functions and
/// methods, the body, leaving only the signature.
pub fn strip_declaration(decl: &str, kind: UnitKind) -> String {
    let declaration = skip_leading_comments(decl).trim_end();

    match kind {
        UnitKind::Func | UnitKind::Method => strip_body(declaration).to_string(),
        _ => declaration.to_string(),
    }
}

fn skip_leading_comments(decl: &str) -> &str {
    let mut rest = decl;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, next)| next);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, next)| next);
        } else {
            return rest;
        }
    }
}

/// Cuts the body off a function declaration. The body is the first brace
/// block outside parameter and type-parameter lists that is not a `struct` or
/// `interface` literal, and it must close at the end of the declaration.
fn strip_body(declaration: &str) -> &str {
    let bytes = declaration.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_opaque(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b'{' if depth == 0 => {
                let Some(close) = matching_brace(bytes, i) else {
                    return declaration;
                };
                if is_type_literal(&declaration[..i]) {
                    i = close + 1;
                    continue;
                }
                return if declaration[close + 1..].trim().is_empty() {
                    declaration[..i].trim_end()
                } else {
                    declaration
                };
            }
            _ => {}
        }
        i += 1;
    }
    declaration
}

fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(next) = skip_opaque(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index just past the comment or string, raw string or rune literal that
/// starts at `i`, if any.
fn skip_opaque(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        quote @ (b'"' | b'\'') => {
            let mut j = i + 1;
            while j < bytes.len() {
                match bytes[j] {
                    b'\\' => j += 2,
                    b'\n' => return Some(j),
                    b if b == quote => return Some(j + 1),
                    _ => j += 1,
                }
            }
            Some(bytes.len())
        }
        b'`' => Some(find(bytes, i + 1, b"`").map_or(bytes.len(), |j| j + 1)),
        b'/' if bytes.get(i + 1) == Some(&b'/') => {
            Some(find(bytes, i + 2, b"\n").unwrap_or(bytes.len()))
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
            Some(find(bytes, i + 2, b"*/").map_or(bytes.len(), |j| j + 2))
        }
        _ => None,
    }
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|position| position + from)
}

fn is_type_literal(prefix: &str) -> bool {
    let prefix = prefix.trim_end();
    ["struct", "interface"].iter().any(|keyword| {
        prefix
            .strip_suffix(keyword)
            .is_some_and(|before| !before.ends_with(|c: char| c.is_alphanumeric() || c == '_'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capabilities(doc: &str) -> PackageCapabilities {
        let mut package = PackageDoc::new("demo", "/src/demo");
        package.doc = doc.to_string();
        package.language = Some("go".to_string());
        PackageCapabilities::new(&package, AlertIndex::new())
    }

    #[test]
    fn title_uses_first_doc_line() {
        let caps = capabilities("Title\nBody");
        assert_eq!(caps.title(), "Title");
        assert_eq!(caps.body(), "Body");
    }

    #[test]
    fn title_falls_back_to_package_name() {
        let caps = capabilities("");
        assert_eq!(caps.title(), "Package `demo`");
        assert_eq!(caps.body(), "");

        let caps = capabilities("\nBody after blank title");
        assert_eq!(caps.title(), "Package `demo`");
        assert_eq!(caps.body(), "\nBody after blank title");
    }

    #[test]
    fn links_are_relative_to_the_package() {
        let caps = capabilities("");
        let absolute = SourceLocation::new("/src/demo/reader.go", 10, 20);
        assert_eq!(
            caps.build_link("type Reader", &absolute),
            "[type Reader](./reader.go#L10-L20)"
        );

        let relative = SourceLocation::new("sub/writer.go", 3, 3);
        assert_eq!(caps.build_link("w", &relative), "[w](./sub/writer.go#L3-L3)");
    }

    #[test]
    fn strips_function_bodies_and_doc_comments() {
        let decl = "// Open opens.\n// More.\nfunc Open(opts map[string]struct{}) (*File, error) {\n\treturn nil, nil\n}";
        assert_eq!(
            strip_declaration(decl, UnitKind::Func),
            "func Open(opts map[string]struct{}) (*File, error)"
        );
    }

    #[test]
    fn keeps_type_bodies() {
        let decl = "/* Reader reads.\n */\ntype Reader struct {\n\tbuf []byte\n}";
        assert_eq!(
            strip_declaration(decl, UnitKind::Type),
            "type Reader struct {\n\tbuf []byte\n}"
        );
    }

    #[test]
    fn signature_without_body_is_untouched() {
        assert_eq!(
            strip_declaration("Read(p []byte) (int, error)", UnitKind::Method),
            "Read(p []byte) (int, error)"
        );
    }

    #[test]
    fn braces_inside_literals_do_not_end_the_signature() {
        assert_eq!(
            strip_declaration("func F() string {\n\treturn \"{\"\n}", UnitKind::Func),
            "func F() string"
        );
        assert_eq!(
            strip_declaration("func G() rune {\n\treturn '}' // }\n}", UnitKind::Func),
            "func G() rune"
        );
        assert_eq!(
            strip_declaration("func H() string {\n\treturn `{`\n}", UnitKind::Func),
            "func H() string"
        );
    }

    #[test]
    fn struct_result_is_not_a_body() {
        assert_eq!(
            strip_declaration("func F() struct{}", UnitKind::Func),
            "func F() struct{}"
        );
        assert_eq!(
            strip_declaration("func F() struct{} {\n\treturn struct{}{}\n}", UnitKind::Func),
            "func F() struct{}"
        );
        assert_eq!(
            strip_declaration("func (s *S) Stop() interface{ Wait() } {\n\treturn s\n}", UnitKind::Method),
            "func (s *S) Stop() interface{ Wait() }"
        );
    }

    #[test]
    fn inline_block_comment_keeps_the_declaration() {
        assert_eq!(strip_declaration("/* c */ type X int", UnitKind::Type), "type X int");
        assert_eq!(
            strip_declaration("/* a\n b */ func F() {\n}", UnitKind::Func),
            "func F()"
        );
    }

    #[test]
    fn unbalanced_body_is_kept() {
        assert_eq!(
            strip_declaration("func F() {\n\treturn", UnitKind::Func),
            "func F() {\n\treturn"
        );
    }

    #[test]
    fn examples_prefix_output_lines() {
        let caps = capabilities("");
        let example = ExampleDoc {
            name: "ExampleHello".to_string(),
            doc: String::new(),
            code: "func ExampleHello() {\n\tfmt.Println(\"hi\")\n}".to_string(),
            output: "hi\nthere\n".to_string(),
            location: SourceLocation::new("x_test.go", 1, 3),
        };
        let rendered = caps.render_example(&example);
        assert!(rendered.starts_with("<details>\n<summary>ExampleHello</summary>\n\n```go\n"));
        assert!(rendered.contains("// Output:\n// hi\n// there\n```"));
        assert!(rendered.ends_with("</details>\n"));
    }
}
