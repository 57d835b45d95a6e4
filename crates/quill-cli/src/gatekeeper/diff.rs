//! Line diff between an existing document and its replacement, rendered as
//! the HTML page served on the confirmation endpoint.

use std::path::Path;

use minijinja::{Environment, context};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::error::{CliError, Result};

const DIFF_TEMPLATE: &str = include_str!("../../assets/diff.html");
const ANSWER_TEMPLATE: &str = include_str!("../../assets/answer.html");

/// Kind of a diff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineChange {
    Equal,
    Insert,
    Delete,
}

/// One line of the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub change: LineChange,
    pub text: String,
}

/// Line diff of two documents.
#[derive(Debug, Clone, Serialize)]
pub struct DiffView {
    pub lines: Vec<DiffLine>,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffView {
    /// Diffs `existing` against `candidate` line by line.
    pub fn new(existing: &str, candidate: &str) -> Self {
        let diff = TextDiff::from_lines(existing, candidate);
        let mut view = Self {
            lines: Vec::new(),
            insertions: 0,
            deletions: 0,
        };

        for change in diff.iter_all_changes() {
            let kind = match change.tag() {
                ChangeTag::Equal => LineChange::Equal,
                ChangeTag::Insert => {
                    view.insertions += 1;
                    LineChange::Insert
                }
                ChangeTag::Delete => {
                    view.deletions += 1;
                    LineChange::Delete
                }
            };
            view.lines.push(DiffLine {
                change: kind,
                text: change.value().trim_end_matches(['\n', '\r']).to_string(),
            });
        }
        view
    }

    /// Renders the review page for `path`.
    pub fn to_html(&self, path: &Path) -> Result<String> {
        render_page(
            "diff.html",
            DIFF_TEMPLATE,
            context! { path => path.display().to_string(), diff => self },
        )
    }
}

/// Page returned once an answer is recorded. It hands the file over to the
/// editor through a `vscode://file` link.
pub fn answer_page(path: &Path, accepted: bool) -> Result<String> {
    render_page(
        "answer.html",
        ANSWER_TEMPLATE,
        context! {
            path => path.display().to_string(),
            editor_link => format!("vscode://file{}", path.display()),
            accepted => accepted,
        },
    )
}

fn render_page(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    // `.html` names turn on auto-escaping.
    let mut env = Environment::new();
    env.add_template(name, source)
        .and_then(|_| env.get_template(name)?.render(ctx))
        .map_err(|e| CliError::Gatekeeper(format!("failed to render {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_changes() {
        let view = DiffView::new("# Title\nold line\nsame\n", "# Title\nnew line\nsame\nextra\n");
        assert_eq!(view.insertions, 2);
        assert_eq!(view.deletions, 1);
        assert_eq!(view.lines[0].change, LineChange::Equal);
        assert_eq!(view.lines[0].text, "# Title");

    }

    #[test]
    fn identical_documents_have_no_changes() {
        let view = DiffView::new("a\nb\n", "a\nb\n");
        assert_eq!((view.insertions, view.deletions), (0, 0));
        assert!(view.lines.iter().all(|line| line.change == LineChange::Equal));
    }

    #[test]
    fn page_escapes_content() {
        let view = DiffView::new("<b>old</b>\n", "<script>new</script>\n");
        let html = view.to_html(Path::new("/tmp/pkg/README.md")).unwrap();
        assert!(html.contains("&lt;script&gt;new"));
        assert!(!html.contains("<script>new"));
        assert!(html.contains("README.md"));
        assert!(html.contains("+1 / -1"));
    }

    #[test]
    fn answer_page_links_to_editor() {
        let html = answer_page(Path::new("/tmp/pkg/README.md"), true).unwrap();
        assert!(html.contains("vscode:"));
        assert!(html.contains("README.md"));
        assert!(html.contains("Accepted"));
    }
}
