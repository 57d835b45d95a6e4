//! Classification of `KIND(target): text` directives into GitHub markdown alerts.
//!
//! Two conventions are recognized:
//!
//! - **Inline**: the directive starts at column zero inside a unit's own
//!   documentation and is rewritten in place into a `> [!KIND]` callout.
//! - **Targeted**: the directive is preceded by exactly one space and may appear
//!   anywhere in the package's documentation corpus. It is collected into an
//!   [`AlertIndex`] and rendered right after the target's own section.
//!
//! Lines that follow neither convention are plain text. Classification never
//! fails.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::PackageDoc;

const DIRECTIVE_BODY: &str = r"(NOTE|WARNING|IMPORTANT|CAUTION|TIP)\(([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\):(.*)$";

static INLINE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{DIRECTIVE_BODY}")).expect("inline directive pattern is valid")
});

static TARGETED_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^ {DIRECTIVE_BODY}")).expect("targeted directive pattern is valid")
});

/// GitHub alert kinds, declared in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Note,
    Warning,
    Important,
    Caution,
    Tip,
}

impl AlertKind {
    /// All kinds in the order they are rendered.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Warning,
        AlertKind::Important,
        AlertKind::Caution,
        AlertKind::Tip,
    ];

    /// Directive keyword and alert label (e.g. `NOTE`).
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Note => "NOTE",
            AlertKind::Warning => "WARNING",
            AlertKind::Important => "IMPORTANT",
            AlertKind::Caution => "CAUTION",
            AlertKind::Tip => "TIP",
        }
    }

    /// Parses a directive keyword. Only the uppercase spelling is accepted.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == keyword)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single parsed directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Alert kind.
    pub kind: AlertKind,
    /// Identifier of the unit the alert belongs to.
    pub target: String,
    /// Alert text with surrounding whitespace removed.
    pub body: String,
}

impl Directive {
    /// Parses an inline directive (no leading whitespace).
    pub fn parse_inline(line: &str) -> Option<Self> {
        Self::from_captures(&INLINE_DIRECTIVE, line)
    }

    /// Parses a targeted directive (exactly one leading space).
    pub fn parse_targeted(line: &str) -> Option<Self> {
        Self::from_captures(&TARGETED_DIRECTIVE, line)
    }

    fn from_captures(pattern: &Regex, line: &str) -> Option<Self> {
        let captures = pattern.captures(line.trim_end_matches('\r'))?;
        Some(Self {
            kind: AlertKind::from_keyword(&captures[1])?,
            target: captures[2].to_string(),
            body: captures[3].trim().to_string(),
        })
    }

    /// Renders the directive as a standalone blockquote callout.
    pub fn to_callout(&self) -> String {
        format!("> [!{}]\n> {}", self.kind, self.body)
    }
}

/// Targeted directives grouped by target and kind.
#[derive(Debug, Default, Clone)]
pub struct AlertIndex {
    alerts: BTreeMap<String, BTreeMap<AlertKind, Vec<Directive>>>,
}

impl AlertIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every targeted directive in the package's documentation corpus.
    pub fn build(package: &PackageDoc) -> Self {
        Self::from_texts(package.documentation_corpus())
    }

    /// Collects targeted directives from texts given in source-encounter order.
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = Self::new();
        for text in texts {
            for line in text.split('\n') {
                if let Some(directive) = Directive::parse_targeted(line) {
                    index.insert(directive);
                }
            }
        }
        index
    }

    /// Appends a directive after the existing ones of the same target and kind.
    pub fn insert(&mut self, directive: Directive) {
        self.alerts
            .entry(directive.target.clone())
            .or_default()
            .entry(directive.kind)
            .or_default()
            .push(directive);
    }

    /// Directives for `target`, grouped by kind in rendering order. Kinds
    /// without directives are omitted.
    pub fn for_target(&self, target: &str) -> Vec<(AlertKind, &[Directive])> {
        let Some(by_kind) = self.alerts.get(target) else {
            return Vec::new();
        };
        AlertKind::ALL
            .into_iter()
            .filter_map(|kind| {
                by_kind
                    .get(&kind)
                    .filter(|directives| !directives.is_empty())
                    .map(|directives| (kind, directives.as_slice()))
            })
            .collect()
    }

    /// Renders the alerts for `target` as blockquote callouts, one block per
    /// kind. Returns an empty string when the target has no alerts.
    pub fn render(&self, target: &str) -> String {
        let blocks: Vec<String> = self
            .for_target(target)
            .into_iter()
            .map(|(kind, directives)| {
                let mut block = format!("> [!{kind}]");
                for directive in directives {
                    block.push_str("\n> ");
                    block.push_str(&directive.body);
                }
                block
            })
            .collect();

        if blocks.is_empty() {
            String::new()
        } else {
            let mut rendered = blocks.join("\n\n");
            rendered.push('\n');
            rendered
        }
    }

    /// Number of targets with at least one alert.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Returns `true` when no directive was collected.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Returns a copy of `doc` with inline directives rewritten into callouts and
/// targeted directive lines removed.
pub fn resolve_inline(doc: &str) -> String {
    doc.split('\n')
        .filter(|line| Directive::parse_targeted(line).is_none())
        .map(|line| match Directive::parse_inline(line) {
            Some(directive) => directive.to_callout(),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
