use std::fmt::Write;

use super::capabilities::{PackageCapabilities, RenderCapabilities};
use super::{RenderFlags, Section};
use crate::model::{DocUnit, PackageDoc, TypeDoc};

/// Renders the builtin README layout for `package`.
pub(crate) fn render_package(
    package: &PackageDoc,
    caps: &PackageCapabilities,
    flags: RenderFlags,
) -> String {
    let mut output = String::new();

    let _ = writeln!(&mut output, "# {}\n", caps.title());

    let body = caps.resolve_doc(caps.body());
    if let Some(body) = non_empty(&body) {
        let _ = writeln!(&mut output, "{}\n", body.trim_end());
    }

    push_alerts(&mut output, caps, &package.name);

    if flags.skip_all {
        return output;
    }

    render_types(&mut output, package, caps, flags);
    render_units(&mut output, "Functions", &package.funcs, Section::Funcs, caps, flags);
    render_units(&mut output, "Constants", &package.consts, Section::Consts, caps, flags);
    render_units(&mut output, "Variables", &package.vars, Section::Vars, caps, flags);
    render_examples(&mut output, package, caps, flags);
    render_files(&mut output, package, caps, flags);
    render_imports(&mut output, package, flags);

    output
}

fn render_types(
    buffer: &mut String,
    package: &PackageDoc,
    caps: &PackageCapabilities,
    flags: RenderFlags,
) {
    if !flags.shows(Section::Types) {
        return;
    }
    let visible: Vec<&TypeDoc> = package
        .types
        .iter()
        .filter(|ty| flags.shows_doc(&ty.unit.doc))
        .collect();
    if visible.is_empty() {
        return;
    }

    let _ = writeln!(buffer, "## Types\n");
    for ty in visible {
        render_unit(buffer, &ty.unit, 3, caps);

        let members = [
            (Section::Consts, &ty.consts),
            (Section::Vars, &ty.vars),
            (Section::Funcs, &ty.funcs),
            (Section::Methods, &ty.methods),
        ];
        for (section, units) in members {
            if !flags.shows(section) {
                continue;
            }
            for unit in units.iter().filter(|unit| flags.shows_doc(&unit.doc)) {
                render_unit(buffer, unit, 4, caps);
            }
        }
    }
}

fn render_units(
    buffer: &mut String,
    header: &str,
    units: &[DocUnit],
    section: Section,
    caps: &PackageCapabilities,
    flags: RenderFlags,
) {
    if !flags.shows(section) {
        return;
    }
    let visible: Vec<&DocUnit> = units
        .iter()
        .filter(|unit| flags.shows_doc(&unit.doc))
        .collect();
    if visible.is_empty() {
        return;
    }

    let _ = writeln!(buffer, "## {header}\n");
    for unit in visible {
        render_unit(buffer, unit, 3, caps);
    }
}

fn render_unit(buffer: &mut String, unit: &DocUnit, level: usize, caps: &PackageCapabilities) {
    let title = unit_title(unit);
    let _ = writeln!(
        buffer,
        "{} {}\n",
        "#".repeat(level),
        caps.build_link(&title, &unit.location)
    );
    let _ = writeln!(buffer, "{}", caps.format_node(unit));

    let doc = caps.resolve_doc(&unit.doc);
    if let Some(doc) = non_empty(&doc) {
        let _ = writeln!(buffer, "{}\n", doc.trim_end());
    }

    push_alerts(buffer, caps, &unit.uid());
}

fn render_examples(
    buffer: &mut String,
    package: &PackageDoc,
    caps: &PackageCapabilities,
    flags: RenderFlags,
) {
    if !flags.shows(Section::Examples) || package.examples.is_empty() {
        return;
    }

    let _ = writeln!(buffer, "## Examples\n");
    for example in &package.examples {
        let _ = writeln!(buffer, "{}", caps.render_example(example));
    }
}

fn render_files(
    buffer: &mut String,
    package: &PackageDoc,
    caps: &PackageCapabilities,
    flags: RenderFlags,
) {
    if !flags.shows(Section::Filenames) || package.files.is_empty() {
        return;
    }

    let _ = writeln!(buffer, "## Files\n");
    for file in &package.files {
        let target = caps.relative_file(file);
        let _ = writeln!(buffer, "- [{}]({})", target.trim_start_matches("./"), target);
    }
    buffer.push('\n');
}

fn render_imports(buffer: &mut String, package: &PackageDoc, flags: RenderFlags) {
    if !flags.shows(Section::Imports) || package.imports.is_empty() {
        return;
    }

    let _ = writeln!(buffer, "## Imports\n");
    for import in &package.imports {
        let _ = writeln!(buffer, "- `{import}`");
    }
    buffer.push('\n');
}

fn push_alerts(buffer: &mut String, caps: &PackageCapabilities, target: &str) {
    let alerts = caps.lookup_alert(target);
    if !alerts.is_empty() {
        let _ = writeln!(buffer, "{alerts}");
    }
}

fn unit_title(unit: &DocUnit) -> String {
    match &unit.receiver {
        Some(receiver) => format!("{} ({}) {}", unit.kind.keyword(), receiver, unit.name),
        None => format!("{} {}", unit.kind.keyword(), unit.name),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertIndex;
    use crate::model::{SourceLocation, UnitKind};

    fn render(package: &PackageDoc, flags: RenderFlags) -> String {
        let caps = PackageCapabilities::new(package, AlertIndex::build(package));
        render_package(package, &caps, flags)
    }

    #[test]
    fn method_titles_include_the_receiver() {
        let method = DocUnit::new("Close", UnitKind::Method, SourceLocation::new("r.go", 1, 1))
            .with_receiver("*Reader");
        assert_eq!(unit_title(&method), "func (*Reader) Close");
    }

    #[test]
    fn empty_sections_have_no_header() {
        let package = PackageDoc::new("demo", "/src/demo");
        let rendered = render(&package, RenderFlags::default());
        assert_eq!(rendered, "# Package `demo`\n\n");
    }

    #[test]
    fn undocumented_members_are_elided_with_skip_empty() {
        let mut package = PackageDoc::new("demo", "/src/demo");
        package.funcs.push(DocUnit::new(
            "Quiet",
            UnitKind::Func,
            SourceLocation::new("a.go", 1, 1),
        ));

        let shown = render(&package, RenderFlags::default());
        assert!(shown.contains("## Functions"));

        let flags = RenderFlags {
            skip_empty: true,
            ..RenderFlags::default()
        };
        let hidden = render(&package, flags);
        assert!(!hidden.contains("## Functions"));
        assert!(!hidden.contains("Quiet"));
    }
}
