use std::path::Path;
use std::sync::Arc;

use minijinja::value::ViaDeserialize;
use minijinja::{Environment, ErrorKind, context};

use super::capabilities::{PackageCapabilities, RenderCapabilities};
use super::{RenderFlags, Section};
use crate::error::{DocsError, Result};
use crate::model::{DocUnit, ExampleDoc, PackageDoc};

const TEMPLATE_NAME: &str = "readme.md";

/// Renders `package` with a user supplied `minijinja` template.
///
/// The template sees the package as `pkg`, the flags as `flags`, and the
/// capability operations as global functions.
pub(crate) fn render_package(
    path: &Path,
    source: &str,
    package: &PackageDoc,
    caps: PackageCapabilities,
    flags: RenderFlags,
) -> Result<String> {
    let template_error = |error: minijinja::Error| DocsError::Template {
        path: path.to_path_buf(),
        message: format!("{error:#}"),
    };

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    register_functions(&mut env, Arc::new(caps), flags);

    env.add_template(TEMPLATE_NAME, source)
        .map_err(template_error)?;
    let template = env.get_template(TEMPLATE_NAME).map_err(template_error)?;

    tracing::debug!(package = %package.name, template = %path.display(), "Rendering template override");
    template
        .render(context! { pkg => package, flags => flags })
        .map_err(template_error)
}

fn register_functions(env: &mut Environment<'_>, caps: Arc<PackageCapabilities>, flags: RenderFlags) {
    let c = Arc::clone(&caps);
    env.add_function("title", move || c.title());

    let c = Arc::clone(&caps);
    env.add_function("doc", move |text: String| c.resolve_doc(&text));

    let c = Arc::clone(&caps);
    env.add_function("alert", move |target: String| c.lookup_alert(&target));

    let c = Arc::clone(&caps);
    env.add_function("decl", move |unit: ViaDeserialize<DocUnit>| c.format_node(&unit.0));

    let c = Arc::clone(&caps);
    env.add_function("link", move |title: String, unit: ViaDeserialize<DocUnit>| {
        c.build_link(&title, &unit.0.location)
    });

    let c = caps;
    env.add_function("example", move |example: ViaDeserialize<ExampleDoc>| {
        c.render_example(&example.0)
    });

    env.add_function("show", move |section: String| {
        Section::from_name(&section)
            .map(|section| flags.shows(section))
            .ok_or_else(|| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("unknown section '{section}'"),
                )
            })
    });

    env.add_function("skip_empty", move |text: String| !flags.shows_doc(&text));

    env.add_function("filename", |path: String| {
        Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(path)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertIndex;
    use crate::model::{SourceLocation, UnitKind};

    fn package() -> PackageDoc {
        let mut package = PackageDoc::new("demo", "/src/demo");
        package.doc = "Demo package\n NOTE(Open): close the file".to_string();
        package.funcs.push(
            DocUnit::new("Open", UnitKind::Func, SourceLocation::new("/src/demo/open.go", 4, 8))
                .with_decl("func Open() {\n}")
                .with_doc("Open opens."),
        );
        package
    }

    fn render(source: &str) -> Result<String> {
        let package = package();
        let caps = PackageCapabilities::new(&package, AlertIndex::build(&package));
        render_package(
            Path::new("readme.md.j2"),
            source,
            &package,
            caps,
            RenderFlags::default(),
        )
    }

    #[test]
    fn template_uses_capabilities() {
        let source = "# {{ title() }}\n{% for f in pkg.funcs %}{{ link('func ' ~ f.name, f) }}\n{{ alert(f.name) }}{% endfor %}";
        let rendered = render(source).expect("template renders");
        assert_eq!(
            rendered,
            "# Demo package\n[func Open](./open.go#L4-L8)\n> [!NOTE]\n> close the file\n"
        );
    }

    #[test]
    fn unknown_section_is_a_template_error() {
        let err = render("{{ show('nope') }}").expect_err("unknown section");
        assert!(matches!(err, DocsError::Template { .. }));
    }

    #[test]
    fn syntax_errors_are_template_errors() {
        let err = render("{% for %}").expect_err("bad syntax");
        assert!(matches!(err, DocsError::Template { .. }));
    }
}
