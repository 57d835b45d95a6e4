//! README generation.
//!
//! Packages are processed one at a time in name order. For each package the
//! alert index is built, the README rendered and formatted, the update
//! reviewed and finally written. Any error stops the run; files written
//! earlier in the run stay as they are.

use quill_docs::{
    AlertIndex, ManifestProvider, PackageDoc, Renderer, SourceModelProvider, format_markdown,
};

use crate::cli::Cli;
use crate::config::QuillConfig;
use crate::error::Result;
use crate::gatekeeper::Gatekeeper;
use crate::ui;
use crate::writer::{GeneratedDocument, OutputWriter, Report};

/// Execute the generate command.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration
/// - Packages that cannot be loaded
/// - Render and template failures
/// - A confirmation port that cannot be bound
/// - File system errors while writing
pub async fn execute(args: Cli) -> Result<()> {
    let config = QuillConfig::load(&args)?;
    config.validate()?;

    let renderer = Renderer::new(config.render, config.template_source())?;
    let packages = ManifestProvider::new().load(&config.load_request()?)?;
    ui::info(&format!("Found {} package(s)", packages.len()));

    let gatekeeper = Gatekeeper::start(&config.confirm).await?;
    let result = run(&config, &packages, &renderer, &gatekeeper).await;
    gatekeeper.close().await;

    let report = result?;
    print!("{}", report);
    ui::success(&format!(
        "Wrote {} of {} README file(s)",
        report.accepted(),
        report.entries.len()
    ));
    Ok(())
}

/// Generates and commits a README for every package in `packages`.
///
/// Packages are handled in ascending order of name, then import path,
/// whatever order they are given in.
pub async fn run(
    config: &QuillConfig,
    packages: &[PackageDoc],
    renderer: &Renderer,
    gatekeeper: &Gatekeeper,
) -> Result<Report> {
    let mut ordered: Vec<&PackageDoc> = packages.iter().collect();
    ordered.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.import_path.cmp(&b.import_path))
    });

    let mut writer = OutputWriter::new();
    for package in ordered {
        let document = generate(config, package, renderer)?;
        let outcome = gatekeeper
            .review(&document.path, &document.contents)
            .await?;
        writer.commit(document, outcome)?;
    }
    Ok(writer.finish())
}

/// Renders and formats the README of one package.
pub fn generate(
    config: &QuillConfig,
    package: &PackageDoc,
    renderer: &Renderer,
) -> Result<GeneratedDocument> {
    let alerts = AlertIndex::build(package);
    tracing::debug!(package = %package.name, alerts = alerts.len(), "Rendering README");

    let rendered = renderer.render(package, &alerts)?;
    let contents = format_markdown(&rendered);
    let path = package.dir.join(&config.readme_name);
    Ok(GeneratedDocument::new(&package.name, path, contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::writer::Status;
    use tempfile::TempDir;

    fn package(dir: &TempDir, name: &str, doc: &str) -> PackageDoc {
        let pkg_dir = dir.path().join(name);
        std::fs::create_dir_all(&pkg_dir).unwrap();
        let mut package = PackageDoc::new(name, pkg_dir);
        package.doc = doc.to_string();
        package
    }

    #[test]
    fn generate_targets_the_package_directory() {
        let dir = TempDir::new().unwrap();
        let package = package(&dir, "demo", "Demo\nDoes things.");
        let config = QuillConfig::default_config();

        let document = generate(&config, &package, &Renderer::builtin(config.render)).unwrap();
        assert_eq!(document.path, dir.path().join("demo").join("README.md"));
        assert!(document.contents.starts_with("# Demo\n"));
        assert!(document.contents.contains("Does things."));
        assert_eq!(document.status, Status::Pending);
    }

    #[tokio::test]
    async fn run_processes_packages_in_name_order() {
        let dir = TempDir::new().unwrap();
        let packages = vec![
            package(&dir, "zeta", "Zeta."),
            package(&dir, "alpha", "Alpha."),
        ];
        let config = QuillConfig::default_config();
        let renderer = Renderer::builtin(config.render);

        let report = run(&config, &packages, &renderer, &Gatekeeper::disabled())
            .await
            .unwrap();

        let paths: Vec<_> = report.entries.iter().map(|entry| entry.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                dir.path().join("alpha").join("README.md"),
                dir.path().join("zeta").join("README.md"),
            ]
        );
        assert_eq!(report.accepted(), 2);
    }

    #[tokio::test]
    async fn write_failure_stops_the_run() {
        let dir = TempDir::new().unwrap();
        let first = package(&dir, "alpha", "Alpha.");
        let mut broken = PackageDoc::new("beta", dir.path().join("missing"));
        broken.doc = "Beta.".to_string();
        let last = package(&dir, "gamma", "Gamma.");

        let config = QuillConfig::default_config();
        let renderer = Renderer::builtin(config.render);
        let err = run(&config, &[first, broken, last], &renderer, &Gatekeeper::disabled())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Write { .. }));
        assert!(dir.path().join("alpha").join("README.md").exists());
        assert!(!dir.path().join("gamma").join("README.md").exists());
    }
}
