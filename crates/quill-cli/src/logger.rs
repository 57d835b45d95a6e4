//! Logging infrastructure for the Quill CLI.
//!
//! Structured logging with `tracing`. `--verbose` enables debug output for the
//! quill crates, `--quiet` limits output to errors, and `RUST_LOG` overrides
//! the default filter otherwise.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "quill=debug,quill_cli=debug,quill_docs=debug";
const QUIET_FILTER: &str = "quill=error,quill_cli=error,quill_docs=error";
const DEFAULT_FILTER: &str = "quill=info,quill_cli=info,quill_docs=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Must be called once, before any logging occurs. `verbose` wins over
/// `quiet`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them; otherwise the
/// terminal capabilities of stderr decide.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
