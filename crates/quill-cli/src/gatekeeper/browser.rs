use std::process::Command;

use anyhow::{Context, Result};

/// Opens `url` with the platform's default handler.
pub fn open_browser(url: &str) -> Result<()> {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", url])
    } else {
        ("xdg-open", vec![url])
    };

    Command::new(program)
        .args(&args)
        .spawn()
        .with_context(|| format!("failed to launch {program}"))?;
    Ok(())
}
