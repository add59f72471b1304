//! iconmap - compile a directory of SVG icons into a JSON lookup table.

mod cli;
mod compiler;
mod config;
mod icon;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "using {}", path.display());
    }

    let icons = &config.icons;
    let report = compiler::compile(&icons.source, &icons.output, &config.compile_options())
        .with_context(|| format!("failed to compile icons from {}", icons.source.display()))?;

    for name in &report.overridden {
        log!("warning"; "icon `{}` is defined by more than one file, keeping the last", name);
    }
    for skipped in &report.skipped {
        log!("warning"; "skipped {}: {}", skipped.path.display(), skipped.error);
    }

    let noun = if report.icons == 1 { "icon" } else { "icons" };
    if report.skipped.is_empty() {
        log!("icons"; "compiled {} {} into {}", report.icons, noun, report.output.display());
    } else {
        log!("icons"; "compiled {} {} into {} ({} skipped)",
            report.icons, noun, report.output.display(), report.skipped.len());
    }

    Ok(())
}
