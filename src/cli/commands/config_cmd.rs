//! Configuration management commands.

use std::path::{Path, PathBuf};

use console::style;

use covid_search::Config;

use crate::cli::helpers::{success, warning};

fn resolve_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::default_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform. Use --config.")),
    }
}

/// Print the effective configuration.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    eprintln!("{} Source: {}", style("→").dim(), source);
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the config file is (or would be) read from.
pub fn cmd_config_path(explicit: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve_path(explicit)?;
    let status = if path.exists() { "exists" } else { "not created" };
    println!("{} ({})", path.display(), status);
    Ok(())
}

/// Write the default configuration.
pub fn cmd_config_init(explicit: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = resolve_path(explicit)?;

    if path.exists() && !force {
        eprintln!(
            "{} Config already exists at {} (use --force to overwrite)",
            warning(),
            path.display()
        );
        return Ok(());
    }

    Config::default().write_to(&path)?;
    eprintln!("{} Wrote default config", success());
    eprintln!("  {} {}", style("→").dim(), path.display());
    Ok(())
}
