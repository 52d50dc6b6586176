use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$WALKLEADER_HOME`, else `~/.walkleader`.
pub fn walkleader_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WALKLEADER_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".walkleader"))
}

pub fn ensure_walkleader_home() -> Result<PathBuf> {
    let dir = walkleader_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
