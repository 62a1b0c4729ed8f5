use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$VALUECASE_HOME`, or `~/.valuecase`.
pub fn valuecase_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("VALUECASE_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".valuecase"))
}

pub fn ensure_valuecase_home() -> Result<PathBuf> {
    let dir = valuecase_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
