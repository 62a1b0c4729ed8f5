use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use valuecase_core::{
    Catalog, CompanySize, DEFAULT_FEATURES, Industry, SelectionState, Sensitivity, TimeHorizon,
};

use crate::state::{ensure_valuecase_home, valuecase_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub defaults: DefaultsSection,
    pub catalog: CatalogSection,
}

/// Session-start selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsSection {
    pub industry: Industry,
    pub size: CompanySize,
    pub horizon: TimeHorizon,
    pub features: Vec<String>,
    pub adoption: f64,
    pub data_quality: f64,
    pub change_mgmt: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogSection {
    /// TOML catalog replacing the built-in reference data.
    pub path: Option<PathBuf>,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        let sensitivity = Sensitivity::default();
        Self {
            industry: Industry::Banking,
            size: CompanySize::Enterprise,
            horizon: TimeHorizon::Months24,
            features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
            adoption: sensitivity.adoption.value(),
            data_quality: sensitivity.data_quality.value(),
            change_mgmt: sensitivity.change_mgmt.value(),
        }
    }
}

impl DefaultsSection {
    /// Initial selection, checked against `catalog`.
    pub fn selection(&self, catalog: &Catalog) -> Result<SelectionState> {
        SelectionState::new(
            catalog,
            self.industry,
            self.size,
            self.horizon,
            self.features.iter().cloned(),
            Sensitivity::new(self.adoption, self.data_quality, self.change_mgmt),
        )
        .context("config [defaults]")
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(valuecase_home()?.join("config.toml"))
}

/// Load `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = parse_config(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_valuecase_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
