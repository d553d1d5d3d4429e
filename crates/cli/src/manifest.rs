use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Batch manifest: activity type → markup file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Optional mapper config, relative to the manifest
    #[serde(default)]
    pub config: Option<PathBuf>,

    pub activities: BTreeMap<String, PathBuf>,
}

impl Manifest {
    /// Load a manifest and anchor its relative paths at the manifest's directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read manifest {}", path.display()))?;
        let mut manifest: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid manifest {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.config = manifest.config.map(|config| base.join(config));
        for markup in manifest.activities.values_mut() {
            *markup = base.join(&*markup);
        }
        Ok(manifest)
    }
}
