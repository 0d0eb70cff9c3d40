use crate::{Result, TaxTreeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub build: BuildConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Path to `nodes.dmp`
    pub nodes: Option<PathBuf>,
    /// Path to `names.dmp`
    pub names: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Draw progress bars while parsing the dump files
    pub show_progress: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Worker threads for batch queries (0 = all available)
    pub threads: usize,
}

impl Config {
    /// Pick the dump file paths, preferring explicit overrides.
    pub fn resolve_sources(
        &self,
        nodes: Option<&Path>,
        names: Option<&Path>,
    ) -> Result<(PathBuf, PathBuf)> {
        let nodes = nodes
            .map(Path::to_path_buf)
            .or_else(|| self.taxonomy.nodes.clone())
            .ok_or_else(|| TaxTreeError::Config("no nodes.dmp path given".to_string()))?;
        let names = names
            .map(Path::to_path_buf)
            .or_else(|| self.taxonomy.names.clone())
            .ok_or_else(|| TaxTreeError::Config("no names.dmp path given".to_string()))?;
        Ok((nodes, names))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxTreeError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxTreeError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
