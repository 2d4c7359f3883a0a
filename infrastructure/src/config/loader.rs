//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "lyricsmith.toml";

/// Prefix for environment overrides, e.g. `LYRICSMITH_PROVIDER__MODEL`
pub const ENV_PREFIX: &str = "LYRICSMITH_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LYRICSMITH_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lyricsmith.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/lyricsmith/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        let global = Self::global_config_path();
        let project = Self::project_config_path();
        Self::figment(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Layer the file sources over the defaults, skipping absent files.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lyricsmith").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let status = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", status, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE),
        }

        if let Some(path) = Self::global_config_path() {
            let status = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", status, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}
