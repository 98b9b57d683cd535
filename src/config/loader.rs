use super::schema::Config;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Configuration file loader, for hosts without a settings store of
/// their own. Hosts that have one deliver snapshots through
/// `Session::handle_config_changed` instead.
pub struct ConfigLoader {
    config_path: PathBuf,
    config: Config,
}

impl ConfigLoader {
    /// Create a loader with defaults and the default path, touching no
    /// files
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            config: Config::default(),
        }
    }

    /// Load configuration from disk, or create a default file if none
    /// exists
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            info!("Loading config from {:?}", config_path);
            let contents = fs::read_to_string(&config_path)?;

            match toml::from_str::<Config>(&contents) {
                Ok(cfg) => {
                    info!("Config loaded successfully");
                    cfg
                }
                Err(e) => {
                    warn!("Failed to parse config: {}, using defaults", e);
                    let default = Config::default();
                    if let Err(save_err) = Self::save_config(&config_path, &default) {
                        warn!("Failed to save default config: {}", save_err);
                    }
                    default
                }
            }
        } else {
            info!(
                "No config file found, creating default at {:?}",
                config_path
            );
            let default = Config::default();

            if let Err(e) = Self::save_config(&config_path, &default) {
                warn!("Failed to create default config: {}", e);
            }

            default
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> Result<()> {
        debug!("Reloading config from {:?}", self.config_path);

        if !self.config_path.exists() {
            warn!("Config file not found, keeping current config");
            return Ok(());
        }

        let contents = fs::read_to_string(&self.config_path)?;
        self.config = toml::from_str(&contents)?;
        info!("Config reloaded successfully");

        Ok(())
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<()> {
        Self::save_config(&self.config_path, &self.config)
    }

    /// Default configuration file path
    fn default_config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("/tmp"));

        config_dir.join("recently-files").join("config.toml")
    }

    /// Save configuration to the specified path
    fn save_config(path: &PathBuf, config: &Config) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        fs::write(path, toml)?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Get config file path
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
