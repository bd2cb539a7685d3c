use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub installments: InstallmentsConfig,
    pub mock: MockConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built frontend (trunk dist), served at "/"
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            static_dir: "dist".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InstallmentsConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for InstallmentsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8090/api/installments/aggregate".into(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MockConfig {
    pub seed: u64,
    /// Simulated latency of mock loaders
    pub delay_ms: u64,
    /// First year of generated financial history
    pub first_year: i32,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 20240101,
            delay_ms: 300,
            first_year: 2022,
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to built-in defaults; missing keys in the file fall back too
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default configuration");
    Ok(Config::default())
}

/// Loads the configuration once and keeps it for the process lifetime
pub fn initialize() -> anyhow::Result<&'static Config> {
    CONFIG.get_or_try_init(load_config)
}

/// Process-wide configuration; defaults until `initialize` runs
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Resolves the static directory relative to the executable directory
pub fn get_static_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.server.static_dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    PathBuf::from(&config.server.static_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mock.first_year, 2022);
        assert!(config.installments.api_url.starts_with("http"));
    }

    #[test]
    fn test_partial_file_overrides() {
        let config: Config = toml::from_str(
            r#"
            [installments]
            api_url = "https://bi.example.uz/api/installments"

            [mock]
            delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.installments.api_url, "https://bi.example.uz/api/installments");
        assert_eq!(config.installments.timeout_secs, 15);
        assert_eq!(config.mock.delay_ms, 0);
        assert_eq!(config.mock.seed, 20240101);
    }

    #[test]
    fn test_absolute_static_dir_kept() {
        let mut config = Config::default();
        config.server.static_dir = "/srv/autobi/dist".into();
        assert_eq!(get_static_dir(&config), PathBuf::from("/srv/autobi/dist"));
    }
}
