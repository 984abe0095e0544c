use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,

    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset (default: "warn")
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Connection parameters for the inventario database.
///
/// Every field can be overridden from the environment, see
/// [`DatabaseConfig::apply_env_overrides`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `DB_HOST` (default: "localhost")
    pub host: String,

    /// `DB_PORT` (default: 5432)
    pub port: u16,

    /// `DB_NAME` (default: "inventario")
    pub name: String,

    /// `DB_USER` (default: "postgres")
    pub user: String,

    /// `DB_PASS` (default: empty)
    #[serde(skip_serializing)]
    pub password: String,

    /// `DATABASE_URL`. When set, the individual parts above are ignored.
    pub url: Option<String>,

    /// Seconds to wait for the connection before giving up (default: 10)
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "inventario".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            url: None,
            connect_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let credentials = if self.password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password)
            )
        };

        format!(
            "postgres://{credentials}@{}:{}/{}",
            self.host,
            self.port,
            urlencoding::encode(&self.name)
        )
    }

    /// Connection URL safe to print: the password is masked.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        if self.url.is_some() {
            return "DATABASE_URL".to_string();
        }
        format!(
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }

    /// Applies `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS` and
    /// `DATABASE_URL` from `lookup`. Empty values are ignored except for
    /// `DB_PASS`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = non_empty("DB_HOST") {
            self.host = host;
        }
        if let Some(port) = non_empty("DB_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("DB_PORT must be a port number, got '{port}'"))?;
        }
        if let Some(name) = non_empty("DB_NAME") {
            self.name = name;
        }
        if let Some(user) = non_empty("DB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("DB_PASS") {
            self.password = password;
        }
        if let Some(url) = non_empty("DATABASE_URL") {
            self.url = Some(url);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum password length in characters (default: 6)
    pub min_password_length: usize,

    /// bcrypt cost factor (default: `bcrypt::DEFAULT_COST`)
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Loads the first config file found (or `path` when given), then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load_default_paths()?,
        };

        config
            .database
            .apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    fn load_default_paths() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("inventario").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".inventario").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_none() {
            if self.database.host.is_empty() {
                anyhow::bail!("Database host cannot be empty");
            }
            if self.database.port == 0 {
                anyhow::bail!("Database port must be > 0");
            }
            if self.database.name.is_empty() {
                anyhow::bail!("Database name cannot be empty");
            }
        }

        if self.security.min_password_length == 0 {
            anyhow::bail!("Minimum password length must be > 0");
        }

        if !(4..=31).contains(&self.security.bcrypt_cost) {
            anyhow::bail!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.security.bcrypt_cost
            );
        }

        Ok(())
    }
}
