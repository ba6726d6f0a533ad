use std::path::PathBuf;

use serde::Deserialize;

/// Server settings, read from `ROSTER_*` environment variables.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,
    #[serde(default = "default_todos_path")]
    pub todos_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables, e.g. `ROSTER_PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: config::Config) -> anyhow::Result<Self> {
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            users_path: default_users_path(),
            todos_path: default_todos_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4567
}

fn default_users_path() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_todos_path() -> PathBuf {
    PathBuf::from("data/todos.json")
}
