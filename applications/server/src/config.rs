//! Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use violet_core::normalize_base;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_static_files")]
    pub static_files: StaticFileSettings,

    #[serde(default = "default_cors")]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable origin used for song URLs
    ///
    /// When unset, each response uses the origin the request arrived on.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticFileSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding `audio/` and `images/`
    #[serde(default = "default_static_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// default file is not an error, a missing explicit one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. VIOLET_SERVER__PORT
        settings = settings.add_source(
            config::Environment::with_prefix("VIOLET")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Port must be non-zero".to_string()));
        }

        self.public_base_url()?;

        for origin in &self.cors.allowed_origins {
            normalize_base(origin).map_err(|e| {
                ServerError::Config(format!("Invalid CORS origin {:?}: {}", origin, e))
            })?;
        }

        Ok(())
    }

    /// Normalized public base URL, if configured
    pub fn public_base_url(&self) -> Result<Option<String>> {
        self.server
            .public_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| {
                normalize_base(url)
                    .map_err(|e| ServerError::Config(format!("server.public_base_url: {}", e)))
            })
            .transpose()
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_base_url: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5273
}

fn default_static_files() -> StaticFileSettings {
    StaticFileSettings {
        enabled: default_enabled(),
        root: default_static_root(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_static_root() -> PathBuf {
    PathBuf::from("./wwwroot")
}

fn default_cors() -> CorsSettings {
    CorsSettings {
        allowed_origins: default_allowed_origins(),
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            static_files: default_static_files(),
            cors: default_cors(),
        }
    }
}
