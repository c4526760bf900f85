use config::{Config, File};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;

pub mod validator;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Preset fixtures file, resolved relative to the config root when the
    /// path is relative.
    #[serde(default = "default_fixtures_file")]
    pub fixtures_file: PathBuf,
    /// Endpoint schemas, keyed by endpoint name. Populated from
    /// `config/endpoints/*.{json,yaml,yml}` next to the config file; later
    /// files override earlier ones per endpoint name.
    #[serde(default)]
    pub endpoints: IndexMap<String, EndpointConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

/// One endpoint as configured: an optional `_settings` block plus the
/// declared fields in file order, each holding a directive string.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(rename = "_settings", default)]
    pub settings: EndpointSettings,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSettings {
    /// Field used to address a single record by key.
    #[serde(default = "default_identifiable")]
    pub identifiable: String,
    /// When set, requests must carry an Authorization header.
    #[serde(default)]
    pub auth: bool,
    /// Page size for collection responses; `false` or absent disables
    /// pagination.
    #[serde(default, deserialize_with = "deserialize_page_size")]
    pub paginate: Option<usize>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            identifiable: default_identifiable(),
            auth: false,
            paginate: None,
        }
    }
}

fn default_identifiable() -> String {
    "id".to_string()
}

fn default_fixtures_file() -> PathBuf {
    PathBuf::from("mirage.json")
}

fn default_base_path() -> String {
    "/api/fake".to_string()
}

/// Accepts `paginate: 5` and the literal `paginate: false`; `true` carries
/// no page size and is rejected.
fn deserialize_page_size<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageSize {
        Flag(bool),
        Size(usize),
    }

    match Option::<PageSize>::deserialize(deserializer)? {
        None | Some(PageSize::Flag(false)) => Ok(None),
        Some(PageSize::Flag(true)) => Err(serde::de::Error::custom(
            "paginate must be a page size or false",
        )),
        Some(PageSize::Size(n)) => Ok(Some(n)),
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file plus CLI overrides).
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .map(|p| p.to_str().unwrap_or("."))
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.base_path", "/api/fake")?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file.
        settings.apply_cli_overrides(cli);
        settings.load_endpoints_from_dir(&format!("{root}/config/endpoints"))?;
        settings.resolve_fixtures_path(root);

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("mirage");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.base_path", "/api/fake")?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_endpoints_from_dir(&format!("{root}/config/endpoints"))?;
        settings.resolve_fixtures_path(root);

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(fixtures) = &cli.fixtures {
            self.fixtures_file = fixtures.clone();
        }
    }

    fn resolve_fixtures_path(&mut self, root: &str) {
        if self.fixtures_file.is_relative() && root != "." {
            self.fixtures_file = std::path::Path::new(root).join(&self.fixtures_file);
        }
    }

    fn load_endpoints_from_dir(&mut self, path: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{path}/*");
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let content = std::fs::read_to_string(&path)?;
                            let endpoints: IndexMap<String, EndpointConfig> = if ext == "json" {
                                serde_json::from_str(&content)?
                            } else {
                                serde_yaml::from_str(&content)?
                            };
                            for (name, endpoint) in endpoints {
                                self.endpoints.insert(name, endpoint);
                            }
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(())
    }
}
