//! Layered configuration: files are merged in the order given, then
//! `ARTIFACT_` prefixed environment variables (`__` separates nesting levels).

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(any(feature = "config_yaml", feature = "config_json"))]
use figment::providers::Format;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use secrecy::SecretString;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ConfigParsingError;

pub const DEFAULT_CREDENTIAL_TEMPLATE: &str = "credential-template";
pub const ENV_PREFIX: &str = "ARTIFACT_";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct NoCustomConfig;

/// Library settings plus the `app` section owned by the embedding binary.
#[derive(Debug, Clone)]
pub struct AppConfig<Custom> {
    pub core: CoreConfig,
    pub app: Custom,
}

#[derive(Deserialize)]
struct LayeredConfig<Custom> {
    #[serde(flatten)]
    core: CoreConfig,
    #[serde(default)]
    app: Custom,
}

/// Read once at process start, never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub key_store: KeyStoreConfig,
    pub issuers: IssuersConfig,
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStoreConfig {
    pub path: PathBuf,
    pub file_name: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuersConfig {
    pub config_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesConfig {
    pub directory: PathBuf,
    #[serde(default = "default_credential_template")]
    pub credential_template: String,
}

fn default_credential_template() -> String {
    DEFAULT_CREDENTIAL_TEMPLATE.to_owned()
}

impl KeyStoreConfig {
    pub fn file_path(&self) -> PathBuf {
        self.path.join(&self.file_name)
    }
}

impl<Custom> AppConfig<Custom>
where
    Custom: DeserializeOwned + Default,
{
    /// Format is picked from the extension, `.yml`/`.yaml` or `.json`.
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let figment = files
            .iter()
            .try_fold(Figment::new(), |figment, path| merge_file(figment, path.as_ref()))?;

        Self::extract(figment)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        documents: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        let figment = documents
            .into_iter()
            .fold(Figment::new(), |figment, document| {
                figment.merge(Yaml::string(document.as_ref()))
            });

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigParsingError> {
        #[cfg(feature = "config_env")]
        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(false));

        let LayeredConfig { core, app } = figment
            .extract::<LayeredConfig<Custom>>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;

        Ok(Self { core, app })
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment, ConfigParsingError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    match extension {
        #[cfg(feature = "config_yaml")]
        "yml" | "yaml" => Ok(figment.merge(Yaml::file(path))),
        #[cfg(feature = "config_json")]
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(ConfigParsingError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}
