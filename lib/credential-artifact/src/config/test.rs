use std::path::PathBuf;

use secrecy::ExposeSecret;
use serde::Deserialize;

use super::core_config::*;
use crate::config::ConfigParsingError;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliConfig {
    pub trace_level: Option<String>,
}

const BASE_CONFIG: &str = indoc::indoc! {"
    app:
        traceLevel: 'info'
    keyStore:
        path: '/etc/artifact'
        fileName: 'oidckeystore.json'
        password: 'secret'
    issuers:
        configFile: '/etc/artifact/issuers.json'
    templates:
        directory: '/etc/artifact/templates'
"};

#[test]
fn test_parse_config() {
    let config: AppConfig<CliConfig> = AppConfig::from_yaml([BASE_CONFIG]).unwrap();

    assert_eq!(config.app.trace_level.as_deref(), Some("info"));
    assert_eq!(
        config.core.key_store.file_path(),
        PathBuf::from("/etc/artifact/oidckeystore.json")
    );
    assert_eq!(config.core.key_store.password.expose_secret(), "secret");
    assert_eq!(
        config.core.templates.credential_template,
        DEFAULT_CREDENTIAL_TEMPLATE
    );
}

#[test]
fn test_later_config_overrides_earlier() {
    let override_config = indoc::indoc! {"
        keyStore:
            password: 'other'
        templates:
            credentialTemplate: 'national-id'
    "};

    let config: AppConfig<CliConfig> =
        AppConfig::from_yaml([BASE_CONFIG, override_config]).unwrap();

    assert_eq!(config.core.key_store.password.expose_secret(), "other");
    assert_eq!(config.core.key_store.file_name, "oidckeystore.json");
    assert_eq!(config.core.templates.credential_template, "national-id");
}

#[test]
fn test_missing_section_fails() {
    let config = indoc::indoc! {"
        issuers:
            configFile: 'issuers.json'
    "};

    let result = AppConfig::<NoCustomConfig>::from_yaml([config]);
    assert!(matches!(
        result,
        Err(ConfigParsingError::GeneralParsingError(_))
    ));
}

#[test]
fn test_unsupported_file_extension() {
    let result = AppConfig::<NoCustomConfig>::from_files(&["config.toml"]);
    assert!(matches!(
        result,
        Err(ConfigParsingError::UnsupportedFormat(file)) if file == "config.toml"
    ));
}

#[test]
fn test_from_files_merges_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("config.yml");
    std::fs::write(&base, BASE_CONFIG).unwrap();
    let local = dir.path().join("local.yml");
    std::fs::write(&local, "app:\n    traceLevel: 'trace'\n").unwrap();

    let config: AppConfig<CliConfig> = AppConfig::from_files(&[base, local]).unwrap();

    assert_eq!(config.app.trace_level.as_deref(), Some("trace"));
    assert_eq!(
        config.core.issuers.config_file,
        PathBuf::from("/etc/artifact/issuers.json")
    );
}
