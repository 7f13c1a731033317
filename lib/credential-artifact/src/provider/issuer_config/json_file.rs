use std::path::PathBuf;

use super::{IssuerConfigError, IssuerConfigSource};
use crate::model::issuer::IssuerList;

pub struct JsonFileIssuerConfigSource {
    path: PathBuf,
}

impl JsonFileIssuerConfigSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IssuerConfigSource for JsonFileIssuerConfigSource {
    fn load(&self) -> Result<IssuerList, IssuerConfigError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| IssuerConfigError::Unavailable {
                source_name: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;
    use crate::model::issuer::IssuerProfile;

    fn write_issuers(dir: &std::path::Path, content: &str) -> PathBuf {
        let path = dir.join("issuers.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_issuers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issuers.json");
        std::fs::write(
            &path,
            indoc::indoc! {r#"
                {
                    "issuers": [{
                        "credential_issuer": "ESignet",
                        "display": [{
                            "name": "e-Signet",
                            "title": "Download via e-Signet",
                            "logo": { "url": "https://issuer.example/logo.png", "alt_text": "logo" }
                        }],
                        "client_id": "client1",
                        "client_alias": "wallet-client",
                        "wellknown_endpoint": "https://issuer.example/.well-known/openid-credential-issuer",
                        "authorization_endpoint": "https://issuer.example/authorize",
                        "credential_endpoint": "https://issuer.example/credential",
                        "credential_audience": "aud1",
                        "enabled": "true"
                    }]
                }
            "#},
        )
        .unwrap();

        let issuers = JsonFileIssuerConfigSource::new(path).load().unwrap();

        assert_eq!(issuers.issuers.len(), 1);
        let issuer = &issuers.issuers[0];
        assert!(issuer.enabled);
        assert_eq!(issuer.logo_url(), "https://issuer.example/logo.png");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = JsonFileIssuerConfigSource::new(dir.path().join("missing.json")).load();

        assert!(matches!(result, Err(IssuerConfigError::Unavailable { .. })));
    }

    #[test]
    fn test_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issuers.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileIssuerConfigSource::new(path).load();

        assert!(matches!(result, Err(IssuerConfigError::Parsing(_))));
    }

    #[test]
    fn test_load_mixed_issuer_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_issuers(
            dir.path(),
            indoc::indoc! {r#"
                {
                    "issuers": [
                        {
                            "credential_issuer": "Mosip",
                            "protocol": "OTP",
                            "display": [{ "name": "MOSIP", "title": "Download via UIN/VID" }],
                            "enabled": "true"
                        },
                        {
                            "credential_issuer": "ESignet",
                            "client_id": "client1",
                            "client_alias": "wallet-client",
                            "wellknown_endpoint": "https://issuer.example/.well-known/openid-credential-issuer",
                            "authorization_endpoint": "https://issuer.example/authorize",
                            "credential_endpoint": "https://issuer.example/credential",
                            "credential_audience": "aud1",
                            "enabled": true
                        },
                        { "credential_issuer": "Legacy", "enabled": "TRUE" },
                        { "credential_issuer": "Draft" }
                    ]
                }
            "#},
        );

        let issuers = JsonFileIssuerConfigSource::new(path).load().unwrap();

        let enabled: Vec<(&str, bool)> = issuers
            .issuers
            .iter()
            .map(|issuer| (issuer.credential_issuer.as_str(), issuer.enabled))
            .collect();
        assert_eq!(
            enabled,
            vec![
                ("Mosip", true),
                ("ESignet", true),
                ("Legacy", false),
                ("Draft", false)
            ]
        );
        assert_eq!(issuers.issuers[0].protocol.as_deref(), Some("OTP"));
        assert_eq!(issuers.issuers[0].credential_endpoint, "");
        assert_eq!(issuers.issuers[1].client_alias, "wallet-client");
    }

    #[rstest]
    #[case(r#""true""#, true)]
    #[case("true", true)]
    #[case(r#""false""#, false)]
    #[case("false", false)]
    #[case(r#""yes""#, false)]
    #[case("1", false)]
    #[case("null", false)]
    fn test_enabled_flag(#[case] enabled: &str, #[case] expected: bool) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_issuers(
            dir.path(),
            &format!(r#"{{"issuers":[{{"credential_issuer":"ESignet","enabled":{enabled}}}]}}"#),
        );

        let issuers = JsonFileIssuerConfigSource::new(path).load().unwrap();

        assert_eq!(issuers.issuers[0].enabled, expected);
    }

    #[test]
    fn test_enabled_serialized_as_string() {
        let issuer = IssuerProfile {
            credential_issuer: "ESignet".to_owned(),
            enabled: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&issuer).unwrap();

        assert_eq!(value["enabled"], serde_json::json!("true"));
    }
}
