use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::skip_serializing_none;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuerList {
    pub issuers: Vec<IssuerProfile>,
}

/// Issuer entry as published in the issuers configuration blob.
///
/// Entries of other protocols may carry display data only, so every endpoint
/// and client field defaults to empty.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuerProfile {
    pub credential_issuer: String,
    #[serde(default)]
    pub display: Vec<IssuerDisplay>,
    pub protocol: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_alias: String,
    #[serde(rename = "wellknown_endpoint", default)]
    pub well_known_endpoint: String,
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub authorization_endpoint: String,
    pub authorization_audience: Option<String>,
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub credential_endpoint: String,
    #[serde(default)]
    pub credential_audience: String,
    #[serde(
        default,
        deserialize_with = "deserialize_enabled",
        serialize_with = "serialize_enabled"
    )]
    pub enabled: bool,
}

/// Only `"true"` (or a JSON `true`) enables an issuer, anything else disables it.
fn deserialize_enabled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(enabled)) => enabled,
        Some(Value::String(enabled)) => enabled == "true",
        _ => false,
    })
}

fn serialize_enabled<S: Serializer>(enabled: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(enabled)
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuerDisplay {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub logo: Option<Logo>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    pub alt_text: Option<String>,
}

impl IssuerProfile {
    /// Logo of the primary display entry, empty when it has none.
    pub fn logo_url(&self) -> &str {
        self.display
            .first()
            .and_then(|display| display.logo.as_ref())
            .map(|logo| logo.url.as_str())
            .unwrap_or_default()
    }

    pub(crate) fn title_contains(&self, search: &str) -> bool {
        let search = search.to_lowercase();
        self.display
            .iter()
            .any(|display| display.title.to_lowercase().contains(&search))
    }
}
