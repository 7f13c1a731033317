use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::issuer::Logo;

/// Issuer metadata served from the well-known endpoint.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialIssuerWellKnown {
    pub credential_issuer: Option<String>,
    pub credential_endpoint: Option<String>,
    #[serde(default)]
    pub credentials_supported: Vec<CredentialTypeDescriptor>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialTypeDescriptor {
    pub id: Option<String>,
    pub format: String,
    pub scope: Option<String>,
    #[serde(default)]
    pub cryptographic_binding_methods_supported: Vec<String>,
    #[serde(default)]
    pub cryptographic_suites_supported: Vec<String>,
    /// Order matters, the first entry is the one used for the proof.
    #[serde(default)]
    pub proof_types_supported: Vec<String>,
    pub credential_definition: CredentialDefinition,
    #[serde(default)]
    pub display: Vec<CredentialDisplay>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialDefinition {
    #[serde(rename = "type", default)]
    pub r#type: Vec<String>,
    #[serde(rename = "credentialSubject", default)]
    pub credential_subject: IndexMap<String, SubjectPropertyDisplay>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectPropertyDisplay {
    #[serde(default)]
    pub display: Vec<PropertyDisplay>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDisplay {
    pub name: String,
    pub locale: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialDisplay {
    pub name: String,
    pub locale: Option<String>,
    pub logo: Option<Logo>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl CredentialTypeDescriptor {
    /// Property key to display label, in the order the issuer declared them.
    pub fn display_labels(&self) -> IndexMap<String, String> {
        self.credential_definition
            .credential_subject
            .iter()
            .map(|(key, property)| {
                let label = property
                    .display
                    .first()
                    .map(|display| display.name.to_owned())
                    .unwrap_or_else(|| key.to_owned());
                (key.to_owned(), label)
            })
            .collect()
    }

    pub(crate) fn name_contains(&self, search: &str) -> bool {
        let search = search.to_lowercase();
        self.display
            .iter()
            .any(|display| display.name.to_lowercase().contains(&search))
    }
}
