use indexmap::IndexMap;
use serde_json::Value;

use crate::model::credential::VerifiableCredential;
use crate::model::credential_schema::CredentialTypeDescriptor;
use crate::model::issuer::IssuerProfile;
use crate::service::document::{ArtifactContent, DisplayFields};

/// One entry per declared subject property, keyed by its label. Subject
/// values the issuer did not declare are left out, declared but missing ones
/// are bound as null.
pub(crate) fn display_fields(
    labels: &IndexMap<String, String>,
    credential: &VerifiableCredential,
) -> DisplayFields {
    labels
        .iter()
        .map(|(key, label)| {
            let value = credential
                .credential_subject
                .get(key)
                .cloned()
                .unwrap_or(Value::Null);
            (label.to_owned(), value)
        })
        .collect()
}

pub(crate) fn artifact_content(
    issuer: &IssuerProfile,
    credential_type: &CredentialTypeDescriptor,
    credential: &VerifiableCredential,
) -> ArtifactContent {
    let display = credential_type.display.first();

    ArtifactContent {
        display_fields: display_fields(&credential_type.display_labels(), credential),
        text_color: display
            .and_then(|display| display.text_color.to_owned())
            .unwrap_or_default(),
        background_color: display
            .and_then(|display| display.background_color.to_owned())
            .unwrap_or_default(),
        title_name: display
            .map(|display| display.name.to_owned())
            .unwrap_or_default(),
        logo_url: issuer.logo_url().to_owned(),
    }
}
