use std::path::PathBuf;
use std::sync::Arc;

use assert2::let_assert;
use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use mockall::predicate::eq;
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, SigningKey};
use rand::rngs::OsRng;
use rstest::rstest;
use secrecy::SecretString;
use serde_json::json;
use similar_asserts::assert_eq;

use super::{CREDENTIALS_CONTEXT, ProofBuilder, ProofError, select_proof_type};
use crate::config::core_config::KeyStoreConfig;
use crate::model::credential_schema::{CredentialDefinition, CredentialTypeDescriptor};
use crate::model::issuer::IssuerProfile;
use crate::proto::jwt::mapper::bin_to_b64url_string;
use crate::provider::key_storage::MockKeyStore;
use crate::provider::key_storage::error::KeyStorageError;
use crate::provider::key_storage::es256::Es256KeyMaterial;

fn key_store_config() -> KeyStoreConfig {
    KeyStoreConfig {
        path: PathBuf::from("/keys"),
        file_name: "oidckeystore.json".to_owned(),
        password: SecretString::from("changeit".to_owned()),
    }
}

fn issuer() -> IssuerProfile {
    IssuerProfile {
        credential_issuer: "ESignet".to_owned(),
        client_id: "client1".to_owned(),
        client_alias: "wallet-client".to_owned(),
        credential_audience: "aud1".to_owned(),
        credential_endpoint: "https://issuer.example/credential".to_owned(),
        enabled: true,
        ..Default::default()
    }
}

fn credential_type(proof_types: &[&str]) -> CredentialTypeDescriptor {
    CredentialTypeDescriptor {
        id: Some("NationalIdCredential".to_owned()),
        format: "ldp_vc".to_owned(),
        proof_types_supported: proof_types.iter().map(|t| t.to_string()).collect(),
        credential_definition: CredentialDefinition {
            r#type: vec![
                "VerifiableCredential".to_owned(),
                "NationalIdCredential".to_owned(),
            ],
            ..Default::default()
        },
        ..Default::default()
    }
}

fn key_store_with(signing_key: SigningKey) -> MockKeyStore {
    let mut key_store = MockKeyStore::new();
    key_store
        .expect_load_signing_key()
        .withf(|location, alias| {
            location.file_name == "oidckeystore.json" && alias == "wallet-client"
        })
        .once()
        .returning(move |_, _| Ok(Box::new(Es256KeyMaterial::new(signing_key.clone()))));
    key_store
}

fn decode_part(part: &str) -> serde_json::Value {
    serde_json::from_slice(&Base64UrlSafeNoPadding::decode_to_vec(part, None).unwrap()).unwrap()
}

#[rstest]
#[case(&["jwt", "cwt"], Some("jwt"))]
#[case(&["cwt", "jwt"], Some("cwt"))]
#[case(&["ldp_vp"], Some("ldp_vp"))]
#[case(&[], None)]
fn test_select_proof_type(#[case] supported: &[&str], #[case] expected: Option<&str>) {
    let supported: Vec<String> = supported.iter().map(|t| t.to_string()).collect();

    assert_eq!(select_proof_type(&supported), expected);
}

#[test]
fn test_build_proof_request() {
    let signing_key = SigningKey::random(&mut OsRng);
    let verifying_key = *signing_key.verifying_key();
    let builder = ProofBuilder::new(
        Arc::new(key_store_with(signing_key)),
        key_store_config(),
    );

    let request = builder
        .build(&issuer(), &credential_type(&["jwt", "cwt"]), "tok123")
        .unwrap();

    assert_eq!(request.format, "ldp_vc");
    assert_eq!(request.proof.proof_type, "jwt");
    assert_eq!(
        request.credential_definition.r#type,
        vec![
            "VerifiableCredential".to_string(),
            "NationalIdCredential".to_string()
        ]
    );
    assert_eq!(
        request.credential_definition.context,
        vec![CREDENTIALS_CONTEXT.to_string()]
    );

    let parts: Vec<&str> = request.proof.jwt.split('.').collect();
    let_assert!([header, payload, signature] = parts.as_slice());

    let header = decode_part(header);
    assert_eq!(header["alg"], json!("ES256"));
    assert_eq!(header["typ"], json!("openid4vci-proof+jwt"));
    assert_eq!(header["jwk"]["kty"], json!("EC"));
    assert_eq!(header["jwk"]["crv"], json!("P-256"));

    let claims = decode_part(payload);
    assert_eq!(claims["aud"], json!("aud1"));
    assert_eq!(claims["iss"], json!("client1"));
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        24 * 60 * 60
    );
    // opaque access token, nothing to bind
    assert!(claims.get("nonce").is_none());

    let signature = Base64UrlSafeNoPadding::decode_to_vec(signature, None).unwrap();
    let signature = Signature::from_slice(&signature).unwrap();
    let signed_input = format!("{}.{}", parts[0], parts[1]);
    verifying_key
        .verify(signed_input.as_bytes(), &signature)
        .unwrap();
}

#[test]
fn test_build_binds_access_token_nonce() {
    let access_token = format!(
        "{}.{}.{}",
        bin_to_b64url_string(br#"{"alg":"ES256"}"#).unwrap(),
        bin_to_b64url_string(br#"{"iss":"https://issuer.example","c_nonce":"nonce-42"}"#)
            .unwrap(),
        "c2lnbmF0dXJl"
    );
    let builder = ProofBuilder::new(
        Arc::new(key_store_with(SigningKey::random(&mut OsRng))),
        key_store_config(),
    );

    let request = builder
        .build(&issuer(), &credential_type(&["jwt"]), &access_token)
        .unwrap();

    let payload = request.proof.jwt.split('.').nth(1).unwrap();
    assert_eq!(decode_part(payload)["nonce"], json!("nonce-42"));
}

#[test]
fn test_build_without_proof_types() {
    let builder = ProofBuilder::new(
        Arc::new(key_store_with(SigningKey::random(&mut OsRng))),
        key_store_config(),
    );

    let result = builder.build(&issuer(), &credential_type(&[]), "tok123");

    assert!(matches!(result, Err(ProofError::MissingProofType)));
}

#[test]
fn test_build_key_material_fault() {
    let mut key_store = MockKeyStore::new();
    key_store
        .expect_load_signing_key()
        .with(mockall::predicate::always(), eq("wallet-client"))
        .returning(|_, _| {
            Err(KeyStorageError::CouldNotDecrypt {
                alias: "wallet-client".to_owned(),
                reason: "wrong password".to_owned(),
            })
        });
    let builder = ProofBuilder::new(Arc::new(key_store), key_store_config());

    let result = builder.build(&issuer(), &credential_type(&["jwt"]), "tok123");

    assert!(matches!(
        result,
        Err(ProofError::KeyMaterial(KeyStorageError::CouldNotDecrypt { .. }))
    ));
}
