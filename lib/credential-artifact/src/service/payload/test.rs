use indexmap::IndexMap;
use serde_json::json;
use similar_asserts::assert_eq;

use super::{CodeGenerationFault, compact, expand};
use crate::model::credential::{CredentialProof, VerifiableCredential};

const BASE45_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn credential(subject_fields: usize) -> VerifiableCredential {
    let credential_subject: IndexMap<String, serde_json::Value> = (0..subject_fields)
        .map(|i| (format!("field{i}"), json!(format!("value number {i}"))))
        .collect();

    VerifiableCredential {
        issuer: Some("did:web:issuer.example".to_owned()),
        id: Some("urn:uuid:3978344f-8596-4c3a-a978-8fcaba3903c5".to_owned()),
        issuance_date: Some("2024-01-01T00:00:00Z".to_owned()),
        expiration_date: None,
        proof: Some(CredentialProof {
            r#type: Some("RsaSignature2018".to_owned()),
            created: Some("2024-01-01T00:00:00Z".to_owned()),
            proof_purpose: Some("assertionMethod".to_owned()),
            verification_method: Some("did:web:issuer.example#key-0".to_owned()),
            jws: Some("eyJhbGciOiJSUzI1NiJ9..signature".to_owned()),
        }),
        credential_subject,
        r#type: vec!["VerifiableCredential".to_owned()],
        context: vec![json!("https://www.w3.org/2018/credentials/v1")],
    }
}

#[test]
fn test_round_trip() {
    let credential = credential(3);

    let payload = compact(&credential).unwrap();

    assert_eq!(expand(&payload).unwrap(), serde_json::to_vec(&credential).unwrap());
}

#[test]
fn test_round_trip_ten_subject_fields() {
    let credential = credential(10);

    let payload = compact(&credential).unwrap();
    let expanded: VerifiableCredential = serde_json::from_slice(&expand(&payload).unwrap()).unwrap();

    assert_eq!(expanded, credential);
    assert_eq!(
        expanded.credential_subject.keys().collect::<Vec<_>>(),
        credential.credential_subject.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_payload_uses_base45_alphabet() {
    let payload = compact(&credential(5)).unwrap();

    assert!(!payload.is_empty());
    assert!(payload.chars().all(|c| BASE45_ALPHABET.contains(c)));
}

#[test]
fn test_compaction_is_deterministic() {
    assert_eq!(
        compact(&credential(4)).unwrap(),
        compact(&credential(4)).unwrap()
    );
}

#[test]
fn test_expand_rejects_invalid_payload() {
    assert!(matches!(
        expand("lowercase is not base45"),
        Err(CodeGenerationFault::Encoding(_))
    ));
    // valid base45 of bytes that aren't a zlib stream
    assert!(matches!(
        expand(&base45::encode(b"plain")),
        Err(CodeGenerationFault::Compression(_))
    ));
}
