pub mod mapper;
pub mod service;

use std::sync::Arc;

use super::document::DocumentComposer;
use super::proof_builder::ProofBuilder;
use crate::provider::issuance::IssuerExchange;

#[derive(Clone)]
pub struct CredentialArtifactService {
    proof_builder: ProofBuilder,
    issuer_exchange: Arc<dyn IssuerExchange>,
    document_composer: DocumentComposer,
}

impl CredentialArtifactService {
    pub fn new(
        proof_builder: ProofBuilder,
        issuer_exchange: Arc<dyn IssuerExchange>,
        document_composer: DocumentComposer,
    ) -> Self {
        Self {
            proof_builder,
            issuer_exchange,
            document_composer,
        }
    }
}
