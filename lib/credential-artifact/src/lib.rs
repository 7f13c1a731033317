#![cfg_attr(feature = "strict", deny(warnings))]

use std::sync::Arc;

use config::core_config::CoreConfig;
use provider::document_converter::DocumentConverter;
use provider::document_converter::pdf::PdfDocumentConverter;
use provider::http_client::HttpClient;
use provider::http_client::reqwest_client::ReqwestClient;
use provider::issuance::IssuerExchange;
use provider::issuance::openid4vci::OpenID4VCIExchange;
use provider::issuer_config::json_file::JsonFileIssuerConfigSource;
use provider::key_storage::file::FileKeyStore;
use provider::template_store::FileTemplateStore;
use service::credential::CredentialArtifactService;
use service::document::DocumentComposer;
use service::document::renderer::TemplateRenderer;
use service::issuer::IssuerService;
use service::proof_builder::ProofBuilder;

pub mod config;
pub mod model;
pub mod proto;
pub mod provider;
pub mod service;
pub mod util;

/// Entry point wiring every provider from [`CoreConfig`].
///
/// Everything held here is read-only after construction and can be shared
/// between concurrent requests.
#[derive(Clone)]
pub struct ArtifactCore {
    pub issuer_service: IssuerService,
    pub credential_service: CredentialArtifactService,
}

impl ArtifactCore {
    pub fn new(
        config: Arc<CoreConfig>,
        client: Option<Arc<dyn HttpClient>>,
    ) -> ArtifactCore {
        let client: Arc<dyn HttpClient> =
            client.unwrap_or_else(|| Arc::new(ReqwestClient::default()));

        let issuer_config_source = Arc::new(JsonFileIssuerConfigSource::new(
            config.issuers.config_file.to_owned(),
        ));
        let template_store = Arc::new(FileTemplateStore::new(
            config.templates.directory.to_owned(),
        ));
        let key_store = Arc::new(FileKeyStore::new());
        let converter: Arc<dyn DocumentConverter> = Arc::new(PdfDocumentConverter::default());

        let renderer = Arc::new(TemplateRenderer::new());
        let composer = DocumentComposer::new(
            renderer,
            template_store,
            converter,
            config.templates.credential_template.to_owned(),
        );
        let proof_builder = ProofBuilder::new(key_store, config.key_store.to_owned());
        let exchange: Arc<dyn IssuerExchange> = Arc::new(OpenID4VCIExchange::new(client));

        ArtifactCore {
            issuer_service: IssuerService::new(issuer_config_source, exchange.clone()),
            credential_service: CredentialArtifactService::new(proof_builder, exchange, composer),
        }
    }
}
