pub mod document_converter;
pub mod http_client;
pub mod issuance;
pub mod issuer_config;
pub mod key_storage;
pub mod template_store;
