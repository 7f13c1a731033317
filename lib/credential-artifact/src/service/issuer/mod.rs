pub mod dto;
pub mod service;

use std::sync::Arc;

use crate::provider::issuance::IssuerExchange;
use crate::provider::issuer_config::IssuerConfigSource;

#[derive(Clone)]
pub struct IssuerService {
    issuer_config_source: Arc<dyn IssuerConfigSource>,
    issuer_exchange: Arc<dyn IssuerExchange>,
}

impl IssuerService {
    pub fn new(
        issuer_config_source: Arc<dyn IssuerConfigSource>,
        issuer_exchange: Arc<dyn IssuerExchange>,
    ) -> Self {
        Self {
            issuer_config_source,
            issuer_exchange,
        }
    }
}
