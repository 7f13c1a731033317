pub mod credential;
pub mod credential_schema;
pub mod issuer;
