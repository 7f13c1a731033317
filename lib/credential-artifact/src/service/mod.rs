pub mod credential;
pub mod document;
pub mod error;
pub mod issuer;
pub mod optical_code;
pub mod payload;
pub mod proof_builder;
