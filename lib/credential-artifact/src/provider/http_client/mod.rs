//! Transport seam for every call towards an issuer.
//!
//! Method and url are logged at debug level, headers and bodies at trace
//! level. Bearer tokens never reach the logs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod reqwest_client;


pub type Headers = HashMap<String, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum Method {
    #[strum(serialize = "GET")]
    Get,
    #[strum(serialize = "POST")]
    Post,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn is_error(self) -> bool {
        self.0 >= 400
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub request: Request,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Status {status} returned by {method} {url}")]
    ErrorStatus {
        status: StatusCode,
        method: Method,
        url: String,
    },
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> RequestBuilder;
    fn post(&self, url: &str) -> RequestBuilder;

    async fn send(&self, request: Request) -> Result<Response, Error>;
}

impl Response {
    pub fn error_for_status(self) -> Result<Self, Error> {
        if !self.status.is_error() {
            return Ok(self);
        }

        tracing::warn!(
            status = %self.status,
            method = %self.request.method,
            url = %self.request.url,
            "Request rejected"
        );
        Err(Error::ErrorStatus {
            status: self.status,
            method: self.request.method,
            url: self.request.url,
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|error| {
            tracing::warn!(url = %self.request.url, %error, "Unparsable response body");
            Error::Json(error)
        })
    }
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    request: Request,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, method: Method, url: &str) -> Self {
        Self {
            client,
            request: Request {
                method,
                url: url.to_owned(),
                headers: Headers::default(),
                body: None,
            },
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request
            .headers
            .insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {token}"))
    }

    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        self.request.body = Some(serde_json::to_vec(value)?);
        Ok(self.header("Content-Type", "application/json"))
    }

    pub async fn send(self) -> Result<Response, Error> {
        let RequestBuilder { client, request } = self;
        let (method, url) = (request.method, request.url.to_owned());

        tracing::debug!(%method, %url, "Sending request");
        tracing::trace!(
            headers = %redacted(&request.headers),
            body = %printable(request.body.as_deref()),
            "Request details"
        );

        let response = client.send(request).await.map_err(|error| {
            tracing::error!(%method, %url, %error, "Request failed");
            error
        })?;

        tracing::debug!(%method, %url, status = %response.status, "Received response");
        tracing::trace!(
            headers = %redacted(&response.headers),
            body = %printable(Some(&response.body)),
            "Response details"
        );

        Ok(response)
    }
}

fn redacted(headers: &Headers) -> String {
    let mut lines: Vec<String> = headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                format!("{name}: <redacted>")
            } else {
                format!("{name}: {value}")
            }
        })
        .collect();
    lines.sort();
    lines.join(", ")
}

fn printable(body: Option<&[u8]>) -> String {
    match body {
        None | Some([]) => "<empty>".to_owned(),
        Some(body) => String::from_utf8_lossy(body).into_owned(),
    }
}
