pub mod autosave;
pub mod error;

mod category;
mod quiz;

pub use autosave::{Autosave, AUTOSAVE_DELAY};
pub use quiz::Created;

use error::{Error, Result};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, Request, StatusCode, Uri,
};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HttpClient},
    rt::TokioExecutor,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub const APPLICATION_JSON: &str = "application/json";

type Connector = HttpsConnector<HttpConnector>;

/// The single entry point for every call the wizard makes against the quiz
/// platform. The bearer token, when configured, is attached to all of them.
#[derive(Clone)]
pub struct Client {
    http: HttpClient<Connector, Full<Bytes>>,
    /// Base URL without a trailing slash, e.g. `https://quiz.example.com`.
    base: Arc<str>,
    bearer: Option<HeaderValue>,
}

impl Client {
    pub fn new(base: &str, token: Option<&str>) -> Result<Self> {
        let base = base.trim_end_matches('/');
        base.parse::<Uri>()?;

        let bearer = match token.map(str::trim).filter(|token| !token.is_empty()) {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let http = HttpClient::builder(TokioExecutor::new()).build(connector);
        Ok(Self { http, base: base.into(), bearer })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Uri> {
        let uri = [self.base.as_ref(), path].concat().parse()?;
        Ok(uri)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Bytes> {
        let uri = self.endpoint(path)?;
        log::debug!("{method} {uri}");

        let mut builder = Request::builder().method(method.clone()).uri(uri).header(ACCEPT, APPLICATION_JSON);
        if let Some(bearer) = &self.bearer {
            builder = builder.header(AUTHORIZATION, bearer.clone());
        }

        let req = match body {
            Some(bytes) => builder.header(CONTENT_TYPE, APPLICATION_JSON).body(Full::new(Bytes::from(bytes)))?,
            None => builder.body(Full::new(Bytes::new()))?,
        };

        let res = self.http.request(req).await?;
        let status = res.status();
        let bytes = res.into_body().collect().await?.to_bytes();
        if status.is_success() {
            return Ok(bytes);
        }

        let message = server_message(status, &bytes);
        log::warn!("{method} {path} failed with {status}: {message}");
        Err(Error::Status { status, message })
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        self.send(method, path, Some(payload)).await
    }
}

/// Extracts the human-readable reason from a failed response. The platform
/// replies with `{ "message": ... }` or `{ "error": ... }`; anything else falls
/// back to the status line.
fn server_message(status: StatusCode, body: &[u8]) -> Box<str> {
    use serde_json::Value;
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        let text = ["message", "error"].into_iter().find_map(|key| value.get(key).and_then(Value::as_str));
        if let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) {
            return text.into();
        }
    } else if let Ok(text) = core::str::from_utf8(body) {
        let text = text.trim();
        if !text.is_empty() && text.len() <= 200 {
            return text.into();
        }
    }
    status.to_string().into_boxed_str()
}
