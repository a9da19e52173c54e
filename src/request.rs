//! Finalized request type.
//!
//! [`Request`] is the output of [`Builder::build()`](crate::Builder::build):
//! a fully-resolved method, absolute URL, header map, body, and the
//! cancellation token the build was given. The builder retains no reference
//! to it; hand it to whatever transport sends it.

use crate::body::Body;
use crate::error::Error;
use http::{HeaderMap, Method};
use tokio_util::sync::CancellationToken;
use url::Url;

/// A fully-built HTTP request.
///
/// Created via [`Builder::build()`](crate::Builder::build). The
/// cancellation token is carried through for the transport; this crate
/// never interprets it beyond rejecting an already-cancelled token at
/// construction.
#[derive(Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Body,
    token: CancellationToken,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .finish()
    }
}

impl Request {
    /// Create a new `Request` with empty headers.
    ///
    /// This is the construction primitive the builder's final stage uses:
    /// it parses the method token and rejects an already-cancelled token,
    /// both as request-construction errors.
    pub fn new(
        token: CancellationToken,
        method: &str,
        url: Url,
        body: Body,
    ) -> Result<Request, Error> {
        if token.is_cancelled() {
            return Err(Error::request("cancellation token already cancelled"));
        }

        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| Error::request(format!("invalid method token {method:?}")).with_source(e))?;

        Ok(Request {
            method,
            url,
            headers: HeaderMap::new(),
            body,
            token,
        })
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns a mutable reference to the HTTP method.
    pub fn method_mut(&mut self) -> &mut Method {
        &mut self.method
    }

    /// Returns the request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns a mutable reference to the request URL.
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns a mutable reference to the request body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Returns the cancellation token the request was built with.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Consume the request and return the body.
    pub fn into_body(self) -> Body {
        self.body
    }
}
