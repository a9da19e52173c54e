//! Immutable request builder.
//!
//! [`Builder`] holds a declarative request configuration. Every `with_*`
//! mutator takes `&self` and returns a new, fully independent builder (the
//! header map is always copied, never shared), so one base configuration
//! can be branched freely and built repeatedly.

use crate::body::Body;
use crate::error::Error;
use crate::headers::{merge_append, merge_replace};
use crate::marshal::{BodyMarshaler, JsonBodyMarshaler, ParamsMarshaler, QueryParamsMarshaler};
use crate::request::Request;
use crate::url::build_url;
use http::HeaderMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// An immutable configuration for an outbound HTTP request.
///
/// Defaults: method `GET`, empty path, no body, no headers, no params,
/// [`JsonBodyMarshaler`] and [`QueryParamsMarshaler`] as the serialization
/// ports. The trailing `/` of the base URL is stripped at construction.
///
/// `build()` performs no I/O and cannot block; the builder remains usable
/// (and branchable) after any number of builds.
#[derive(Clone)]
pub struct Builder {
    method: String,
    path: String,
    base_url: String,
    body: Body,
    header: HeaderMap,
    body_marshaler: Arc<dyn BodyMarshaler>,
    params_marshaler: Arc<dyn ParamsMarshaler>,
    params: Option<Arc<dyn erased_serde::Serialize + Send + Sync>>,
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .field("body", &self.body)
            .finish()
    }
}

impl Builder {
    /// Create a builder for requests against `base_url`.
    ///
    /// A trailing path separator on the base is stripped; the path given
    /// later via [`with_path()`](Self::with_path) supplies its own.
    pub fn new(base_url: impl Into<String>) -> Builder {
        let base_url = base_url.into();
        Builder {
            method: "GET".to_owned(),
            path: String::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            body: Body::empty(),
            header: HeaderMap::new(),
            body_marshaler: Arc::new(JsonBodyMarshaler),
            params_marshaler: Arc::new(QueryParamsMarshaler),
            params: None,
        }
    }

    /// A new builder with the given HTTP method token.
    ///
    /// The token is validated at [`build()`](Self::build) time, not here.
    #[must_use]
    pub fn with_method(&self, method: impl Into<String>) -> Builder {
        let mut next = self.clone();
        next.method = method.into();
        next
    }

    /// A new builder with the given URL path, joined to the base at build
    /// time.
    #[must_use]
    pub fn with_path(&self, path: impl Into<String>) -> Builder {
        let mut next = self.clone();
        next.path = path.into();
        next
    }

    /// A new builder with the given body.
    ///
    /// Accepts anything convertible into a [`Body`]: raw bytes and strings
    /// are sent verbatim, [`Body::reader()`] streams are passed through,
    /// and [`Body::serialize()`] values go through the body marshaler at
    /// build time.
    #[must_use]
    pub fn with_body(&self, body: impl Into<Body>) -> Builder {
        let mut next = self.clone();
        next.body = body.into();
        next
    }

    /// A new builder using `marshaler` to serialize the body.
    #[must_use]
    pub fn with_body_marshaler(&self, marshaler: impl BodyMarshaler + 'static) -> Builder {
        let mut next = self.clone();
        next.body_marshaler = Arc::new(marshaler);
        next
    }

    /// A new builder using `marshaler` to serialize query parameters.
    #[must_use]
    pub fn with_params_marshaler(&self, marshaler: impl ParamsMarshaler + 'static) -> Builder {
        let mut next = self.clone();
        next.params_marshaler = Arc::new(marshaler);
        next
    }

    /// A new builder whose header map is a fresh copy of the receiver's,
    /// merged (append semantics) with the supplied maps in order.
    ///
    /// The receiver's map is never shared with the result, so sibling
    /// branches of one builder cannot observe each other's headers.
    #[must_use]
    pub fn with_headers(&self, headers: impl IntoIterator<Item = HeaderMap>) -> Builder {
        let mut next = self.clone();
        merge_append(&mut next.header, headers);
        next
    }

    /// A new builder with the given query-parameter value, serialized by
    /// the params marshaler at build time.
    ///
    /// The shape of `params` is a contract between the caller and the
    /// configured [`ParamsMarshaler`]; the default marshaler expects a
    /// struct or map.
    #[must_use]
    pub fn with_params<T>(&self, params: T) -> Builder
    where
        T: serde::Serialize + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.params = Some(Arc::new(params));
        next
    }

    /// Resolve the configuration into a [`Request`].
    ///
    /// Stages, in order, failing fast on the first error:
    ///
    /// 1. resolve the body (only [`Body::serialize()`] values are marshaled),
    /// 2. marshal the params into url values,
    /// 3. assemble the absolute URL from base, path, and encoded query,
    /// 4. construct the request (method token parse, cancellation check),
    /// 5. install the builder's headers with replace semantics.
    ///
    /// `token` is carried through to the request, never interpreted here.
    /// On error no partial request is returned; the error identifies the
    /// failed stage via its `is_*` queries.
    pub fn build(&self, token: CancellationToken) -> Result<Request, Error> {
        let body = self.body.resolve(self.body_marshaler.as_ref())?;

        let params = self
            .params
            .as_deref()
            .map(|p| p as &dyn erased_serde::Serialize);
        let values = self
            .params_marshaler
            .marshal(params)
            .map_err(|e| Error::params_marshal("marshal url values").with_source(e))?;

        let url = build_url(&self.base_url, &self.path, &values.encode())?;

        let mut request = Request::new(token, &self.method, url, body)?;

        merge_replace(request.headers_mut(), [self.header.clone()]);

        debug!(
            method = %request.method(),
            url = %request.url(),
            "built request"
        );

        Ok(request)
    }
}
