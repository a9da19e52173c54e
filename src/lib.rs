#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

#[macro_use]
mod tracing;

mod body;
mod builder;
mod error;
mod headers;
mod marshal;
mod request;
mod url;
mod values;

pub use body::Body;
pub use builder::Builder;
pub use error::{BoxError, Error, Result};
pub use headers::{
    accept_json, auth, bearer_auth, content_type, form_content, header, json_content,
    merge_append, merge_replace,
};
pub use marshal::{
    BodyMarshaler, BodyMarshalerFn, JsonBodyMarshaler, ParamsMarshaler, ParamsMarshalerFn,
    QueryParamsMarshaler,
};
pub use request::Request;
pub use self::url::build_url;
pub use values::UrlValues;

// Re-exported for callers so they can name every type the public API
// speaks, without depending on the underlying crates directly.
pub use ::url::Url;
pub use http::{HeaderMap, HeaderName, HeaderValue, Method};
pub use tokio_util::sync::CancellationToken;
