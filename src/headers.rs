//! Header multi-map utilities and canned header constructors.
//!
//! The crate's header multi-map is [`http::HeaderMap`]: case-insensitive
//! names, order-preserving multi-values. [`merge_append`] and
//! [`merge_replace`] implement the two merge strategies used by the
//! builder; the constructors below build one-entry maps for common idioms.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashSet;
use std::fmt;

/// Append every value of every source map into `dst`, in source order,
/// preserving values already present in `dst`.
pub fn merge_append(dst: &mut HeaderMap, srcs: impl IntoIterator<Item = HeaderMap>) {
    for src in srcs {
        for (name, value) in &src {
            dst.append(name.clone(), value.clone());
        }
    }
}

/// Replace `dst`'s values per key with each source's full value list,
/// applied in source order so a later source wins for a shared key. Keys
/// absent from the sources keep their values in `dst`.
pub fn merge_replace(dst: &mut HeaderMap, srcs: impl IntoIterator<Item = HeaderMap>) {
    for src in srcs {
        // First occurrence of a name replaces the destination list;
        // subsequent occurrences are that source's own multi-values.
        let mut replaced: HashSet<HeaderName> = HashSet::new();
        for (name, value) in &src {
            if replaced.insert(name.clone()) {
                dst.insert(name.clone(), value.clone());
            } else {
                dst.append(name.clone(), value.clone());
            }
        }
    }
}

/// A one-entry header map.
pub fn header(name: HeaderName, value: HeaderValue) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(name, value);
    map
}

/// A `Content-Type` header map with the given value.
pub fn content_type(value: HeaderValue) -> HeaderMap {
    header(CONTENT_TYPE, value)
}

/// A `Content-Type: application/json` header map.
pub fn json_content() -> HeaderMap {
    content_type(HeaderValue::from_static("application/json"))
}

/// A `Content-Type: application/x-www-form-urlencoded` header map.
pub fn form_content() -> HeaderMap {
    content_type(HeaderValue::from_static("application/x-www-form-urlencoded"))
}

/// An `Accept: application/json` header map.
pub fn accept_json() -> HeaderMap {
    header(ACCEPT, HeaderValue::from_static("application/json"))
}

/// An `Authorization` header map with the given literal value.
pub fn auth(value: HeaderValue) -> HeaderMap {
    header(AUTHORIZATION, value)
}

/// An `Authorization: Bearer <token>` header map.
///
/// Fails if the formatted token is not a valid header value (contains
/// control characters).
pub fn bearer_auth(token: impl fmt::Display) -> Result<HeaderMap, http::header::InvalidHeaderValue> {
    let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    Ok(auth(value))
}
