//! URL assembly.
//!
//! Joins a base URL and a path segment with exactly one separator, parses
//! the result, and installs a pre-encoded query string.

use crate::error::Error;
use url::Url;

/// Join `base` and `path` with exactly one `/` between them, regardless of
/// trailing/leading slashes on either side. An empty `path` leaves `base`
/// untouched.
fn join_path(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_owned();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Assemble the absolute request URL from `base`, `path`, and a pre-encoded
/// query string (as produced by [`UrlValues::encode()`](crate::UrlValues::encode)).
///
/// An empty `raw_query` produces a URL without a `?`. Fails with a
/// URL-assembly error when the joined string does not parse as an absolute
/// URL.
pub fn build_url(base: &str, path: &str, raw_query: &str) -> Result<Url, Error> {
    let joined = join_path(base, path);

    let mut url = Url::parse(&joined)
        .map_err(|e| Error::url(format!("parse {joined:?}")).with_source(e))?;

    if raw_query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(raw_query));
    }

    Ok(url)
}
