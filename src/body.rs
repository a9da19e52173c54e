//! Request body type.
//!
//! [`Body`] is a tagged union over the representations the builder
//! recognizes: the explicit no-body sentinel, raw bytes, raw text, a
//! readable stream, and an arbitrary serializable value. Bytes, text, and
//! streams pass through [`build()`](crate::Builder::build) verbatim; only a
//! serializable value (created via [`Body::serialize()`]) goes through the
//! builder's [`BodyMarshaler`](crate::BodyMarshaler).

use crate::error::Error;
use crate::marshal::BodyMarshaler;
use bytes::Bytes;
use std::io::{self, Read};
use std::sync::{Arc, Mutex};

/// A request body.
///
/// Can be created from `String`, `&str`, `Vec<u8>`, `&[u8]`, or `Bytes`
/// (in-memory, sent verbatim), from a reader via [`reader()`](Self::reader)
/// (passed through unchanged; the caller owns its `Content-Type`), or from
/// any serializable value via [`serialize()`](Self::serialize) (marshaled
/// at build time). [`Body::default()`] is the explicit no-body sentinel.
#[derive(Clone, Default)]
pub struct Body {
    inner: BodyInner,
}

#[derive(Clone, Default)]
pub(crate) enum BodyInner {
    /// No body.
    #[default]
    Empty,
    /// In-memory bytes, sent verbatim.
    Bytes(Bytes),
    /// Text, sent as its UTF-8 bytes verbatim.
    Text(String),
    /// A readable stream, passed through unchanged. Clones share the
    /// underlying reader.
    Reader(Arc<Mutex<Box<dyn Read + Send>>>),
    /// A value resolved through the body marshaler at build time.
    Value(Arc<dyn erased_serde::Serialize + Send + Sync>),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            BodyInner::Empty => f.debug_struct("Body").field("kind", &"empty").finish(),
            BodyInner::Bytes(b) => f
                .debug_struct("Body")
                .field("kind", &"bytes")
                .field("length", &b.len())
                .finish(),
            BodyInner::Text(s) => f
                .debug_struct("Body")
                .field("kind", &"text")
                .field("length", &s.len())
                .finish(),
            BodyInner::Reader(_) => f.debug_struct("Body").field("kind", &"reader").finish(),
            BodyInner::Value(_) => f.debug_struct("Body").field("kind", &"value").finish(),
        }
    }
}

impl Body {
    /// The explicit no-body sentinel.
    pub fn empty() -> Body {
        Body::default()
    }

    /// A body that marshals `value` through the builder's
    /// [`BodyMarshaler`](crate::BodyMarshaler) at build time.
    pub fn serialize<T>(value: T) -> Body
    where
        T: serde::Serialize + Send + Sync + 'static,
    {
        Body {
            inner: BodyInner::Value(Arc::new(value)),
        }
    }

    /// A body that streams from `reader`, passed through the build
    /// unchanged. The caller is responsible for any `Content-Type` header.
    pub fn reader(reader: impl Read + Send + 'static) -> Body {
        Body {
            inner: BodyInner::Reader(Arc::new(Mutex::new(Box::new(reader)))),
        }
    }

    /// View the body contents as a byte slice.
    ///
    /// Returns `None` for reader bodies and for unresolved serializable
    /// values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.inner {
            BodyInner::Empty => Some(&[]),
            BodyInner::Bytes(b) => Some(b),
            BodyInner::Text(s) => Some(s.as_bytes()),
            BodyInner::Reader(_) | BodyInner::Value(_) => None,
        }
    }

    /// Returns `true` for the no-body sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self.inner, BodyInner::Empty)
    }

    /// Consume the body and return a reader over its content.
    ///
    /// In-memory bodies read from their bytes; reader bodies return the
    /// wrapped stream (shared with any clones). A serializable value that
    /// was never resolved through a marshaler is an error.
    pub fn into_reader(self) -> Result<Box<dyn Read + Send>, Error> {
        match self.inner {
            BodyInner::Empty => Ok(Box::new(io::empty())),
            BodyInner::Bytes(b) => Ok(Box::new(io::Cursor::new(b))),
            BodyInner::Text(s) => Ok(Box::new(io::Cursor::new(s.into_bytes()))),
            BodyInner::Reader(shared) => Ok(Box::new(SharedReader(shared))),
            BodyInner::Value(_) => Err(Error::body_marshal(
                "body value was not resolved through a marshaler",
            )),
        }
    }

    /// Resolve this body for transmission: a serializable value is
    /// marshaled to bytes, every other kind passes through unchanged.
    pub(crate) fn resolve(&self, marshaler: &dyn BodyMarshaler) -> Result<Body, Error> {
        match &self.inner {
            BodyInner::Value(value) => {
                let data = marshaler
                    .marshal(&**value)
                    .map_err(|e| Error::body_marshal("marshal").with_source(e))?;
                Ok(Body::from(data))
            }
            _ => Ok(self.clone()),
        }
    }
}

/// Reader handle over a shared stream body. Clones of a [`Body`] share the
/// stream, so reads through one handle advance it for all.
struct SharedReader(Arc<Mutex<Box<dyn Read + Send>>>);

impl Read for SharedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut guard = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.read(buf)
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from(v)),
        }
    }
}

impl From<&'static [u8]> for Body {
    fn from(s: &'static [u8]) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from_static(s)),
        }
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Self {
            inner: BodyInner::Bytes(b),
        }
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self {
            inner: BodyInner::Text(s),
        }
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self {
            inner: BodyInner::Text(s.to_owned()),
        }
    }
}
