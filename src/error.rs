//! Error type for reqforge.
//!
//! [`Builder::build()`](crate::Builder::build) runs a fixed pipeline of
//! stages (marshal body, marshal url values, assemble URL, construct
//! request). [`Error`] records which stage failed via the
//! [`is_body_marshal()`](Error::is_body_marshal),
//! [`is_params_marshal()`](Error::is_params_marshal),
//! [`is_url()`](Error::is_url), and [`is_request()`](Error::is_request)
//! query methods, and carries the underlying cause in its
//! [`source()`](std::error::Error::source) chain.

use std::fmt;

/// Boxed error type used by the marshaler ports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A `Result` alias where the error defaults to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for request construction.
///
/// Errors carry a `kind` classification identifying the build stage that
/// failed. Exactly one of the `is_*` query methods returns `true` for any
/// given error.
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
}

/// Classification of an [`Error`] by build stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// The body value could not be serialized to bytes.
    BodyMarshal,
    /// The params value could not be serialized to url values.
    ParamsMarshal,
    /// Base URL and path could not be joined or parsed into a valid URL.
    Url,
    /// The resolved method/URL/body could not form a request (invalid
    /// method token, cancellation token already cancelled).
    Request,
}

impl Error {
    /// Returns `true` if the body value could not be marshaled.
    pub fn is_body_marshal(&self) -> bool {
        matches!(self.kind, ErrorKind::BodyMarshal)
    }

    /// Returns `true` if the params value could not be marshaled.
    pub fn is_params_marshal(&self) -> bool {
        matches!(self.kind, ErrorKind::ParamsMarshal)
    }

    /// Returns `true` if the URL could not be assembled.
    pub fn is_url(&self) -> bool {
        matches!(self.kind, ErrorKind::Url)
    }

    /// Returns `true` if the final request object could not be constructed.
    pub fn is_request(&self) -> bool {
        matches!(self.kind, ErrorKind::Request)
    }

    /// Attach a source error (builder pattern).
    ///
    /// Stores the underlying cause so that
    /// [`std::error::Error::source`] returns it, making error chains
    /// inspectable by `anyhow`, `eyre`, and manual walks.
    #[must_use]
    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    // -- Internal constructors --

    fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            source: None,
        }
    }

    /// Create a body-marshal error.
    pub(crate) fn body_marshal(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::BodyMarshal, msg)
    }

    /// Create a params-marshal error.
    pub(crate) fn params_marshal(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::ParamsMarshal, msg)
    }

    /// Create a URL-assembly error.
    pub(crate) fn url(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Url, msg)
    }

    /// Create a request-construction error.
    pub(crate) fn request(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Request, msg)
    }
}

impl fmt::Display for Error {
    /// A stage-identifying prefix, then the detail message. The underlying
    /// cause is available via [`std::error::Error::source`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ErrorKind::BodyMarshal => "error marshaling request body",
            ErrorKind::ParamsMarshal => "error marshaling url values",
            ErrorKind::Url => "error assembling request url",
            ErrorKind::Request => "error constructing request",
        };
        if self.message.is_empty() {
            f.write_str(prefix)
        } else {
            write!(f, "{prefix}: {}", self.message)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| &**e as &(dyn std::error::Error + 'static))
    }
}

// Ensure Error is Send + Sync so builds can be fanned out across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};
