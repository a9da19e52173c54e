//! Marshaler ports.
//!
//! Two swappable capabilities sit between the [`Builder`](crate::Builder)
//! and the concrete encoding libraries: [`BodyMarshaler`] turns a value into
//! body bytes, [`ParamsMarshaler`] turns a value into an ordered
//! [`UrlValues`] multi-map for the query string. Both accept a bare closure
//! or a full implementing type, and both are invoked only at
//! [`build()`](crate::Builder::build) time, so swapping a marshaler never
//! affects already-built requests.

use crate::error::BoxError;
use crate::values::UrlValues;

/// Serializes a body value to bytes for transmission.
///
/// The default implementation is [`JsonBodyMarshaler`]; wrap a bare closure
/// in [`BodyMarshalerFn`] for inline overrides.
pub trait BodyMarshaler: Send + Sync {
    /// Serialize `value` to the bytes that become the request body.
    fn marshal(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, BoxError>;
}

/// Function adapter implementing [`BodyMarshaler`].
#[derive(Clone, Copy)]
pub struct BodyMarshalerFn<F>(pub F);

impl<F> BodyMarshaler for BodyMarshalerFn<F>
where
    F: Fn(&dyn erased_serde::Serialize) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    fn marshal(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, BoxError> {
        (self.0)(value)
    }
}

/// Serializes a params value to an ordered [`UrlValues`] multi-map.
///
/// `value` is `None` when the builder was never given params; the default
/// implementation ([`QueryParamsMarshaler`]) yields an empty map for that
/// case rather than an error. Wrap a bare closure in [`ParamsMarshalerFn`]
/// for inline overrides.
pub trait ParamsMarshaler: Send + Sync {
    /// Serialize `value` into query-parameter values.
    fn marshal(&self, value: Option<&dyn erased_serde::Serialize>)
        -> Result<UrlValues, BoxError>;
}

/// Function adapter implementing [`ParamsMarshaler`].
#[derive(Clone, Copy)]
pub struct ParamsMarshalerFn<F>(pub F);

impl<F> ParamsMarshaler for ParamsMarshalerFn<F>
where
    F: Fn(Option<&dyn erased_serde::Serialize>) -> Result<UrlValues, BoxError> + Send + Sync,
{
    fn marshal(
        &self,
        value: Option<&dyn erased_serde::Serialize>,
    ) -> Result<UrlValues, BoxError> {
        (self.0)(value)
    }
}

/// The default body marshaler: `serde_json::to_vec`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBodyMarshaler;

impl BodyMarshaler for JsonBodyMarshaler {
    fn marshal(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(value)?)
    }
}

/// The default params marshaler.
///
/// Bridges serde to [`UrlValues`] by reflecting the value into a
/// `serde_json::Value` first, then walking the resulting object:
///
/// - scalar fields become single `key=value` pairs,
/// - array fields become repeated keys, one per element in element order,
/// - `null` fields are omitted (pair with
///   `#[serde(skip_serializing_if = "..")]` for omit-if-empty semantics),
/// - nested objects are rendered as their compact JSON text.
///
/// A value that does not serialize to a map or struct is an error; a `None`
/// or `null` value yields an empty map.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryParamsMarshaler;

impl ParamsMarshaler for QueryParamsMarshaler {
    fn marshal(
        &self,
        value: Option<&dyn erased_serde::Serialize>,
    ) -> Result<UrlValues, BoxError> {
        let Some(value) = value else {
            return Ok(UrlValues::new());
        };

        let mut values = UrlValues::new();
        match serde_json::to_value(value)? {
            serde_json::Value::Null => {}
            serde_json::Value::Object(map) => {
                for (key, field) in map {
                    match field {
                        serde_json::Value::Null => {}
                        serde_json::Value::Array(items) => {
                            for item in &items {
                                if let Some(s) = scalar_to_string(item) {
                                    values.append(key.clone(), s);
                                }
                            }
                        }
                        other => {
                            if let Some(s) = scalar_to_string(&other) {
                                values.append(key, s);
                            }
                        }
                    }
                }
            }
            _ => {
                return Err("url params must serialize to a map or struct".into());
            }
        }
        Ok(values)
    }
}

/// Convert a JSON scalar to its query-string representation.
/// Returns `None` for `null` (which callers skip).
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null => None,
        // Nested arrays/objects as values are unusual but produce their
        // JSON text so callers get *something* rather than a cryptic error.
        other => Some(other.to_string()),
    }
}
