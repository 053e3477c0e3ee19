use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::Value;

use super::core::Responsifier;
use crate::respond::{Model, RespondError, ViewContext};

/// Extension hook applied to model values before JSON encoding.
///
/// Converters translate values that are not natively JSON-representable
/// into their wire form, such as timestamps to ISO-8601 strings or opaque
/// identifiers to their string form. The first converter that returns
/// `Some` at a given node wins; unconverted containers are walked
/// recursively.
pub trait ValueConverter: Send + Sync {
    /// The JSON-native replacement for `value`, or `None` when this
    /// converter does not apply.
    fn convert(&self, value: &Value) -> Option<Value>;
}

/// Converts `{"$date": <epoch millis>}` timestamp values to RFC 3339
/// strings.
pub struct DateTimeConverter;

impl ValueConverter for DateTimeConverter {
    fn convert(&self, value: &Value) -> Option<Value> {
        let map = value.as_object()?;
        if map.len() != 1 {
            return None;
        }
        let millis = map.get("$date")?.as_i64()?;
        let timestamp = Utc.timestamp_millis_opt(millis).single()?;
        Some(Value::String(
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    }
}

/// Converts `{"$oid": "<24 hex chars>"}` object identifiers to their
/// plain string form.
pub struct ObjectIdConverter;

impl ValueConverter for ObjectIdConverter {
    fn convert(&self, value: &Value) -> Option<Value> {
        let map = value.as_object()?;
        if map.len() != 1 {
            return None;
        }
        let oid = map.get("$oid")?.as_str()?;
        if oid.len() == 24 && oid.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Value::String(oid.to_string()))
        } else {
            None
        }
    }
}

/// Create a response body by rendering the model directly to JSON.
///
/// No view resolution step. [`JsonResponsifier::default`] installs the
/// stock [`DateTimeConverter`] and [`ObjectIdConverter`]; further
/// converters can be appended with [`with_converter`](Self::with_converter).
pub struct JsonResponsifier {
    converters: Vec<Box<dyn ValueConverter>>,
}

impl JsonResponsifier {
    /// A responsifier with no converters installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Append a converter. Returns `self` for chaining.
    #[must_use]
    pub fn with_converter(mut self, converter: Box<dyn ValueConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    fn convert(&self, value: &Value) -> Value {
        for converter in &self.converters {
            if let Some(converted) = converter.convert(value) {
                return converted;
            }
        }
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.convert(value)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.convert(item)).collect())
            }
            other => other.clone(),
        }
    }
}

impl Default for JsonResponsifier {
    fn default() -> Self {
        Self::new()
            .with_converter(Box::new(DateTimeConverter))
            .with_converter(Box::new(ObjectIdConverter))
    }
}

impl Responsifier for JsonResponsifier {
    fn responsify(&self, model: &Model, _context: &ViewContext) -> Result<String, RespondError> {
        let document = self.convert(&Value::Object(model.clone()));
        serde_json::to_string(&document).map_err(|e| {
            RespondError::InvalidResponse(format!("cannot encode the model as JSON: {e}"))
        })
    }
}
