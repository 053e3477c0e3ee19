use serde_json::{Map, Value};

use super::error::RespondError;
use crate::negotiation::negotiate;
use crate::responsifier::ResponsifierRegistry;

/// The template/JSON variables a handler hands to a responsifier.
pub type Model = Map<String, Value>;

/// Per-request values a responsifier may consult beyond the model, such as
/// the logical view name. Context keys win over model keys when merged.
pub type ViewContext = Map<String, Value>;

/// Key under which the orchestrator places the logical view name, both in
/// mapping-shaped response data and in the view context handed to
/// responsifiers.
pub const VIEW_NAME_KEY: &str = "view_name";
/// Key naming the model in mapping-shaped response data.
pub const MODEL_KEY: &str = "model";
/// Key naming the status code in mapping-shaped response data.
pub const STATUS_CODE_KEY: &str = "status_code";

/// Location response header.
pub const HEADER_LOCATION: &str = "Location";
/// Content-Type response header.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

const STATUS_OK: u16 = 200;

/// The canonical triple deconstructed from a handler's response data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseParts {
    /// The logical view name, resolver-independent (never blank).
    pub view_name: String,
    /// The model to be rendered (possibly empty).
    pub model: Model,
    /// The HTTP status code to attach to the rendered body.
    pub status_code: u16,
}

/// A fully formed HTTP response: the pipeline's product, and also the
/// bypass shape a handler may return to opt out of the pipeline entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Set the `name` header to `value`, replacing any existing value.
    /// Returns `self` for chaining.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Some(entry) = self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            entry.1 = value.to_string();
        } else {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Set the `Content-Type` header. Returns `self` for chaining.
    #[must_use]
    pub fn with_content_type(self, content_type: &str) -> Self {
        self.with_header(HEADER_CONTENT_TYPE, content_type)
    }

    /// Set the `Location` header. Returns `self` for chaining.
    #[must_use]
    pub fn with_location(self, location: &str) -> Self {
        self.with_header(HEADER_LOCATION, location)
    }

    /// Look up a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What a request handler returns.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    /// Response data to be run through the pipeline: a bare view-name
    /// string, an ordered sequence of 1 to 3 elements
    /// `[view_name, model?, status_code?]`, or a mapping with `view_name`,
    /// `model`, and `status_code` keys.
    Descriptor(Value),
    /// A fully formed response, returned unchanged by the orchestrator.
    Response(HttpResponse),
}

impl From<&str> for HandlerResult {
    fn from(view_name: &str) -> Self {
        HandlerResult::Descriptor(Value::String(view_name.to_string()))
    }
}

impl From<String> for HandlerResult {
    fn from(view_name: String) -> Self {
        HandlerResult::Descriptor(Value::String(view_name))
    }
}

impl From<Value> for HandlerResult {
    fn from(descriptor: Value) -> Self {
        HandlerResult::Descriptor(descriptor)
    }
}

impl From<HttpResponse> for HandlerResult {
    fn from(response: HttpResponse) -> Self {
        HandlerResult::Response(response)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_view_name(value: &Value) -> Result<String, RespondError> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Ok(name.clone()),
        Value::String(_) => Err(RespondError::InvalidResponse(
            "the required view name is empty".to_string(),
        )),
        other => Err(RespondError::InvalidResponse(format!(
            "the required view name must be a string, not [{}]",
            json_type_name(other)
        ))),
    }
}

fn required_status_code(value: &Value) -> Result<u16, RespondError> {
    value
        .as_u64()
        .filter(|code| (1..=u64::from(u16::MAX)).contains(code))
        .map(|code| code as u16)
        .ok_or_else(|| {
            RespondError::InvalidResponse(format!(
                "the status code must be a positive integer, not [{value}]"
            ))
        })
}

/// Deconstruct the supplied `response_data` into its constituent
/// web-related elements: `(view_name, model, status_code)`.
///
/// A bare string is the view name with an empty model and status 200. A
/// sequence fills omitted or null trailing elements with the same
/// defaults. A mapping takes its elements from the `view_name`, `model`,
/// and `status_code` keys; a mapping whose `model` is explicitly null
/// serves double duty, with the whole mapping becoming the model.
///
/// Pure and idempotent. No other shape is accepted.
///
/// # Errors
///
/// [`RespondError::InvalidResponse`] when the response data is null, an
/// unsupported kind, an empty sequence, or carries a missing/blank view
/// name, a non-mapping model, or a malformed status code.
pub fn deconstruct(response_data: &Value) -> Result<ResponseParts, RespondError> {
    match response_data {
        Value::String(name) => deconstruct_string(name),
        Value::Array(items) => deconstruct_list(items),
        Value::Object(map) => deconstruct_map(map),
        other => Err(RespondError::InvalidResponse(format!(
            "cannot deconstruct response data of type [{}]",
            json_type_name(other)
        ))),
    }
}

fn deconstruct_string(name: &str) -> Result<ResponseParts, RespondError> {
    let view_name = required_view_name(&Value::String(name.to_string()))?;
    Ok(ResponseParts {
        view_name,
        model: Model::new(),
        status_code: STATUS_OK,
    })
}

fn deconstruct_list(items: &[Value]) -> Result<ResponseParts, RespondError> {
    if items.is_empty() {
        return Err(RespondError::InvalidResponse(
            "the response data is empty; the view name at least is required".to_string(),
        ));
    }

    let view_name = required_view_name(&items[0])?;

    let model = match items.get(1) {
        None | Some(Value::Null) => Model::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(RespondError::InvalidResponse(format!(
                "the model must be a mapping, not [{}]",
                json_type_name(other)
            )))
        }
    };

    let status_code = match items.get(2) {
        None | Some(Value::Null) => STATUS_OK,
        Some(value) => required_status_code(value)?,
    };

    // Elements beyond the third are ignored.
    Ok(ResponseParts {
        view_name,
        model,
        status_code,
    })
}

fn deconstruct_map(map: &Model) -> Result<ResponseParts, RespondError> {
    let view_name = required_view_name(map.get(VIEW_NAME_KEY).unwrap_or(&Value::Null))?;

    let model = match map.get(MODEL_KEY) {
        None => Model::new(),
        // An explicitly null model means the whole mapping serves double
        // duty as both metadata and template variables.
        Some(Value::Null) => map.clone(),
        Some(Value::Object(model)) => model.clone(),
        Some(other) => {
            return Err(RespondError::InvalidResponse(format!(
                "the model must be a mapping, not [{}]",
                json_type_name(other)
            )))
        }
    };

    let status_code = match map.get(STATUS_CODE_KEY) {
        None | Some(Value::Null) => STATUS_OK,
        Some(value) => required_status_code(value)?,
    };

    Ok(ResponseParts {
        view_name,
        model,
        status_code,
    })
}

/// Turn a handler's result into a concrete [`HttpResponse`].
///
/// A [`HandlerResult::Response`] is returned unchanged. Otherwise the
/// response data is deconstructed, the `Accept` header is negotiated
/// against the registry, and the selected responsifier renders the model
/// with a context carrying the view name under [`VIEW_NAME_KEY`]. The
/// rendered body carries the deconstructed status code and a
/// `Content-Type` for the negotiated family.
///
/// # Errors
///
/// Any failure from deconstruction, negotiation, view resolution, or
/// rendering propagates unmodified; this function adds no handling of its
/// own.
pub fn respond(
    result: HandlerResult,
    accept: Option<&str>,
    registry: &ResponsifierRegistry,
) -> Result<HttpResponse, RespondError> {
    let descriptor = match result {
        HandlerResult::Response(response) => return Ok(response),
        HandlerResult::Descriptor(value) => value,
    };

    let parts = deconstruct(&descriptor)?;
    let (family, responsifier) = negotiate(accept, registry)?;

    let mut context = ViewContext::new();
    context.insert(
        VIEW_NAME_KEY.to_string(),
        Value::String(parts.view_name.clone()),
    );

    let body = responsifier.responsify(&parts.model, &context)?;
    Ok(HttpResponse::new(parts.status_code, body).with_content_type(family.content_type()))
}
