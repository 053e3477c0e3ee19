use std::fmt;

/// Failure taxonomy for the response resolution pipeline.
///
/// Every variant propagates unmodified through [`respond`](super::respond);
/// the server glue translates each kind into an HTTP status via
/// [`status_code`](RespondError::status_code). Only
/// `UnsupportedMediaType` is attributable to the client; the rest indicate
/// a configuration or programming defect.
#[derive(Debug)]
pub enum RespondError {
    /// A handler returned response data that cannot be deconstructed into
    /// a `(view_name, model, status_code)` triple.
    InvalidResponse(String),
    /// A logical view name could not be resolved to a renderable view.
    ViewNotFound(String),
    /// No registered responsifier matches the negotiated media type.
    UnsupportedMediaType {
        /// The `Accept` header that failed to negotiate.
        accept: String,
    },
    /// The template engine failed while rendering a resolved view.
    TemplateRender {
        /// The resolved view identifier that failed to render.
        view: String,
        /// The underlying engine error.
        source: minijinja::Error,
    },
}

impl RespondError {
    /// A `ViewNotFound` with a helpful message built from the unmapped `view_name`.
    pub fn for_view_name(view_name: &str) -> Self {
        RespondError::ViewNotFound(format!(
            "cannot find the view named \"{view_name}\"; did you map it?"
        ))
    }

    /// A `ViewNotFound` for a context that carried no usable view name.
    pub fn for_missing_view_name() -> Self {
        RespondError::ViewNotFound("no view name supplied".to_string())
    }

    pub(crate) fn unsupported_media_type(accept: Option<&str>) -> Self {
        RespondError::UnsupportedMediaType {
            accept: accept.unwrap_or("*/*").to_string(),
        }
    }

    /// The HTTP status this failure should surface as.
    ///
    /// `UnsupportedMediaType` is a 415 client error with no body; everything
    /// else is a server error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RespondError::UnsupportedMediaType { .. } => 415,
            _ => 500,
        }
    }
}

impl fmt::Display for RespondError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespondError::InvalidResponse(message) => write!(f, "{message}"),
            RespondError::ViewNotFound(message) => write!(f, "{message}"),
            RespondError::UnsupportedMediaType { accept } => {
                write!(f, "no responsifier supports the requested media types [{accept}]")
            }
            RespondError::TemplateRender { view, source } => {
                write!(f, "failed to render the view [{view}]: {source}")
            }
        }
    }
}

impl std::error::Error for RespondError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RespondError::TemplateRender { source, .. } => Some(source),
            _ => None,
        }
    }
}
