use std::collections::HashMap;

use serde_json::Value;

use super::error::ResolverConfigError;
use crate::respond::{RespondError, ViewContext, VIEW_NAME_KEY};

/// Default suffix appended to logical view names.
pub const DEFAULT_VIEW_SUFFIX: &str = ".html";

/// Resolves a logical view name to a renderable view identifier.
///
/// The logical name is carried in the view context under the resolver's
/// configured view-name key. Implementations are immutable after
/// construction and shared for the process lifetime.
pub trait ViewResolver: Send + Sync {
    /// Resolve the logical view name in `context` to a view identifier.
    ///
    /// # Errors
    ///
    /// [`RespondError::ViewNotFound`] when the context carries no usable
    /// view name or the name cannot be resolved.
    fn resolve(&self, context: &ViewContext) -> Result<String, RespondError>;
}

/// Resolve a logical view name to a (file)path by appending a suffix.
///
/// The logical view name `login` becomes `login.html` with a suffix of
/// `.html`. This resolver never fails for an unmapped name; any non-blank
/// name resolves, since the transformation is syntactic rather than a
/// lookup.
pub struct SuffixBasedViewResolver {
    suffix: String,
    view_name_key: String,
}

impl SuffixBasedViewResolver {
    /// Create a resolver with the supplied suffix and view-name key.
    ///
    /// # Errors
    ///
    /// [`ResolverConfigError`] when either argument is empty or blank.
    pub fn new(suffix: &str, view_name_key: &str) -> Result<Self, ResolverConfigError> {
        if suffix.trim().is_empty() {
            return Err(ResolverConfigError::EmptySuffix);
        }
        if view_name_key.trim().is_empty() {
            return Err(ResolverConfigError::EmptyViewNameKey);
        }
        Ok(Self {
            suffix: suffix.to_string(),
            view_name_key: view_name_key.to_string(),
        })
    }

    /// Create a resolver with a custom suffix and the default view-name key.
    ///
    /// # Errors
    ///
    /// [`ResolverConfigError::EmptySuffix`] when the suffix is blank.
    pub fn with_suffix(suffix: &str) -> Result<Self, ResolverConfigError> {
        Self::new(suffix, VIEW_NAME_KEY)
    }
}

impl Default for SuffixBasedViewResolver {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_VIEW_SUFFIX.to_string(),
            view_name_key: VIEW_NAME_KEY.to_string(),
        }
    }
}

impl ViewResolver for SuffixBasedViewResolver {
    fn resolve(&self, context: &ViewContext) -> Result<String, RespondError> {
        match context.get(&self.view_name_key) {
            None => Err(RespondError::ViewNotFound(format!(
                "no view name found in the context using key [{}]; check configuration",
                self.view_name_key
            ))),
            Some(Value::String(name)) if !name.trim().is_empty() => {
                Ok(format!("{}{}", name, self.suffix))
            }
            Some(_) => Err(RespondError::for_missing_view_name()),
        }
    }
}

/// Resolve a logical view name through an explicit name to identifier table.
pub struct MappingBasedViewResolver {
    view_mappings: HashMap<String, String>,
    view_name_key: String,
}

impl MappingBasedViewResolver {
    /// Create a resolver over the supplied table and view-name key.
    ///
    /// # Errors
    ///
    /// [`ResolverConfigError`] when the table is empty or the key is blank.
    pub fn new(
        view_mappings: HashMap<String, String>,
        view_name_key: &str,
    ) -> Result<Self, ResolverConfigError> {
        if view_mappings.is_empty() {
            return Err(ResolverConfigError::EmptyViewMappings);
        }
        if view_name_key.trim().is_empty() {
            return Err(ResolverConfigError::EmptyViewNameKey);
        }
        Ok(Self {
            view_mappings,
            view_name_key: view_name_key.to_string(),
        })
    }

    /// Create a resolver over the supplied table with the default view-name key.
    ///
    /// # Errors
    ///
    /// [`ResolverConfigError::EmptyViewMappings`] when the table is empty.
    pub fn with_mappings(
        view_mappings: HashMap<String, String>,
    ) -> Result<Self, ResolverConfigError> {
        Self::new(view_mappings, VIEW_NAME_KEY)
    }
}

impl ViewResolver for MappingBasedViewResolver {
    fn resolve(&self, context: &ViewContext) -> Result<String, RespondError> {
        let view_name = match context.get(&self.view_name_key) {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => return Err(RespondError::for_missing_view_name()),
        };

        match self.view_mappings.get(view_name) {
            None => Err(RespondError::for_view_name(view_name)),
            Some(view) if view.trim().is_empty() => Err(RespondError::ViewNotFound(format!(
                "the view for [{view_name}] resolved to nothing; check configuration"
            ))),
            Some(view) => Ok(view.clone()),
        }
    }
}
