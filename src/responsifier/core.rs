use std::fmt;
use std::sync::Arc;

use minijinja::Environment;

use super::json::JsonResponsifier;
use super::templated::TemplatedResponsifier;
use crate::negotiation::ContentFamily;
use crate::resolver::SuffixBasedViewResolver;
use crate::respond::{Model, RespondError, ViewContext};

/// A strategy that turns a model plus resolved view context into a
/// response body.
///
/// Implementations are stateless or hold only immutable configuration
/// after construction; one instance serves every request for the process
/// lifetime.
pub trait Responsifier: Send + Sync {
    /// Produce the response body for `model`, consulting `context` for
    /// per-request values such as the logical view name.
    ///
    /// # Errors
    ///
    /// [`RespondError::ViewNotFound`] from view resolution,
    /// [`RespondError::TemplateRender`] from the template engine, or
    /// [`RespondError::InvalidResponse`] from encoding.
    fn responsify(&self, model: &Model, context: &ViewContext) -> Result<String, RespondError>;
}

/// Responsifier registry configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryConfigError {
    /// The registry must hold at least one responsifier.
    NoResponsifiers,
}

impl fmt::Display for RegistryConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryConfigError::NoResponsifiers => {
                write!(
                    f,
                    "responsifier registry configuration error: the responsifiers are required"
                )
            }
        }
    }
}

impl std::error::Error for RegistryConfigError {}

/// An insertion-ordered table from content family to responsifier.
///
/// Built once at startup and shared read-only for the process lifetime.
/// The first registered family is the one a full-wildcard `Accept` header
/// prefers.
#[derive(Clone)]
pub struct ResponsifierRegistry {
    entries: Vec<(ContentFamily, Arc<dyn Responsifier>)>,
}

impl ResponsifierRegistry {
    /// Build a registry from the supplied entries, preserving order.
    ///
    /// # Errors
    ///
    /// [`RegistryConfigError::NoResponsifiers`] when `entries` is empty.
    pub fn new(
        entries: Vec<(ContentFamily, Arc<dyn Responsifier>)>,
    ) -> Result<Self, RegistryConfigError> {
        if entries.is_empty() {
            return Err(RegistryConfigError::NoResponsifiers);
        }
        let mut registry = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for (family, responsifier) in entries {
            registry.register(family, responsifier);
        }
        Ok(registry)
    }

    /// The stock pair: templated html (suffix-resolved against `environment`)
    /// first, JSON second.
    #[must_use]
    pub fn standard(environment: Arc<Environment<'static>>) -> Self {
        Self {
            entries: vec![
                (
                    ContentFamily::Html,
                    Arc::new(TemplatedResponsifier::new(
                        environment,
                        Box::new(SuffixBasedViewResolver::default()),
                    )) as Arc<dyn Responsifier>,
                ),
                (ContentFamily::Json, Arc::new(JsonResponsifier::default())),
            ],
        }
    }

    /// Add a responsifier for `family`, or override the existing one in
    /// place (the family keeps its registration position).
    pub fn register(&mut self, family: ContentFamily, responsifier: Arc<dyn Responsifier>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == family)
        {
            entry.1 = responsifier;
        } else {
            self.entries.push((family, responsifier));
        }
    }

    /// Look up the responsifier registered for `family`.
    #[must_use]
    pub fn get(&self, family: ContentFamily) -> Option<&dyn Responsifier> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == family)
            .map(|(_, responsifier)| responsifier.as_ref())
    }

    /// The family a full-wildcard `Accept` header resolves to.
    #[must_use]
    pub fn first_family(&self) -> ContentFamily {
        // Construction rejects an empty registry, so the fallback is unreachable.
        self.entries
            .first()
            .map(|(family, _)| *family)
            .unwrap_or(ContentFamily::Html)
    }

    /// The registered families, in registration order.
    pub fn families(&self) -> impl Iterator<Item = ContentFamily> + '_ {
        self.entries.iter().map(|(family, _)| *family)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Arc<dyn Responsifier> has no Debug; print the families instead.
impl fmt::Debug for ResponsifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.families()).finish()
    }
}
