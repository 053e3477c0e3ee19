use std::path::Path;
use std::sync::Arc;

use minijinja::Environment;
use serde_json::Value;

use super::core::Responsifier;
use crate::resolver::ViewResolver;
use crate::respond::{Model, RespondError, ViewContext};

/// Create a response body by rendering a minijinja template.
///
/// The held [`ViewResolver`] turns the logical view name in the context
/// into a template name; the template renders against the model merged
/// with the raw context, context keys winning on conflict so per-request
/// metadata flows into the template namespace alongside the handler's
/// model.
pub struct TemplatedResponsifier {
    environment: Arc<Environment<'static>>,
    view_resolver: Box<dyn ViewResolver>,
}

impl TemplatedResponsifier {
    pub fn new(environment: Arc<Environment<'static>>, view_resolver: Box<dyn ViewResolver>) -> Self {
        Self {
            environment,
            view_resolver,
        }
    }

    /// A responsifier rendering templates loaded from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>, view_resolver: Box<dyn ViewResolver>) -> Self {
        let mut environment = Environment::new();
        environment.set_loader(minijinja::path_loader(dir.as_ref()));
        Self::new(Arc::new(environment), view_resolver)
    }

    fn view_model(model: &Model, context: &ViewContext) -> Model {
        let mut merged = model.clone();
        for (key, value) in context {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl Responsifier for TemplatedResponsifier {
    fn responsify(&self, model: &Model, context: &ViewContext) -> Result<String, RespondError> {
        // Resolver failures propagate unmodified.
        let view = self.view_resolver.resolve(context)?;
        let view_model = Self::view_model(model, context);

        let template = self
            .environment
            .get_template(&view)
            .map_err(|source| RespondError::TemplateRender {
                view: view.clone(),
                source,
            })?;
        template
            .render(Value::Object(view_model))
            .map_err(|source| RespondError::TemplateRender { view, source })
    }
}
