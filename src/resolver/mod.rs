//! View resolution strategies.
//!
//! A [`ViewResolver`] turns the logical view name carried in a view
//! context into a concrete renderable identifier, such as a template
//! path. Two strategies are provided: [`SuffixBasedViewResolver`]
//! appends a configured suffix (`login` becomes `login.html`), and
//! [`MappingBasedViewResolver`] looks the name up in an explicit table.
//! Both reject misconfiguration at construction time.

mod core;
mod error;

pub use core::{
    MappingBasedViewResolver, SuffixBasedViewResolver, ViewResolver, DEFAULT_VIEW_SUFFIX,
};
pub use error::ResolverConfigError;
