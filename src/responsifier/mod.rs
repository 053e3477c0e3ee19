//! # Responsifier Module
//!
//! Responsifiers turn a model plus resolved view context into a response
//! body. Two strategies are provided: [`TemplatedResponsifier`] resolves
//! a logical view name through a [`ViewResolver`](crate::resolver::ViewResolver)
//! and renders a minijinja template, and [`JsonResponsifier`] serializes
//! the model directly, running a pluggable [`ValueConverter`] chain first
//! so values such as timestamps and object identifiers reach the wire in
//! their string form.
//!
//! The [`ResponsifierRegistry`] maps each content family to one
//! responsifier instance. It is built once at application startup and
//! shared read-only for the process lifetime; content negotiation selects
//! from it per request.

mod core;
mod json;
mod templated;

pub use core::{RegistryConfigError, Responsifier, ResponsifierRegistry};
pub use json::{DateTimeConverter, JsonResponsifier, ObjectIdConverter, ValueConverter};
pub use templated::TemplatedResponsifier;
