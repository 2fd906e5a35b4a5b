//! gin-scaffold library
//!
//! Generates source files for gin web applications from minijinja templates.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use scaffold::{
    FieldSpec, Materializer, ModelDescriptor, Outcome, Renderer, ScaffoldGenerator, TemplateHelpers,
};
