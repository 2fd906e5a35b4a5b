//! Scaffold code generation
//!
//! This module turns a model name and `name:type` field declarations into
//! template data, renders templates with a fixed function library, and writes
//! the results to disk without ever overwriting existing files.

pub mod actions;
pub mod field_type;
pub mod functions;
pub mod generator;
pub mod helpers;
pub mod patch;
pub mod renderer;
pub mod writer;

pub use actions::{Action, ActionSink, ConsoleReporter, RecordingSink};
pub use field_type::{resolve, FieldSpec, Hint, ResolvedType};
pub use functions::{FunctionLibrary, SequenceCounter};
pub use generator::{ModelDescriptor, ProjectDescriptor, ScaffoldGenerator};
pub use helpers::{ModelNames, TemplateHelpers};
pub use patch::Insertion;
pub use renderer::{CompiledTemplate, InMemoryTemplates, Renderer, TemplateDir, TemplateSource};
pub use writer::{Materializer, Outcome, TemplateJob};
