//! Molde is a small template engine for stamping out UI fragments:
//! project cards, stat cards, profile blurbs — any repeated markup a
//! page builds from data. Templates are plain text with embedded
//! `{{ ... }}` expressions, compiled once into an interpreted program
//! and cached; rendering a cached template is just an evaluation pass.
//!
//! # Example
//!
//! ```
//! use molde::Engine;
//!
//! let engine = Engine::new();
//! engine.register("greeting", "Hi {{ name }}!").unwrap();
//!
//! let rendered = engine.render("greeting", [("name", "World")]).unwrap();
//!
//! assert_eq!(rendered, "Hi World!");
//! ```
//!
//! The engine is an explicit instance: it owns its template cache,
//! partial registry and helper vocabulary, and is constructed once by
//! the application's composition root. There is no process-wide state.
//!
//! The language supports helper calls (`{{ #formatCurrency goal }}`),
//! partial inclusion (`{{ > header }}`), conditional and iteration
//! blocks (`{{ #if trend }}...{{ /if }}`,
//! `{{ each p in projects }}...{{ /each }}`), and an escaped safe-output
//! form for untrusted text. Rendering is fail-soft: an error inside a
//! template degrades to a visible error fragment instead of crashing
//! the caller.
pub mod components;
pub mod context;
pub mod engine;
pub mod error;
pub mod escape;
pub mod helpers;
pub mod language;
pub mod lexer;
pub mod loader;
pub mod logging;
pub mod template;

pub use context::Context;
pub use engine::Engine;
pub use error::Error;
pub use helpers::{HelperRegistry, Locale};
pub use language::Program;
pub use lexer::{Delimiters, Lexer, ToValue, Token, TokenWithContext, Tokenize, Value};
pub use loader::{DirLoader, TemplateLoader};
pub use logging::Logger;
pub use template::Template;

/// Wrapper around async traits to make them easy to use.
pub use async_trait::async_trait;
