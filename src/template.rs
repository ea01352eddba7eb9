//! A named template: the raw source and its compiled program, kept
//! consistent as a single cache entry.
use crate::context::Context;
use crate::error::Error;
use crate::helpers::HelperRegistry;
use crate::language::{NoPartials, Program, RenderEnv};
use crate::lexer::Delimiters;

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    program: Program,
}

impl Template {
    /// Compile a template with the default `{{` / `}}` delimiters.
    pub fn from_str(source: &str) -> Result<Self, Error> {
        Self::compile(source, Delimiters::default())
    }

    pub fn compile(source: &str, delimiters: Delimiters) -> Result<Self, Error> {
        Ok(Template {
            program: Program::compile(source, delimiters)?,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Render the template standalone, with the built-in helpers and no
    /// partials. Rendering through an [`crate::engine::Engine`] adds
    /// partial resolution, custom helpers and the fail-soft boundary.
    pub fn render(&self, context: impl TryInto<Context, Error = Error>) -> Result<String, Error> {
        let context: Context = context.try_into()?;
        let helpers = HelperRegistry::default();
        let env = RenderEnv {
            helpers: &helpers,
            partials: &NoPartials,
            depth: 0,
        };

        self.program.evaluate(&context, &env)
    }
}
