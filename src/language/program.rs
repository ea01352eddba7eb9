//! The compiled renderer.
//!
//! A program is an ordered list of statements, derived deterministically
//! from the token stream. It is a plain value: rendering interprets the
//! statements against a context, no generated code is ever executed.
use super::{RenderEnv, Statement};
use crate::context::Context;
use crate::error::Error;
use crate::lexer::{Delimiters, Lexer, TokenWithContext, Tokenize};

#[derive(Debug, Clone)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Evaluate the program given the context and the capabilities of
    /// one render call.
    pub fn evaluate(&self, context: &Context, env: &RenderEnv) -> Result<String, Error> {
        let mut output = String::new();

        for statement in &self.statements {
            output.push_str(&statement.evaluate(context, env)?);
        }

        Ok(output)
    }

    /// Parse the program from a list of tokens.
    pub fn parse(tokens: Vec<TokenWithContext>) -> Result<Self, Error> {
        let mut iter = tokens.into_iter().peekable();
        let statements = Statement::parse_program(&mut iter)?;

        Ok(Program { statements })
    }

    /// Compile the program from source with the default delimiters.
    pub fn from_str(source: &str) -> Result<Self, Error> {
        let tokens = source.tokenize()?;
        Program::parse(tokens)
    }

    /// Compile the program from source with the given delimiters.
    pub fn compile(source: &str, delimiters: Delimiters) -> Result<Self, Error> {
        let tokens = Lexer::with_delimiters(source, delimiters).tokens()?;
        Program::parse(tokens)
    }
}

#[cfg(test)]
mod test {
    use super::super::NoPartials;
    use super::*;
    use crate::helpers::HelperRegistry;
    use crate::lexer::Value;

    fn evaluate(source: &str, context: &Context) -> Result<String, Error> {
        let helpers = HelperRegistry::default();
        let env = RenderEnv {
            helpers: &helpers,
            partials: &NoPartials,
            depth: 0,
        };

        Program::from_str(source)?.evaluate(context, &env)
    }

    #[test]
    fn test_basic_program() -> Result<(), Error> {
        let context = Context::try_from([("name", "World")])?;
        assert_eq!(evaluate("Hi {{ name }}!", &context)?, "Hi World!");
        Ok(())
    }

    #[test]
    fn test_missing_field_renders_empty() -> Result<(), Error> {
        let context = Context::new();
        assert_eq!(evaluate("<p>{{ missing.field }}</p>", &context)?, "<p></p>");
        Ok(())
    }

    #[test]
    fn test_conditional_block() -> Result<(), Error> {
        let source = r#"<div class="stat-card {{ #if trend }}trend-{{ trend }}{{ /if }}">"#;

        let context = Context::try_from([("trend", "up")])?;
        assert_eq!(
            evaluate(source, &context)?,
            r#"<div class="stat-card trend-up">"#
        );

        let context = Context::new();
        assert_eq!(evaluate(source, &context)?, r#"<div class="stat-card ">"#);

        Ok(())
    }

    #[test]
    fn test_unless_block() -> Result<(), Error> {
        let source = "{{ #unless done }}pendente{{ /unless }}";

        assert_eq!(evaluate(source, &Context::new())?, "pendente");

        let context = Context::try_from([("done", Value::Boolean(true))])?;
        assert_eq!(evaluate(source, &context)?, "");

        Ok(())
    }

    #[test]
    fn test_each_block() -> Result<(), Error> {
        let mut context = Context::new();
        context.set(
            "projects",
            Value::from_json(serde_json::json!([
                { "title": "Horta" },
                { "title": "Biblioteca" }
            ])),
        )?;

        let source = "{{ each project in projects }}<h3>{{ project.title }}</h3>{{ /each }}";
        assert_eq!(
            evaluate(source, &context)?,
            "<h3>Horta</h3><h3>Biblioteca</h3>"
        );

        Ok(())
    }

    #[test]
    fn test_each_over_non_sequence_is_empty() -> Result<(), Error> {
        let context = Context::try_from([("projects", "oops")])?;
        let source = "{{ each project in projects }}x{{ /each }}";
        assert_eq!(evaluate(source, &context)?, "");
        Ok(())
    }

    #[test]
    fn test_nested_blocks() -> Result<(), Error> {
        let mut context = Context::new();
        context.set(
            "items",
            Value::from_json(serde_json::json!([
                { "name": "a", "ok": true },
                { "name": "b", "ok": false }
            ])),
        )?;

        let source =
            "{{ each item in items }}{{ #if item.ok }}{{ item.name }}{{ /if }}{{ /each }}";
        assert_eq!(evaluate(source, &context)?, "a");

        Ok(())
    }

    #[test]
    fn test_helper_call() -> Result<(), Error> {
        let context = Context::try_from([("title", "mutirão de saúde")])?;
        assert_eq!(
            evaluate("{{ #uppercase title }}", &context)?,
            "MUTIRÃO DE SAÚDE"
        );
        Ok(())
    }

    #[test]
    fn test_unclosed_block() {
        let err = Program::from_str("{{ #if x }}never closed")
            .err()
            .expect("parse must fail");
        match err {
            Error::UnclosedBlock(name) => assert_eq!(name, "if"),
            err => panic!("unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_mismatched_close() {
        let err = Program::from_str("{{ #if x }}body{{ /each }}")
            .err()
            .expect("parse must fail");
        match err {
            Error::UnexpectedBlockClose(name) => assert_eq!(name, "each"),
            err => panic!("unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_stray_close() {
        assert!(Program::from_str("text {{ /if }}").is_err());
    }

    #[test]
    fn test_unknown_partial_placeholder() -> Result<(), Error> {
        let output = evaluate("{{ > missing }}", &Context::new())?;
        assert_eq!(output, "<!-- Partial missing not found -->");
        Ok(())
    }

    #[test]
    fn test_safe_output_with_custom_delimiters() -> Result<(), Error> {
        let mut context = Context::new();
        context.set("bio", "<script>alert(1)</script>")?;

        let helpers = HelperRegistry::default();
        let env = RenderEnv {
            helpers: &helpers,
            partials: &NoPartials,
            depth: 0,
        };

        let program = Program::compile("[[ bio }} ]]", Delimiters::new("[[", "]]"))?;
        let output = program.evaluate(&context, &env)?;

        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;script&gt;"));

        Ok(())
    }
}
