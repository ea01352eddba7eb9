//! One compiled template statement.
//!
//! The program parser classifies each expression token by its leading
//! syntax, first match wins: `#` helper call (with `#if`/`#unless`/
//! `#each` opening blocks), `>` partial inclusion, `each`/`if` blocks,
//! and finally a variable interpolation. Blocks are terminated by a
//! matching `/name` marker and nest arbitrarily.
use super::expression::{arguments, Term};
use super::{PartialResolver, RenderEnv};
use crate::context::Context;
use crate::error::Error;
use crate::escape::escape;
use crate::lexer::{Token, TokenWithContext, Value};

use std::iter::Peekable;

// The safe-output suffix. The original engine checked for the literal
// `}}` regardless of configured delimiters; kept as-is, so the form is
// reachable only when an engine uses custom delimiters.
const SAFE_OUTPUT_MARKER: &str = "}}";

#[derive(Debug, Clone)]
pub enum Statement {
    // Literal text between expressions.
    Text(String),

    // `{{ title }}`, or the safe-output form routed through the escaper.
    Interpolation { term: Term, escaped: bool },

    // `{{ #formatNumber value }}`
    HelperCall { name: String, args: Vec<Term> },

    // `{{ > header }}`
    Partial { name: String },

    // `{{ #if trend }}...{{ /if }}`, `{{ #unless done }}...{{ /unless }}`
    Conditional {
        negated: bool,
        condition: Term,
        body: Vec<Statement>,
    },

    // `{{ each project in projects }}...{{ /each }}`
    Each {
        variable: String,
        collection: Term,
        body: Vec<Statement>,
    },
}

impl Statement {
    /// Parse a statement sequence until the token stream ends.
    pub fn parse_program(
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    ) -> Result<Vec<Statement>, Error> {
        Self::parse_body(iter, None)
    }

    // Parse statements until the expected closing marker, or until the
    // end of input for the top level.
    fn parse_body(
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
        closer: Option<&str>,
    ) -> Result<Vec<Statement>, Error> {
        let mut statements = vec![];

        while let Some(token) = iter.next() {
            match token.token() {
                Token::Text(text) => statements.push(Statement::Text(text)),
                Token::Expression(expression) => {
                    if let Some(name) = expression.strip_prefix('/') {
                        let name = name.trim();

                        return if closer == Some(name) {
                            Ok(statements)
                        } else {
                            Err(Error::UnexpectedBlockClose(name.to_string()))
                        };
                    }

                    statements.push(Self::from_expression(&expression, iter)?);
                }
            }
        }

        match closer {
            Some(name) => Err(Error::UnclosedBlock(name.to_string())),
            None => Ok(statements),
        }
    }

    // Classify one expression token; block forms consume their body
    // from the iterator.
    fn from_expression(
        expression: &str,
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    ) -> Result<Statement, Error> {
        if let Some(rest) = expression.strip_prefix('#') {
            let rest = rest.trim();
            let (name, args) = match rest.split_once(char::is_whitespace) {
                Some((name, args)) => (name, args.trim()),
                None => (rest, ""),
            };

            return match name {
                "if" => Self::conditional(expression, args, false, iter),
                "unless" => Self::conditional(expression, args, true, iter),
                "each" => Self::each(expression, args, iter),
                "" => Err(Error::Syntax(expression.to_string())),
                name => Ok(Statement::HelperCall {
                    name: name.to_string(),
                    args: arguments(args),
                }),
            };
        }

        if let Some(name) = expression.strip_prefix('>') {
            return Ok(Statement::Partial {
                name: name.trim().to_string(),
            });
        }

        if let Some(rest) = expression.strip_prefix("each ") {
            return Self::each(expression, rest.trim(), iter);
        }

        if let Some(rest) = expression.strip_prefix("if ") {
            return Self::conditional(expression, rest.trim(), false, iter);
        }

        // A variable reference; the safe-output suffix routes it
        // through the escaper.
        let (raw, escaped) = match expression.strip_suffix(SAFE_OUTPUT_MARKER) {
            Some(raw) => (raw.trim(), true),
            None => (expression, false),
        };

        Ok(Statement::Interpolation {
            term: Term::parse(raw),
            escaped,
        })
    }

    fn conditional(
        expression: &str,
        condition: &str,
        negated: bool,
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    ) -> Result<Statement, Error> {
        if condition.is_empty() {
            return Err(Error::Syntax(expression.to_string()));
        }

        let body = Self::parse_body(iter, Some(if negated { "unless" } else { "if" }))?;

        Ok(Statement::Conditional {
            negated,
            condition: Term::parse(condition),
            body,
        })
    }

    // `<variable> in <collection>`
    fn each(
        expression: &str,
        clause: &str,
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    ) -> Result<Statement, Error> {
        let (variable, collection) = match clause.split_once(" in ") {
            Some((variable, collection)) => (variable.trim(), collection.trim()),
            None => return Err(Error::Syntax(expression.to_string())),
        };

        if variable.is_empty() || collection.is_empty() {
            return Err(Error::Syntax(expression.to_string()));
        }

        let body = Self::parse_body(iter, Some("each"))?;

        Ok(Statement::Each {
            variable: variable.to_string(),
            collection: Term::parse(collection),
            body,
        })
    }

    /// Evaluate the statement to its output fragment.
    pub fn evaluate(&self, context: &Context, env: &RenderEnv) -> Result<String, Error> {
        match self {
            Statement::Text(text) => Ok(text.clone()),

            Statement::Interpolation { term, escaped } => {
                let value = term.evaluate(context);
                let value = if *escaped { escape(&value) } else { value };

                Ok(value.to_string())
            }

            Statement::HelperCall { name, args } => {
                let helper = env
                    .helpers
                    .get(name)
                    .ok_or_else(|| Error::UnknownHelper(name.clone()))?;

                let args = args
                    .iter()
                    .map(|term| term.evaluate(context))
                    .collect::<Vec<Value>>();

                Ok(helper(&args)?.to_string())
            }

            Statement::Partial { name } => match env.partials.resolve(name, context, env)? {
                Some(output) => Ok(output),
                None => Ok(format!("<!-- Partial {} not found -->", name)),
            },

            Statement::Conditional {
                negated,
                condition,
                body,
            } => {
                let truthy = condition.evaluate(context).truthy();

                if truthy != *negated {
                    Self::evaluate_body(body, context, env)
                } else {
                    Ok(String::new())
                }
            }

            Statement::Each {
                variable,
                collection,
                body,
            } => match collection.evaluate(context) {
                Value::List(items) => {
                    let mut output = String::new();

                    for item in items {
                        let mut scope = context.clone();
                        scope.set(variable, item)?;
                        output.push_str(&Self::evaluate_body(body, &scope, env)?);
                    }

                    Ok(output)
                }

                // Iterating anything else renders nothing.
                _ => Ok(String::new()),
            },
        }
    }

    fn evaluate_body(
        body: &[Statement],
        context: &Context,
        env: &RenderEnv,
    ) -> Result<String, Error> {
        let mut output = String::new();

        for statement in body {
            output.push_str(&statement.evaluate(context, env)?);
        }

        Ok(output)
    }
}

/// Placeholder resolver for rendering outside an engine: every partial
/// inclusion degrades to the not-found comment.
pub struct NoPartials;

impl PartialResolver for NoPartials {
    fn resolve(
        &self,
        _name: &str,
        _context: &Context,
        _env: &RenderEnv,
    ) -> Result<Option<String>, Error> {
        Ok(None)
    }
}
