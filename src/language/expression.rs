//! Argument expressions: the terms a template can pass to a helper,
//! test in a conditional, or interpolate directly.
//!
//! A term is either a constant (quoted string, number, boolean, null)
//! or a field path resolved against the render context. Nested helper
//! calls inside arguments are not part of the grammar.
use crate::context::Context;
use crate::lexer::Value;

/// A single term in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Constant(Value),
    Path(Vec<String>),
}

impl Term {
    pub fn constant(value: Value) -> Self {
        Term::Constant(value)
    }

    /// Parse one unquoted term: a literal if it looks like one,
    /// a field path otherwise.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        match raw {
            "true" => return Term::Constant(Value::Boolean(true)),
            "false" => return Term::Constant(Value::Boolean(false)),
            "null" => return Term::Constant(Value::Null),
            "" => return Term::Constant(Value::Null),
            _ => (),
        }

        if let Ok(integer) = raw.parse::<i64>() {
            return Term::Constant(Value::Integer(integer));
        }

        if let Ok(float) = raw.parse::<f64>() {
            return Term::Constant(Value::Float(float));
        }

        Term::Path(raw.split('.').map(|s| s.to_string()).collect())
    }

    /// Evaluate the term against the context.
    ///
    /// Paths are walked segment by segment through hashes (by key) and
    /// lists (by numeric index). Any missing step resolves to
    /// `Value::Null`, never an error.
    pub fn evaluate(&self, context: &Context) -> Value {
        match self {
            Term::Constant(value) => value.clone(),
            Term::Path(segments) => {
                let mut segments = segments.iter();

                let mut value = match segments.next().and_then(|s| context.get(s)) {
                    Some(value) => value,
                    None => return Value::Null,
                };

                for segment in segments {
                    value = match value {
                        Value::Hash(ref hash) => match hash.get(segment) {
                            Some(value) => value.clone(),
                            None => return Value::Null,
                        },
                        Value::List(ref list) => match segment.parse::<usize>() {
                            Ok(index) => match list.get(index) {
                                Some(value) => value.clone(),
                                None => return Value::Null,
                            },
                            Err(_) => return Value::Null,
                        },
                        _ => return Value::Null,
                    };
                }

                value
            }
        }
    }
}

/// Split a raw argument list on whitespace outside double quotes and
/// parse each piece into a term. An unterminated quote takes the rest
/// of the input as the literal.
pub fn arguments(raw: &str) -> Vec<Term> {
    let mut terms = vec![];
    let mut buffer = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut string = String::new();

                loop {
                    match chars.next() {
                        Some('"') | None => break,
                        Some(c) => string.push(c),
                    }
                }

                terms.push(Term::Constant(Value::String(string)));
            }

            c if c.is_whitespace() => {
                if !buffer.is_empty() {
                    terms.push(Term::parse(&std::mem::take(&mut buffer)));
                }
            }

            c => buffer.push(c),
        }
    }

    if !buffer.is_empty() {
        terms.push(Term::parse(&buffer));
    }

    terms
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_literals() {
        assert_eq!(Term::parse("5"), Term::Constant(Value::Integer(5)));
        assert_eq!(Term::parse("2.5"), Term::Constant(Value::Float(2.5)));
        assert_eq!(Term::parse("true"), Term::Constant(Value::Boolean(true)));
        assert_eq!(Term::parse("null"), Term::Constant(Value::Null));
        assert_eq!(
            Term::parse("title"),
            Term::Path(vec!["title".to_string()])
        );
    }

    #[test]
    fn test_path_walk() -> Result<(), Error> {
        let mut context = Context::new();
        context.set(
            "stats",
            Value::from_json(serde_json::json!({
                "budget": 50000,
                "locations": ["Recife", "Olinda"]
            })),
        )?;

        let budget = Term::parse("stats.budget").evaluate(&context);
        assert_eq!(budget, Value::Integer(50000));

        let first = Term::parse("stats.locations.0").evaluate(&context);
        assert_eq!(first, Value::String("Recife".into()));

        Ok(())
    }

    #[test]
    fn test_missing_step_is_null() -> Result<(), Error> {
        let mut context = Context::new();
        context.set("stats", Value::Hash(Default::default()))?;

        assert_eq!(Term::parse("stats.budget.total").evaluate(&context), Value::Null);
        assert_eq!(Term::parse("missing").evaluate(&context), Value::Null);

        Ok(())
    }

    #[test]
    fn test_arguments() {
        let args = arguments(r#"title 50 "two words" stats.goal"#);
        assert_eq!(
            args,
            vec![
                Term::Path(vec!["title".to_string()]),
                Term::Constant(Value::Integer(50)),
                Term::Constant(Value::String("two words".into())),
                Term::Path(vec!["stats".to_string(), "goal".to_string()]),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_takes_rest() {
        let args = arguments(r#""unterminated literal"#);
        assert_eq!(
            args,
            vec![Term::Constant(Value::String("unterminated literal".into()))]
        );
    }
}
