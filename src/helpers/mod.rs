//! The helper registry and the built-in helper vocabulary.
//!
//! Helpers are pure functions over values, addressed from templates by
//! name: `{{ #formatNumber value }}`. The built-in set is installed at
//! engine construction; `register_helper` on the engine is the
//! extension point for callers. Helpers degrade gracefully on
//! out-of-range input (pass-through or a documented empty value)
//! instead of failing the render.
pub mod format;
pub mod labels;

pub use format::Locale;

use crate::error::Error;
use crate::lexer::Value;

use std::collections::HashMap;

pub type HelperFn = dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync;

pub struct HelperRegistry {
    helpers: HashMap<String, Box<HelperFn>>,
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl HelperRegistry {
    /// Build the registry with the full built-in vocabulary, with the
    /// formatting helpers bound to the given locale.
    pub fn new(locale: Locale) -> Self {
        let mut registry = Self {
            helpers: HashMap::new(),
        };

        registry.install_string_helpers();
        registry.install_format_helpers(locale);
        registry.install_comparison_helpers();
        registry.install_arithmetic_helpers();
        registry.install_sequence_helpers();
        registry.install_domain_helpers();

        registry
    }

    pub fn insert(
        &mut self,
        name: impl ToString,
        helper: impl Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    ) {
        self.helpers.insert(name.to_string(), Box::new(helper));
    }

    pub fn get(&self, name: &str) -> Option<&HelperFn> {
        self.helpers.get(name).map(|helper| helper.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    fn install_string_helpers(&mut self) {
        self.insert("uppercase", |args| {
            Ok(Value::String(first_string(args).to_uppercase()))
        });

        self.insert("lowercase", |args| {
            Ok(Value::String(first_string(args).to_lowercase()))
        });

        self.insert("capitalize", |args| {
            let s = first_string(args);
            let mut chars = s.chars();

            Ok(Value::String(match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => s,
            }))
        });

        self.insert("truncate", |args| {
            let s = first_string(args);

            // A missing or non-numeric length leaves the string alone.
            let max = match args.get(1).and_then(|v| v.as_f64()) {
                Some(max) if max >= 0.0 => max as usize,
                _ => return Ok(Value::String(s)),
            };

            Ok(Value::String(if s.chars().count() > max {
                s.chars().take(max).collect::<String>() + "..."
            } else {
                s
            }))
        });
    }

    fn install_format_helpers(&mut self, locale: Locale) {
        let l = locale.clone();
        self.insert("formatCurrency", move |args| {
            Ok(match args.first().and_then(|v| v.as_f64()) {
                Some(amount) => Value::String(format::format_currency(&l, amount)),
                None => passthrough(args),
            })
        });

        let l = locale;
        self.insert("formatNumber", move |args| {
            Ok(match args.first().and_then(|v| v.as_f64()) {
                Some(number) => Value::String(format::format_number(&l, number)),
                None => passthrough(args),
            })
        });

        self.insert("formatDate", |args| {
            let date = args.first().cloned().unwrap_or(Value::Null);
            Ok(Value::String(format::format_date(&date)?))
        });
    }

    fn install_comparison_helpers(&mut self) {
        self.insert("eq", |args| Ok(Value::Boolean(pair(args, |a, b| a == b))));
        self.insert("gt", |args| Ok(Value::Boolean(pair(args, |a, b| a > b))));
        self.insert("lt", |args| Ok(Value::Boolean(pair(args, |a, b| a < b))));
        self.insert("gte", |args| Ok(Value::Boolean(pair(args, |a, b| a >= b))));
        self.insert("lte", |args| Ok(Value::Boolean(pair(args, |a, b| a <= b))));
    }

    fn install_arithmetic_helpers(&mut self) {
        self.insert("add", |args| Ok(arg(args, 0).add(&arg(args, 1))));
        self.insert("subtract", |args| Ok(arg(args, 0).sub(&arg(args, 1))));
        self.insert("multiply", |args| Ok(arg(args, 0).mul(&arg(args, 1))));
        self.insert("divide", |args| Ok(arg(args, 0).div(&arg(args, 1))));
    }

    fn install_sequence_helpers(&mut self) {
        self.insert("length", |args| {
            Ok(Value::Integer(match args.first() {
                Some(Value::List(list)) => list.len() as i64,
                _ => 0,
            }))
        });

        self.insert("first", |args| {
            Ok(match args.first() {
                Some(Value::List(list)) => match list.first() {
                    Some(value) => value.clone(),
                    None => Value::String(String::new()),
                },
                _ => Value::String(String::new()),
            })
        });

        self.insert("last", |args| {
            Ok(match args.first() {
                Some(Value::List(list)) => match list.last() {
                    Some(value) => value.clone(),
                    None => Value::String(String::new()),
                },
                _ => Value::String(String::new()),
            })
        });

        self.insert("json", |args| {
            let value = arg(args, 0);
            let json: serde_json::Value = value.try_into()?;
            Ok(Value::String(serde_json::to_string(&json)?))
        });
    }

    fn install_domain_helpers(&mut self) {
        self.insert("progressBar", |args| {
            Ok(Value::String(labels::progress_bar(&arg(args, 0))))
        });

        self.insert("projectStatus", |args| {
            let code = first_string(args);
            Ok(Value::String(match labels::status_label(&code) {
                Some(label) => label.to_string(),
                None => code,
            }))
        });

        self.insert("projectCategory", |args| {
            let code = first_string(args);
            Ok(Value::String(match labels::category_label(&code) {
                Some(label) => label.to_string(),
                None => code,
            }))
        });
    }
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

fn first_string(args: &[Value]) -> String {
    args.first().map(|v| v.to_string()).unwrap_or_default()
}

fn passthrough(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

// Incomparable operands compare as false.
fn pair(args: &[Value], cmp: impl Fn(&Value, &Value) -> bool) -> bool {
    match (args.first(), args.get(1)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn call(registry: &HelperRegistry, name: &str, args: &[Value]) -> Value {
        registry.get(name).expect(name)(args).expect(name)
    }

    #[test]
    fn test_string_helpers() {
        let registry = HelperRegistry::default();

        assert_eq!(
            call(&registry, "uppercase", &[Value::String("ola".into())]),
            Value::String("OLA".into())
        );
        assert_eq!(
            call(&registry, "capitalize", &[Value::String("mundo".into())]),
            Value::String("Mundo".into())
        );
        assert_eq!(
            call(
                &registry,
                "truncate",
                &[Value::String("um texto comprido".into()), Value::Integer(8)]
            ),
            Value::String("um texto...".into())
        );
        assert_eq!(
            call(
                &registry,
                "truncate",
                &[Value::String("curto".into()), Value::Integer(8)]
            ),
            Value::String("curto".into())
        );
    }

    #[test]
    fn test_format_helpers_degrade() {
        let registry = HelperRegistry::default();

        // Formatting a non-number passes the value through.
        assert_eq!(
            call(&registry, "formatNumber", &[Value::String("abc".into())]),
            Value::String("abc".into())
        );
    }

    #[test]
    fn test_comparisons() {
        let registry = HelperRegistry::default();

        assert_eq!(
            call(
                &registry,
                "gt",
                &[Value::Integer(5), Value::Integer(3)]
            ),
            Value::Boolean(true)
        );

        // Incomparable types are simply not greater.
        assert_eq!(
            call(
                &registry,
                "gt",
                &[Value::String("a".into()), Value::Integer(3)]
            ),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_sequence_helpers_degrade() {
        let registry = HelperRegistry::default();

        assert_eq!(
            call(&registry, "length", &[Value::Integer(5)]),
            Value::Integer(0)
        );
        assert_eq!(
            call(&registry, "first", &[Value::Null]),
            Value::String("".into())
        );
    }

    #[test]
    fn test_json_helper() {
        let registry = HelperRegistry::default();

        let value = Value::List(vec![Value::Integer(1), Value::String("a".into())]);
        assert_eq!(
            call(&registry, "json", &[value]),
            Value::String(r#"[1,"a"]"#.into())
        );
    }

    #[test]
    fn test_domain_helpers() {
        let registry = HelperRegistry::default();

        assert_eq!(
            call(
                &registry,
                "projectCategory",
                &[Value::String("health".into())]
            ),
            Value::String("Saúde".into())
        );

        // Unknown codes fall through unchanged.
        assert_eq!(
            call(
                &registry,
                "projectStatus",
                &[Value::String("archived".into())]
            ),
            Value::String("archived".into())
        );
    }
}
