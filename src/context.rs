//! Per-render data. Built for a single render call and thrown away;
//! the injected capabilities (helpers, escaper, partial resolver) live
//! beside the context in the evaluator, so template field names can
//! never collide with them.
use crate::error::Error;
use crate::lexer::{ToValue, Value};

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

#[derive(Debug, Default, Clone)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl ToValue) -> Result<&mut Self, Error> {
        self.values.insert(key.to_string(), value.to_value()?);
        Ok(self)
    }
}

impl TryFrom<&Context> for Context {
    type Error = Error;

    fn try_from(context: &Context) -> Result<Context, Self::Error> {
        Ok(context.clone())
    }
}

impl TryFrom<serde_json::Value> for Context {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Context, Self::Error> {
        match Value::from_json(value) {
            Value::Hash(values) => Ok(Context { values }),
            value => Err(Error::Syntax(format!(
                "render data must be an object, got {:?}",
                value
            ))),
        }
    }
}

macro_rules! impl_conversion {
    ($ty:ty) => {
        impl TryFrom<$ty> for Context {
            type Error = Error;

            fn try_from(values: $ty) -> Result<Context, Self::Error> {
                let mut result = HashMap::<String, Value>::new();
                for (key, value) in values {
                    result.insert(key.to_string(), value.to_value()?);
                }

                Ok(Context { values: result })
            }
        }
    };
}

macro_rules! impl_value_conversion {
    ($ty:ty) => {
        impl_conversion!(HashMap<String, $ty>);
        impl_conversion!(HashMap<&str, $ty>);
        impl_conversion!(Vec<(&str, $ty)>);
        impl_conversion!([(&str, $ty); 1]);
        impl_conversion!([(&str, $ty); 2]);
        impl_conversion!([(&str, $ty); 3]);
        impl_conversion!([(&str, $ty); 4]);
        impl_conversion!([(&str, $ty); 5]);
        impl_conversion!([(&str, $ty); 6]);
    };
}

impl_value_conversion!(&str);
impl_value_conversion!(String);
impl_value_conversion!(i64);
impl_value_conversion!(i32);
impl_value_conversion!(f64);
impl_value_conversion!(Value);

impl Index<&str> for Context {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.values.get(key).unwrap_or(&Value::Null)
    }
}

impl IndexMut<&str> for Context {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        if self.values.get(key).is_none() {
            self.values.insert(key.to_string(), Value::Null);
        }

        self.values.get_mut(key).unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_context_index() {
        let mut context = Context::default();
        context["test"] = "value".to_value().expect("to_value");

        assert_eq!(context["test"], Value::String("value".to_string()));
        assert_eq!(context["missing"], Value::Null);
    }

    #[test]
    fn test_from_pairs() -> Result<(), Error> {
        let context = Context::try_from([("name", "World")])?;
        assert_eq!(context.get("name"), Some(Value::String("World".into())));
        Ok(())
    }

    #[test]
    fn test_from_json_object() -> Result<(), Error> {
        let context = Context::try_from(serde_json::json!({
            "title": "Horta Comunitária",
            "stats": { "beneficiaries": 850 }
        }))?;

        match context.get("stats") {
            Some(Value::Hash(stats)) => {
                assert_eq!(stats["beneficiaries"], Value::Integer(850))
            }
            value => panic!("unexpected value: {:?}", value),
        }

        Ok(())
    }
}
