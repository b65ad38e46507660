use std::any::Any;
use std::sync::Arc;

/// How many of the following tokens a single occurrence of a value option consumes.
///
/// Inline values (`--name=value` or `-nvalue`) always produce precisely one value, regardless of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumeMode {
    /// Precisely the next token.
    #[default]
    Single,
    /// Every following token up to (but excluding) the next flag, or the end of input.
    Multiple,
    /// Every remaining token verbatim, including flag shaped tokens.
    All,
}

impl std::fmt::Display for ConsumeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A coerced option value.
///
/// Sequences are produced by repeatable options, multi-value options, or both (a sequence of sequences).
#[derive(Clone)]
pub enum Value {
    /// The presence of a boolean flag.
    Bool(bool),
    /// Text, as produced by [`Converter::text`](crate::Converter::text).
    Text(String),
    /// An integral number, as produced by [`Converter::integer`](crate::Converter::integer).
    Integer(i64),
    /// A floating point number, as produced by [`Converter::number`](crate::Converter::number).
    Number(f64),
    /// A member of an enumeration, as produced by [`Converter::one_of`](crate::Converter::one_of).
    Choice(String),
    /// A user type, as produced by [`Converter::parsed`](crate::Converter::parsed) or [`Converter::custom`](crate::Converter::custom).
    Custom(Arc<dyn Any + Send + Sync>),
    /// An ordered sequence of values.
    List(Vec<Value>),
}

impl Value {
    /// Build a `Value::Text`.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Build a `Value::Custom` from any user type.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Build a `Value::List` of texts.
    pub fn texts<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Value::List(values.into_iter().map(|v| Value::Text(v.into())).collect())
    }

    /// The flag presence, if this is a `Value::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The text, if this is a `Value::Text` or `Value::Choice`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Choice(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The integer, if this is a `Value::Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The number, if this is a `Value::Number` or `Value::Integer`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The items, if this is a `Value::List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The user type, if this is a `Value::Custom` holding a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub(crate) fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Choice(s) => f.debug_tuple("Choice").field(s).finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

// Custom values only compare equal when they are the same allocation.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Choice(a), Value::Choice(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
