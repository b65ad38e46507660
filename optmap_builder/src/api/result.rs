use crate::model::Value;

/// The parsed option values, keyed by schema field.
///
/// Every schema field has an entry; fields that were neither supplied nor defaulted hold no value.
/// Iteration follows the schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Option<Value>)>,
}

impl Options {
    pub(crate) fn insert(&mut self, field: impl Into<String>, value: Option<Value>) {
        self.entries.push((field.into(), value));
    }

    /// Build options from explicit entries (useful to compare against in tests).
    pub fn from_entries<S: Into<String>>(entries: impl IntoIterator<Item = (S, Option<Value>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }

    /// The value of a field, if it has one.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Whether the field is declared in the schema.
    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    /// The boolean flag value of a field (`false` when unset).
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The text value of a field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    /// The integer value of a field.
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_integer)
    }

    /// The number value of a field.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_number)
    }

    /// The sequence value of a field.
    pub fn list(&self, field: &str) -> Option<&[Value]> {
        self.get(field).and_then(Value::as_list)
    }

    /// Iterate the fields and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_ref()))
    }
}

/// The result of parsing: the option values plus the positional arguments, in encountered order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    options: Options,
    args: Vec<String>,
}

impl ParsedArgs {
    pub(crate) fn new(options: Options, args: Vec<String>) -> Self {
        Self { options, args }
    }

    /// The option values.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The positional arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Split into the option values and positional arguments.
    pub fn into_parts(self) -> (Options, Vec<String>) {
        (self.options, self.args)
    }
}
