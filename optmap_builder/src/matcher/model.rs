use crate::api::Converter;
use crate::model::{ConsumeMode, Value};

/// The resolved fallback for an option that was never supplied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fallback {
    /// Leave the field unset.
    Unset,
    /// The field must be supplied.
    Required,
    /// Assign this value verbatim.
    Value(Value),
}

/// How an option occurrence takes its value(s).
#[derive(Debug, Clone)]
pub(crate) enum Kind {
    /// A boolean presence flag; consumes nothing.
    Switch,
    /// Consumes values according to the mode, converting each.
    Valued {
        converter: Converter,
        consume: ConsumeMode,
    },
}

/// The canonical, validated form of a single declared option.
#[derive(Debug, Clone)]
pub(crate) struct OptionSpec {
    field: String,
    names: Vec<String>,
    kind: Kind,
    repeatable: bool,
    fallback: Fallback,
    description: Option<String>,
}

impl OptionSpec {
    pub(crate) fn new(
        field: impl Into<String>,
        names: Vec<String>,
        kind: Kind,
        repeatable: bool,
        fallback: Fallback,
        description: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            names,
            kind,
            repeatable,
            fallback,
            description,
        }
    }

    pub(crate) fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    /// The name used to refer to this option in messages: the first long name, otherwise the first name.
    pub(crate) fn display_name(&self) -> &str {
        self.names
            .iter()
            .find(|name| name.starts_with("--"))
            .or_else(|| self.names.first())
            .map(String::as_str)
            .unwrap_or(self.field.as_str())
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    pub(crate) fn repeatable(&self) -> bool {
        self.repeatable
    }

    pub(crate) fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
