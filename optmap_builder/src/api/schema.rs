use std::collections::HashSet;

use crate::api::Converter;
use crate::constant::{LONG_PREFIX, SHORT_PREFIX};
use crate::matcher::{Fallback, Kind, OptionSpec};
use crate::model::{ConsumeMode, Value};
use crate::parser::SchemaError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The value a field takes when its option is never supplied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValue {
    /// Use the implicit default: `false` for boolean flags, an empty sequence for repeatable or multi-value options, otherwise no value.
    #[default]
    Implicit,
    /// The option must be supplied; parsing fails otherwise.
    Required,
    /// Use this value verbatim.
    Value(Value),
}

/// The declaration of a single option.
///
/// ### Example
/// ```
/// # use optmap_builder as optmap;
/// use optmap::{ConsumeMode, Converter, OptionDecl};
///
/// let thing = OptionDecl::value(Converter::text())
///     .name("-b")
///     .alias("--bar")
///     .consume(ConsumeMode::Multiple)
///     .repeatable()
///     .description("A thing");
/// ```
#[derive(Debug, Clone)]
pub struct OptionDecl {
    names: Vec<String>,
    aliases: Vec<String>,
    converter: Option<Converter>,
    consume: Option<ConsumeMode>,
    repeatable: bool,
    default: DefaultValue,
    description: Option<String>,
}

impl OptionDecl {
    fn new(converter: Option<Converter>) -> Self {
        Self {
            names: Vec::default(),
            aliases: Vec::default(),
            converter,
            consume: None,
            repeatable: false,
            default: DefaultValue::Implicit,
            description: None,
        }
    }

    /// Declare a boolean presence flag (consumes no value).
    pub fn switch() -> Self {
        Self::new(None)
    }

    /// Declare an option which consumes value(s), converted via `converter`.
    pub fn value(converter: Converter) -> Self {
        Self::new(Some(converter))
    }

    /// Add an explicit flag name (ex: `--port` or `-p`).
    ///
    /// Explicit names replace the name derived from the field.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add an alias, on top of the explicit or derived names.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set how many tokens each occurrence consumes.
    /// Not applicable to a [`OptionDecl::switch`].
    pub fn consume(mut self, consume: ConsumeMode) -> Self {
        self.consume.replace(consume);
        self
    }

    /// Accumulate every occurrence into a sequence, rather than keeping only the last one.
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Set the value used when the option is never supplied.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Value(value.into());
        self
    }

    /// Require the option to be supplied.
    pub fn required(mut self) -> Self {
        self.default = DefaultValue::Required;
        self
    }

    /// Set the default by variant; equivalent to [`OptionDecl::default`] or [`OptionDecl::required`].
    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    /// Document the option in the help message.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }
}

/// An ordered mapping from field identifiers to option declarations.
///
/// ### Example
/// ```
/// # use optmap_builder as optmap;
/// use optmap::{Converter, OptionDecl, Schema};
///
/// let schema = Schema::new()
///     .field("name", OptionDecl::value(Converter::text()))
///     // Available as '--port-number'.
///     .field("portNumber", OptionDecl::value(Converter::number()))
///     .field("force", OptionDecl::switch());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, OptionDecl)>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    /// The order of fields is the order of the help message and the parsed options.
    pub fn field(mut self, field: impl Into<String>, decl: OptionDecl) -> Self {
        self.fields.push((field.into(), decl));
        self
    }

    pub(crate) fn normalize(self) -> Result<Vec<OptionSpec>, SchemaError> {
        let mut seen: HashSet<String> = HashSet::default();
        let mut specs = Vec::with_capacity(self.fields.len());

        for (field, decl) in self.fields.into_iter() {
            if field.is_empty() {
                return Err(SchemaError("Field identifiers cannot be empty.".to_string()));
            }

            if !seen.insert(field.clone()) {
                return Err(SchemaError(format!(
                    "Cannot duplicate the field '{field}'."
                )));
            }

            specs.push(normalize_field(field, decl)?);
        }

        Ok(specs)
    }
}

fn normalize_field(field: String, decl: OptionDecl) -> Result<OptionSpec, SchemaError> {
    let OptionDecl {
        names,
        aliases,
        converter,
        consume,
        repeatable,
        default,
        description,
    } = decl;

    let mut names = if names.is_empty() {
        vec![derive_name(&field)]
    } else {
        names
    };
    names.extend(aliases);

    for name in &names {
        validate_name(&field, name)?;
    }

    let kind = match (converter, consume) {
        (None, Some(_)) => {
            return Err(SchemaError(format!(
                "Field '{field}' is a boolean flag and cannot set a consume mode."
            )));
        }
        (None, None) => Kind::Switch,
        (Some(converter), consume) => Kind::Valued {
            converter,
            consume: consume.unwrap_or_default(),
        },
    };
    let sequence = repeatable
        || matches!(
            kind,
            Kind::Valued {
                consume: ConsumeMode::Multiple | ConsumeMode::All,
                ..
            }
        );

    let fallback = match default {
        DefaultValue::Required => Fallback::Required,
        DefaultValue::Value(value) => {
            if sequence && !value.is_list() {
                return Err(SchemaError(format!(
                    "Field '{field}' holds a sequence, but its default is not a sequence."
                )));
            }

            Fallback::Value(value)
        }
        DefaultValue::Implicit => {
            if sequence {
                Fallback::Value(Value::List(Vec::default()))
            } else if matches!(kind, Kind::Switch) {
                Fallback::Value(Value::Bool(false))
            } else {
                Fallback::Unset
            }
        }
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Normalized field '{field}' to names {names:?}, kind {kind:?}, repeatable {repeatable}, fallback {fallback:?}.");
    }

    Ok(OptionSpec::new(
        field,
        names,
        kind,
        repeatable,
        fallback,
        description,
    ))
}

/// Derive the long flag of a field: `portNumber` (or `port_number`) becomes `--port-number`.
pub(crate) fn derive_name(field: &str) -> String {
    let mut name = String::from(LONG_PREFIX);

    for (i, c) in field.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !name.ends_with('-') {
                name.push('-');
            }
            name.extend(c.to_lowercase());
        } else if c == '_' {
            name.push('-');
        } else {
            name.push(c);
        }
    }

    name
}

fn validate_name(field: &str, name: &str) -> Result<(), SchemaError> {
    let valid = if let Some(long) = name.strip_prefix(LONG_PREFIX) {
        !long.is_empty() && !long.starts_with('-') && !long.contains('=')
    } else if let Some(short) = name.strip_prefix(SHORT_PREFIX) {
        let mut chars = short.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c != '-')
    } else {
        false
    };

    if valid {
        Ok(())
    } else {
        Err(SchemaError(format!(
            "Field '{field}' has an invalid flag name '{name}' (expected '--long' or '-s')."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single(decl: OptionDecl) -> OptionSpec {
        let mut specs = Schema::new().field("field", decl).normalize().unwrap();
        assert_eq!(specs.len(), 1);
        specs.remove(0)
    }

    #[rstest]
    #[case("name", "--name")]
    #[case("portNumber", "--port-number")]
    #[case("port_number", "--port-number")]
    #[case("maxHTTPRetries", "--max-h-t-t-p-retries")]
    #[case("Name", "--name")]
    #[case("a", "--a")]
    fn derive(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(derive_name(field), expected);
    }

    #[test]
    fn derived_names() {
        let specs = Schema::new()
            .field("portNumber", OptionDecl::value(Converter::number()))
            .normalize()
            .unwrap();

        assert_eq!(specs[0].names(), ["--port-number".to_string()]);
        assert_eq!(specs[0].field(), "portNumber");
    }

    #[rstest]
    #[case(OptionDecl::switch().name("-p"), vec!["-p"])]
    #[case(OptionDecl::switch().name("-b").name("--bar"), vec!["-b", "--bar"])]
    #[case(OptionDecl::switch().alias("-n"), vec!["--field", "-n"])]
    #[case(OptionDecl::switch().name("--other").alias("-o"), vec!["--other", "-o"])]
    fn explicit_names(#[case] decl: OptionDecl, #[case] expected: Vec<&str>) {
        assert_eq!(single(decl).names(), expected.as_slice());
    }

    #[rstest]
    #[case("p")]
    #[case("--")]
    #[case("-")]
    #[case("-pq")]
    #[case("--a=b")]
    #[case("---")]
    #[case("")]
    fn invalid_name(#[case] name: &str) {
        let result = Schema::new()
            .field("field", OptionDecl::switch().name(name))
            .normalize();

        assert_matches!(result, Err(SchemaError(message)) => {
            assert_eq!(message, format!("Field 'field' has an invalid flag name '{name}' (expected '--long' or '-s')."));
        });
    }

    #[test]
    fn duplicate_field() {
        let result = Schema::new()
            .field("a", OptionDecl::switch())
            .field("a", OptionDecl::switch().name("-a"))
            .normalize();

        assert_eq!(
            result.unwrap_err(),
            SchemaError("Cannot duplicate the field 'a'.".to_string())
        );
    }

    #[test]
    fn empty_field() {
        let result = Schema::new().field("", OptionDecl::switch()).normalize();

        assert_matches!(result, Err(SchemaError(_)));
    }

    #[test]
    fn switch_consume() {
        let result = Schema::new()
            .field("force", OptionDecl::switch().consume(ConsumeMode::Single))
            .normalize();

        assert_eq!(
            result.unwrap_err(),
            SchemaError(
                "Field 'force' is a boolean flag and cannot set a consume mode.".to_string()
            )
        );
    }

    #[rstest]
    #[case(OptionDecl::switch(), Fallback::Value(Value::Bool(false)))]
    #[case(OptionDecl::switch().repeatable(), Fallback::Value(Value::List(vec![])))]
    #[case(OptionDecl::value(Converter::text()), Fallback::Unset)]
    #[case(OptionDecl::value(Converter::text()).consume(ConsumeMode::Multiple), Fallback::Value(Value::List(vec![])))]
    #[case(OptionDecl::value(Converter::text()).consume(ConsumeMode::All), Fallback::Value(Value::List(vec![])))]
    #[case(OptionDecl::value(Converter::text()).repeatable(), Fallback::Value(Value::List(vec![])))]
    #[case(OptionDecl::value(Converter::integer()).default(3i64), Fallback::Value(Value::Integer(3)))]
    #[case(OptionDecl::value(Converter::integer()).repeatable().default(vec![8000i64]), Fallback::Value(Value::List(vec![Value::Integer(8000)])))]
    #[case(OptionDecl::value(Converter::integer()).required(), Fallback::Required)]
    #[case(OptionDecl::switch().required(), Fallback::Required)]
    #[case(OptionDecl::switch().required().default_value(DefaultValue::Implicit), Fallback::Value(Value::Bool(false)))]
    fn fallback(#[case] decl: OptionDecl, #[case] expected: Fallback) {
        assert_eq!(single(decl).fallback(), &expected);
    }

    #[rstest]
    #[case(OptionDecl::value(Converter::integer()).repeatable().default(3i64))]
    #[case(OptionDecl::value(Converter::text()).consume(ConsumeMode::All).default("x"))]
    fn fallback_not_sequence(#[case] decl: OptionDecl) {
        let result = Schema::new().field("field", decl).normalize();

        assert_eq!(
            result.unwrap_err(),
            SchemaError(
                "Field 'field' holds a sequence, but its default is not a sequence.".to_string()
            )
        );
    }

    #[rstest]
    #[case(OptionDecl::value(Converter::text()), ConsumeMode::Single)]
    #[case(OptionDecl::value(Converter::text()).consume(ConsumeMode::Multiple), ConsumeMode::Multiple)]
    #[case(OptionDecl::value(Converter::text()).consume(ConsumeMode::All), ConsumeMode::All)]
    fn consume_mode(#[case] decl: OptionDecl, #[case] expected: ConsumeMode) {
        assert_matches!(single(decl).kind(), Kind::Valued { consume, .. } => {
            assert_eq!(*consume, expected);
        });
    }

    #[test]
    fn description() {
        assert_eq!(
            single(OptionDecl::switch().description("--this will get discarded--").description("Force it"))
                .description(),
            Some("Force it")
        );
        assert_eq!(single(OptionDecl::switch()).description(), None);
    }
}
