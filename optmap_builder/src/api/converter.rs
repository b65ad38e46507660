use std::any::Any;
use std::str::FromStr;
use std::sync::Arc;

use crate::model::Value;

type ConvertFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

#[derive(Clone)]
enum Strategy {
    Text,
    Integer,
    Number,
    OneOf(Vec<String>),
    Custom(ConvertFn),
}

/// A named conversion strategy from raw `&str` tokens into a [`Value`].
///
/// Each converter carries the placeholder used to display its value in the help message.
///
/// ### Example
/// ```
/// # use optmap_builder as optmap;
/// use optmap::{Converter, Value};
///
/// let port = Converter::integer();
/// assert_eq!(port.convert("8080").unwrap(), Value::Integer(8080));
/// assert!(port.convert("80.5").is_err());
/// assert_eq!(port.placeholder(), "<num>");
/// ```
#[derive(Clone)]
pub struct Converter {
    strategy: Strategy,
    placeholder: String,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

impl Converter {
    fn new(strategy: Strategy, hint: &str) -> Self {
        Self {
            strategy,
            placeholder: format!("<{hint}>"),
        }
    }

    /// Accept any text verbatim.
    pub fn text() -> Self {
        Self::new(Strategy::Text, "value")
    }

    /// Accept integral numbers only (ex: `45`, `-3`), rejecting fractional or non-numeric text.
    pub fn integer() -> Self {
        Self::new(Strategy::Integer, "num")
    }

    /// Accept any (floating point) number.
    pub fn number() -> Self {
        Self::new(Strategy::Number, "num")
    }

    /// Accept only the declared keys of an enumeration.
    /// The `name` of the enumeration is shown in the help message.
    ///
    /// ### Example
    /// ```
    /// # use optmap_builder as optmap;
    /// use optmap::{Converter, Value};
    ///
    /// let format = Converter::one_of("format", ["html", "markdown"]);
    /// assert_eq!(format.convert("html").unwrap(), Value::Choice("html".to_string()));
    /// assert!(format.convert("pdf").is_err());
    /// assert_eq!(format.placeholder(), "<format>");
    /// ```
    pub fn one_of<S: Into<String>>(name: &str, keys: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            Strategy::OneOf(keys.into_iter().map(Into::into).collect()),
            name,
        )
    }

    /// Accept any type `T` via [`std::str::FromStr`].
    /// The parsed value is held as a [`Value::Custom`].
    ///
    /// ### Example
    /// ```
    /// # use optmap_builder as optmap;
    /// use optmap::Converter;
    /// use std::net::Ipv4Addr;
    ///
    /// let address = Converter::parsed::<Ipv4Addr>("ip");
    /// let value = address.convert("127.0.0.1").unwrap();
    /// assert_eq!(value.downcast_ref::<Ipv4Addr>(), Some(&Ipv4Addr::LOCALHOST));
    /// ```
    pub fn parsed<T>(hint: &str) -> Self
    where
        T: FromStr + Any + Send + Sync,
    {
        Self::new(
            Strategy::Custom(Arc::new(|token: &str| {
                T::from_str(token).map(Value::custom).map_err(|_| {
                    format!(
                        "cannot convert '{token}' to {}.",
                        std::any::type_name::<T>()
                    )
                })
            })),
            hint,
        )
    }

    /// Accept text via an arbitrary conversion function.
    /// The `Err` message is reported as part of the [`ParseError::InvalidValue`](crate::ParseError::InvalidValue).
    pub fn custom(
        hint: &str,
        convert: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self::new(Strategy::Custom(Arc::new(convert)), hint)
    }

    /// The placeholder for this converter's value in the help message.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Convert a single raw token.
    pub fn convert(&self, token: &str) -> Result<Value, String> {
        match &self.strategy {
            Strategy::Text => Ok(Value::Text(token.to_string())),
            Strategy::Integer => i64::from_str(token.trim())
                .map(Value::Integer)
                .map_err(|_| format!("'{token}' is not an integer.")),
            Strategy::Number => match f64::from_str(token.trim()) {
                Ok(n) if !n.is_nan() => Ok(Value::Number(n)),
                _ => Err(format!("'{token}' is not a number.")),
            },
            Strategy::OneOf(keys) => {
                if keys.iter().any(|key| key == token) {
                    Ok(Value::Choice(token.to_string()))
                } else {
                    Err(format!(
                        "'{token}' is not one of {{{}}}.",
                        keys.join(", ")
                    ))
                }
            }
            Strategy::Custom(convert) => convert(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("--not-a-flag")]
    #[case("a b c")]
    fn text(#[case] token: &str) {
        assert_eq!(Converter::text().convert(token).unwrap(), Value::text(token));
    }

    #[rstest]
    #[case("45", 45)]
    #[case("-3", -3)]
    #[case("0", 0)]
    #[case("007", 7)]
    fn integer(#[case] token: &str, #[case] expected: i64) {
        assert_eq!(
            Converter::integer().convert(token).unwrap(),
            Value::Integer(expected)
        );
    }

    #[rstest]
    #[case("4.5")]
    #[case("abc")]
    #[case("")]
    #[case("1e3")]
    fn integer_invalid(#[case] token: &str) {
        let message = Converter::integer().convert(token).unwrap_err();
        assert_eq!(message, format!("'{token}' is not an integer."));
    }

    #[rstest]
    #[case("45", 45.0)]
    #[case("4.5", 4.5)]
    #[case("-0.25", -0.25)]
    #[case("1e3", 1000.0)]
    fn number(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(
            Converter::number().convert(token).unwrap(),
            Value::Number(expected)
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("NaN")]
    fn number_invalid(#[case] token: &str) {
        assert_matches!(Converter::number().convert(token), Err(_));
    }

    #[test]
    fn one_of() {
        let converter = Converter::one_of("format", ["html", "markdown"]);
        assert_eq!(
            converter.convert("markdown").unwrap(),
            Value::Choice("markdown".to_string())
        );
        assert_eq!(
            converter.convert("HTML").unwrap_err(),
            "'HTML' is not one of {html, markdown}."
        );
    }

    #[test]
    fn parsed() {
        let converter = Converter::parsed::<u8>("byte");
        assert_eq!(
            converter.convert("7").unwrap().downcast_ref::<u8>(),
            Some(&7)
        );
        assert_eq!(
            converter.convert("300").unwrap_err(),
            "cannot convert '300' to u8."
        );
    }

    #[test]
    fn custom() {
        let converter = Converter::custom("upper", |token| {
            if token.is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(Value::text(token.to_uppercase()))
            }
        });
        assert_eq!(converter.convert("abc").unwrap(), Value::text("ABC"));
        assert_eq!(converter.convert("").unwrap_err(), "must not be empty");
    }

    #[rstest]
    #[case(Converter::text(), "<value>")]
    #[case(Converter::integer(), "<num>")]
    #[case(Converter::number(), "<num>")]
    #[case(Converter::one_of("format", ["html"]), "<format>")]
    #[case(Converter::parsed::<u8>("byte"), "<byte>")]
    fn placeholder(#[case] converter: Converter, #[case] expected: &str) {
        assert_eq!(converter.placeholder(), expected);
    }
}
