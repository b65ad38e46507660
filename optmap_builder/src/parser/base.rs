use thiserror::Error;

use crate::api::{Options, ParsedArgs};
use crate::matcher::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An invalid schema or command set configuration.
/// Detected while building the parser; never recoverable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Schema error: {0}")]
pub struct SchemaError(pub(crate) String);

impl From<TokenMatcherError> for SchemaError {
    fn from(error: TokenMatcherError) -> Self {
        SchemaError(error.to_string())
    }
}

/// A failure to parse the input tokens.
///
/// Every variant carries the offending flag (or command) text, exactly as it appears in the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A flag shaped token does not match any declared option.
    #[error("Parse error: Unknown option '{0}'.")]
    UnknownOption(String),

    /// The leading token does not match any registered command.
    #[error("Parse error: Unknown command '{0}'.")]
    UnknownCommand(String),

    /// A value option has no token left to consume.
    #[error("Parse error: Missing value for option '{0}'.")]
    MissingValue(String),

    /// A raw value failed conversion.
    #[error("Parse error: Invalid value '{value}' for option '{name}': {reason}")]
    InvalidValue {
        /// The flag, as written in the input.
        name: String,
        /// The raw value.
        value: String,
        /// The converter's explanation.
        reason: String,
    },

    /// A required option was never supplied.
    #[error("Parse error: Missing required option '{flag}' (field '{field}').")]
    MissingRequiredOption {
        /// The schema field.
        field: String,
        /// The option's primary flag.
        flag: String,
    },
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::UnknownOption(name) => ParseError::UnknownOption(name),
            MatchError::MissingValue(name) => ParseError::MissingValue(name),
            MatchError::InvalidValue {
                name,
                value,
                reason,
            } => ParseError::InvalidValue {
                name,
                value,
                reason,
            },
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Action {
    Continue(ParsedArgs),
    PrintHelp,
}

/// The tokenize-match-assemble pipeline over a normalized schema.
#[derive(Debug)]
pub(crate) struct Parser {
    token_matcher: TokenMatcher,
}

impl Parser {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(specs: Vec<OptionSpec>) -> Result<Self, SchemaError> {
        Ok(Self {
            token_matcher: TokenMatcher::new(specs)?,
        })
    }

    pub(crate) fn specs(&self) -> &[OptionSpec] {
        self.token_matcher.specs()
    }

    /// Parse the tokens, reporting errors with the index of the offending token.
    /// Errors found during assembly point just past the final token.
    pub(crate) fn consume(
        &self,
        tokens: &[&str],
        recognize_help: bool,
    ) -> Result<Action, (usize, ParseError)> {
        // 1. Match the tokens against the options, converting the values along the way.
        let matches = match self
            .token_matcher
            .scan(tokens, recognize_help)
            .map_err(|(offset, error)| (offset, ParseError::from(error)))?
        {
            Scan::Complete(matches) => matches,
            Scan::HelpRequested => return Ok(Action::PrintHelp),
        };

        // 2. Fill in the untouched fields.
        let parsed = assemble(self.specs(), matches).map_err(|error| (tokens.len(), error))?;
        Ok(Action::Continue(parsed))
    }
}

/// Apply the fallbacks of every untouched field and build the final result.
///
/// Fallbacks replace; they are never merged with supplied values.
pub(crate) fn assemble(specs: &[OptionSpec], matches: Matches) -> Result<ParsedArgs, ParseError> {
    let Matches { values, args } = matches;
    let mut options = Options::default();

    for (spec, value) in specs.iter().zip(values.into_iter()) {
        let value = match value {
            Some(value) => Some(value),
            None => match spec.fallback() {
                Fallback::Unset => None,
                Fallback::Value(value) => Some(value.clone()),
                Fallback::Required => {
                    return Err(ParseError::MissingRequiredOption {
                        field: spec.field().to_string(),
                        flag: spec.display_name().to_string(),
                    });
                }
            },
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Assembled field '{}': {value:?}.", spec.field());
        }

        options.insert(spec.field(), value);
    }

    Ok(ParsedArgs::new(options, args))
}
