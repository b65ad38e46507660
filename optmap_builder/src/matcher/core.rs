use std::collections::HashMap;
use thiserror::Error;

use crate::constant::{HELP_NAME, HELP_SHORT};
use crate::matcher::model::*;
use crate::matcher::tokens::{tokenize, Token};
use crate::model::{ConsumeMode, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenMatcherError {
    #[error("Cannot duplicate the option '{name}' (declared by '{first}' and '{second}').")]
    DuplicateOption {
        name: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Option '{0}' does not exist.")]
    UnknownOption(String),

    #[error("Option '{0}' expects a value.")]
    MissingValue(String),

    #[error("Invalid value '{value}' for option '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// The raw outcome of a scan, still indexed by option position.
#[derive(Debug, PartialEq)]
pub(crate) struct Matches {
    pub(crate) values: Vec<Option<Value>>,
    pub(crate) args: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Scan {
    Complete(Matches),
    HelpRequested,
}

/// Matches a token stream against a fixed set of option specs.
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    specs: Vec<OptionSpec>,
    names: HashMap<String, usize>,
}

impl TokenMatcher {
    pub(crate) fn new(specs: Vec<OptionSpec>) -> Result<Self, TokenMatcherError> {
        let mut names: HashMap<String, usize> = HashMap::default();

        for (position, spec) in specs.iter().enumerate() {
            for name in spec.names() {
                if let Some(previous) = names.insert(name.clone(), position) {
                    return Err(TokenMatcherError::DuplicateOption {
                        name: name.clone(),
                        first: specs[previous].field().to_string(),
                        second: spec.field().to_string(),
                    });
                }
            }
        }

        Ok(Self { specs, names })
    }

    pub(crate) fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    #[cfg(test)]
    pub(crate) fn claims(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Scan the tokens left to right, one option occurrence at a time.
    ///
    /// When `recognize_help` is set, an unclaimed `--help`/`-h` stops the scan immediately.
    /// Errors are reported with the index of the offending token.
    pub(crate) fn scan(
        &self,
        tokens: &[&str],
        recognize_help: bool,
    ) -> Result<Scan, (usize, MatchError)> {
        let classified = tokenize(tokens);
        let mut values: Vec<Option<Value>> = vec![None; self.specs.len()];
        let mut args = Vec::default();
        let mut index = 0;

        while index < classified.len() {
            let (name, inline) = match classified[index] {
                Token::Positional(text) => {
                    args.push(text.to_string());
                    index += 1;
                    continue;
                }
                Token::LongFlag { name, inline } => (name, inline),
                Token::ShortFlag { name, packed } => (name, packed),
            };

            let position = match self.names.get(name) {
                Some(position) => *position,
                None if recognize_help && (name == HELP_NAME || name == HELP_SHORT) => {
                    return Ok(Scan::HelpRequested);
                }
                None => {
                    return Err((index, MatchError::UnknownOption(name.to_string())));
                }
            };
            let spec = &self.specs[position];
            let flag_index = index;
            index += 1;

            let value = match spec.kind() {
                Kind::Switch => match inline {
                    Some(value) => {
                        return Err((
                            flag_index,
                            MatchError::InvalidValue {
                                name: name.to_string(),
                                value: value.to_string(),
                                reason: "the option does not take a value.".to_string(),
                            },
                        ));
                    }
                    None => Value::Bool(true),
                },
                Kind::Valued { converter, consume } => {
                    // Inline values always close the occurrence with precisely 1 value.
                    let raw: Vec<(usize, &str)> = match (inline, consume) {
                        (Some(value), _) => vec![(flag_index, value)],
                        (None, ConsumeMode::Single) => match tokens.get(index) {
                            Some(token) => {
                                index += 1;
                                vec![(index - 1, *token)]
                            }
                            None => Vec::default(),
                        },
                        (None, ConsumeMode::Multiple) => {
                            let start = index;
                            while index < classified.len() && !classified[index].is_flag() {
                                index += 1;
                            }
                            (start..index).map(|i| (i, tokens[i])).collect()
                        }
                        (None, ConsumeMode::All) => {
                            let start = index;
                            index = tokens.len();
                            (start..index).map(|i| (i, tokens[i])).collect()
                        }
                    };

                    if raw.is_empty() {
                        return Err((flag_index, MatchError::MissingValue(name.to_string())));
                    }

                    let mut converted = Vec::with_capacity(raw.len());

                    for (offset, token) in raw {
                        let value = converter.convert(token).map_err(|reason| {
                            (
                                offset,
                                MatchError::InvalidValue {
                                    name: name.to_string(),
                                    value: token.to_string(),
                                    reason,
                                },
                            )
                        })?;
                        converted.push(value);
                    }

                    match consume {
                        ConsumeMode::Single => match converted.pop() {
                            Some(value) => value,
                            None => unreachable!("internal error - a single value must have been converted"),
                        },
                        ConsumeMode::Multiple | ConsumeMode::All => Value::List(converted),
                    }
                }
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Matched '{name}' onto field '{}': {value:?}.",
                    spec.field()
                );
            }

            let slot = &mut values[position];

            if spec.repeatable() {
                if let Some(Value::List(items)) = slot.as_mut() {
                    items.push(value);
                } else {
                    slot.replace(Value::List(vec![value]));
                }
            } else {
                // The last occurrence wins.
                slot.replace(value);
            }
        }

        Ok(Scan::Complete(Matches { values, args }))
    }
}
