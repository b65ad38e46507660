use crate::constant::{LONG_PREFIX, SHORT_PREFIX};

/// A classified view over a single raw token.
/// The raw text is never rewritten; flags and values borrow from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    /// `--name` or `--name=value`.
    LongFlag {
        name: &'t str,
        inline: Option<&'t str>,
    },
    /// `-n` or `-nvalue` (the tail is only ever read as a packed value).
    ShortFlag {
        name: &'t str,
        packed: Option<&'t str>,
    },
    Positional(&'t str),
}

impl<'t> Token<'t> {
    pub(crate) fn is_flag(&self) -> bool {
        !matches!(self, Token::Positional(_))
    }
}

/// Split the raw tokens into classified tokens, one per raw token.
pub(crate) fn tokenize<'t>(tokens: &[&'t str]) -> Vec<Token<'t>> {
    tokens.iter().copied().map(classify).collect()
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    // 1. Find a 'long' flag, such as:
    //  --name
    //  --name=..
    // 2. Find a 'short' flag, such as:
    //  -n
    //  -n..
    // 3. Anything else (including a lone '-') is positional.
    if token.starts_with(LONG_PREFIX) {
        match token.split_once('=') {
            Some((name, value)) => Token::LongFlag {
                name,
                inline: Some(value),
            },
            None => Token::LongFlag {
                name: token,
                inline: None,
            },
        }
    } else if let Some(rest) = token.strip_prefix(SHORT_PREFIX) {
        match rest.chars().next() {
            Some(single) => {
                let split = SHORT_PREFIX.len() + single.len_utf8();
                let (name, tail) = token.split_at(split);
                Token::ShortFlag {
                    name,
                    packed: if tail.is_empty() { None } else { Some(tail) },
                }
            }
            None => Token::Positional(token),
        }
    } else {
        Token::Positional(token)
    }
}
