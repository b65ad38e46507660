//! Engine module for `optmap`.
//! See [documentation root](https://docs.rs/optmap/latest/optmap/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{CommandSet, OptionParser, ParseError, SchemaError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
