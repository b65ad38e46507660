mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ParseError, SchemaError};
pub use middleware::{CommandSet, OptionParser};

pub(crate) use base::*;
pub(crate) use interface::*;
pub(crate) use middleware::*;
pub(crate) use printer::*;
