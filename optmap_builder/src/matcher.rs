mod core;
mod model;
mod tokens;

pub(crate) use self::core::*;
pub(crate) use model::*;
pub(crate) use tokens::classify;
