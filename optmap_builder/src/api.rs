mod converter;
mod core;
mod result;
mod schema;

pub use self::core::*;
pub use converter::*;
pub use result::*;
pub use schema::*;
