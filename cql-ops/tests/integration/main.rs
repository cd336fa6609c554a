mod macros;
mod specifications;
mod template;
pub(crate) mod utils;
