//! Request handlers.

mod describe;
mod fallback;
mod response;

pub use describe::describe_handler;
pub(crate) use describe::respond;
pub use fallback::{method_not_allowed, not_found};
