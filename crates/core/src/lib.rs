pub mod check;
pub mod event;
pub mod labels;

pub use check::*;
pub use event::*;
pub use labels::{matches, resolve, resolve_non_empty};
