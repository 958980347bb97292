//! Pure domain logic of the homework status bot: no I/O, no async.

pub mod catalog;
pub mod cursor;
pub mod dedup;
pub mod formatter;
pub mod validator;
