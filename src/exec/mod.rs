//! External process execution.

pub mod command;

pub use command::{PreparedCommand, Verbosity};
