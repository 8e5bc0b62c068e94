//! Explicit search-path context and path-style strategy.
//!
//! The process search path is modeled as a caller-owned value rather
//! than hidden `PATH` mutation: [`SearchContext::from_env`] seeds the
//! context from the real environment once at startup, and
//! [`SearchContext::export`] writes it back at the process boundary.

pub mod context;
pub mod style;

pub use context::{is_executable, SearchContext};
pub use style::PathStyle;
