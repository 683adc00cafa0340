//! Layered-RC: Layered Application Configuration
//!
//! A library for resolving application configuration from defaults,
//! conventional configuration files, prefixed environment variables and
//! command-line arguments, merged with a fixed precedence.
//!
//! See [`resolve`](mod@resolve) for the layering rules and [`paths`] for the
//! list of files that are searched.

pub mod args;
pub mod cli;
pub mod defaults;
pub mod env;
pub mod error;
pub mod loader;
pub mod merge;
pub mod parser;
pub mod paths;
pub mod resolve;

#[cfg(test)]
mod test_support;

pub use error::{ConfigError, ParseError};
pub use parser::{ConfigObject, ParserRegistry};
pub use resolve::{Platform, Resolution, Resolver, resolve};
