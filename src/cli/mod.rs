//! # CLI
//!
//! Command-line surface of `kubectl who-can`: argument parsing, completion
//! and validation of the query, and rendering of the report.

pub mod args;
pub mod options;
pub mod output;

pub use args::Cli;
pub use options::{complete, validate, WhoCanQuery};
pub use output::{print_api_access_warnings, print_bindings};
