//! Error types and error reporting for the front end.
//!
//! This module defines the errors the lexer and parser report. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each stage
//! - The `Diagnostics` reporter both stages append to
//! - Source excerpt rendering for the command line

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
