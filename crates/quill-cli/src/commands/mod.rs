//! Command implementations for the Quill CLI.
//!
//! Quill has a single command: [`generate`] renders one README per matched
//! package and writes it after the gatekeeper agrees.

pub mod generate;

pub use generate::execute;
