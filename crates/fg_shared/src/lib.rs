//! Shared functionality
//!
//! This crate supplies the character stream, source locations and error types that are used by
//! both the stylesheet parser and the gradient transform.

pub mod char_stream;
pub mod errors;
