//! CSS stylesheet handling for filter-gradient
//!
//! The parser in this crate does not interpret selectors or values. It keeps the source text of
//! every node together with the whitespace around it, so a stylesheet can be changed in place
//! and written back with `to_string()` without touching anything else.

pub mod colors;
pub mod list;
pub mod parser;
pub mod parser_config;
pub mod stylesheet;
pub mod tokenizer;
pub mod walker;

pub use parser::CssParser;
pub use parser_config::ParserConfig;
pub use stylesheet::CssStylesheet;
