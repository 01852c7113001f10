//! Adds legacy `filter` gradients next to CSS `linear-gradient()` backgrounds
//!
//! For every style rule with a `background` or `background-image` declaration holding a linear
//! gradient, a `filter: progid:DXImageTransform.Microsoft.gradient(...)` declaration is inserted
//! directly after it. The filter only knows two colors and four directions, so the first and last
//! color stops are used and angles and corners are mapped to the closest side.
//!
//! ```
//! use fg_gradient::{process_str, TransformOptions};
//!
//! let result = process_str("a { background: linear-gradient(to right, #000, #fff) }", &TransformOptions::default());
//! assert!(result.is_ok_and(|result| result.css.contains("GradientType=1")));
//! ```

use fg_css::parser::CssParser;
use fg_css::parser_config::ParserConfig;
use fg_shared::errors::CssResult;

pub mod diagnostics;
pub mod direction;
pub mod errors;
pub mod filter;
pub mod gradient;
pub mod options;
pub mod parser;
pub mod policy;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticNode};
pub use errors::GradientError;
pub use filter::{colors_to_filter_string, FilterOutcome};
pub use options::TransformOptions;
pub use policy::{process_rule, transform, RuleOutcome, RuleReport, TransformReport};

/// A transformed stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedStylesheet {
    /// The stylesheet as CSS, including the inserted filters
    pub css: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of inserted filter declarations
    pub applied: usize,
}

/// Parses the CSS, adds the filters and writes it back
pub fn process_str(css: &str, options: &TransformOptions) -> CssResult<ProcessedStylesheet> {
    let mut stylesheet = CssParser::parse_str(css, ParserConfig::default())?;
    let report = transform(&mut stylesheet, options);

    Ok(ProcessedStylesheet {
        css: stylesheet.to_string(),
        diagnostics: report.diagnostics,
        applied: report.applied,
    })
}
