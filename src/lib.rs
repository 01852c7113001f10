//! Adds legacy gradient filters next to CSS linear gradients
//!
//! The work is split over the crates in this workspace:
//!
//! * `fg_shared`: character stream, locations and errors
//! * `fg_css`: lossless stylesheet parser, tree and colors
//! * `fg_gradient`: the gradient parser and the transform itself
pub use fg_css as css;
pub use fg_gradient as gradient;
pub use fg_shared as shared;

pub use fg_gradient::{
    process_str, transform, Diagnostic, ProcessedStylesheet, TransformOptions, TransformReport,
};

pub mod testing;
