use crate::errors::GradientError;
use fg_css::stylesheet::{CssDeclaration, CssRule};
use fg_shared::char_stream::Location;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The gradient text does not match the supported grammar
    Syntax,
    /// A color of the gradient could not be parsed
    Color,
    /// Informational: existing filter, multiple gradients or an approximated direction
    Policy,
}

/// The node a diagnostic is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticNode {
    /// A rule, by selector
    Rule(String),
    /// A declaration, by property
    Declaration(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub node: DiagnosticNode,
    /// Location of the node in the source
    pub location: Location,
}

impl Diagnostic {
    pub fn for_rule(kind: DiagnosticKind, message: &str, rule: &CssRule) -> Self {
        Self {
            kind,
            message: message.to_string(),
            node: DiagnosticNode::Rule(rule.selector.clone()),
            location: rule.location,
        }
    }

    pub fn for_declaration(kind: DiagnosticKind, message: &str, decl: &CssDeclaration) -> Self {
        Self {
            kind,
            message: message.to_string(),
            node: DiagnosticNode::Declaration(decl.property.clone()),
            location: decl.location,
        }
    }

    /// Diagnostic for a failed conversion of the gradient in `decl`
    pub fn from_error(err: &GradientError, decl: &CssDeclaration) -> Self {
        let kind = match err {
            GradientError::Syntax(_) => DiagnosticKind::Syntax,
            GradientError::Color { .. } => DiagnosticKind::Color,
        };
        Self::for_declaration(kind, &err.to_string(), decl)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}
