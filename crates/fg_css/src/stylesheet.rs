use core::fmt::Debug;
use std::fmt::{Display, Formatter};

use fg_shared::char_stream::Location;

/// Defines a complete stylesheet with all its nodes and the location where it was found
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CssStylesheet {
    /// Top level nodes found in this stylesheet
    pub nodes: Vec<CssNode>,
    /// Whitespace after the last node
    pub after: String,
    /// Url or file path where the stylesheet was found
    pub source: Option<String>,
}

/// A single node in the stylesheet tree
#[derive(Debug, PartialEq, Clone)]
pub enum CssNode {
    Rule(CssRule),
    AtRule(CssAtRule),
    Declaration(CssDeclaration),
    Comment(CssComment),
}

impl CssNode {
    pub fn location(&self) -> Location {
        match self {
            CssNode::Rule(rule) => rule.location,
            CssNode::AtRule(at_rule) => at_rule.location,
            CssNode::Declaration(decl) => decl.location,
            CssNode::Comment(comment) => comment.location,
        }
    }

    pub fn as_declaration(&self) -> Option<&CssDeclaration> {
        match self {
            CssNode::Declaration(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Formatting of a rule as found in the source
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RuleRaws {
    /// Whitespace before the selector
    pub before: String,
    /// Whitespace between the selector and `{`
    pub between: String,
    /// Whitespace before the closing `}`
    pub after: String,
}

/// A CSS style rule, which contains a selector and a block of child nodes
#[derive(Debug, PartialEq, Clone)]
pub struct CssRule {
    /// Selector text as written in the source (e.g. `a:hover, .btn`)
    pub selector: String,
    /// Declarations, comments and nested rules in document order
    pub nodes: Vec<CssNode>,
    /// Location of the first character of the selector
    pub location: Location,
    pub raws: RuleRaws,
}

impl CssRule {
    pub fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            nodes: Vec::new(),
            location: Location::default(),
            raws: RuleRaws {
                before: String::new(),
                between: " ".into(),
                after: "\n".into(),
            },
        }
    }

    /// Iterates over the direct declarations of this rule
    pub fn declarations(&self) -> impl Iterator<Item = &CssDeclaration> {
        self.nodes.iter().filter_map(CssNode::as_declaration)
    }

    /// Returns the child indices of all direct declarations for which `predicate` holds on the
    /// property name, in document order
    pub fn declarations_matching<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(&str) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| match node {
                CssNode::Declaration(decl) if predicate(&decl.property) => Some(idx),
                _ => None,
            })
            .collect()
    }

    /// Returns true when any direct declaration matches the predicate on its property name
    pub fn has_declaration<P>(&self, predicate: P) -> bool
    where
        P: Fn(&str) -> bool,
    {
        self.declarations().any(|decl| predicate(&decl.property))
    }

    /// Returns the declaration at the given child index
    pub fn declaration(&self, idx: usize) -> Option<&CssDeclaration> {
        self.nodes.get(idx).and_then(CssNode::as_declaration)
    }

    /// Inserts a declaration directly after the child node at `idx`. When the node at `idx` is a
    /// declaration, its semicolon is handed over to the new declaration and the node itself is
    /// terminated, so the block stays valid CSS.
    pub fn insert_after(&mut self, idx: usize, mut decl: CssDeclaration) {
        let idx = idx.min(self.nodes.len().saturating_sub(1));

        if let Some(CssNode::Declaration(prev)) = self.nodes.get_mut(idx) {
            decl.raws.semicolon = prev.raws.semicolon;
            prev.raws.semicolon = true;
        }

        if self.nodes.is_empty() {
            self.nodes.push(CssNode::Declaration(decl));
        } else {
            self.nodes.insert(idx + 1, CssNode::Declaration(decl));
        }
    }
}

/// Formatting of an at-rule as found in the source
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AtRuleRaws {
    pub before: String,
    /// Whitespace between the name and the params
    pub after_name: String,
    /// Whitespace between the params and `{` or `;`
    pub between: String,
    /// Whitespace before the closing `}`
    pub after: String,
    /// True when a block-less at-rule was terminated with `;`
    pub semicolon: bool,
}

/// An at-rule like `@media screen { ... }` or `@import url(foo.css);`
#[derive(Debug, PartialEq, Clone)]
pub struct CssAtRule {
    /// Name without the `@`
    pub name: String,
    pub params: String,
    /// Child nodes, or None when the at-rule has no block
    pub nodes: Option<Vec<CssNode>>,
    pub location: Location,
    pub raws: AtRuleRaws,
}

/// Formatting of a declaration as found in the source
#[derive(Debug, PartialEq, Clone, Default)]
pub struct DeclarationRaws {
    /// Whitespace before the property
    pub before: String,
    /// Everything between the property and the value, including the colon
    pub between: String,
    /// The `!important` marker as written, including leading whitespace
    pub important: Option<String>,
    /// Whitespace between the value and the semicolon
    pub after: String,
    /// True when the declaration is terminated with `;`
    pub semicolon: bool,
}

/// A CSS declaration, which contains a property, value and a flag for !important
#[derive(Debug, PartialEq, Clone)]
pub struct CssDeclaration {
    /// Property name as written (e.g. `background-image`)
    pub property: String,
    /// Raw value without the `!important` marker. It is not calculated or converted in any way.
    pub value: String,
    /// ie: !important
    pub important: bool,
    pub location: Location,
    pub raws: DeclarationRaws,
}

impl CssDeclaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            important: false,
            location: Location::default(),
            raws: DeclarationRaws {
                before: String::new(),
                between: ": ".into(),
                important: None,
                after: String::new(),
                semicolon: true,
            },
        }
    }

    /// Clones this declaration with a different property and value. Formatting and the
    /// `!important` flag are kept.
    pub fn clone_with(&self, property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            ..self.clone()
        }
    }
}

/// Formatting of a comment as found in the source
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CommentRaws {
    pub before: String,
}

/// A comment; the text does not include the `/*` and `*/` markers
#[derive(Debug, PartialEq, Clone)]
pub struct CssComment {
    pub text: String,
    pub location: Location,
    pub raws: CommentRaws,
}

impl Display for CssStylesheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_nodes(f, &self.nodes)?;
        write!(f, "{}", self.after)
    }
}

impl Display for CssNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CssNode::Rule(rule) => {
                write!(f, "{}{}{}{{", rule.raws.before, rule.selector, rule.raws.between)?;
                write_nodes(f, &rule.nodes)?;
                write!(f, "{}}}", rule.raws.after)
            }
            CssNode::AtRule(at_rule) => {
                let raws = &at_rule.raws;
                write!(f, "{}@{}{}{}{}", raws.before, at_rule.name, raws.after_name, at_rule.params, raws.between)?;
                match &at_rule.nodes {
                    Some(nodes) => {
                        write!(f, "{{")?;
                        write_nodes(f, nodes)?;
                        write!(f, "{}}}", raws.after)
                    }
                    None if raws.semicolon => write!(f, ";"),
                    None => Ok(()),
                }
            }
            CssNode::Declaration(decl) => {
                let raws = &decl.raws;
                write!(f, "{}{}{}{}", raws.before, decl.property, raws.between, decl.value)?;
                if decl.important {
                    write!(f, "{}", raws.important.as_deref().unwrap_or(" !important"))?;
                }
                write!(f, "{}", raws.after)?;
                if raws.semicolon {
                    write!(f, ";")?;
                }
                Ok(())
            }
            CssNode::Comment(comment) => write!(f, "{}/*{}*/", comment.raws.before, comment.text),
        }
    }
}

fn write_nodes(f: &mut Formatter<'_>, nodes: &[CssNode]) -> std::fmt::Result {
    for node in nodes {
        write!(f, "{node}")?;
    }
    Ok(())
}
