use crate::stylesheet::{CssNode, CssRule, CssStylesheet};
use std::io::Write;

/// Calls `f` for every style rule in the stylesheet in document order. Rules inside at-rule
/// blocks and nested rules are visited too, a parent always before its children.
pub fn walk_rules_mut<F>(stylesheet: &mut CssStylesheet, mut f: F)
where
    F: FnMut(&mut CssRule),
{
    walk_nodes_mut(&mut stylesheet.nodes, &mut f);
}

fn walk_nodes_mut<F>(nodes: &mut [CssNode], f: &mut F)
where
    F: FnMut(&mut CssRule),
{
    for node in nodes.iter_mut() {
        match node {
            CssNode::Rule(rule) => {
                f(rule);
                walk_nodes_mut(&mut rule.nodes, f);
            }
            CssNode::AtRule(at_rule) => {
                if let Some(children) = at_rule.nodes.as_mut() {
                    walk_nodes_mut(children, f);
                }
            }
            CssNode::Declaration(_) | CssNode::Comment(_) => {}
        }
    }
}

/// The walker is used to walk the stylesheet and print it to stdout.
pub struct Walker<'a> {
    root: &'a CssStylesheet,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a CssStylesheet) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = self.walk(&mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = self.walk(&mut output);

        String::from_utf8_lossy(&output).into_owned()
    }

    fn walk(&self, f: &mut dyn Write) -> Result<(), std::io::Error> {
        writeln!(f, "[Stylesheet ({})]", self.root.nodes.len())?;
        for node in self.root.nodes.iter() {
            inner_walk(node, 1, f)?;
        }
        Ok(())
    }
}

fn inner_walk(node: &CssNode, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);
    let loc = node.location();

    match node {
        CssNode::Rule(rule) => {
            writeln!(f, "{}[Rule] {:?} at {}", prefix, rule.selector, loc)?;
            for child in rule.nodes.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        CssNode::AtRule(at_rule) => {
            writeln!(
                f,
                "{}[AtRule] name: {} params: {:?} at {}",
                prefix, at_rule.name, at_rule.params, loc
            )?;
            if let Some(children) = &at_rule.nodes {
                for child in children.iter() {
                    inner_walk(child, depth + 1, f)?;
                }
            }
        }
        CssNode::Declaration(decl) => {
            writeln!(
                f,
                "{}[Declaration] property: {} important: {} at {}",
                prefix, decl.property, decl.important, loc
            )?;
            writeln!(f, "{}  [Value] {}", prefix, decl.value)?;
        }
        CssNode::Comment(comment) => {
            writeln!(f, "{}[Comment] {:?}", prefix, comment.text)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;

    const CSS: &str = "a { color: red; b { margin: 0 } }\n@media print { .c { color: blue !important } }\n/* x */";

    #[test]
    fn walk_rules_in_document_order() {
        let stylesheet = CssParser::parse_str(CSS, ParserConfig::default());
        assert!(stylesheet.is_ok());
        let Ok(mut stylesheet) = stylesheet else { return };

        let mut selectors = Vec::new();
        walk_rules_mut(&mut stylesheet, |rule| selectors.push(rule.selector.clone()));
        assert_eq!(selectors, vec!["a", "b", ".c"]);
    }

    #[test]
    fn walk_rules_can_modify() {
        let stylesheet = CssParser::parse_str(CSS, ParserConfig::default());
        assert!(stylesheet.is_ok());
        let Ok(mut stylesheet) = stylesheet else { return };

        walk_rules_mut(&mut stylesheet, |rule| rule.selector.push_str(".x"));
        assert!(stylesheet.to_string().starts_with("a.x { color: red; b.x { margin: 0 } }"));
    }

    #[test]
    fn walk_to_string() {
        let stylesheet = CssParser::parse_str(CSS, ParserConfig::default());
        assert!(stylesheet.is_ok());
        let Ok(stylesheet) = stylesheet else { return };

        let expected = "\
[Stylesheet (3)]
  [Rule] \"a\" at 1:1
    [Declaration] property: color important: false at 1:5
      [Value] red
    [Rule] \"b\" at 1:17
      [Declaration] property: margin important: false at 1:21
        [Value] 0
  [AtRule] name: media params: \"print\" at 2:1
    [Rule] \".c\" at 2:16
      [Declaration] property: color important: true at 2:21
        [Value] blue
  [Comment] \" x \"
";
        assert_eq!(Walker::new(&stylesheet).walk_to_string(), expected);
    }
}
