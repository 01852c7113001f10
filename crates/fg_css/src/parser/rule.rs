use crate::parser::block::BlockParseMode;
use crate::parser::CssParser;
use crate::stylesheet::{CssNode, CssRule, RuleRaws};
use crate::tokenizer::TokenType;
use fg_shared::errors::CssResult;

impl CssParser<'_> {
    /// Parses a style rule. The caller has made sure a `{` follows the selector.
    pub fn parse_rule(&mut self, before: String) -> CssResult<CssNode> {
        log::trace!("parse_rule");

        let loc = self.tokenizer.current_location();

        let (idx, _) = self.find_terminator(0, |t| matches!(t.token_type, TokenType::LCurly));
        let prelude = self.raw_between(0, idx);
        self.consume_tokens(idx);

        self.consume(TokenType::LCurly)?;
        let (nodes, after) = self.parse_block(BlockParseMode::Nested)?;

        // Only missing at EOF when errors are ignored
        if matches!(self.tokenizer.lookahead(0).token_type, TokenType::RCurly) {
            self.tokenizer.consume();
        }

        let selector = prelude.trim_end();
        let between = prelude[selector.len()..].to_string();

        Ok(CssNode::Rule(CssRule {
            selector: selector.to_string(),
            nodes,
            location: loc,
            raws: RuleRaws {
                before,
                between,
                after,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;
    use crate::stylesheet::CssNode;
    use fg_shared::char_stream::Location;

    #[test]
    fn rule_raws() {
        let stylesheet = CssParser::parse_str("\n.a,\n.b:hover  {\n  color: red;\n}", ParserConfig::default());
        assert!(stylesheet.is_ok());
        let Ok(stylesheet) = stylesheet else { return };

        let node = &stylesheet.nodes[0];
        assert!(matches!(node, CssNode::Rule(_)), "expected a rule, got {:?}", node);
        let CssNode::Rule(rule) = node else { return };
        assert_eq!(rule.selector, ".a,\n.b:hover");
        assert_eq!(rule.raws.before, "\n");
        assert_eq!(rule.raws.between, "  ");
        assert_eq!(rule.raws.after, "\n");
        assert_eq!(rule.location, Location::new(2, 1, 1));
        assert_eq!(rule.declarations().count(), 1);
    }

    #[test]
    fn nested_rules() {
        let stylesheet = CssParser::parse_str(".a { color: red; .b { color: blue } }", ParserConfig::default());
        assert!(stylesheet.is_ok());
        let Ok(stylesheet) = stylesheet else { return };

        let node = &stylesheet.nodes[0];
        assert!(matches!(node, CssNode::Rule(_)), "expected a rule, got {:?}", node);
        let CssNode::Rule(rule) = node else { return };
        assert_eq!(rule.nodes.len(), 2);
        assert!(matches!(&rule.nodes[1], CssNode::Rule(inner) if inner.selector == ".b"));
    }
}
