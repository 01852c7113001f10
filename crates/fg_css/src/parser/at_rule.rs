use crate::parser::block::BlockParseMode;
use crate::parser::CssParser;
use crate::stylesheet::{AtRuleRaws, CssAtRule, CssNode};
use crate::tokenizer::TokenType;
use fg_shared::errors::{CssError, CssResult};

impl CssParser<'_> {
    pub fn parse_at_rule(&mut self, before: String) -> CssResult<CssNode> {
        log::trace!("parse_at_rule");

        let loc = self.tokenizer.current_location();

        let t = self.tokenizer.consume();
        let TokenType::AtKeyword(name) = t.token_type else {
            return Err(CssError::with_location(
                format!("Expected AtKeyword, got {:?}", t.token_type).as_str(),
                t.location,
            ));
        };

        let (end, _) = self.find_terminator(0, |t| {
            matches!(
                t.token_type,
                TokenType::LCurly | TokenType::Semicolon | TokenType::RCurly
            )
        });
        let prelude = self.raw_between(0, end);
        self.consume_tokens(end);

        let params_start = prelude.trim_start();
        let after_name = prelude[..prelude.len() - params_start.len()].to_string();
        let params = params_start.trim_end();
        let between = params_start[params.len()..].to_string();

        let mut raws = AtRuleRaws {
            before,
            after_name,
            between,
            ..Default::default()
        };

        let nodes = match self.tokenizer.lookahead(0).token_type {
            TokenType::LCurly => {
                self.tokenizer.consume();
                let (nodes, after) = self.parse_block(BlockParseMode::Nested)?;
                if matches!(self.tokenizer.lookahead(0).token_type, TokenType::RCurly) {
                    self.tokenizer.consume();
                }
                raws.after = after;
                Some(nodes)
            }
            TokenType::Semicolon => {
                self.tokenizer.consume();
                raws.semicolon = true;
                None
            }
            // a `}` of the enclosing block or EOF ends the at-rule as well
            _ => None,
        };

        Ok(CssNode::AtRule(CssAtRule {
            name,
            params: params.to_string(),
            nodes,
            location: loc,
            raws,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;
    use crate::stylesheet::{CssAtRule, CssNode};

    fn at_rule(css: &str) -> Option<CssAtRule> {
        let stylesheet = CssParser::parse_str(css, ParserConfig::default()).ok()?;
        match stylesheet.nodes.into_iter().next()? {
            CssNode::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    #[test]
    fn statement_at_rule() {
        let at_rule = at_rule("@import url(\"a.css\") screen ;");
        assert!(at_rule.is_some());
        let Some(at_rule) = at_rule else { return };

        assert_eq!(at_rule.name, "import");
        assert_eq!(at_rule.params, "url(\"a.css\") screen");
        assert_eq!(at_rule.raws.after_name, " ");
        assert_eq!(at_rule.raws.between, " ");
        assert!(at_rule.raws.semicolon);
        assert!(at_rule.nodes.is_none());
    }

    #[test]
    fn block_at_rule_with_rules() {
        let at_rule = at_rule("@media screen and (min-width: 10px) {\n  .a { color: red }\n}");
        assert!(at_rule.is_some());
        let Some(at_rule) = at_rule else { return };

        assert_eq!(at_rule.name, "media");
        assert_eq!(at_rule.params, "screen and (min-width: 10px)");
        assert_eq!(at_rule.raws.after, "\n");
        assert!(matches!(at_rule.nodes.as_deref(), Some([CssNode::Rule(_)])));
    }

    #[test]
    fn block_at_rule_with_declarations() {
        let at_rule = at_rule("@font-face{font-family:x;src:url(x.woff)}");
        assert!(at_rule.is_some());
        let Some(at_rule) = at_rule else { return };

        assert_eq!(at_rule.params, "");
        assert_eq!(at_rule.raws.after_name, "");
        let count = at_rule.nodes.map(|nodes| nodes.len());
        assert_eq!(count, Some(2));
    }
}
