use crate::parser::CssParser;
use crate::stylesheet::{CommentRaws, CssComment, CssNode};
use crate::tokenizer::TokenType;
use fg_shared::errors::{CssError, CssResult};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BlockParseMode {
    /// Nodes of the stylesheet itself. Only rules, at-rules and comments are allowed here.
    TopLevel,
    /// Nodes inside `{ ... }`. Ends at the matching `}` which is left for the caller.
    Nested,
}

impl CssParser<'_> {
    /// Reads until the end of a declaration or rule (or end of the block), in case there is a syntax error
    pub(crate) fn parse_until_rule_end(&mut self) {
        let (idx, _) = self.find_terminator(0, |t| {
            matches!(t.token_type, TokenType::Semicolon | TokenType::RCurly)
        });
        self.consume_tokens(idx);

        if matches!(self.tokenizer.lookahead(0).token_type, TokenType::Semicolon) {
            self.tokenizer.consume();
        }
    }

    /// Returns true when the next node is a rule: a `{` shows up before any `;` or `}` at the
    /// same nesting level.
    pub(crate) fn is_rule_ahead(&mut self) -> bool {
        let (idx, _) = self.find_terminator(0, |t| {
            matches!(
                t.token_type,
                TokenType::LCurly | TokenType::Semicolon | TokenType::RCurly
            )
        });

        matches!(self.tokenizer.lookahead(idx).token_type, TokenType::LCurly)
    }

    /// Parses nodes until the end of the block. Returns the nodes together with the whitespace
    /// found after the last node.
    pub fn parse_block(&mut self, mode: BlockParseMode) -> CssResult<(Vec<CssNode>, String)> {
        log::trace!("parse_block with parse mode: {:?}", mode);

        let mut nodes = Vec::new();

        loop {
            let before = self.consume_whitespace_raw();
            let t = self.tokenizer.lookahead(0);

            match t.token_type {
                TokenType::Eof => {
                    if mode == BlockParseMode::Nested {
                        self.error_or_ignore("Unclosed block", t.location)?;
                    }
                    return Ok((nodes, before));
                }
                TokenType::RCurly => {
                    if mode == BlockParseMode::Nested {
                        return Ok((nodes, before));
                    }
                    self.error_or_ignore("Unexpected }", t.location)?;
                    self.tokenizer.consume();
                }
                TokenType::Semicolon => {
                    // stray semicolons carry no meaning
                    self.tokenizer.consume();
                }
                TokenType::Cdo | TokenType::Cdc => {
                    self.tokenizer.consume();
                }
                TokenType::Comment(text) => {
                    self.tokenizer.consume();
                    nodes.push(CssNode::Comment(CssComment {
                        text,
                        location: t.location,
                        raws: CommentRaws { before },
                    }));
                }
                TokenType::AtKeyword(_) => match self.parse_at_rule(before) {
                    Ok(at_rule) => nodes.push(at_rule),
                    Err(err) if self.config.ignore_errors => {
                        log::warn!("Ignoring error in parse_at_rule: {}", err);
                        self.parse_until_rule_end();
                    }
                    Err(err) => return Err(err),
                },
                _ => {
                    let result = if self.is_rule_ahead() {
                        self.parse_rule(before)
                    } else if mode == BlockParseMode::TopLevel {
                        Err(CssError::with_location(
                            "Unexpected declaration outside of a rule",
                            t.location,
                        ))
                    } else {
                        self.parse_declaration(before)
                    };

                    match result {
                        Ok(node) => nodes.push(node),
                        Err(err) if self.config.ignore_errors => {
                            log::warn!("Ignoring error in parse_block: {}", err);
                            self.parse_until_rule_end();
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;
    use crate::stylesheet::CssNode;

    fn lenient() -> ParserConfig {
        ParserConfig {
            ignore_errors: true,
            ..Default::default()
        }
    }

    #[test]
    fn unclosed_block_is_an_error() {
        assert!(CssParser::parse_str("a { color: red;", ParserConfig::default()).is_err());
        assert!(CssParser::parse_str("a { color: red; }}", ParserConfig::default()).is_err());
    }

    #[test]
    fn unclosed_block_is_closed_when_ignoring_errors() {
        let stylesheet = CssParser::parse_str("a { color: red;", lenient());
        assert!(stylesheet.is_ok());
        if let Ok(stylesheet) = stylesheet {
            assert_eq!(stylesheet.to_string(), "a { color: red;}");
        }
    }

    #[test]
    fn broken_declaration_is_skipped_when_ignoring_errors() {
        let stylesheet = CssParser::parse_str("a { color red; margin: 0 }", lenient());
        assert!(stylesheet.is_ok());
        let Ok(stylesheet) = stylesheet else { return };

        let node = &stylesheet.nodes[0];
        assert!(matches!(node, CssNode::Rule(_)), "expected a rule, got {:?}", node);
        let CssNode::Rule(rule) = node else { return };
        let properties: Vec<&str> = rule.declarations().map(|d| d.property.as_str()).collect();
        assert_eq!(properties, vec!["margin"]);
    }

    #[test]
    fn stray_semicolons_are_dropped() {
        let stylesheet = CssParser::parse_str("a { color: red;; }", ParserConfig::default());
        assert!(stylesheet.is_ok());
        if let Ok(stylesheet) = stylesheet {
            assert_eq!(stylesheet.to_string(), "a { color: red; }");
        }
    }
}
