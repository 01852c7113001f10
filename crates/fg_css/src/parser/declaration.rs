use crate::parser::CssParser;
use crate::stylesheet::{CssDeclaration, CssNode, DeclarationRaws};
use crate::tokenizer::TokenType;
use fg_shared::errors::{CssError, CssResult};

/// Splits a trailing `!important` marker from a raw value. The marker is returned as written,
/// including the whitespace in front of it.
fn split_important(raw: &str) -> (&str, Option<&str>) {
    if let Some(pos) = raw.rfind('!') {
        if raw[pos + 1..].trim().eq_ignore_ascii_case("important") {
            let value = raw[..pos].trim_end();
            return (value, Some(&raw[value.len()..]));
        }
    }

    (raw, None)
}

impl CssParser<'_> {
    pub fn parse_declaration(&mut self, before: String) -> CssResult<CssNode> {
        log::trace!("parse_declaration");

        let loc = self.tokenizer.current_location();

        let (colon, property_end) = self.find_terminator(0, |t| {
            matches!(
                t.token_type,
                TokenType::Colon | TokenType::Semicolon | TokenType::RCurly
            )
        });

        let t = self.tokenizer.lookahead(colon);
        if t.token_type != TokenType::Colon {
            return Err(CssError::with_location(
                format!("Expected Colon, got {:?}", t.token_type).as_str(),
                t.location,
            ));
        }
        if property_end == 0 {
            return Err(CssError::with_location("Expected property name", loc));
        }

        let property = self.raw_between(0, property_end);
        let custom_property = property.starts_with("--");

        let (value_start, _) = self.tokenizer.lookahead_sc(colon + 1);
        let (end, value_end) = self.find_terminator(value_start, |t| {
            matches!(t.token_type, TokenType::Semicolon | TokenType::RCurly)
        });
        let value_end = value_end.max(value_start);

        let between = self.raw_between(property_end, value_start);
        let raw_value = self.raw_between(value_start, value_end);
        let (value, important) = split_important(&raw_value);

        if value.is_empty() && !custom_property {
            return Err(CssError::with_location(
                "Expected value in declaration",
                self.tokenizer.lookahead(end).location,
            ));
        }

        let semicolon = matches!(self.tokenizer.lookahead(end).token_type, TokenType::Semicolon);
        let after = if semicolon {
            let after = self.raw_between(value_end, end);
            self.consume_tokens(end + 1);
            after
        } else {
            // trailing whitespace and comments belong to the enclosing block
            self.consume_tokens(value_end);
            String::new()
        };

        Ok(CssNode::Declaration(CssDeclaration {
            property,
            value: value.to_string(),
            important: important.is_some(),
            location: loc,
            raws: DeclarationRaws {
                before,
                between,
                important: important.map(str::to_string),
                after,
                semicolon,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::split_important;
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;
    use crate::stylesheet::{CssDeclaration, CssNode};

    fn declarations(css: &str) -> Vec<CssDeclaration> {
        let stylesheet = CssParser::parse_str(css, ParserConfig::default());
        assert!(stylesheet.is_ok(), "{:?}", stylesheet);
        let Ok(stylesheet) = stylesheet else { return vec![] };

        match &stylesheet.nodes[0] {
            CssNode::Rule(rule) => rule.declarations().cloned().collect(),
            _ => vec![],
        }
    }

    #[test]
    fn important_marker() {
        assert_eq!(split_important("red"), ("red", None));
        assert_eq!(split_important("red !important"), ("red", Some(" !important")));
        assert_eq!(split_important("red!IMPORTANT"), ("red", Some("!IMPORTANT")));
        assert_eq!(split_important("red ! important"), ("red", Some(" ! important")));
        assert_eq!(split_important("url(a!b)"), ("url(a!b)", None));
    }

    #[test]
    fn declaration_raws() {
        let decls = declarations("a { background : linear-gradient(red, blue) !important ; *zoom:1 }");
        assert_eq!(decls.len(), 2);

        assert_eq!(decls[0].property, "background");
        assert_eq!(decls[0].value, "linear-gradient(red, blue)");
        assert!(decls[0].important);
        assert_eq!(decls[0].raws.between, " : ");
        assert_eq!(decls[0].raws.after, " ");
        assert!(decls[0].raws.semicolon);

        assert_eq!(decls[1].property, "*zoom");
        assert_eq!(decls[1].value, "1");
        assert!(!decls[1].raws.semicolon);
    }

    #[test]
    fn value_with_semicolon_in_function() {
        let decls = declarations("a { background: url(\"a;b.png\"); color: red }");
        assert_eq!(decls[0].value, "url(\"a;b.png\")");
        assert_eq!(decls[1].value, "red");
    }

    #[test]
    fn empty_value_is_an_error() {
        assert!(CssParser::parse_str("a { color: ; }", ParserConfig::default()).is_err());
        assert!(CssParser::parse_str("a { color: !important }", ParserConfig::default()).is_err());
        assert!(CssParser::parse_str("a { --empty: ; }", ParserConfig::default()).is_ok());
    }
}
