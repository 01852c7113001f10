use crate::parser::block::BlockParseMode;
use crate::parser::CssParser;
use crate::stylesheet::CssStylesheet;
use fg_shared::errors::CssResult;

impl CssParser<'_> {
    pub fn parse_stylesheet(&mut self) -> CssResult<CssStylesheet> {
        log::trace!("parse_stylesheet");

        let (nodes, after) = self.parse_block(BlockParseMode::TopLevel)?;

        Ok(CssStylesheet {
            nodes,
            after,
            source: self.config.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::CssParser;
    use crate::parser_config::ParserConfig;
    use crate::stylesheet::CssNode;

    #[test]
    fn stylesheet_keeps_source_and_trailing_whitespace() {
        let config = ParserConfig {
            source: Some("style.css".into()),
            ..Default::default()
        };

        let stylesheet = CssParser::parse_str("a { }\n\n/* end */\n", config);
        assert!(stylesheet.is_ok());
        let Ok(stylesheet) = stylesheet else { return };

        assert_eq!(stylesheet.source.as_deref(), Some("style.css"));
        assert_eq!(stylesheet.nodes.len(), 2);
        assert!(matches!(stylesheet.nodes[1], CssNode::Comment(_)));
        assert_eq!(stylesheet.after, "\n");
    }

    #[test]
    fn declaration_at_top_level_is_an_error() {
        let stylesheet = CssParser::parse_str("color: red;", ParserConfig::default());
        assert!(stylesheet.is_err());
    }
}
