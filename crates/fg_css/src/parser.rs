use crate::parser_config::ParserConfig;
use crate::stylesheet::CssStylesheet;
use crate::tokenizer::{Token, TokenType, Tokenizer};
use fg_shared::char_stream::{CharStream, Location};
use fg_shared::errors::{CssError, CssResult};

mod at_rule;
mod block;
mod declaration;
mod rule;
mod stylesheet;

/// Parser that turns CSS text into a `CssStylesheet`. The parser keeps all formatting of the
/// source in the `raws` of each node so the stylesheet can be written back unchanged.
pub struct CssParser<'stream> {
    /// The tokenizer is responsible for reading the input stream
    pub tokenizer: Tokenizer<'stream>,
    /// The parser configuration as given
    config: ParserConfig,
}

impl<'stream> CssParser<'stream> {
    /// Creates a new parser with the given stream so only `parse()` needs to be called.
    fn new(stream: &'stream mut CharStream, config: ParserConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(stream, config.location),
            config,
        }
    }

    /// Parses a direct string to a `CssStylesheet`
    pub fn parse_str(data: &str, config: ParserConfig) -> CssResult<CssStylesheet> {
        let mut stream = CharStream::new(data);
        CssParser::parse_stream(&mut stream, config)
    }

    /// Parses a direct stream to a `CssStylesheet`
    pub fn parse_stream(stream: &mut CharStream, config: ParserConfig) -> CssResult<CssStylesheet> {
        CssParser::new(stream, config).parse_stylesheet()
    }

    /// Consumes a specific token
    pub(crate) fn consume(&mut self, token_type: TokenType) -> CssResult<Token> {
        let t = self.tokenizer.consume();
        if t.token_type != token_type {
            return Err(CssError::with_location(
                format!("Expected {:?}, got {:?}", token_type, t.token_type).as_str(),
                t.location,
            ));
        }

        Ok(t)
    }

    /// Consumes `count` tokens without looking at them
    pub(crate) fn consume_tokens(&mut self, count: usize) {
        for _ in 0..count {
            self.tokenizer.consume();
        }
    }

    /// Consumes all whitespace tokens and returns them as raw text
    pub(crate) fn consume_whitespace_raw(&mut self) -> String {
        let start = self.tokenizer.offset_of(0);

        while self.tokenizer.lookahead(0).is_whitespace() {
            self.tokenizer.consume();
        }

        let end = self.tokenizer.offset_of(0);
        self.tokenizer.slice(start, end)
    }

    /// Returns the raw source text between two lookahead offsets (end exclusive)
    pub(crate) fn raw_between(&mut self, start: usize, end: usize) -> String {
        let start = self.tokenizer.offset_of(start);
        let end = self.tokenizer.offset_of(end);
        self.tokenizer.slice(start, end)
    }

    /// Scans ahead from lookahead offset `start` for the first token at nesting depth 0 for which
    /// `is_end` holds, or EOF. Returns the offset of that token and the offset just past the last
    /// non-whitespace, non-comment token before it.
    pub(crate) fn find_terminator<F>(&mut self, start: usize, is_end: F) -> (usize, usize)
    where
        F: Fn(&Token) -> bool,
    {
        let mut depth = 0usize;
        let mut significant_end = start;
        let mut i = start;

        loop {
            let t = self.tokenizer.lookahead(i);
            if t.is_eof() || (depth == 0 && is_end(&t)) {
                return (i, significant_end);
            }

            if t.opens_block() {
                depth += 1;
            } else if t.closes_block() {
                depth = depth.saturating_sub(1);
            }

            if !t.is_trivia() {
                significant_end = i + 1;
            }

            i += 1;
        }
    }

    /// Returns an error, unless errors are ignored in which case the error is only logged
    pub(crate) fn error_or_ignore(&self, message: &str, location: Location) -> CssResult<()> {
        if self.config.ignore_errors {
            log::warn!("Ignoring parse error: {} at {:?}", message, location);
            return Ok(());
        }

        Err(CssError::with_location(message, location))
    }
}
