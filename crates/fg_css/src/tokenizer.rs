use fg_shared::char_stream::Character::Ch;
use fg_shared::char_stream::{CharStream, Character, Location};
use std::fmt;

pub type Number = f64;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// A function token. The value does not include the opening parenthesis.
    Function(String),
    Url(String),
    BadUrl(String),
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    BadString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// The value does not include the `#` marker.
    IDHash(String),
    /// A `<delim-token>`
    Delim(char),
    LCurly,
    RCurly,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    /// A `<!--` `<CDO-token>`
    Cdo,
    /// A `-->` `<CDC-token>`
    Cdc,
    Eof,
    /// A comment. The value does not include the `/*` and `*/` markers.
    Comment(String),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the first character of the token in the stream
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    fn new(token_type: TokenType, location: Location) -> Token {
        Token { token_type, location }
    }

    fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    fn new_number(value: Number, location: Location) -> Token {
        Token::new(TokenType::Number(value), location)
    }

    fn new_percentage(value: Number, location: Location) -> Token {
        Token::new(TokenType::Percentage(value), location)
    }

    fn new_dimension(value: Number, unit: &str, location: Location) -> Token {
        Token::new(
            TokenType::Dimension {
                value,
                unit: unit.to_string(),
            },
            location,
        )
    }

    fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }
}

impl Token {
    pub fn is_comma(&self) -> bool {
        matches!(self.token_type, TokenType::Comma)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.token_type, TokenType::Comment(_))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    /// Whitespace and comments carry no meaning for the parsers
    pub fn is_trivia(&self) -> bool {
        self.is_whitespace() || self.is_comment()
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    /// Returns true when this token is an ident with the given (ASCII case-insensitive) name
    pub fn is_ident_named(&self, name: &str) -> bool {
        matches!(&self.token_type, TokenType::Ident(value) if value.eq_ignore_ascii_case(name))
    }

    /// Returns true when this token opens a parenthesized block
    pub fn opens_block(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Function(_) | TokenType::LParen | TokenType::LBracket
        )
    }

    /// Returns true when this token closes a parenthesized block
    pub fn closes_block(&self) -> bool {
        matches!(self.token_type, TokenType::RParen | TokenType::RBracket)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self.token_type.clone() {
            TokenType::AtKeyword(val) => format!("@{val}"),
            TokenType::Hash(val) | TokenType::IDHash(val) => format!("#{val}"),
            TokenType::Function(val) => format!("{val}("),
            TokenType::Url(val) => format!("url({val})"),
            TokenType::Comment(val) => format!("/*{val}*/"),
            TokenType::QuotedString(val) => format!("\"{val}\""),
            TokenType::BadUrl(val) | TokenType::Ident(val) | TokenType::BadString(val) => val,
            TokenType::Delim(val) => val.to_string(),
            TokenType::Number(val) => val.to_string(),
            TokenType::Percentage(val) => format!("{}%", val),
            TokenType::Dimension { unit, value } => format!("{}{}", value, unit),
            TokenType::Cdc => "-->".into(),
            TokenType::Cdo => "<!--".into(),
            TokenType::Colon => ":".into(),
            TokenType::Semicolon => ";".into(),
            TokenType::Comma => ",".into(),
            TokenType::LBracket => "[".into(),
            TokenType::RBracket => "]".into(),
            TokenType::LCurly => "{".into(),
            TokenType::RCurly => "}".into(),
            TokenType::LParen => "(".into(),
            TokenType::RParen => ")".into(),
            TokenType::Whitespace => " ".into(),
            TokenType::Eof => "eof".into(),
        };

        write!(f, "{string}")
    }
}

/// CSS Tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
///
/// Unlike a tokenizer for rendering, this one never drops input: comments and whitespace are
/// tokens too. The text of any range of tokens can therefore be recovered with `slice()` between
/// the start offsets of two tokens.
pub struct Tokenizer<'stream> {
    stream: &'stream mut CharStream,
    /// Position of the NEXT token to consume in the `tokens` list
    position: usize,
    /// Full list of all tokens produced by the tokenizer so far
    tokens: Vec<Token>,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Location of the next character in the stream, relative to the start of the stream
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer with the given stream that starts on the given location. This does not have
    /// to be 1/1, but can be any location.
    pub fn new(stream: &'stream mut CharStream, location: Location) -> Self {
        Self {
            stream,
            position: 0,
            tokens: Vec::new(),
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the location of the next token to be consumed, taking the start location into account
    pub fn current_location(&mut self) -> Location {
        self.lookahead(0).location
    }

    /// Looks ahead at the next token with offset. So lookahead(0) will look at the token that will
    /// be consumed with consume()
    pub fn lookahead(&mut self, offset: usize) -> Token {
        while self.tokens.len() <= self.position + offset {
            let token = self.consume_token();
            self.tokens.push(token);
        }

        self.tokens[self.position + offset].clone()
    }

    /// Looks ahead at the next NON-WHITESPACE AND NON-COMMENT token, starting at offset.
    /// Returns the token together with its lookahead offset.
    pub fn lookahead_sc(&mut self, offset: usize) -> (usize, Token) {
        let mut i = offset;

        loop {
            let t = self.lookahead(i);
            if t.is_trivia() {
                i += 1;
                continue;
            }
            return (i, t);
        }
    }

    /// Returns the stream offset of the token at the given lookahead offset
    pub fn offset_of(&mut self, offset: usize) -> usize {
        self.lookahead(offset).location.offset - self.start_location.offset
    }

    /// Consumes the next token and returns it
    pub fn consume(&mut self) -> Token {
        let token = self.lookahead(0);
        self.position += 1;

        log::trace!("{:?}", token);

        token
    }

    /// Returns the raw text between two stream offsets
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.stream.slice(start, end)
    }

    /// Returns the absolute location of the next character in the stream
    fn absolute_location(&self) -> Location {
        Location::new(
            self.start_location.line() + self.cur_location.line() - 1,
            if self.cur_location.line() == 1 {
                self.start_location.column() + self.cur_location.column() - 1
            } else {
                self.cur_location.column()
            },
            self.start_location.offset() + self.cur_location.offset(),
        )
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        let loc = self.absolute_location();

        if self.look_ahead_slice(2) == "/*" {
            let comment = self.consume_comment();
            return Token::new(TokenType::Comment(comment), loc);
        }

        match self.current_char() {
            Character::StreamEnd => Token::new(TokenType::Eof, loc),
            Ch(c) if c.is_whitespace() => {
                self.consume_whitespace();
                Token::new(TokenType::Whitespace, loc)
            }
            Ch(c @ ('"' | '\'')) => self.consume_string_token(c, loc),
            Ch(c @ '#') => {
                // consume '#'
                self.next_char();

                if self.is_ident_char(self.current_char().into()) || self.is_start_of_escape(0) {
                    let is_id = self.is_next_3_points_starts_ident_seq(0);
                    let value = self.consume_ident();
                    let token_type = if is_id {
                        TokenType::IDHash(value)
                    } else {
                        TokenType::Hash(value)
                    };
                    return Token::new(token_type, loc);
                }

                Token::new_delim(c, loc)
            }
            Ch(c @ ('(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';')) => {
                self.next_char();
                let token_type = match c {
                    '(' => TokenType::LParen,
                    ')' => TokenType::RParen,
                    '[' => TokenType::LBracket,
                    ']' => TokenType::RBracket,
                    '{' => TokenType::LCurly,
                    '}' => TokenType::RCurly,
                    ',' => TokenType::Comma,
                    ':' => TokenType::Colon,
                    _ => TokenType::Semicolon,
                };
                Token::new(token_type, loc)
            }
            Ch(c @ '+') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token(loc);
                }

                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '.') => {
                if self.stream.look_ahead(1).is_numeric() {
                    return self.consume_numeric_token(loc);
                }

                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '-') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token(loc);
                }

                let cdc_token = "-->";
                if self.look_ahead_slice(cdc_token.len()) == cdc_token {
                    self.consume_chars(cdc_token.len());
                    return Token::new(TokenType::Cdc, loc);
                }

                if self.is_next_3_points_starts_ident_seq(0) {
                    return self.consume_ident_like_seq(loc);
                }

                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '<') => {
                let cdo_token = "<!--";
                if self.look_ahead_slice(cdo_token.len()) == cdo_token {
                    self.consume_chars(cdo_token.len());
                    return Token::new(TokenType::Cdo, loc);
                }

                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c @ '@') => {
                // consume '@'
                self.next_char();

                if self.is_next_3_points_starts_ident_seq(0) {
                    let keyword = self.consume_ident();
                    return Token::new(TokenType::AtKeyword(keyword), loc);
                }

                Token::new_delim(c, loc)
            }
            Ch(c @ '\\') => {
                if self.is_start_of_escape(0) {
                    return self.consume_ident_like_seq(loc);
                }

                // parse error: a lone backslash
                self.next_char();
                Token::new_delim(c, loc)
            }
            Ch(c) if c.is_ascii_digit() => self.consume_numeric_token(loc),
            Ch(c) if self.is_ident_start(c) => self.consume_ident_like_seq(loc),
            Ch(c) => {
                self.next_char();
                Token::new_delim(c, loc)
            }
        }
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Returns the text between the comment markers. An unterminated comment runs to the end of the stream.
    fn consume_comment(&mut self) -> String {
        let mut comment = String::new();

        // consume '/*'
        self.consume_chars(2);

        while self.look_ahead_slice(2) != "*/" && !self.stream.eof() {
            comment.push(self.next_char().into());
        }

        // consume '*/'
        self.consume_chars(2);

        comment
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self, loc: Location) -> Token {
        let number = self.consume_number();

        if self.is_next_3_points_starts_ident_seq(0) {
            let unit = self.consume_ident();
            return Token::new_dimension(number, unit.as_str(), loc);
        }

        if self.current_char() == Ch('%') {
            self.next_char();
            return Token::new_percentage(number, loc);
        }

        Token::new_number(number, loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self, ending: char, loc: Location) -> Token {
        // consume the opening quote
        self.next_char();
        let mut value = String::new();

        loop {
            match self.current_char() {
                Character::StreamEnd => {
                    // parse error, return what we have
                    return Token::new(TokenType::QuotedString(value), loc);
                }
                Ch(c) if c == ending => {
                    self.next_char();
                    return Token::new(TokenType::QuotedString(value), loc);
                }
                Ch('\n') => {
                    // parse error, the newline is not consumed
                    return Token::new(TokenType::BadString(value), loc);
                }
                Ch('\\') if self.stream.look_ahead(1) == Ch('\n') => {
                    self.consume_chars(2);
                }
                Ch('\\') if self.is_start_of_escape(0) => {
                    value.push(self.consume_escaped_token());
                }
                _ => value.push(self.next_char().into()),
            }
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut value = String::new();

        if matches!(self.current_char(), Ch('+' | '-')) {
            value.push(self.next_char().into());
        }

        value.push_str(&self.consume_digits());

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            value.push_str(&self.consume_chars(2));
            value.push_str(&self.consume_digits());
        }

        let c1 = self.stream.look_ahead(0);
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('e' | 'E'))
            && ((matches!(c2, Ch('-' | '+')) && c3.is_numeric()) || c2.is_numeric())
        {
            value.push(self.next_char().into());
            value.push(self.next_char().into());
            value.push_str(&self.consume_digits());
        }

        value.parse().unwrap_or_default()
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns: `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like_seq(&mut self, loc: Location) -> Token {
        let value = self.consume_ident();

        if self.current_char() != Ch('(') {
            return Token::new_ident(value.as_str(), loc);
        }

        if value.eq_ignore_ascii_case("url") {
            // A quoted url is a regular function; only unquoted urls become url tokens
            let mut i = 1;
            while self.stream.look_ahead(i).is_whitespace() {
                i += 1;
            }
            if !matches!(self.stream.look_ahead(i), Ch('"' | '\'')) {
                // consume '('
                self.next_char();
                return self.consume_url(loc);
            }
        }

        // consume '('
        self.next_char();
        Token::new_function(value.as_str(), loc)
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or a `<bad-url-token>`
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut url = String::new();

        self.consume_whitespace();

        loop {
            match self.current_char() {
                Ch(')') => {
                    self.next_char();
                    break;
                }
                Character::StreamEnd => break,
                c if c.is_whitespace() => {
                    self.consume_whitespace();
                    if !matches!(self.current_char(), Ch(')') | Character::StreamEnd) {
                        self.consume_remnants_of_bad_url();
                        return Token::new(TokenType::BadUrl(url), loc);
                    }
                }
                Ch('"' | '\'' | '(') => {
                    self.consume_remnants_of_bad_url();
                    return Token::new(TokenType::BadUrl(url), loc);
                }
                Ch('\\') if self.is_start_of_escape(0) => url.push(self.consume_escaped_token()),
                _ => url.push(self.next_char().into()),
            }
        }

        Token::new(TokenType::Url(url), loc)
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_remnants_of_bad_url(&mut self) {
        loop {
            match self.current_char() {
                Character::StreamEnd => break,
                Ch(')') => {
                    self.next_char();
                    break;
                }
                Ch('\\') if self.is_start_of_escape(0) => {
                    self.consume_escaped_token();
                }
                _ => {
                    self.next_char();
                }
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    fn consume_escaped_token(&mut self) -> char {
        // consume '\'
        self.next_char();

        if self.stream.eof() {
            return char::REPLACEMENT_CHARACTER;
        }

        if !matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) {
            return self.next_char().into();
        }

        let mut value = String::new();
        while matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) && value.len() < 6 {
            value.push(self.next_char().into());
        }

        if self.current_char().is_whitespace() {
            self.next_char();
        }

        match u32::from_str_radix(&value, 16).ok().and_then(char::from_u32) {
            Some('\0') | None => char::REPLACEMENT_CHARACTER,
            Some(c) => c,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            match self.current_char() {
                Ch(c) if self.is_ident_char(c) => {
                    value.push(c);
                    self.next_char();
                }
                _ => break,
            }
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while self.current_char().is_numeric() {
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_chars(&mut self, len: usize) -> String {
        let mut value = String::new();

        for _ in 0..len {
            if self.stream.eof() {
                break;
            }
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
    fn is_ident_start(&self, c: char) -> bool {
        c.is_alphabetic() || !c.is_ascii() || c == '_'
    }

    /// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
    fn is_ident_char(&self, c: char) -> bool {
        self.is_ident_start(c) || c.is_ascii_digit() || c == '-'
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_start_of_escape(&self, start: usize) -> bool {
        self.stream.look_ahead(start) == Ch('\\')
            && !matches!(self.stream.look_ahead(start + 1), Ch('\n') | Character::StreamEnd)
    }

    /// [4.3.9. Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn is_next_3_points_starts_ident_seq(&self, start: usize) -> bool {
        match self.stream.look_ahead(start) {
            Ch('-') => match self.stream.look_ahead(start + 1) {
                Ch('-') => true,
                Ch(c) if self.is_ident_start(c) => true,
                _ => self.is_start_of_escape(start + 1),
            },
            Ch('\\') => self.is_start_of_escape(start),
            Ch(c) => self.is_ident_start(c),
            Character::StreamEnd => false,
        }
    }

    /// e.g. +1, -1, +.1, -0.01
    fn is_signed_decimal(&self, start: usize) -> bool {
        let current = self.stream.look_ahead(start);
        let next = self.stream.look_ahead(start + 1);
        let last = self.stream.look_ahead(start + 2);

        matches!(current, Ch('+' | '-'))
            && ((next == Ch('.') && last.is_numeric()) || next.is_numeric())
    }

    fn current_char(&self) -> Character {
        self.stream.read()
    }

    fn next_char(&mut self) -> Character {
        let c = self.stream.read();
        if let Ch(ch) = c {
            self.cur_location.advance(ch);
            self.stream.next();
        }

        c
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                Character::StreamEnd => break,
            }
        }

        s
    }
}
