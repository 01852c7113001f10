use crate::errors::GradientError;
use crate::gradient::{AngleUnit, ColorStop, GradientSpec, Heading, Side};
use fg_css::tokenizer::{Token, TokenType, Tokenizer};
use fg_shared::char_stream::{CharStream, Location};

/// Color functions whose arguments are taken as-is
const COLOR_FUNCTIONS: [&str; 4] = ["rgb", "rgba", "hsl", "hsla"];

/// Parses a `linear-gradient(...)` value. Text after the closing parenthesis is ignored.
pub fn parse(text: &str) -> Result<GradientSpec, GradientError> {
    let mut stream = CharStream::new(text);
    let mut parser = GradientParser {
        tokenizer: Tokenizer::new(&mut stream, Location::default()),
    };

    parser
        .parse_gradient()
        .ok_or_else(|| GradientError::Syntax(text.to_string()))
}

struct GradientParser<'stream> {
    tokenizer: Tokenizer<'stream>,
}

impl GradientParser<'_> {
    fn parse_gradient(&mut self) -> Option<GradientSpec> {
        log::trace!("parse_gradient");

        self.skip_trivia();
        match self.tokenizer.consume().token_type {
            TokenType::Function(name) if name.eq_ignore_ascii_case("linear-gradient") => {}
            _ => return None,
        }

        let heading = self.parse_heading();

        let mut color_stops = Vec::new();
        loop {
            color_stops.push(self.parse_color_stop()?);

            self.skip_trivia();
            match self.tokenizer.consume().token_type {
                TokenType::Comma => {}
                TokenType::RParen => break,
                _ => return None,
            }
        }

        if color_stops.len() < 2 {
            return None;
        }

        Some(GradientSpec {
            heading,
            color_stops,
        })
    }

    /// Parses an optional gradient line. Tokens are only consumed when a complete gradient line
    /// including its comma is found; otherwise the gradient starts with a color stop.
    fn parse_heading(&mut self) -> Heading {
        log::trace!("parse_heading");

        let (idx, t) = self.tokenizer.lookahead_sc(0);

        let (heading, end) = match angle_of(&t) {
            Some(heading) => (heading, idx + 1),
            None => match self.lookahead_side_corner(idx) {
                Some(found) => found,
                None => return Heading::None,
            },
        };

        let (comma, t) = self.tokenizer.lookahead_sc(end);
        if !t.is_comma() {
            return Heading::None;
        }

        for _ in 0..=comma {
            self.tokenizer.consume();
        }

        heading
    }

    /// Looks for `[to] <side> [<side>]` starting at lookahead offset `idx`. Returns the heading and
    /// the offset just past it. Two sides must lie on different axes.
    fn lookahead_side_corner(&mut self, idx: usize) -> Option<(Heading, usize)> {
        let mut idx = idx;

        let explicit_to = self.tokenizer.lookahead(idx).is_ident_named("to");
        if explicit_to {
            idx += 1;
            if !self.tokenizer.lookahead(idx).is_whitespace() {
                return None;
            }
        }

        let mut keywords: Vec<Side> = Vec::with_capacity(2);
        while keywords.len() < 2 {
            let (next, t) = self.tokenizer.lookahead_sc(idx);
            let Some(side) = side_of(&t) else {
                break;
            };
            if keywords.iter().any(|kw| kw.axis() == side.axis()) {
                return None;
            }
            keywords.push(side);
            idx = next + 1;
        }

        if keywords.is_empty() {
            return None;
        }

        Some((
            Heading::SideCorner {
                keywords,
                explicit_to,
            },
            idx,
        ))
    }

    fn parse_color_stop(&mut self) -> Option<ColorStop> {
        self.skip_trivia();

        let t = self.tokenizer.consume();
        match &t.token_type {
            TokenType::Hash(_) | TokenType::IDHash(_) | TokenType::Ident(_) => {}
            TokenType::Function(name)
                if COLOR_FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(name)) =>
            {
                self.skip_function_arguments()?;
            }
            _ => return None,
        }
        let color = self.text_since(&t);

        self.skip_trivia();
        let position = match self.tokenizer.lookahead(0).token_type {
            TokenType::Number(_) | TokenType::Percentage(_) | TokenType::Dimension { .. } => {
                let t = self.tokenizer.consume();
                Some(self.text_since(&t))
            }
            _ => None,
        };

        Some(ColorStop { color, position })
    }

    /// Consumes everything up to and including the `)` that closes the current function
    fn skip_function_arguments(&mut self) -> Option<()> {
        let mut depth = 0usize;

        loop {
            let t = self.tokenizer.consume();
            if t.is_eof() {
                return None;
            }
            if t.opens_block() {
                depth += 1;
            } else if t.closes_block() {
                if depth == 0 {
                    return Some(());
                }
                depth -= 1;
            }
        }
    }

    /// Returns the source text from the start of `t` up to the next unconsumed token
    fn text_since(&mut self, t: &Token) -> String {
        let end = self.tokenizer.offset_of(0);
        self.tokenizer.slice(t.location.offset, end)
    }

    fn skip_trivia(&mut self) {
        while self.tokenizer.lookahead(0).is_trivia() {
            self.tokenizer.consume();
        }
    }
}

fn angle_of(t: &Token) -> Option<Heading> {
    match &t.token_type {
        TokenType::Number(value) if *value == 0.0 => Some(Heading::Angle {
            value: 0.0,
            unit: AngleUnit::Deg,
        }),
        TokenType::Dimension { value, unit } => {
            AngleUnit::from_name(unit).map(|unit| Heading::Angle {
                value: *value,
                unit,
            })
        }
        _ => None,
    }
}

fn side_of(t: &Token) -> Option<Side> {
    match &t.token_type {
        TokenType::Ident(keyword) => Side::from_keyword(keyword),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn colors(spec: &GradientSpec) -> Vec<&str> {
        spec.color_stops.iter().map(|s| s.color.as_str()).collect()
    }

    #[test]
    fn no_heading() {
        let spec = parse("linear-gradient(red, blue)");
        assert!(spec.is_ok(), "{:?}", spec);
        let Ok(spec) = spec else { return };

        assert_eq!(spec.heading, Heading::None);
        assert_eq!(colors(&spec), vec!["red", "blue"]);
        assert!(!spec.is_multi_color());
    }

    #[test_case("linear-gradient(45deg, red, blue)", 45.0, AngleUnit::Deg)]
    #[test_case("linear-gradient(-90DEG, red, blue)", -90.0, AngleUnit::Deg)]
    #[test_case("linear-gradient(0, red, blue)", 0.0, AngleUnit::Deg)]
    #[test_case("linear-gradient( .25turn , red, blue)", 0.25, AngleUnit::Turn)]
    #[test_case("linear-gradient(100grad, red, blue)", 100.0, AngleUnit::Grad)]
    #[test_case("linear-gradient(+1.5rad, red, blue)", 1.5, AngleUnit::Rad)]
    fn angle_heading(input: &str, value: f64, unit: AngleUnit) {
        let spec = parse(input);
        assert!(spec.is_ok(), "{:?}", spec);
        if let Ok(spec) = spec {
            assert_eq!(spec.heading, Heading::Angle { value, unit });
        }
    }

    #[test_case("linear-gradient(to top, red, blue)", &[Side::Top], true)]
    #[test_case("linear-gradient(left, red, blue)", &[Side::Left], false)]
    #[test_case("linear-gradient(to bottom right, red, blue)", &[Side::Bottom, Side::Right], true)]
    #[test_case("linear-gradient(right top, red, blue)", &[Side::Right, Side::Top], false)]
    #[test_case("linear-gradient(TO  Left , red, blue)", &[Side::Left], true)]
    fn side_corner_heading(input: &str, keywords: &[Side], explicit_to: bool) {
        let spec = parse(input);
        assert!(spec.is_ok(), "{:?}", spec);
        if let Ok(spec) = spec {
            assert_eq!(
                spec.heading,
                Heading::SideCorner {
                    keywords: keywords.to_vec(),
                    explicit_to
                }
            );
            assert_eq!(colors(&spec), vec!["red", "blue"]);
        }
    }

    #[test]
    fn color_stops_with_positions() {
        let spec = parse("linear-gradient(to right, #1e5799 0%, rgba(41, 137, 216, 0.5) 50%, hsl(0, 0%, 100%) 100%)");
        assert!(spec.is_ok(), "{:?}", spec);
        let Ok(spec) = spec else { return };

        assert_eq!(
            spec.color_stops,
            vec![
                ColorStop {
                    color: "#1e5799".into(),
                    position: Some("0%".into())
                },
                ColorStop {
                    color: "rgba(41, 137, 216, 0.5)".into(),
                    position: Some("50%".into())
                },
                ColorStop {
                    color: "hsl(0, 0%, 100%)".into(),
                    position: Some("100%".into())
                },
            ]
        );
        assert!(spec.is_multi_color());
        assert_eq!(spec.first_color(), "#1e5799");
        assert_eq!(spec.last_color(), "hsl(0, 0%, 100%)");
    }

    #[test]
    fn trailing_text_is_ignored() {
        let spec = parse("linear-gradient(red 10px, blue) no-repeat");
        assert!(spec.is_ok());
        if let Ok(spec) = spec {
            assert_eq!(spec.color_stops[0].position.as_deref(), Some("10px"));
        }
    }

    #[test]
    fn unknown_color_is_left_to_the_color_parser() {
        let spec = parse("linear-gradient(#fff, invalidColor)");
        assert!(spec.is_ok());
        if let Ok(spec) = spec {
            assert_eq!(spec.last_color(), "invalidColor");
        }
    }

    #[test_case("linear-gradient(red)"; "single stop")]
    #[test_case("linear-gradient(45deg, red)"; "single stop after angle")]
    #[test_case("linear-gradient(red, blue"; "unclosed")]
    #[test_case("radial-gradient(red, blue)"; "radial")]
    #[test_case("-webkit-linear-gradient(top, red, blue)"; "prefixed")]
    #[test_case("linear-gradient(45, red, blue)"; "unitless angle")]
    #[test_case("linear-gradient(to top left bottom, red, blue)"; "three sides")]
    #[test_case("linear-gradient(red, , blue)"; "empty stop")]
    #[test_case("linear-gradient(red 10% 20%, blue)"; "double position")]
    #[test_case("linear-gradient(calc(1px), blue)"; "unknown function")]
    #[test_case("url(x.png)"; "not a gradient")]
    fn invalid(input: &str) {
        assert_eq!(parse(input), Err(GradientError::Syntax(input.to_string())));
    }
}
