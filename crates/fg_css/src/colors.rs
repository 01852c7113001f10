use std::collections::HashMap;
use std::str::FromStr;

use colors_transform::{AlphaColor, Color, Hsl, Rgb};
use lazy_static::lazy_static;
use thiserror::Error;

/// Error returned when a string does not hold a color we understand
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    #[error("Unable to parse color from string: {0}")]
    Unparseable(String),
}

/// A RGB color with alpha channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbColor {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component (0 = transparent, 255 = solid)
    pub a: f32,
}

impl RgbColor {
    /// Create a new color with r,g,b and alpha values
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        RgbColor { r, g, b, a }
    }

    /// Parses a single CSS color token: hex notation, a color name or one of the
    /// `rgb()`, `rgba()`, `hsl()` and `hsla()` functions.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let lower = value.trim().to_ascii_lowercase();
        let unparseable = || ColorError::Unparseable(value.to_string());

        match lower.as_str() {
            v if v.starts_with('#') => parse_hex(&v[1..]).ok_or_else(unparseable),
            v if v.starts_with("rgb(") || v.starts_with("rgba(") => {
                let (args, alpha) = function_args(v).ok_or_else(unparseable)?;
                let rgb = Rgb::from_str(&format!("rgb({args})")).map_err(|_| unparseable())?;
                let rgb = match alpha {
                    Some(alpha) => rgb.set_alpha(alpha),
                    None => rgb,
                };
                Ok(RgbColor::new(
                    rgb.get_red(),
                    rgb.get_green(),
                    rgb.get_blue(),
                    rgb.get_alpha() * 255.0,
                ))
            }
            v if v.starts_with("hsl(") || v.starts_with("hsla(") => {
                let (args, alpha) = function_args(v).ok_or_else(unparseable)?;
                let hsl = Hsl::from_str(&format!("hsl({args})")).map_err(|_| unparseable())?;
                let hsl = match alpha {
                    Some(alpha) => hsl.set_alpha(alpha),
                    None => hsl,
                };
                let rgb = hsl.to_rgb();
                Ok(RgbColor::new(
                    rgb.get_red(),
                    rgb.get_green(),
                    rgb.get_blue(),
                    hsl.get_alpha() * 255.0,
                ))
            }
            "transparent" => Ok(RgbColor::new(0.0, 0.0, 0.0, 0.0)),
            v => CSS_COLORNAMES
                .get(v)
                .map(|&rgb| from_packed(rgb, 255))
                .ok_or_else(unparseable),
        }
    }

    /// Renders the color as `#aarrggbb`, the notation used by legacy filters
    pub fn to_argb_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(self.a),
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Splits the arguments of a color function into the three color components, joined by commas,
/// and the optional alpha value. Comma, space and slash separated forms are all accepted.
fn function_args(value: &str) -> Option<(String, Option<f32>)> {
    let open = value.find('(')?;
    let inner = value[open + 1..].trim_end().strip_suffix(')')?;

    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [a, b, c] => Some((format!("{a},{b},{c}"), None)),
        [a, b, c, alpha] => Some((format!("{a},{b},{c}"), Some(parse_alpha(alpha)?))),
        _ => None,
    }
}

/// Alpha is either a number between 0 and 1 or a percentage
fn parse_alpha(value: &str) -> Option<f32> {
    match value.strip_suffix('%') {
        Some(percentage) => percentage.parse::<f32>().ok().map(|p| p / 100.0),
        None => value.parse::<f32>().ok(),
    }
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn from_packed(rgb: u32, alpha: u32) -> RgbColor {
    RgbColor::new(
        ((rgb >> 16) & 0xff) as f32,
        ((rgb >> 8) & 0xff) as f32,
        (rgb & 0xff) as f32,
        alpha as f32,
    )
}

/// Parses the digits of a hex color (without `#`). Short forms double each digit.
fn parse_hex(digits: &str) -> Option<RgbColor> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    if expanded.len() == 8 {
        Some(from_packed(value >> 8, value & 0xff))
    } else {
        Some(from_packed(value, 255))
    }
}

lazy_static! {
    /// Named colors as defined in CSS Color Level 4, packed as 0xRRGGBB
    pub static ref CSS_COLORNAMES: HashMap<&'static str, u32> = HashMap::from([
        ("aliceblue", 0xf0f8ff), ("antiquewhite", 0xfaebd7), ("aqua", 0x00ffff),
        ("aquamarine", 0x7fffd4), ("azure", 0xf0ffff), ("beige", 0xf5f5dc),
        ("bisque", 0xffe4c4), ("black", 0x000000), ("blanchedalmond", 0xffebcd),
        ("blue", 0x0000ff), ("blueviolet", 0x8a2be2), ("brown", 0xa52a2a),
        ("burlywood", 0xdeb887), ("cadetblue", 0x5f9ea0), ("chartreuse", 0x7fff00),
        ("chocolate", 0xd2691e), ("coral", 0xff7f50), ("cornflowerblue", 0x6495ed),
        ("cornsilk", 0xfff8dc), ("crimson", 0xdc143c), ("cyan", 0x00ffff),
        ("darkblue", 0x00008b), ("darkcyan", 0x008b8b), ("darkgoldenrod", 0xb8860b),
        ("darkgray", 0xa9a9a9), ("darkgreen", 0x006400), ("darkgrey", 0xa9a9a9),
        ("darkkhaki", 0xbdb76b), ("darkmagenta", 0x8b008b), ("darkolivegreen", 0x556b2f),
        ("darkorange", 0xff8c00), ("darkorchid", 0x9932cc), ("darkred", 0x8b0000),
        ("darksalmon", 0xe9967a), ("darkseagreen", 0x8fbc8f), ("darkslateblue", 0x483d8b),
        ("darkslategray", 0x2f4f4f), ("darkslategrey", 0x2f4f4f), ("darkturquoise", 0x00ced1),
        ("darkviolet", 0x9400d3), ("deeppink", 0xff1493), ("deepskyblue", 0x00bfff),
        ("dimgray", 0x696969), ("dimgrey", 0x696969), ("dodgerblue", 0x1e90ff),
        ("firebrick", 0xb22222), ("floralwhite", 0xfffaf0), ("forestgreen", 0x228b22),
        ("fuchsia", 0xff00ff), ("gainsboro", 0xdcdcdc), ("ghostwhite", 0xf8f8ff),
        ("gold", 0xffd700), ("goldenrod", 0xdaa520), ("gray", 0x808080),
        ("green", 0x008000), ("greenyellow", 0xadff2f), ("grey", 0x808080),
        ("honeydew", 0xf0fff0), ("hotpink", 0xff69b4), ("indianred", 0xcd5c5c),
        ("indigo", 0x4b0082), ("ivory", 0xfffff0), ("khaki", 0xf0e68c),
        ("lavender", 0xe6e6fa), ("lavenderblush", 0xfff0f5), ("lawngreen", 0x7cfc00),
        ("lemonchiffon", 0xfffacd), ("lightblue", 0xadd8e6), ("lightcoral", 0xf08080),
        ("lightcyan", 0xe0ffff), ("lightgoldenrodyellow", 0xfafad2), ("lightgray", 0xd3d3d3),
        ("lightgreen", 0x90ee90), ("lightgrey", 0xd3d3d3), ("lightpink", 0xffb6c1),
        ("lightsalmon", 0xffa07a), ("lightseagreen", 0x20b2aa), ("lightskyblue", 0x87cefa),
        ("lightslategray", 0x778899), ("lightslategrey", 0x778899), ("lightsteelblue", 0xb0c4de),
        ("lightyellow", 0xffffe0), ("lime", 0x00ff00), ("limegreen", 0x32cd32),
        ("linen", 0xfaf0e6), ("magenta", 0xff00ff), ("maroon", 0x800000),
        ("mediumaquamarine", 0x66cdaa), ("mediumblue", 0x0000cd), ("mediumorchid", 0xba55d3),
        ("mediumpurple", 0x9370db), ("mediumseagreen", 0x3cb371), ("mediumslateblue", 0x7b68ee),
        ("mediumspringgreen", 0x00fa9a), ("mediumturquoise", 0x48d1cc), ("mediumvioletred", 0xc71585),
        ("midnightblue", 0x191970), ("mintcream", 0xf5fffa), ("mistyrose", 0xffe4e1),
        ("moccasin", 0xffe4b5), ("navajowhite", 0xffdead), ("navy", 0x000080),
        ("oldlace", 0xfdf5e6), ("olive", 0x808000), ("olivedrab", 0x6b8e23),
        ("orange", 0xffa500), ("orangered", 0xff4500), ("orchid", 0xda70d6),
        ("palegoldenrod", 0xeee8aa), ("palegreen", 0x98fb98), ("paleturquoise", 0xafeeee),
        ("palevioletred", 0xdb7093), ("papayawhip", 0xffefd5), ("peachpuff", 0xffdab9),
        ("peru", 0xcd853f), ("pink", 0xffc0cb), ("plum", 0xdda0dd),
        ("powderblue", 0xb0e0e6), ("purple", 0x800080), ("red", 0xff0000),
        ("rosybrown", 0xbc8f8f), ("royalblue", 0x4169e1), ("saddlebrown", 0x8b4513),
        ("salmon", 0xfa8072), ("sandybrown", 0xf4a460), ("seagreen", 0x2e8b57),
        ("seashell", 0xfff5ee), ("sienna", 0xa0522d), ("silver", 0xc0c0c0),
        ("skyblue", 0x87ceeb), ("slateblue", 0x6a5acd), ("slategray", 0x708090),
        ("slategrey", 0x708090), ("snow", 0xfffafa), ("springgreen", 0x00ff7f),
        ("steelblue", 0x4682b4), ("tan", 0xd2b48c), ("teal", 0x008080),
        ("thistle", 0xd8bfd8), ("tomato", 0xff6347), ("turquoise", 0x40e0d0),
        ("violet", 0xee82ee), ("wheat", 0xf5deb3), ("white", 0xffffff),
        ("whitesmoke", 0xf5f5f5), ("yellow", 0xffff00), ("yellowgreen", 0x9acd32),
        ("rebeccapurple", 0x663399),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#fff", "#ffffffff")]
    #[test_case("#000000", "#ff000000")]
    #[test_case("#1e5799", "#ff1e5799")]
    #[test_case("#F0F", "#ffff00ff")]
    #[test_case("#0f08", "#8800ff00")]
    #[test_case("#11223380", "#80112233")]
    #[test_case("red", "#ffff0000")]
    #[test_case("RebeccaPurple", "#ff663399")]
    #[test_case("transparent", "#00000000")]
    #[test_case("rgb(255, 0, 0)", "#ffff0000")]
    #[test_case("rgba(0, 0, 0, 0.5)", "#80000000")]
    #[test_case("hsl(0, 100%, 50%)", "#ffff0000")]
    #[test_case("hsla(0, 100%, 50%, 0.5)", "#80ff0000")]
    #[test_case("RGBA(30, 87, 153, .5)", "#801e5799")]
    #[test_case("rgba(0, 0, 0, 25%)", "#40000000")]
    #[test_case("rgb(0 0 0)", "#ff000000")]
    #[test_case("rgb(30 87 153 / 0.5)", "#801e5799")]
    fn parse_to_argb(input: &str, expected: &str) {
        let color = RgbColor::parse(input);
        assert!(color.is_ok(), "{:?}", color);
        if let Ok(color) = color {
            assert_eq!(color.to_argb_hex(), expected);
        }
    }

    #[test_case("invalidColor")]
    #[test_case("#ff")]
    #[test_case("#gggggg")]
    #[test_case("#1234567")]
    #[test_case("rgb(a, b)")]
    #[test_case("rgb(1, 2, 3, 4, 5)")]
    #[test_case("rgba(0, 0, 0, x)")]
    #[test_case("rgb(0, 0, 0")]
    #[test_case("")]
    fn unparseable(input: &str) {
        assert_eq!(
            RgbColor::parse(input),
            Err(ColorError::Unparseable(input.to_string()))
        );
    }

    #[test]
    fn error_message() {
        let err = ColorError::Unparseable("invalidColor".into());
        assert_eq!(err.to_string(), "Unable to parse color from string: invalidColor");
    }

    #[test]
    fn hsl_components() {
        let color = RgbColor::parse("hsl(10, 20%, 30%)");
        assert!(color.is_ok());
        if let Ok(color) = color {
            assert_eq!(color.r.round(), 92.0);
            assert_eq!(color.g.round(), 66.0);
            assert_eq!(color.b.round(), 61.0);
        }
    }
}
