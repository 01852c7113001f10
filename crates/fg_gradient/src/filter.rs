use crate::direction::{resolve, DirectionResult};
use crate::errors::GradientError;
use crate::gradient::{Axis, GradientSpec, Side};
use crate::parser;
use fg_css::colors::{ColorError, RgbColor};

/// Result of a successful gradient to filter conversion
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// The legacy filter value
    pub filter: String,
    /// The gradient has more than two color stops, so only the end colors are used
    pub is_multi_color: bool,
    /// The direction was approximated
    pub is_fallback: bool,
    /// Explanation of the approximation
    pub message: Option<&'static str>,
}

/// Builds the legacy filter value for a two color gradient along the given axis
pub fn colors_to_filter_string(start: &str, end: &str, axis: Axis) -> Result<String, ColorError> {
    let start = RgbColor::parse(start)?;
    let end = RgbColor::parse(end)?;

    Ok(format!(
        "progid:DXImageTransform.Microsoft.gradient( startColorstr='{}', endColorstr='{}',GradientType={} )",
        start.to_argb_hex(),
        end.to_argb_hex(),
        axis.gradient_type()
    ))
}

/// Synthesizes the filter for a parsed gradient. `text` is the gradient as written and only
/// shows up in error messages.
pub fn synthesize(spec: &GradientSpec, text: &str) -> Result<FilterOutcome, GradientError> {
    let DirectionResult {
        direction,
        is_fallback,
        message,
    } = resolve(&spec.heading);

    let (mut start, mut end) = (spec.first_color(), spec.last_color());
    if matches!(direction, Side::Top | Side::Left) {
        std::mem::swap(&mut start, &mut end);
    }

    log::debug!("gradient {} runs to {}", text, direction);

    let filter = colors_to_filter_string(start, end, direction.axis()).map_err(|err| {
        GradientError::Color {
            message: err.to_string(),
            gradient: text.to_string(),
        }
    })?;

    Ok(FilterOutcome {
        filter,
        is_multi_color: spec.is_multi_color(),
        is_fallback,
        message,
    })
}

/// Parses a `linear-gradient()` value and synthesizes its filter
pub fn gradient_to_filter(text: &str) -> Result<FilterOutcome, GradientError> {
    let spec = parser::parse(text)?;
    synthesize(&spec, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{ANGULAR_FALLBACK_MESSAGE, SIDE_CORNER_FALLBACK_MESSAGE};

    fn filter(start: &str, end: &str, gradient_type: u8) -> String {
        format!(
            "progid:DXImageTransform.Microsoft.gradient( startColorstr='{start}', endColorstr='{end}',GradientType={gradient_type} )"
        )
    }

    #[test]
    fn filter_string() {
        assert_eq!(
            colors_to_filter_string("#1e5799", "rgba(0, 0, 0, 0.5)", Axis::Horizontal),
            Ok(filter("#ff1e5799", "#80000000", 1))
        );
        assert_eq!(
            colors_to_filter_string("red", "nope", Axis::Vertical),
            Err(ColorError::Unparseable("nope".into()))
        );
    }

    #[test]
    fn default_direction_keeps_color_order() {
        let outcome = gradient_to_filter("linear-gradient(red, blue)");
        assert_eq!(
            outcome,
            Ok(FilterOutcome {
                filter: filter("#ffff0000", "#ff0000ff", 0),
                is_multi_color: false,
                is_fallback: false,
                message: None,
            })
        );
    }

    #[test]
    fn top_swaps_colors() {
        let outcome = gradient_to_filter("linear-gradient(to top, red, blue)");
        assert_eq!(outcome.map(|o| o.filter), Ok(filter("#ff0000ff", "#ffff0000", 0)));
    }

    #[test]
    fn horizontal() {
        let outcome = gradient_to_filter("linear-gradient(to right, red, blue)");
        assert_eq!(outcome.map(|o| o.filter), Ok(filter("#ffff0000", "#ff0000ff", 1)));

        let outcome = gradient_to_filter("linear-gradient(to left, red, blue)");
        assert_eq!(outcome.map(|o| o.filter), Ok(filter("#ff0000ff", "#ffff0000", 1)));
    }

    #[test]
    fn angular_fallback() {
        let outcome = gradient_to_filter("linear-gradient(45deg, red, blue)");
        assert!(outcome.is_ok());
        if let Ok(outcome) = outcome {
            assert_eq!(outcome.filter, filter("#ff0000ff", "#ffff0000", 0));
            assert!(outcome.is_fallback);
            assert_eq!(outcome.message, Some(ANGULAR_FALLBACK_MESSAGE));
        }
    }

    #[test]
    fn side_corner_fallback() {
        let outcome = gradient_to_filter("linear-gradient(to bottom right, red, #00f 50%, blue)");
        assert!(outcome.is_ok());
        if let Ok(outcome) = outcome {
            assert!(outcome.is_multi_color);
            assert!(outcome.is_fallback);
            assert_eq!(outcome.message, Some(SIDE_CORNER_FALLBACK_MESSAGE));
        }
    }

    #[test]
    fn colors_with_alpha() {
        let outcome = gradient_to_filter("linear-gradient(rgba(0, 0, 0, 0.5), #fff)");
        assert_eq!(outcome.map(|o| o.filter), Ok(filter("#80000000", "#ffffffff", 0)));

        let outcome = gradient_to_filter("linear-gradient(to right, hsla(0, 100%, 50%, 0.5), rgb(0 0 0))");
        assert_eq!(outcome.map(|o| o.filter), Ok(filter("#80ff0000", "#ff000000", 1)));
    }

    #[test]
    fn color_error() {
        let outcome = gradient_to_filter("linear-gradient(#fff, invalidColor)");
        assert_eq!(
            outcome,
            Err(GradientError::Color {
                message: "Unable to parse color from string: invalidColor".into(),
                gradient: "linear-gradient(#fff, invalidColor)".into(),
            })
        );
        if let Err(err) = outcome {
            assert_eq!(
                err.to_string(),
                "Unable to parse color from string: invalidColor in `linear-gradient(#fff, invalidColor)`"
            );
        }
    }

    #[test]
    fn syntax_error() {
        let outcome = gradient_to_filter("linear-gradient(red)");
        assert!(outcome.is_err());
        if let Err(err) = outcome {
            assert_eq!(err.to_string(), "`linear-gradient(red)` is not a valid linear gradient value.");
        }
    }
}
