use std::fmt::{Display, Formatter};
use std::f64::consts::TAU;

/// Unit of an angle in a gradient line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Deg,
    Grad,
    Rad,
    Turn,
}

impl AngleUnit {
    /// Matches a unit name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "deg" => Some(AngleUnit::Deg),
            "grad" => Some(AngleUnit::Grad),
            "rad" => Some(AngleUnit::Rad),
            "turn" => Some(AngleUnit::Turn),
            _ => None,
        }
    }

    /// Number of units in a full circle
    pub fn units_per_turn(&self) -> f64 {
        match self {
            AngleUnit::Deg => 360.0,
            AngleUnit::Grad => 400.0,
            AngleUnit::Rad => TAU,
            AngleUnit::Turn => 1.0,
        }
    }
}

/// One of the four sides of the gradient box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Axis along which a legacy filter gradient runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// The `GradientType` value of the legacy filter
    pub fn gradient_type(&self) -> u8 {
        match self {
            Axis::Vertical => 0,
            Axis::Horizontal => 1,
        }
    }
}

impl Side {
    /// Matches a side keyword, ignoring ASCII case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "top" => Some(Side::Top),
            "right" => Some(Side::Right),
            "bottom" => Some(Side::Bottom),
            "left" => Some(Side::Left),
            _ => None,
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Vertical,
            Side::Left | Side::Right => Axis::Horizontal,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// The gradient line of a linear gradient
#[derive(Debug, Clone, PartialEq)]
pub enum Heading {
    /// `45deg`, `0.25turn` or a bare `0`
    Angle { value: f64, unit: AngleUnit },
    /// `to top`, `left`, `to bottom right` etc. Keywords are kept in source order.
    SideCorner { keywords: Vec<Side>, explicit_to: bool },
    /// No gradient line, which means `to bottom`
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Color as written, e.g. `#fff` or `rgba(0, 0, 0, .5)`
    pub color: String,
    /// Position as written, e.g. `50%`
    pub position: Option<String>,
}

/// A parsed `linear-gradient()` value. Holds at least two color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub heading: Heading,
    pub color_stops: Vec<ColorStop>,
}

impl GradientSpec {
    pub fn first_color(&self) -> &str {
        self.color_stops.first().map_or("", |stop| stop.color.as_str())
    }

    pub fn last_color(&self) -> &str {
        self.color_stops.last().map_or("", |stop| stop.color.as_str())
    }

    pub fn is_multi_color(&self) -> bool {
        self.color_stops.len() > 2
    }
}
