use crate::gradient::{AngleUnit, Heading, Side};

pub const ANGULAR_FALLBACK_MESSAGE: &str =
    "IE filter doesn't support angular gradient, we use the closest side as the fallback.";
pub const SIDE_CORNER_FALLBACK_MESSAGE: &str =
    "IE filter doesn't support side corner gradient, we use the first side of the side corner as fallback.";

/// Angles closer than this to a multiple of 90 degrees count as axis aligned
const AXIS_EPSILON: f64 = 1e-9;

/// The side a gradient runs to, and whether that is an approximation
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionResult {
    pub direction: Side,
    pub is_fallback: bool,
    pub message: Option<&'static str>,
}

impl DirectionResult {
    fn exact(direction: Side) -> Self {
        Self {
            direction,
            is_fallback: false,
            message: None,
        }
    }

    fn fallback(direction: Side, message: &'static str) -> Self {
        Self {
            direction,
            is_fallback: true,
            message: Some(message),
        }
    }
}

/// Converts an angle to degrees
pub fn normalize_angle(value: f64, unit: AngleUnit) -> f64 {
    value / unit.units_per_turn() * 360.0
}

/// Maps an angle in degrees to the closest side. Angles on a sector boundary go to the side
/// before it, clockwise from top.
pub fn angle_to_direction(degrees: f64) -> DirectionResult {
    let turns = degrees / 90.0;
    let is_fallback = (turns - turns.round()).abs() > AXIS_EPSILON;

    let reduced = ((degrees % 360.0) + 360.0) % 360.0;
    let count = reduced / 45.0;

    let direction = if count <= 1.0 {
        Side::Top
    } else if count <= 3.0 {
        Side::Right
    } else if count <= 5.0 {
        Side::Bottom
    } else if count <= 7.0 {
        Side::Left
    } else {
        Side::Top
    };

    if is_fallback {
        DirectionResult::fallback(direction, ANGULAR_FALLBACK_MESSAGE)
    } else {
        DirectionResult::exact(direction)
    }
}

/// Resolves the heading of a gradient to one of the four sides
pub fn resolve(heading: &Heading) -> DirectionResult {
    match heading {
        Heading::Angle { value, unit } => angle_to_direction(normalize_angle(*value, *unit)),
        Heading::SideCorner {
            keywords,
            explicit_to,
        } => {
            // A corner is read vertical side first, so `right top` equals `top right`
            let mut sides: Vec<Side> = keywords.clone();
            sides.sort_by_key(|side| side.axis() as u8);

            if !explicit_to {
                sides = sides.iter().map(Side::inverse).collect();
            }

            let Some(direction) = sides.first().copied() else {
                return DirectionResult::exact(Side::Bottom);
            };

            if sides.len() > 1 {
                DirectionResult::fallback(direction, SIDE_CORNER_FALLBACK_MESSAGE)
            } else {
                DirectionResult::exact(direction)
            }
        }
        Heading::None => DirectionResult::exact(Side::Bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, Side::Top, false)]
    #[test_case(30.0, Side::Top, true)]
    #[test_case(45.0, Side::Top, true)]
    #[test_case(46.0, Side::Right, true)]
    #[test_case(90.0, Side::Right, false)]
    #[test_case(135.0, Side::Right, true)]
    #[test_case(180.0, Side::Bottom, false)]
    #[test_case(225.0, Side::Bottom, true)]
    #[test_case(270.0, Side::Left, false)]
    #[test_case(315.0, Side::Left, true)]
    #[test_case(316.0, Side::Top, true)]
    #[test_case(360.0, Side::Top, false)]
    #[test_case(-90.0, Side::Left, false)]
    #[test_case(-45.0, Side::Left, true)]
    #[test_case(450.0, Side::Right, false)]
    fn angles(degrees: f64, direction: Side, is_fallback: bool) {
        let result = angle_to_direction(degrees);
        assert_eq!(result.direction, direction);
        assert_eq!(result.is_fallback, is_fallback);
        assert_eq!(result.message.is_some(), is_fallback);
    }

    #[test_case(100.0, AngleUnit::Grad, 90.0)]
    #[test_case(0.5, AngleUnit::Turn, 180.0)]
    #[test_case(std::f64::consts::PI, AngleUnit::Rad, 180.0)]
    #[test_case(-45.0, AngleUnit::Deg, -45.0)]
    fn normalize(value: f64, unit: AngleUnit, degrees: f64) {
        assert!((normalize_angle(value, unit) - degrees).abs() < 1e-9);
    }

    #[test]
    fn angles_are_periodic() {
        for degrees in [0.0, 10.0, 45.0, 90.0, 100.0, 200.0, 300.0, 359.0] {
            let base = angle_to_direction(degrees);
            for k in [-2.0, -1.0, 1.0, 3.0] {
                assert_eq!(angle_to_direction(degrees + 360.0 * k), base, "{} + {}turn", degrees, k);
            }
        }
    }

    #[test]
    fn axis_aligned_angles_in_any_unit_are_exact() {
        let headings = [
            (0.25, AngleUnit::Turn),
            (200.0, AngleUnit::Grad),
            (std::f64::consts::FRAC_PI_2 * 3.0, AngleUnit::Rad),
            (-180.0, AngleUnit::Deg),
        ];
        for (value, unit) in headings {
            assert!(!resolve(&Heading::Angle { value, unit }).is_fallback);
        }
    }

    fn side_corner(keywords: &[Side], explicit_to: bool) -> DirectionResult {
        resolve(&Heading::SideCorner {
            keywords: keywords.to_vec(),
            explicit_to,
        })
    }

    #[test_case(&[Side::Top], true, Side::Top)]
    #[test_case(&[Side::Top], false, Side::Bottom)]
    #[test_case(&[Side::Left], false, Side::Right)]
    #[test_case(&[Side::Right], true, Side::Right)]
    fn single_side(keywords: &[Side], explicit_to: bool, direction: Side) {
        assert_eq!(side_corner(keywords, explicit_to), DirectionResult::exact(direction));
    }

    #[test]
    fn corners_fall_back_to_the_vertical_side() {
        let expected = DirectionResult::fallback(Side::Bottom, SIDE_CORNER_FALLBACK_MESSAGE);
        assert_eq!(side_corner(&[Side::Top, Side::Right], false), expected);
        assert_eq!(side_corner(&[Side::Right, Side::Top], false), expected);

        let expected = DirectionResult::fallback(Side::Top, SIDE_CORNER_FALLBACK_MESSAGE);
        assert_eq!(side_corner(&[Side::Top, Side::Left], true), expected);
        assert_eq!(side_corner(&[Side::Left, Side::Top], true), expected);
    }

    #[test]
    fn no_heading_is_bottom() {
        assert_eq!(resolve(&Heading::None), DirectionResult::exact(Side::Bottom));
    }
}
