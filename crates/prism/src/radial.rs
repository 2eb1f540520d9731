use crate::geometry::{Point, ProposedSize, Rect, Size};
use crate::masonry::Measure;
use crate::ring::{angle_difference, placement_angle};
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A relative position inside a rectangle, `(0, 0)` top-left to `(1, 1)`
/// bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const CENTER: UnitPoint = UnitPoint { x: 0.5, y: 0.5 };
    pub const LEADING: UnitPoint = UnitPoint { x: 0.0, y: 0.5 };
    pub const TRAILING: UnitPoint = UnitPoint { x: 1.0, y: 0.5 };
    pub const TOP: UnitPoint = UnitPoint { x: 0.5, y: 0.0 };
    pub const BOTTOM: UnitPoint = UnitPoint { x: 0.5, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The arc a radial menu spreads its items over.
#[derive(Debug, Clone, Copy, PartialEq, Default, SerializeDisplay, DeserializeFromStr)]
pub enum RadialArc {
    #[default]
    Full,
    /// Half circle on the trailing (right) side, items anchored by their
    /// leading edge.
    Trailing,
    /// Half circle swept counter-clockwise, items anchored by their
    /// trailing edge.
    Leading,
    Custom {
        degrees: f64,
        anchor: UnitPoint,
    },
}

impl RadialArc {
    pub fn degrees(&self) -> f64 {
        match self {
            Self::Full => 360.0,
            Self::Trailing => 180.0,
            Self::Leading => -180.0,
            Self::Custom { degrees, .. } => *degrees,
        }
    }

    pub fn anchor(&self) -> UnitPoint {
        match self {
            Self::Full => UnitPoint::CENTER,
            Self::Trailing => UnitPoint::LEADING,
            Self::Leading => UnitPoint::TRAILING,
            Self::Custom { anchor, .. } => *anchor,
        }
    }
}

impl fmt::Display for RadialArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Trailing => write!(f, "trailing"),
            Self::Leading => write!(f, "leading"),
            Self::Custom { degrees, .. } => write!(f, "{degrees}"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown arc '{0}', expected full, trailing, leading or a number of degrees")]
pub struct ParseArcError(String);

/// Named arcs are matched case-insensitively; any number becomes a custom
/// arc of that many degrees anchored at the item's center.
impl FromStr for RadialArc {
    type Err = ParseArcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "fullcircle" | "circle" => Ok(Self::Full),
            "trailing" | "trailingcircle" | "right" => Ok(Self::Trailing),
            "leading" | "leadingcircle" | "left" => Ok(Self::Leading),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(|degrees| Self::Custom {
                    degrees,
                    anchor: UnitPoint::CENTER,
                })
                .ok_or_else(|| ParseArcError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialPlacement {
    /// Where the anchor point of the item goes.
    pub position: Point,
    pub anchor: UnitPoint,
    pub size: Size,
}

impl RadialPlacement {
    /// The item's rectangle once its anchor is pinned to `position`.
    pub fn frame(&self) -> Rect {
        Rect::new(
            Point::new(
                self.position.x - self.anchor.x * self.size.width,
                self.position.y - self.anchor.y * self.size.height,
            ),
            self.size,
        )
    }
}

/// Spreads items around the largest circle fitting the bounds. Each item is
/// pulled inward by half its own size so it stays inside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialLayout {
    pub arc: RadialArc,
    /// Degrees added to every item's angle; `0` starts at the top.
    pub angle_offset: f64,
}

impl RadialLayout {
    pub fn new(arc: RadialArc, angle_offset: f64) -> Self {
        Self { arc, angle_offset }
    }

    /// The layout takes whatever it is offered.
    pub fn size_that_fits(&self, proposal: ProposedSize) -> Size {
        proposal.replacing_unspecified()
    }

    pub fn angle(&self, index: usize, item_count: usize) -> f64 {
        placement_angle(index, item_count, self.arc.degrees(), self.angle_offset)
    }

    pub fn place<M: Measure>(&self, bounds: Rect, items: &[M]) -> Vec<RadialPlacement> {
        let radius = bounds.size.width.min(bounds.size.height) / 2.0;
        let anchor = self.arc.anchor();

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let angle = self.angle(index, items.len());
                let size = item.size_that_fits(ProposedSize::UNSPECIFIED);
                let (x, y) = (
                    angle.cos() * (radius - size.width / 2.0),
                    angle.sin() * (radius - size.height / 2.0),
                );
                RadialPlacement {
                    position: Point::new(bounds.mid_x() + x, bounds.mid_y() + y),
                    anchor,
                    size,
                }
            })
            .collect()
    }

    /// Index of the item whose direction is closest to `pointer`, or `None`
    /// when there are no items or the pointer is within `dead_zone` of the
    /// center.
    pub fn nearest_item(
        &self,
        bounds: Rect,
        item_count: usize,
        pointer: Point,
        dead_zone: f64,
    ) -> Option<usize> {
        let center = bounds.center();
        if pointer.distance_to(center) <= dead_zone {
            return None;
        }
        let pointer_angle = (pointer.y - center.y).atan2(pointer.x - center.x);

        (0..item_count).min_by(|&a, &b| {
            angle_difference(pointer_angle, self.angle(a, item_count)).total_cmp(
                &angle_difference(pointer_angle, self.angle(b, item_count)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn bounds() -> Rect {
        Rect::from_size(Size::square(300.0))
    }

    #[test]
    fn test_arc_parsing() {
        let cases = vec![
            ("full", RadialArc::Full),
            ("Trailing", RadialArc::Trailing),
            ("LEADING", RadialArc::Leading),
            (
                "90",
                RadialArc::Custom {
                    degrees: 90.0,
                    anchor: UnitPoint::CENTER,
                },
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<RadialArc>().unwrap(), expected);
        }
        assert!("sideways".parse::<RadialArc>().is_err());
        assert!("NaN".parse::<RadialArc>().is_err());
    }

    #[test]
    fn test_arc_deserialization() {
        let arc: RadialArc = serde_json::from_str("\"leading\"").unwrap();
        assert_eq!(arc, RadialArc::Leading);
        assert_eq!(serde_json::to_string(&RadialArc::Trailing).unwrap(), "\"trailing\"");
    }

    #[test]
    fn test_arc_presets() {
        assert_eq!(RadialArc::Full.degrees(), 360.0);
        assert_eq!(RadialArc::Leading.degrees(), -180.0);
        assert_eq!(RadialArc::Leading.anchor(), UnitPoint::TRAILING);
        assert_eq!(RadialArc::Trailing.anchor(), UnitPoint::LEADING);
    }

    #[test]
    fn test_single_item_sits_at_offset() {
        let layout = RadialLayout::new(RadialArc::Full, 90.0);
        let placements = layout.place(bounds(), &[Size::new(40.0, 20.0)]);

        assert_eq!(placements.len(), 1);
        // offset 90 degrees points right
        assert_approx_eq!(f64, placements[0].position.x, 150.0 + 150.0 - 20.0);
        assert_approx_eq!(f64, placements[0].position.y, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_leading_arc_places_three_items() {
        let layout = RadialLayout::new(RadialArc::Leading, 0.0);
        let items = [Size::square(20.0); 3];
        let placements = layout.place(bounds(), &items);

        // top, left, bottom
        let expected = [(150.0, 10.0), (10.0, 150.0), (150.0, 290.0)];
        for (placement, (x, y)) in placements.iter().zip(expected) {
            assert_approx_eq!(f64, placement.position.x, x, epsilon = 1e-9);
            assert_approx_eq!(f64, placement.position.y, y, epsilon = 1e-9);
            assert_eq!(placement.anchor, UnitPoint::TRAILING);
        }
    }

    #[test]
    fn test_frame_resolves_anchor() {
        let placement = RadialPlacement {
            position: Point::new(100.0, 100.0),
            anchor: UnitPoint::TRAILING,
            size: Size::new(40.0, 20.0),
        };
        assert_eq!(
            placement.frame(),
            Rect::new(Point::new(60.0, 90.0), Size::new(40.0, 20.0))
        );
    }

    #[test]
    fn test_nearest_item() {
        let layout = RadialLayout::new(RadialArc::Full, 0.0);
        // four items over 360 degrees: up, 120, 240, and back to up
        let up = Point::new(150.0, 0.0);
        assert_eq!(layout.nearest_item(bounds(), 4, up, 10.0), Some(0));

        let lower_right = Point::new(150.0 + 100.0, 150.0 + 60.0);
        assert_eq!(layout.nearest_item(bounds(), 4, lower_right, 10.0), Some(1));

        assert_eq!(
            layout.nearest_item(bounds(), 4, Point::new(151.0, 151.0), 10.0),
            None
        );
        assert_eq!(layout.nearest_item(bounds(), 0, up, 10.0), None);
    }

    #[test]
    fn test_size_that_fits() {
        let layout = RadialLayout::default();
        assert_eq!(
            layout.size_that_fits(Size::square(300.0).into()),
            Size::square(300.0)
        );
    }
}
