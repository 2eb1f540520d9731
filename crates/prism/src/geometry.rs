//! Plain 2D primitives shared by the ring mapper, radial layout and masonry
//! packer. Coordinates are screen-style: origin top-left, y grows downward.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseSizeError {
    #[error("Expected WIDTHxHEIGHT, got '{0}'")]
    Format(String),
    #[error("Invalid dimension '{0}'")]
    Dimension(String),
}

/// Accepts `WIDTHxHEIGHT` (e.g. `300x200`), or a single number for a square.
impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ParseSizeError::Dimension(v.trim().to_string()))
        };

        match s.trim().split_once(['x', 'X']) {
            Some((w, h)) => Ok(Size::new(parse(w)?, parse(h)?)),
            None if !s.trim().is_empty() => parse(s).map(Size::square),
            None => Err(ParseSizeError::Format(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(Point::default(), size)
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }
}

/// A size offered to a child during layout. `None` leaves that dimension
/// unconstrained so the child can report its natural extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProposedSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ProposedSize {
    pub const UNSPECIFIED: ProposedSize = ProposedSize {
        width: None,
        height: None,
    };

    /// Fallback used for unconstrained dimensions when a concrete size is
    /// required.
    pub const DEFAULT_DIMENSION: f64 = 10.0;

    pub fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    pub fn width(width: f64) -> Self {
        Self::new(Some(width), None)
    }

    pub fn height(height: f64) -> Self {
        Self::new(None, Some(height))
    }

    pub fn replacing_unspecified(&self) -> Size {
        Size::new(
            self.width.unwrap_or(Self::DEFAULT_DIMENSION),
            self.height.unwrap_or(Self::DEFAULT_DIMENSION),
        )
    }
}

impl From<Size> for ProposedSize {
    fn from(size: Size) -> Self {
        Self::new(Some(size.width), Some(size.height))
    }
}
