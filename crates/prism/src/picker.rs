use crate::geometry::{Point, Size};
use crate::ring::RingMapper;
use palette::rgb::FromHexError;
use palette::{FromColor, Srgb};
use thiserror::Error;

type Hsv = palette::Hsv<palette::encoding::Srgb, f64>;

#[derive(Debug, Error)]
#[error("Invalid color '{input}': {source}")]
pub struct ParseColorError {
    input: String,
    #[source]
    source: FromHexError,
}

/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
pub fn parse_hex(input: &str) -> Result<Srgb<f64>, ParseColorError> {
    input
        .trim()
        .parse::<Srgb<u8>>()
        .map(|c| c.into_format())
        .map_err(|source| ParseColorError {
            input: input.to_string(),
            source,
        })
}

pub fn to_hex(color: Srgb<f64>) -> String {
    format!("#{:x}", color.into_format::<u8>())
}

/// State behind a hue ring with saturation and brightness sliders.
///
/// Hue comes from the selector's angle on the ring; the selector is always
/// kept on the ring's centerline.
#[derive(Debug, Clone, Copy)]
pub struct ColorPicker {
    ring: RingMapper,
    hue: f64,
    saturation: f64,
    brightness: f64,
    selector: Point,
}

impl ColorPicker {
    pub fn new(ring: RingMapper) -> Self {
        Self {
            ring,
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
            selector: ring.point_for_hue(0.0),
        }
    }

    /// Starts from an already selected color.
    pub fn with_color(ring: RingMapper, color: Srgb<f64>) -> Self {
        let mut picker = Self::new(ring);
        picker.select(color);
        picker
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn selector(&self) -> Point {
        self.selector
    }

    pub fn ring(&self) -> &RingMapper {
        &self.ring
    }

    /// Where to draw the selector relative to the ring's center.
    pub fn selector_offset(&self) -> Size {
        self.ring.offset(self.selector)
    }

    pub fn drag_to(&mut self, location: Point) -> Srgb<f64> {
        let on_ring = self.ring.project(location);
        self.hue = self.ring.hue(on_ring);
        log::debug!("Drag to ({}, {}) -> hue {}", location.x, location.y, self.hue);
        self.update()
    }

    pub fn set_saturation(&mut self, saturation: f64) -> Srgb<f64> {
        self.saturation = saturation.clamp(0.0, 1.0);
        self.update()
    }

    pub fn set_brightness(&mut self, brightness: f64) -> Srgb<f64> {
        self.brightness = brightness.clamp(0.0, 1.0);
        self.update()
    }

    pub fn color(&self) -> Srgb<f64> {
        Srgb::from_color(Hsv::new(self.hue * 360.0, self.saturation, self.brightness))
    }

    /// Adopts `color`: sliders take its saturation and brightness, and the
    /// selector moves to its hue. Grays keep hue `0`.
    pub fn select(&mut self, color: Srgb<f64>) {
        let hsv = Hsv::from_color(color);
        let degrees = hsv.hue.into_positive_degrees();

        self.hue = if degrees >= 360.0 { 0.0 } else { degrees / 360.0 };
        self.saturation = hsv.saturation.clamp(0.0, 1.0);
        self.brightness = hsv.value.clamp(0.0, 1.0);
        self.update();
    }

    fn update(&mut self) -> Srgb<f64> {
        self.selector = self.ring.point_for_hue(self.hue);
        self.color()
    }
}
