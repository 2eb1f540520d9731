//! Conversions between points in a square container and angles on the ring
//! inscribed in it.
//!
//! The container's center sits at `(r, r)` where `r = width / 2`; angles are
//! measured with `atan2` in screen space, so `0` points right and angles grow
//! clockwise on screen. A ring of thickness `t` guides the selector along its
//! centerline at `r - t / 2`.

use crate::geometry::{Point, Size};
use std::f64::consts::{FRAC_PI_2, TAU};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Ring thickness {thickness} exceeds the container diameter {diameter}")]
    RingTooThick { thickness: f64, diameter: f64 },
    #[error("Ring thickness must be non-negative, got {0}")]
    NegativeThickness(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center_radius: f64,
    pub ring_thickness: f64,
}

impl RingGeometry {
    pub fn new(center_radius: f64, ring_thickness: f64) -> Result<Self, GeometryError> {
        if ring_thickness < 0.0 {
            return Err(GeometryError::NegativeThickness(ring_thickness));
        }
        if ring_thickness > center_radius * 2.0 {
            return Err(GeometryError::RingTooThick {
                thickness: ring_thickness,
                diameter: center_radius * 2.0,
            });
        }
        Ok(Self {
            center_radius,
            ring_thickness,
        })
    }

    pub fn from_container(container: Size, ring_thickness: f64) -> Result<Self, GeometryError> {
        Self::new(container.width / 2.0, ring_thickness)
    }

    /// Radius of the ring's centerline.
    pub fn path_radius(&self) -> f64 {
        self.center_radius - self.ring_thickness / 2.0
    }
}

fn radius(container: Size) -> f64 {
    container.width / 2.0
}

/// Angle of `point` around the container's center, in `[0, 2π)`.
///
/// The center itself has no direction and maps to `0`.
pub fn angle_from_point(point: Point, container: Size) -> f64 {
    let r = radius(container);
    let (dx, dy) = (point.x - r, point.y - r);

    let mut angle = dy.atan2(dx);
    if angle < 0.0 {
        angle += TAU;
    }
    // tiny negative angles round up to exactly 2π
    if angle >= TAU { 0.0 } else { angle }
}

/// Hue in `[0, 1)` for a point, i.e. its angle as a fraction of a turn.
pub fn hue_from_point(point: Point, container: Size) -> f64 {
    angle_from_point(point, container) / TAU
}

pub fn point_on_ring(angle: f64, container: Size, ring_thickness: f64) -> Point {
    let r = radius(container);
    let path_radius = r - ring_thickness / 2.0;
    Point::new(r + path_radius * angle.cos(), r + path_radius * angle.sin())
}

pub fn point_from_hue(hue: f64, container: Size, ring_thickness: f64) -> Point {
    point_on_ring(hue * TAU, container, ring_thickness)
}

/// Snaps `point` onto the ring's centerline, keeping its angle.
pub fn project_onto_ring(point: Point, container: Size, ring_thickness: f64) -> Point {
    point_on_ring(angle_from_point(point, container), container, ring_thickness)
}

/// Translation from the container's center to `point`.
pub fn offset_from_center(point: Point, container: Size) -> Size {
    let r = radius(container);
    Size::new(point.x - r, point.y - r)
}

/// Angle in radians for the `index`-th of `item_count` items spread over
/// `total_sweep_degrees`, starting at `angle_offset` degrees.
///
/// Index 0 sits at the offset; the `-π/2` shift makes an offset of `0` point
/// up. A single item never divides by zero.
pub fn placement_angle(
    index: usize,
    item_count: usize,
    total_sweep_degrees: f64,
    angle_offset: f64,
) -> f64 {
    let divisor = item_count.saturating_sub(1).max(1) as f64;
    let step = total_sweep_degrees / divisor;
    (step * index as f64 + angle_offset).to_radians() - FRAC_PI_2
}

/// Point for a radially placed item sitting exactly on the container's
/// radius.
pub fn radial_point(
    index: usize,
    item_count: usize,
    total_sweep_degrees: f64,
    angle_offset: f64,
    container: Size,
) -> Point {
    let angle = placement_angle(index, item_count, total_sweep_degrees, angle_offset);
    point_on_ring(angle, container, 0.0)
}

/// Shortest angular distance between two angles, in `[0, π]`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    ((a - b + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI).abs()
}

/// A ring bound to a concrete container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMapper {
    container: Size,
    geometry: RingGeometry,
}

impl RingMapper {
    pub fn new(container: Size, ring_thickness: f64) -> Result<Self, GeometryError> {
        let geometry = RingGeometry::from_container(container, ring_thickness)?;
        log::debug!(
            "Ring mapper: container {}x{}, path radius {}",
            container.width,
            container.height,
            geometry.path_radius()
        );
        Ok(Self {
            container,
            geometry,
        })
    }

    pub fn center(&self) -> Point {
        let r = radius(self.container);
        Point::new(r, r)
    }

    pub fn angle(&self, point: Point) -> f64 {
        angle_from_point(point, self.container)
    }

    pub fn hue(&self, point: Point) -> f64 {
        hue_from_point(point, self.container)
    }

    pub fn point_at(&self, angle: f64) -> Point {
        point_on_ring(angle, self.container, self.geometry.ring_thickness)
    }

    pub fn point_for_hue(&self, hue: f64) -> Point {
        point_from_hue(hue, self.container, self.geometry.ring_thickness)
    }

    pub fn project(&self, point: Point) -> Point {
        project_onto_ring(point, self.container, self.geometry.ring_thickness)
    }

    pub fn offset(&self, point: Point) -> Size {
        offset_from_center(point, self.container)
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn container_strategy() -> impl Strategy<Value = Size> {
        (10.0f64..1000.0).prop_map(Size::square)
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn is_degenerate(point: Point, container: Size) -> bool {
        let r = container.width / 2.0;
        (point.x - r).hypot(point.y - r) < 1e-6
    }

    /// Angles always land in [0, 2π).
    fn check_angle_in_range(point: Point, container: Size) -> Result<(), TestCaseError> {
        let angle = angle_from_point(point, container);
        prop_assert!((0.0..TAU).contains(&angle));
        let hue = hue_from_point(point, container);
        prop_assert!((0.0..1.0).contains(&hue));
        Ok(())
    }

    /// Projection keeps the angle and snaps the distance to the centerline.
    fn check_projection_round_trip(
        point: Point,
        container: Size,
        thickness_fraction: f64,
    ) -> Result<(), TestCaseError> {
        prop_assume!(!is_degenerate(point, container));
        let thickness = container.width * thickness_fraction;
        let r = container.width / 2.0;

        let angle = angle_from_point(point, container);
        let projected = point_on_ring(angle, container, thickness);

        let distance = projected.distance_to(Point::new(r, r));
        prop_assert!(approx_eq!(f64, distance, r - thickness / 2.0, epsilon = 1e-9));

        let path_radius = r - thickness / 2.0;
        if path_radius > 1e-6 {
            let reprojected = angle_from_point(projected, container);
            prop_assert!(angle_difference(reprojected, angle) < 1e-9);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn angle_in_range(point in point_strategy(), container in container_strategy()) {
            check_angle_in_range(point, container)?;
        }

        #[test]
        fn projection_round_trip(
            point in point_strategy(),
            container in container_strategy(),
            thickness_fraction in 0.0f64..0.9,
        ) {
            check_projection_round_trip(point, container, thickness_fraction)?;
        }

        #[test]
        fn placement_index_zero_is_offset(
            count in 1usize..64,
            sweep in -720.0f64..720.0,
            offset in -360.0f64..360.0,
        ) {
            let angle = placement_angle(0, count, sweep, offset);
            prop_assert!(approx_eq!(f64, angle, offset.to_radians() - FRAC_PI_2));
        }
    }
}
