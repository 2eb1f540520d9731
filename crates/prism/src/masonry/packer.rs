//! Greedy masonry packing.
//!
//! Items are visited in input order and each one goes to the track with the
//! smallest accumulated extent so far, lowest index first on ties. This is
//! an online balancing heuristic, not an optimal bin packer: it never sorts,
//! looks ahead or backtracks, and costs `O(n·k)` for `n` items and `k`
//! tracks.

use super::{Axis, Measure};
use crate::geometry::{Point, ProposedSize, Rect, Size};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Track count must be at least 1, got {0}")]
    InvalidTrackCount(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Column (vertical axis) or row (horizontal axis) the item landed in.
    pub track: usize,
    pub frame: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// One entry per input item, in input order.
    pub placements: Vec<Placement>,
    pub content_size: Size,
    /// Final accumulated extent of every track, trailing spacing included.
    pub track_extents: Vec<f64>,
}

impl PlacementResult {
    pub fn frames(&self) -> impl Iterator<Item = Rect> + '_ {
        self.placements.iter().map(|p| p.frame)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancedGridPacker {
    track_count: usize,
    spacing: f64,
    axis: Axis,
}

impl Default for BalancedGridPacker {
    fn default() -> Self {
        Self {
            track_count: 3,
            spacing: 10.0,
            axis: Axis::Vertical,
        }
    }
}

impl BalancedGridPacker {
    pub fn new(track_count: i64, spacing: f64, axis: Axis) -> Result<Self, LayoutError> {
        let track_count = usize::try_from(track_count)
            .ok()
            .filter(|&k| k > 0)
            .ok_or(LayoutError::InvalidTrackCount(track_count))?;

        Ok(Self {
            track_count,
            spacing,
            axis,
        })
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Width of a column (vertical) or height of a row (horizontal) once the
    /// gaps between tracks are taken out of the container.
    pub fn track_extent(&self, container: Size) -> f64 {
        let cross = match self.axis {
            Axis::Vertical => container.width,
            Axis::Horizontal => container.height,
        };
        let k = self.track_count as f64;
        (cross - self.spacing * (k - 1.0)) / k
    }

    fn proposal(&self, track_extent: f64) -> ProposedSize {
        match self.axis {
            Axis::Vertical => ProposedSize::width(track_extent),
            Axis::Horizontal => ProposedSize::height(track_extent),
        }
    }

    pub fn pack<M: Measure>(&self, items: &[M], container: Size) -> PlacementResult {
        let track_extent = self.track_extent(container);
        let track_stride = track_extent + self.spacing;
        let proposal = self.proposal(track_extent);

        let mut extents = vec![0.0; self.track_count];
        let mut placements = Vec::with_capacity(items.len());

        for item in items {
            let track = shortest_track(&extents);
            let size = item.size_that_fits(proposal);

            let (origin, growth) = match self.axis {
                Axis::Vertical => (
                    Point::new(track as f64 * track_stride, extents[track]),
                    size.height,
                ),
                Axis::Horizontal => (
                    Point::new(extents[track], track as f64 * track_stride),
                    size.width,
                ),
            };
            extents[track] += growth + self.spacing;

            log::trace!(
                "Placed item in track {} at ({}, {})",
                track,
                origin.x,
                origin.y
            );
            placements.push(Placement {
                track,
                frame: Rect::new(origin, size),
            });
        }

        let content_size = self.content_size(&placements, container);
        log::debug!(
            "Packed {} items into {} {} tracks, content {}x{}",
            placements.len(),
            self.track_count,
            self.axis,
            content_size.width,
            content_size.height
        );

        PlacementResult {
            placements,
            content_size,
            track_extents: extents,
        }
    }

    /// The cross dimension is the container's; the growing dimension reaches
    /// the farthest frame edge.
    fn content_size(&self, placements: &[Placement], container: Size) -> Size {
        match self.axis {
            Axis::Vertical => {
                let height = placements
                    .iter()
                    .map(|p| p.frame.max_y())
                    .fold(0.0, f64::max);
                Size::new(container.width, height)
            }
            Axis::Horizontal => {
                let width = placements
                    .iter()
                    .map(|p| p.frame.max_x())
                    .fold(0.0, f64::max);
                Size::new(width, container.height)
            }
        }
    }
}

fn shortest_track(extents: &[f64]) -> usize {
    let mut selected = 0;
    let mut selected_extent = f64::MAX;
    for (index, &extent) in extents.iter().enumerate() {
        if extent < selected_extent {
            selected = index;
            selected_extent = extent;
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masonry::AspectRatio;

    fn packer(k: i64, spacing: f64, axis: Axis) -> BalancedGridPacker {
        BalancedGridPacker::new(k, spacing, axis).unwrap()
    }

    #[test]
    fn test_invalid_track_count() {
        assert_eq!(
            BalancedGridPacker::new(0, 0.0, Axis::Vertical),
            Err(LayoutError::InvalidTrackCount(0))
        );
        assert_eq!(
            BalancedGridPacker::new(-1, 0.0, Axis::Horizontal),
            Err(LayoutError::InvalidTrackCount(-1))
        );
    }

    #[test]
    fn test_equal_items_round_robin() {
        let items = [Size::new(100.0, 10.0); 6];
        let result = packer(3, 0.0, Axis::Vertical).pack(&items, Size::new(300.0, 0.0));

        let expected = [
            (0, 0.0, 0.0),
            (1, 100.0, 0.0),
            (2, 200.0, 0.0),
            (0, 0.0, 10.0),
            (1, 100.0, 10.0),
            (2, 200.0, 10.0),
        ];
        for (placement, (track, x, y)) in result.placements.iter().zip(expected) {
            assert_eq!(placement.track, track);
            assert_eq!(placement.frame.origin, Point::new(x, y));
        }
        assert_eq!(result.content_size, Size::new(300.0, 20.0));
        assert_eq!(result.track_extents, vec![20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_vertical_shortest_column_wins() {
        let items = [
            Size::new(50.0, 100.0),
            Size::new(50.0, 20.0),
            Size::new(50.0, 30.0),
            Size::new(50.0, 10.0),
        ];
        let result = packer(2, 5.0, Axis::Vertical).pack(&items, Size::new(105.0, 0.0));

        let tracks: Vec<_> = result.placements.iter().map(|p| p.track).collect();
        assert_eq!(tracks, vec![0, 1, 1, 1]);
        assert_eq!(result.placements[1].frame.origin, Point::new(55.0, 0.0));
        assert_eq!(result.placements[2].frame.origin, Point::new(55.0, 25.0));
        assert_eq!(result.placements[3].frame.origin, Point::new(55.0, 60.0));
        assert_eq!(result.track_extents, vec![105.0, 75.0]);
        // tallest frame edge, no trailing gap
        assert_eq!(result.content_size, Size::new(105.0, 100.0));
    }

    #[test]
    fn test_vertical_proposes_column_width() {
        let items = [
            AspectRatio::new(400.0, 200.0),
            AspectRatio::new(100.0, 100.0),
        ];
        let result = packer(2, 10.0, Axis::Vertical).pack(&items, Size::new(210.0, 0.0));

        assert_eq!(result.placements[0].frame.size, Size::new(100.0, 50.0));
        assert_eq!(result.placements[1].frame.size, Size::new(100.0, 100.0));
        assert_eq!(result.placements[1].frame.origin, Point::new(110.0, 0.0));
    }

    #[test]
    fn test_horizontal_packs_rows() {
        let items = [
            AspectRatio::new(200.0, 100.0),
            AspectRatio::new(100.0, 100.0),
            AspectRatio::new(50.0, 100.0),
        ];
        let result = packer(2, 4.0, Axis::Horizontal).pack(&items, Size::new(0.0, 204.0));

        // rows are 100 tall
        let frames: Vec<_> = result.frames().collect();
        assert_eq!(
            frames,
            vec![
                Rect::new(Point::new(0.0, 0.0), Size::new(200.0, 100.0)),
                Rect::new(Point::new(0.0, 104.0), Size::new(100.0, 100.0)),
                Rect::new(Point::new(104.0, 104.0), Size::new(50.0, 100.0)),
            ]
        );
        assert_eq!(result.content_size, Size::new(200.0, 204.0));
    }

    #[test]
    fn test_empty_items() {
        let items: [Size; 0] = [];
        let result = packer(3, 4.0, Axis::Vertical).pack(&items, Size::new(300.0, 500.0));
        assert!(result.is_empty());
        assert_eq!(result.content_size, Size::new(300.0, 0.0));

        let result = packer(3, 4.0, Axis::Horizontal).pack(&items, Size::new(300.0, 500.0));
        assert_eq!(result.content_size, Size::new(0.0, 500.0));
    }

    #[test]
    fn test_zero_and_negative_sizes_are_placed() {
        let items = [
            Size::new(10.0, 0.0),
            Size::new(10.0, -5.0),
            Size::new(10.0, 3.0),
        ];
        let result = packer(1, 2.0, Axis::Vertical).pack(&items, Size::new(10.0, 0.0));

        assert_eq!(result.placements.len(), 3);
        assert_eq!(result.placements[1].frame.origin.y, 2.0);
        assert_eq!(result.placements[2].frame.origin.y, -1.0);
    }

    #[test]
    fn test_track_extent_subtracts_gaps() {
        let packer = packer(3, 4.0, Axis::Vertical);
        assert_eq!(packer.track_extent(Size::new(308.0, 0.0)), 100.0);
        assert_eq!(shortest_track(&[3.0, 1.0, 1.0]), 1);
    }

    #[test]
    fn test_packing_is_idempotent() {
        let items = [
            Size::new(10.0, 7.0),
            Size::new(10.0, 3.0),
            Size::new(10.0, 5.0),
        ];
        let packer = packer(2, 1.0, Axis::Vertical);
        let container = Size::new(21.0, 0.0);
        assert_eq!(packer.pack(&items, container), packer.pack(&items, container));
    }
}
