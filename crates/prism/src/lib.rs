//! Layout geometry for a hue ring picker, a radial menu and a masonry photo
//! grid. Everything here is pure computation over sizes and points; drawing
//! and input handling belong to whatever UI sits on top.

pub mod config;
pub mod geometry;
pub mod masonry;
pub mod picker;
pub mod radial;
pub mod ring;

pub use geometry::{Point, ProposedSize, Rect, Size};
