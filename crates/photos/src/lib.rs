//! Photo metadata for masonry grids: the subset of the photo API payload the
//! layout needs, and a process-wide record of dimensions measured from the
//! decoded images.

pub mod cache;
pub mod macros;
pub mod photo;

pub use cache::{Dimensions, SizeCache};
pub use photo::{Photo, PhotoError, PhotoId, PhotoUrl, Urls, load_photos, parse_photos};
