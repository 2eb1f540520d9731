use crate::geometry::{ProposedSize, Size};
use photos::{Photo, SizeCache};

/// Anything that can report a size when offered a (possibly partially
/// unconstrained) proposal. Layouts never look past this.
pub trait Measure {
    fn size_that_fits(&self, proposal: ProposedSize) -> Size;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn size_that_fits(&self, proposal: ProposedSize) -> Size {
        (**self).size_that_fits(proposal)
    }
}

/// A fixed size, regardless of the proposal.
impl Measure for Size {
    fn size_that_fits(&self, _proposal: ProposedSize) -> Size {
        *self
    }
}

/// Content that scales to fit while keeping its width-to-height ratio, like
/// an image set to fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn natural(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl From<Size> for AspectRatio {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

impl Measure for AspectRatio {
    fn size_that_fits(&self, proposal: ProposedSize) -> Size {
        fit_aspect(self.width, self.height, proposal).unwrap_or_else(|| self.natural())
    }
}

/// Photos measure by the dimensions recorded for their `small` image when
/// one was decoded, and by the API metadata otherwise.
impl Measure for Photo {
    fn size_that_fits(&self, proposal: ProposedSize) -> Size {
        let dims = SizeCache::shared()
            .get(&self.urls.small)
            .unwrap_or_else(|| self.dimensions());
        let (width, height) = (dims.width as f64, dims.height as f64);
        fit_aspect(width, height, proposal).unwrap_or(Size::new(width, height))
    }
}

/// Scales `width x height` into the proposal. Returns `None` when neither
/// dimension is constrained. Degenerate content (a zero dimension) measures
/// to zero along the free axis.
fn fit_aspect(width: f64, height: f64, proposal: ProposedSize) -> Option<Size> {
    let scaled_height = |w: f64| {
        if width > 0.0 { w * height / width } else { 0.0 }
    };
    let scaled_width = |h: f64| {
        if height > 0.0 { h * width / height } else { 0.0 }
    };

    match (proposal.width, proposal.height) {
        (Some(w), None) => Some(Size::new(w, scaled_height(w))),
        (None, Some(h)) => Some(Size::new(scaled_width(h), h)),
        (Some(w), Some(h)) => {
            // fit inside both constraints
            let by_width = Size::new(w, scaled_height(w));
            if by_width.height <= h {
                Some(by_width)
            } else {
                Some(Size::new(scaled_width(h), h))
            }
        }
        (None, None) => None,
    }
}
