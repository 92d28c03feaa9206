// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image dimensions and aspect-fit layout.

use kurbo::Size;

/// Natural (pixel) dimensions of the displayed image.
///
/// Geometry is often unknown when a page first appears (the image is still
/// loading); callers model that as `Option<ImageGeometry>` and every consumer
/// in this crate degrades gracefully on `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageGeometry {
    /// Natural width and height of the image.
    pub natural_size: Size,
}

impl ImageGeometry {
    /// Creates geometry from natural width and height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            natural_size: Size::new(width, height),
        }
    }

    /// Creates geometry once both dimensions are known.
    #[must_use]
    pub fn from_dimensions(width: Option<f64>, height: Option<f64>) -> Option<Self> {
        Some(Self::new(width?, height?))
    }

    /// Width divided by height, or `None` if the ratio is zero, negative,
    /// infinite or NaN.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        aspect_of(self.natural_size)
    }
}

/// Width divided by height of the viewport, or `None` for a degenerate
/// viewport.
#[must_use]
pub fn viewport_aspect(viewport: Size) -> Option<f64> {
    aspect_of(viewport)
}

/// Size of content with the given aspect ratio laid out "aspect-fit" inside
/// `viewport`: as large as possible while fully visible.
#[must_use]
pub fn fitted_size(aspect: f64, viewport: Size) -> Size {
    let Some(screen_aspect) = viewport_aspect(viewport) else {
        return Size::ZERO;
    };
    if aspect > screen_aspect {
        Size::new(viewport.width, viewport.width / aspect)
    } else {
        Size::new(viewport.height * aspect, viewport.height)
    }
}

fn aspect_of(size: Size) -> Option<f64> {
    let aspect = size.width / size.height;
    (aspect.is_finite() && aspect > 0.0).then_some(aspect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_aspects_are_rejected() {
        assert_eq!(ImageGeometry::new(0.0, 100.0).aspect_ratio(), None);
        assert_eq!(ImageGeometry::new(100.0, 0.0).aspect_ratio(), None);
        assert_eq!(ImageGeometry::new(f64::NAN, 10.0).aspect_ratio(), None);
        assert_eq!(ImageGeometry::new(-4.0, 2.0).aspect_ratio(), None);
        assert_eq!(ImageGeometry::new(1000.0, 500.0).aspect_ratio(), Some(2.0));
    }

    #[test]
    fn from_dimensions_needs_both() {
        assert_eq!(ImageGeometry::from_dimensions(Some(10.0), None), None);
        assert_eq!(
            ImageGeometry::from_dimensions(Some(10.0), Some(20.0)),
            Some(ImageGeometry::new(10.0, 20.0))
        );
    }

    #[test]
    fn landscape_content_fills_width() {
        let size = fitted_size(2.0, Size::new(390.0, 844.0));
        assert_eq!(size, Size::new(390.0, 195.0));
    }

    #[test]
    fn tall_content_fills_height() {
        let size = fitted_size(0.25, Size::new(390.0, 844.0));
        assert_eq!(size, Size::new(211.0, 844.0));
    }

    #[test]
    fn degenerate_viewport_fits_nothing() {
        assert_eq!(fitted_size(1.0, Size::new(0.0, 0.0)), Size::ZERO);
    }
}
