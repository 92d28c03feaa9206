// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a zoomed image inside the viewport.

use kurbo::{Size, Vec2};

use crate::geometry::{ImageGeometry, fitted_size};
use crate::matrix::TransformMatrix;

/// Computes the translation correction that keeps a transformed image
/// covering the viewport.
///
/// For each axis the image may travel at most
/// `max(0, (scaled_extent - viewport_extent) / 2)` away from centre. An image
/// smaller than the viewport on an axis is therefore pinned to the centre on
/// that axis; a larger one may pan until its edge meets the viewport edge.
///
/// The clamper answers with a *delta* rather than a clamped transform, so
/// callers can fold the correction into whichever translation channel
/// produced the overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsClamper {
    viewport: Size,
}

impl BoundsClamper {
    /// Creates a clamper for the given viewport size.
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self { viewport }
    }

    /// The viewport this clamper was built for.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// On-screen size of content with `aspect` at the given `scale`.
    #[must_use]
    pub fn scaled_size(&self, aspect: f64, scale: f64) -> Size {
        fitted_size(aspect, self.viewport) * scale
    }

    /// Maximum distance from centre the content may travel on each axis.
    #[must_use]
    pub fn pan_distance(&self, aspect: f64, scale: f64) -> Vec2 {
        let scaled = self.scaled_size(aspect, scale);
        Vec2::new(
            ((scaled.width - self.viewport.width) / 2.0).max(0.0),
            ((scaled.height - self.viewport.height) / 2.0).max(0.0),
        )
    }

    /// Returns the translation delta to add to `candidate` so it stays in
    /// bounds.
    ///
    /// Unknown or degenerate geometry, a degenerate viewport, or a non-finite
    /// candidate all yield a zero correction.
    #[must_use]
    pub fn correction(
        &self,
        candidate: TransformMatrix,
        geometry: Option<&ImageGeometry>,
    ) -> Vec2 {
        let Some(aspect) = geometry.and_then(ImageGeometry::aspect_ratio) else {
            return Vec2::ZERO;
        };
        let viewport = self.viewport;
        if !candidate.is_finite()
            || !viewport.is_finite()
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Vec2::ZERO;
        }
        let limit = self.pan_distance(aspect, candidate.scale);
        let t = candidate.translation;
        Vec2::new(
            t.x.clamp(-limit.x, limit.x) - t.x,
            t.y.clamp(-limit.y, limit.y) - t.y,
        )
    }

    /// Returns `candidate` with [`correction`](Self::correction) applied.
    #[must_use]
    pub fn clamp(
        &self,
        candidate: TransformMatrix,
        geometry: Option<&ImageGeometry>,
    ) -> TransformMatrix {
        TransformMatrix {
            translation: candidate.translation + self.correction(candidate, geometry),
            scale: candidate.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(390.0, 844.0);
    const LANDSCAPE: ImageGeometry = ImageGeometry::new(1000.0, 500.0);

    #[test]
    fn unscaled_landscape_cannot_pan() {
        let clamper = BoundsClamper::new(PHONE);
        let d = clamper.correction(TransformMatrix::new(500.0, 0.0, 1.0), Some(&LANDSCAPE));
        assert_eq!(d, Vec2::new(-500.0, 0.0));
    }

    #[test]
    fn scaled_image_pans_until_edge() {
        let clamper = BoundsClamper::new(PHONE);
        // Fitted 390x195; at 4x it is 1560x780: x may travel 585, y stays pinned.
        let limit = clamper.pan_distance(2.0, 4.0);
        assert_eq!(limit, Vec2::new(585.0, 0.0));
        let d = clamper.correction(TransformMatrix::new(600.0, 30.0, 4.0), Some(&LANDSCAPE));
        assert_eq!(d, Vec2::new(-15.0, -30.0));
        let inside = TransformMatrix::new(-200.0, 0.0, 4.0);
        assert_eq!(clamper.correction(inside, Some(&LANDSCAPE)), Vec2::ZERO);
    }

    #[test]
    fn clamp_applies_correction() {
        let clamper = BoundsClamper::new(PHONE);
        let clamped = clamper.clamp(TransformMatrix::new(-900.0, 0.0, 4.0), Some(&LANDSCAPE));
        assert_eq!(clamped, TransformMatrix::new(-585.0, 0.0, 4.0));
    }

    #[test]
    fn unknown_geometry_is_unbounded() {
        let clamper = BoundsClamper::new(PHONE);
        let far = TransformMatrix::new(10_000.0, -10_000.0, 1.0);
        assert_eq!(clamper.correction(far, None), Vec2::ZERO);
        let flat = ImageGeometry::new(1000.0, 0.0);
        assert_eq!(clamper.correction(far, Some(&flat)), Vec2::ZERO);
    }

    #[test]
    fn degenerate_viewport_is_unbounded() {
        let clamper = BoundsClamper::new(Size::ZERO);
        let far = TransformMatrix::new(50.0, 50.0, 2.0);
        assert_eq!(clamper.correction(far, Some(&LANDSCAPE)), Vec2::ZERO);
    }
}
