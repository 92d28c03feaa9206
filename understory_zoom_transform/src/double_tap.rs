// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where a double tap should zoom to.

use kurbo::{Point, Rect, Size, Vec2};

use crate::bounds::BoundsClamper;
use crate::geometry::{ImageGeometry, fitted_size, viewport_aspect};
use crate::limits::ZoomLimits;
use crate::matrix::TransformMatrix;

/// Zoom factor that makes content of `image_aspect` fill the viewport along
/// its short side, but at least `min_screen_zoom`.
///
/// Matching aspects give exactly `min_screen_zoom`.
#[must_use]
pub fn fill_zoom(image_aspect: f64, screen_aspect: f64, min_screen_zoom: f64) -> f64 {
    (image_aspect / screen_aspect)
        .max(screen_aspect / image_aspect)
        .max(min_screen_zoom)
}

/// Target transform for a double tap at `tap` on a matrix-driven viewport.
///
/// `tap` is relative to the viewport centre. A zoomed `committed` transform
/// returns to identity. Otherwise the image zooms in about `tap` to the fill
/// zoom (capped by the limits) with the result corrected into bounds.
///
/// Returns `None` when nothing should happen: the image is unscaled and its
/// geometry is unknown.
#[must_use]
pub fn double_tap_target(
    committed: TransformMatrix,
    tap: Point,
    geometry: Option<&ImageGeometry>,
    clamper: &BoundsClamper,
    limits: &ZoomLimits,
) -> Option<TransformMatrix> {
    if committed.is_scaled() {
        return Some(TransformMatrix::IDENTITY);
    }
    let viewport = clamper.viewport();
    let image_aspect = geometry?.aspect_ratio()?;
    let screen_aspect = viewport_aspect(viewport)?;
    let scale = fill_zoom(image_aspect, screen_aspect, limits.min_screen_zoom)
        .min(limits.max_committed_scale(geometry, viewport));
    let candidate = TransformMatrix::IDENTITY.prepend_pinch(scale, tap, Vec2::ZERO);
    let correction = clamper.correction(candidate, geometry);
    Some(TransformMatrix::IDENTITY.prepend_pinch(scale, tap, correction))
}

/// Rectangle a native zoom surface should zoom to for a double tap at `touch`.
///
/// `touch` is in viewport coordinates. The rectangle is `viewport / zoom` in
/// size, where `zoom` is the fill zoom capped at `max_zoom`. It is placed so
/// the touched point stays under the finger, clamped to the image content.
/// On an axis where the zoomed rectangle would reach into the letterbox bars
/// on both sides, it is centred instead.
///
/// Unknown geometry yields the full viewport rectangle.
#[must_use]
pub fn native_zoom_rect(
    image_aspect: Option<f64>,
    touch: Point,
    viewport: Size,
    min_screen_zoom: f64,
    max_zoom: f64,
) -> Rect {
    let full = viewport.to_rect();
    let (Some(image_aspect), Some(screen_aspect)) = (image_aspect, viewport_aspect(viewport))
    else {
        return full;
    };
    let zoom = fill_zoom(image_aspect, screen_aspect, min_screen_zoom).min(max_zoom);
    let rect_size = Size::new(viewport.width / zoom, viewport.height / zoom);
    let content = fitted_size(image_aspect, viewport);
    let origin = Point::new(
        place_axis(touch.x, zoom, viewport.width, content.width, rect_size.width),
        place_axis(touch.y, zoom, viewport.height, content.height, rect_size.height),
    );
    Rect::from_origin_size(origin, rect_size)
}

fn place_axis(touch: f64, zoom: f64, screen: f64, content: f64, extent: f64) -> f64 {
    let bar = (screen - content) / 2.0;
    let min = bar;
    let max = bar + content - extent;
    if max >= min {
        (touch - touch / zoom).clamp(min, max)
    } else {
        (screen - extent) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(390.0, 844.0);

    #[test]
    fn matching_aspect_uses_min_screen_zoom() {
        assert_eq!(fill_zoom(0.5, 0.5, 2.0), 2.0);
        assert_eq!(fill_zoom(2.0, 0.5, 2.0), 4.0);
        assert_eq!(fill_zoom(0.125, 0.5, 2.0), 4.0);
    }

    #[test]
    fn matching_aspect_image_zooms_to_min_screen_zoom() {
        let clamper = BoundsClamper::new(PHONE);
        let geometry = ImageGeometry::new(390.0, 844.0);
        for tap in [Point::ZERO, Point::new(100.0, 200.0)] {
            let target = double_tap_target(
                TransformMatrix::IDENTITY,
                tap,
                Some(&geometry),
                &clamper,
                &ZoomLimits::default(),
            )
            .unwrap();
            assert_eq!(target.scale, 2.0);
        }
    }

    #[test]
    fn zoomed_returns_to_identity() {
        let clamper = BoundsClamper::new(PHONE);
        let target = double_tap_target(
            TransformMatrix::new(40.0, 0.0, 3.0),
            Point::new(10.0, 10.0),
            None,
            &clamper,
            &ZoomLimits::default(),
        );
        assert_eq!(target, Some(TransformMatrix::IDENTITY));
    }

    #[test]
    fn unknown_geometry_does_nothing_when_unscaled() {
        let clamper = BoundsClamper::new(PHONE);
        let target = double_tap_target(
            TransformMatrix::IDENTITY,
            Point::ZERO,
            None,
            &clamper,
            &ZoomLimits::default(),
        );
        assert_eq!(target, None);
    }

    #[test]
    fn zoom_in_is_capped_and_clamped() {
        let viewport = Size::new(400.0, 800.0);
        let clamper = BoundsClamper::new(viewport);
        let geometry = ImageGeometry::new(800.0, 400.0);
        // Tap near the right edge: fill zoom 4 = max(800/400 * 2); the image
        // is 1600 wide at 4x, so x may travel 600.
        let target = double_tap_target(
            TransformMatrix::IDENTITY,
            Point::new(190.0, 0.0),
            Some(&geometry),
            &clamper,
            &ZoomLimits::default(),
        )
        .unwrap();
        assert_eq!(target.scale, 4.0);
        assert_eq!(target.translation, Vec2::new(-570.0, 0.0));
        let far = double_tap_target(
            TransformMatrix::IDENTITY,
            Point::new(-300.0, 50.0),
            Some(&geometry),
            &clamper,
            &ZoomLimits::default(),
        )
        .unwrap();
        // Unclamped would be (900, -150): both axes pull back into bounds.
        assert_eq!(far.translation, Vec2::new(600.0, 0.0));
    }

    #[test]
    fn native_rect_keeps_touch_and_centres_letterboxed_axis() {
        let viewport = Size::new(400.0, 800.0);
        let rect = native_zoom_rect(Some(2.0), Point::new(200.0, 400.0), viewport, 2.0, 3.0);
        let expected_w = 400.0 / 3.0;
        let expected_h = 800.0 / 3.0;
        assert!((rect.width() - expected_w).abs() < 1e-9);
        assert!((rect.height() - expected_h).abs() < 1e-9);
        assert!((rect.x0 - (200.0 - 200.0 / 3.0)).abs() < 1e-9);
        // Content is only 200 tall: the rect cannot stay inside it, so centre.
        assert!((rect.y0 - (400.0 - expected_h / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn native_rect_clamps_into_content() {
        let viewport = Size::new(400.0, 800.0);
        // Square content: 400x400 with 200px bars above and below.
        let rect = native_zoom_rect(Some(1.0), Point::new(0.0, 790.0), viewport, 2.0, 3.0);
        assert_eq!(rect, Rect::new(0.0, 200.0, 200.0, 600.0));
    }

    #[test]
    fn native_rect_without_geometry_is_full() {
        let viewport = Size::new(400.0, 800.0);
        let rect = native_zoom_rect(None, Point::new(10.0, 10.0), viewport, 2.0, 3.0);
        assert_eq!(rect, viewport.to_rect());
    }
}
