// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale limits for pinch and double-tap zoom.

use kurbo::Size;

use crate::geometry::{ImageGeometry, fitted_size};

/// Smallest committed scale; zooming out past aspect-fit is not allowed.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;

/// Minimum zoom the viewer always offers, however small the image.
pub const DEFAULT_MIN_SCREEN_ZOOM: f64 = 2.0;

/// How far past the image's natural resolution zoom may go.
pub const DEFAULT_MAX_ORIGINAL_ZOOM: f64 = 2.0;

/// Bounds on the committed scale.
///
/// The upper bound depends on the image: zoom stops at
/// `max_original_zoom` times the natural resolution, but never below
/// `min_screen_zoom` so that small images can still be magnified.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomLimits {
    /// Smallest allowed committed scale.
    pub min_scale: f64,
    /// Floor of the upper scale bound.
    pub min_screen_zoom: f64,
    /// Multiple of natural resolution the upper bound allows.
    pub max_original_zoom: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            min_screen_zoom: DEFAULT_MIN_SCREEN_ZOOM,
            max_original_zoom: DEFAULT_MAX_ORIGINAL_ZOOM,
        }
    }
}

impl ZoomLimits {
    /// Largest committed scale for this image in this viewport.
    ///
    /// Returns `f64::INFINITY` while geometry is unknown or degenerate.
    #[must_use]
    pub fn max_committed_scale(&self, geometry: Option<&ImageGeometry>, viewport: Size) -> f64 {
        let Some(geometry) = geometry else {
            return f64::INFINITY;
        };
        let Some(aspect) = geometry.aspect_ratio() else {
            return f64::INFINITY;
        };
        let fitted = fitted_size(aspect, viewport);
        if fitted.width <= 0.0 {
            return f64::INFINITY;
        }
        let natural = geometry.natural_size.width / fitted.width * self.max_original_zoom;
        natural.max(self.min_screen_zoom)
    }

    /// Range of incremental pinch factors allowed on top of `committed_scale`.
    ///
    /// The committed scale times any factor in the range stays within
    /// `[min_scale, max_committed]`.
    #[must_use]
    pub fn pinch_range(&self, committed_scale: f64, max_committed: f64) -> (f64, f64) {
        (
            self.min_scale / committed_scale,
            max_committed / committed_scale,
        )
    }

    /// Clamps a raw pinch factor so the resulting scale respects the limits.
    ///
    /// Non-finite or non-positive input is treated as "no change" (`1.0`).
    #[must_use]
    pub fn clamp_pinch_scale(
        &self,
        raw: f64,
        committed_scale: f64,
        geometry: Option<&ImageGeometry>,
        viewport: Size,
    ) -> f64 {
        if !raw.is_finite() || raw <= 0.0 || !committed_scale.is_finite() || committed_scale <= 0.0
        {
            return 1.0;
        }
        let max_committed = self.max_committed_scale(geometry, viewport);
        let (lo, hi) = self.pinch_range(committed_scale, max_committed);
        // Not `clamp`: the range is inverted when `min_scale` exceeds the max.
        raw.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(390.0, 844.0);

    #[test]
    fn max_scale_follows_natural_resolution() {
        let limits = ZoomLimits::default();
        let geometry = ImageGeometry::new(1000.0, 500.0);
        let max = limits.max_committed_scale(Some(&geometry), PHONE);
        assert!((max - 1000.0 / 390.0 * 2.0).abs() < 1e-12, "max was {max}");
    }

    #[test]
    fn small_images_still_reach_min_screen_zoom() {
        let limits = ZoomLimits::default();
        let thumb = ImageGeometry::new(100.0, 50.0);
        assert_eq!(limits.max_committed_scale(Some(&thumb), PHONE), 2.0);
    }

    #[test]
    fn unknown_geometry_has_no_upper_bound() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.max_committed_scale(None, PHONE), f64::INFINITY);
        assert_eq!(limits.clamp_pinch_scale(40.0, 1.0, None, PHONE), 40.0);
        assert_eq!(limits.clamp_pinch_scale(0.2, 1.0, None, PHONE), 1.0);
    }

    #[test]
    fn pinch_factor_is_relative_to_committed_scale() {
        let limits = ZoomLimits::default();
        let geometry = ImageGeometry::new(1000.0, 500.0);
        // Already at 2x: zooming out may only halve, zooming in stops at the max.
        let out = limits.clamp_pinch_scale(0.1, 2.0, Some(&geometry), PHONE);
        assert_eq!(out, 0.5);
        let max = limits.max_committed_scale(Some(&geometry), PHONE);
        let inward = limits.clamp_pinch_scale(10.0, 2.0, Some(&geometry), PHONE);
        assert!((inward * 2.0 - max).abs() < 1e-12);
    }

    #[test]
    fn garbage_factor_is_neutral() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.clamp_pinch_scale(f64::NAN, 1.0, None, PHONE), 1.0);
        assert_eq!(limits.clamp_pinch_scale(-3.0, 1.0, None, PHONE), 1.0);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let limits = ZoomLimits {
            min_scale: 3.0,
            ..ZoomLimits::default()
        };
        let geometry = ImageGeometry::new(100.0, 50.0);
        // min_scale above the image's max: the upper bound wins.
        let factor = limits.clamp_pinch_scale(1.5, 1.0, Some(&geometry), PHONE);
        assert_eq!(factor, 2.0);
    }
}
