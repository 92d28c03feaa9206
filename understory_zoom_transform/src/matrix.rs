// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale + translate transform and its composers.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Affine, Point, Vec2};

/// Number of rounding steps per unit used by [`TransformMatrix::rounded`].
///
/// Components snap to multiples of `1 / ROUNDING_STEPS` (one thousandth).
pub const ROUNDING_STEPS: f64 = 1000.0;

/// A uniform scale followed by a translation.
///
/// The transform maps a layout point `p` (relative to the viewport centre) to
/// `p * scale + translation`. This is the restricted affine form an image
/// viewer needs: no rotation, no skew, and the same scale on both axes.
///
/// All composers are pure; they return a new value and leave `self` alone.
/// `prepend_*` methods follow matrix-product order: `t.prepend_x(..)` is
/// `t ∘ x`, so `x` is applied first, in `t`'s local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformMatrix {
    /// Translation in screen units, applied after scaling.
    pub translation: Vec2,
    /// Uniform scale factor. `1.0` means "aspect-fit, no zoom".
    pub scale: f64,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformMatrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from its three components.
    #[must_use]
    pub const fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translation: Vec2::new(translate_x, translate_y),
            scale,
        }
    }

    /// Horizontal translation.
    #[must_use]
    pub fn translate_x(self) -> f64 {
        self.translation.x
    }

    /// Vertical translation.
    #[must_use]
    pub fn translate_y(self) -> f64 {
        self.translation.y
    }

    /// Returns `true` if the scale differs from `1.0`.
    #[must_use]
    pub fn is_scaled(self) -> bool {
        self.scale != 1.0
    }

    /// Returns `true` if all components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.translation.is_finite() && self.scale.is_finite()
    }

    /// Prepends a translation by `delta`, expressed in this transform's local
    /// (pre-scale) units.
    #[must_use]
    pub fn prepend_translate(self, delta: Vec2) -> Self {
        Self {
            translation: self.translation + delta * self.scale,
            scale: self.scale,
        }
    }

    /// Prepends a uniform scale by `factor`.
    #[must_use]
    pub fn prepend_scale(self, factor: f64) -> Self {
        Self {
            translation: self.translation,
            scale: self.scale * factor,
        }
    }

    /// Prepends a pan gesture's translation.
    #[must_use]
    pub fn prepend_pan(self, translation: Vec2) -> Self {
        self.prepend_translate(translation)
    }

    /// Prepends a pinch: scale by `scale` about `origin`, then shift by
    /// `translation`.
    ///
    /// Applied to the identity this yields
    /// `t = origin * (1 - scale) + translation` and `scale = scale`, so the
    /// point under `origin` stays fixed apart from `translation`.
    #[must_use]
    pub fn prepend_pinch(self, scale: f64, origin: Point, translation: Vec2) -> Self {
        let origin = origin.to_vec2();
        self.prepend_translate(translation)
            .prepend_translate(origin)
            .prepend_scale(scale)
            .prepend_translate(-origin)
    }

    /// Prepends another transform, so that `other` is applied first.
    #[must_use]
    pub fn prepend_transform(self, other: Self) -> Self {
        Self {
            translation: self.translation + other.translation * self.scale,
            scale: self.scale * other.scale,
        }
    }

    /// Snaps every component onto the `1 / ROUNDING_STEPS` grid.
    ///
    /// Idempotent. Repeated commits accumulate rounding drift without this,
    /// and a scale of `0.9999` would otherwise never read as unscaled.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            round_component(self.translation.x),
            round_component(self.translation.y),
            round_component(self.scale),
        )
    }

    /// Maps a layout point (relative to the viewport centre) to screen space,
    /// still relative to the viewport centre.
    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        (point.to_vec2() * self.scale + self.translation).to_point()
    }

    /// Converts to an [`Affine`] in viewport coordinates.
    ///
    /// `center` is the viewport centre the transform is expressed relative to.
    /// The result is what a renderer applies to the aspect-fit, centred image
    /// layer.
    #[must_use]
    pub fn to_affine(self, center: Point) -> Affine {
        let center = center.to_vec2();
        Affine::translate(center + self.translation)
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

fn round_component(value: f64) -> f64 {
    (value * ROUNDING_STEPS).round() / ROUNDING_STEPS
}
