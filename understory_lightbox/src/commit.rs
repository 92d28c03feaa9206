// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed transform plus the in-flight contributions of live gestures.
//!
//! While fingers are down, pan and pinch each own an ephemeral channel. The
//! rendered transform is always
//! `identity ∘ pan ∘ pinch ∘ committed`. When a gesture ends its channel is
//! folded into the committed transform, rounded, and reset to neutral, so the
//! rendered image does not move at the hand-off.

use kurbo::{Point, Vec2};
use understory_zoom_transform::TransformMatrix;

/// In-flight pinch contribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchState {
    /// Pinch origin, relative to the viewport centre.
    pub origin: Point,
    /// Incremental scale on top of the committed scale.
    pub scale: f64,
    /// Accumulated bounds corrections applied during the pinch.
    pub translation: Vec2,
}

impl PinchState {
    /// No pinch in progress.
    pub const NEUTRAL: Self = Self {
        origin: Point::ZERO,
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    /// Returns `true` if this state renders as no pinch at all.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.scale == 1.0 && self.translation == Vec2::ZERO
    }
}

impl Default for PinchState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// In-flight pan contribution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
    /// Gesture translation plus the latest bounds correction.
    pub translation: Vec2,
}

impl PanState {
    /// No pan in progress.
    pub const NEUTRAL: Self = Self {
        translation: Vec2::ZERO,
    };
}

/// The rendered transform for the given committed and ephemeral state.
#[must_use]
pub fn compose(pan: PanState, pinch: PinchState, committed: TransformMatrix) -> TransformMatrix {
    TransformMatrix::IDENTITY
        .prepend_pan(pan.translation)
        .prepend_pinch(pinch.scale, pinch.origin, pinch.translation)
        .prepend_transform(committed)
}

/// Owner of the committed transform and both ephemeral channels.
#[derive(Clone, Debug, Default)]
pub struct CommitProtocol {
    committed: TransformMatrix,
    pinch: PinchState,
    pan: PanState,
}

impl CommitProtocol {
    /// Starts at identity with no gesture in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed transform.
    #[must_use]
    pub fn committed(&self) -> TransformMatrix {
        self.committed
    }

    /// The in-flight pinch.
    #[must_use]
    pub fn pinch(&self) -> PinchState {
        self.pinch
    }

    /// The in-flight pan.
    #[must_use]
    pub fn pan(&self) -> PanState {
        self.pan
    }

    /// The transform to render this frame.
    #[must_use]
    pub fn render(&self) -> TransformMatrix {
        compose(self.pan, self.pinch, self.committed)
    }

    /// Zoom flag: either the committed or the in-flight pinch scale is not 1.
    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.committed.is_scaled() || self.pinch.scale != 1.0
    }

    /// Starts a pinch about `origin` (relative to the viewport centre).
    pub fn begin_pinch(&mut self, origin: Point) {
        self.pinch = PinchState {
            origin,
            ..PinchState::NEUTRAL
        };
    }

    /// Updates the in-flight pinch.
    pub fn set_pinch(&mut self, scale: f64, translation: Vec2) {
        self.pinch.scale = scale;
        self.pinch.translation = translation;
    }

    /// Updates the in-flight pan.
    pub fn set_pan(&mut self, translation: Vec2) {
        self.pan.translation = translation;
    }

    /// Folds the pinch into the committed transform and resets it.
    pub fn commit_pinch(&mut self) -> TransformMatrix {
        let pinch = self.pinch;
        self.committed = TransformMatrix::IDENTITY
            .prepend_pinch(pinch.scale, pinch.origin, pinch.translation)
            .prepend_transform(self.committed)
            .rounded();
        self.pinch = PinchState::NEUTRAL;
        log::debug!("committed pinch: {:?}", self.committed);
        self.committed
    }

    /// Folds the pan into the committed transform and resets it.
    pub fn commit_pan(&mut self) -> TransformMatrix {
        self.committed = TransformMatrix::IDENTITY
            .prepend_pan(self.pan.translation)
            .prepend_transform(self.committed)
            .rounded();
        self.pan = PanState::NEUTRAL;
        log::debug!("committed pan: {:?}", self.committed);
        self.committed
    }

    /// Drops the in-flight pinch without committing it.
    pub fn cancel_pinch(&mut self) {
        self.pinch = PinchState::NEUTRAL;
    }

    /// Drops the in-flight pan without committing it.
    pub fn cancel_pan(&mut self) {
        self.pan = PanState::NEUTRAL;
    }

    /// Drops both channels. The committed transform is untouched.
    pub fn cancel(&mut self) {
        self.cancel_pinch();
        self.cancel_pan();
    }

    /// Replaces the committed transform, for animations and resets.
    pub fn replace_committed(&mut self, committed: TransformMatrix) {
        self.committed = committed;
    }
}
