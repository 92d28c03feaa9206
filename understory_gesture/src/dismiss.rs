// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The swipe-to-dismiss contract between a viewer page and its parent.
//!
//! The parent (the pager or modal hosting the page) owns the dismiss gesture
//! and decides what dismissal means. The page only arbitrates: it asks the
//! gesture whether it wants the touch sequence and forwards the sequence to it
//! when it wins.

use kurbo::Vec2;

/// Default vertical movement that activates the dismiss swipe.
pub const DEFAULT_DISMISS_ACTIVE_OFFSET_Y: f64 = 10.0;
/// Default horizontal movement that rules the dismiss swipe out.
pub const DEFAULT_DISMISS_FAIL_OFFSET_X: f64 = 10.0;

/// State of the page that gestures may depend on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureContext {
    /// Whether the image is currently zoomed.
    pub is_scaled: bool,
}

/// Answer of an activation predicate for the current touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Not decided yet.
    Pending,
    /// Claim the sequence.
    Activate,
    /// Give up on the sequence.
    Fail,
}

/// Dismiss swipe lifecycle events. Translations are relative to where the
/// first finger touched down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DismissEvent {
    /// The swipe won arbitration.
    Began {
        /// Translation at activation.
        translation: Vec2,
    },
    /// The finger moved.
    Changed {
        /// Current translation.
        translation: Vec2,
    },
    /// The finger lifted.
    Ended {
        /// Final translation.
        translation: Vec2,
    },
    /// The sequence was cancelled.
    Cancelled,
}

/// A dismiss gesture supplied by the parent.
pub trait DismissGesture: Send {
    /// Whether the gesture may compete at all. By default it only runs while
    /// the image is unzoomed, so it never fights a pan.
    fn is_enabled(&self, context: &GestureContext) -> bool {
        !context.is_scaled
    }

    /// Activation predicate, evaluated on every event until the sequence is
    /// decided.
    fn activation(&self, translation: Vec2, pointer_count: usize) -> Activation;

    /// Receives the sequence after the gesture won.
    fn on_event(&mut self, event: DismissEvent);
}

/// Thresholds for [`VerticalDismissSwipe`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DismissConfig {
    /// Vertical movement (either direction) that activates.
    pub active_offset_y: f64,
    /// Horizontal movement (either direction) that fails.
    pub fail_offset_x: f64,
    /// More pointers than this fails.
    pub max_pointers: usize,
}

impl Default for DismissConfig {
    fn default() -> Self {
        Self {
            active_offset_y: DEFAULT_DISMISS_ACTIVE_OFFSET_Y,
            fail_offset_x: DEFAULT_DISMISS_FAIL_OFFSET_X,
            max_pointers: 1,
        }
    }
}

/// One-finger vertical swipe, the usual "drag the photo away" gesture.
///
/// This implementation only records what happened; the parent polls
/// [`translation`](Self::translation) to drive its own animation and
/// [`take_release`](Self::take_release) to decide whether to close.
#[derive(Clone, Debug, Default)]
pub struct VerticalDismissSwipe {
    config: DismissConfig,
    translation: Vec2,
    active: bool,
    release: Option<Vec2>,
}

impl VerticalDismissSwipe {
    /// Creates a swipe with the given thresholds.
    #[must_use]
    pub fn new(config: DismissConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current translation while active, zero otherwise.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Returns `true` while the swipe owns the touch sequence.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Takes the translation at the last release, if any.
    pub fn take_release(&mut self) -> Option<Vec2> {
        self.release.take()
    }
}

impl DismissGesture for VerticalDismissSwipe {
    fn activation(&self, translation: Vec2, pointer_count: usize) -> Activation {
        if pointer_count > self.config.max_pointers
            || translation.x.abs() > self.config.fail_offset_x
        {
            Activation::Fail
        } else if translation.y.abs() > self.config.active_offset_y {
            Activation::Activate
        } else {
            Activation::Pending
        }
    }

    fn on_event(&mut self, event: DismissEvent) {
        match event {
            DismissEvent::Began { translation } | DismissEvent::Changed { translation } => {
                self.active = true;
                self.translation = translation;
            }
            DismissEvent::Ended { translation } => {
                self.active = false;
                self.translation = Vec2::ZERO;
                self.release = Some(translation);
            }
            DismissEvent::Cancelled => {
                self.active = false;
                self.translation = Vec2::ZERO;
            }
        }
    }
}
