// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-or-more finger pinch recognition.

use kurbo::Point;

use crate::phase::RecognizerPhase;
use crate::pointers::ActivePointers;

/// Default span change before a pinch activates, in viewport units.
pub const DEFAULT_PINCH_SPAN_SLOP: f64 = 8.0;

/// Spans at or below this are too small to divide by.
const MIN_SPAN: f64 = 1e-6;

/// Pinch recognizer tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinchConfig {
    /// Change in average finger span required to activate.
    pub span_slop: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            span_slop: DEFAULT_PINCH_SPAN_SLOP,
        }
    }
}

/// Pinch lifecycle events.
///
/// `scale` is relative to the finger span when the second finger landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchEvent {
    /// The pinch activated.
    Began {
        /// Focal point (finger centroid) at activation, in viewport coordinates.
        origin: Point,
        /// Scale at activation.
        scale: f64,
    },
    /// The span or focal point changed.
    Changed {
        /// Current scale.
        scale: f64,
        /// Current focal point.
        focal: Point,
    },
    /// Fewer than two fingers remain, or all lifted.
    Ended {
        /// Final scale.
        scale: f64,
    },
    /// The sequence was cancelled.
    Cancelled,
}

/// Recognizes pinches from the average span of all pointers.
///
/// The pinch ends as soon as fewer than two pointers remain, so within one
/// touch sequence it always ends before a simultaneous pan does.
#[derive(Clone, Debug)]
pub struct PinchRecognizer {
    config: PinchConfig,
    phase: RecognizerPhase,
    start_span: f64,
    scale: f64,
    pointer_count: usize,
}

impl PinchRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            phase: RecognizerPhase::Idle,
            start_span: 0.0,
            scale: 1.0,
            pointer_count: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RecognizerPhase {
        self.phase
    }

    /// Returns `true` once the pinch has activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == RecognizerPhase::Active
    }

    /// Last reported scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Feeds the pointer set after a touch event was applied to it.
    pub fn update(&mut self, pointers: &ActivePointers) -> Option<PinchEvent> {
        let (Some(span), Some(focal)) = (pointers.span(), pointers.centroid()) else {
            // Fewer than two pointers.
            return if self.is_active() {
                let event = PinchEvent::Ended { scale: self.scale };
                self.reset();
                Some(event)
            } else {
                self.reset();
                None
            };
        };
        let count = pointers.len();
        if self.phase == RecognizerPhase::Idle {
            self.start_span = span;
            self.scale = 1.0;
            self.pointer_count = count;
            self.phase = RecognizerPhase::Possible;
            return None;
        }
        if count != self.pointer_count {
            // Keep the scale continuous across a finger joining or leaving.
            self.start_span = span / self.scale;
            self.pointer_count = count;
        }
        if self.start_span <= MIN_SPAN {
            self.start_span = span;
            return None;
        }
        let scale = span / self.start_span;
        match self.phase {
            RecognizerPhase::Possible => {
                if (span - self.start_span).abs() > self.config.span_slop {
                    self.phase = RecognizerPhase::Active;
                    self.scale = scale;
                    log::trace!("pinch began at {focal:?}, scale {scale:.3}");
                    Some(PinchEvent::Began {
                        origin: focal,
                        scale,
                    })
                } else {
                    None
                }
            }
            RecognizerPhase::Active => {
                self.scale = scale;
                Some(PinchEvent::Changed { scale, focal })
            }
            RecognizerPhase::Idle => None,
        }
    }

    /// Ends the sequence after the last pointer lifted.
    pub fn finish(&mut self) -> Option<PinchEvent> {
        let event = self
            .is_active()
            .then_some(PinchEvent::Ended { scale: self.scale });
        self.reset();
        event
    }

    /// Cancels the sequence.
    pub fn cancel(&mut self) -> Option<PinchEvent> {
        let event = self.is_active().then_some(PinchEvent::Cancelled);
        self.reset();
        event
    }

    /// Returns to idle without reporting anything.
    pub fn reset(&mut self) {
        self.phase = RecognizerPhase::Idle;
        self.start_span = 0.0;
        self.scale = 1.0;
        self.pointer_count = 0;
    }
}
