// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan recognition over the centroid of all active pointers.

use kurbo::Vec2;

use crate::phase::RecognizerPhase;
use crate::pointers::ActivePointers;
use crate::tracker::TranslationTracker;

/// Default movement before a pan activates, in viewport units.
pub const DEFAULT_PAN_SLOP: f64 = 10.0;

/// Pan recognizer tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanConfig {
    /// Centroid movement required to activate.
    pub slop: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            slop: DEFAULT_PAN_SLOP,
        }
    }
}

/// Pan lifecycle events. Translations are totals since the sequence began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The pan activated.
    Began {
        /// Translation at activation, including the slop.
        translation: Vec2,
    },
    /// The centroid moved.
    Changed {
        /// Current total translation.
        translation: Vec2,
    },
    /// All pointers lifted.
    Ended {
        /// Final total translation.
        translation: Vec2,
    },
    /// The sequence was cancelled.
    Cancelled,
}

/// Recognizes pans over the average position of all pointers.
///
/// Adding or lifting a finger moves the centroid; the tracker is rebased then
/// so the reported translation does not jump. Once active the pan stays
/// active until every pointer has lifted.
#[derive(Clone, Debug)]
pub struct PanRecognizer {
    config: PanConfig,
    min_pointers: usize,
    phase: RecognizerPhase,
    tracker: TranslationTracker,
    pointer_count: usize,
}

impl PanRecognizer {
    /// Creates a recognizer needing one pointer to activate.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            min_pointers: 1,
            phase: RecognizerPhase::Idle,
            tracker: TranslationTracker::default(),
            pointer_count: 0,
        }
    }

    /// Sets how many pointers must be down before the pan may activate.
    ///
    /// Takes effect on the next update; an active pan is not affected.
    pub fn set_min_pointers(&mut self, min_pointers: usize) {
        self.min_pointers = min_pointers.max(1);
    }

    /// Pointers required to activate.
    #[must_use]
    pub fn min_pointers(&self) -> usize {
        self.min_pointers
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RecognizerPhase {
        self.phase
    }

    /// Returns `true` once the pan has activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == RecognizerPhase::Active
    }

    /// Last known total translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.tracker.translation().unwrap_or(Vec2::ZERO)
    }

    /// Feeds the pointer set after a touch event was applied to it.
    pub fn update(&mut self, pointers: &ActivePointers) -> Option<PanEvent> {
        let centroid = pointers.centroid()?;
        let count = pointers.len();
        if self.phase == RecognizerPhase::Idle {
            self.tracker.begin(centroid);
            self.pointer_count = count;
            self.phase = RecognizerPhase::Possible;
            return None;
        }
        if count != self.pointer_count {
            self.tracker.rebase(centroid);
            self.pointer_count = count;
        }
        let translation = self.tracker.update(centroid)?;
        match self.phase {
            RecognizerPhase::Possible => {
                if count >= self.min_pointers && translation.hypot() > self.config.slop {
                    self.phase = RecognizerPhase::Active;
                    Some(PanEvent::Began { translation })
                } else {
                    None
                }
            }
            RecognizerPhase::Active => Some(PanEvent::Changed { translation }),
            RecognizerPhase::Idle => None,
        }
    }

    /// Ends the sequence after the last pointer lifted.
    pub fn finish(&mut self) -> Option<PanEvent> {
        let event = self.is_active().then(|| PanEvent::Ended {
            translation: self.translation(),
        });
        self.reset();
        event
    }

    /// Cancels the sequence.
    pub fn cancel(&mut self) -> Option<PanEvent> {
        let event = self.is_active().then_some(PanEvent::Cancelled);
        self.reset();
        event
    }

    /// Returns to idle without reporting anything.
    pub fn reset(&mut self) {
        self.phase = RecognizerPhase::Idle;
        self.tracker.end();
        self.pointer_count = 0;
    }
}
