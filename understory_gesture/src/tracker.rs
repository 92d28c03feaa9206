// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation tracking for a moving anchor (one pointer or a centroid).
//!
//! ## Usage
//!
//! 1) Call [`TranslationTracker::begin`] with the anchor's position when the
//!    touch sequence starts.
//! 2) On each move, call [`TranslationTracker::update`]; it returns the total
//!    translation since `begin`.
//! 3) When the anchor jumps for reasons that are not movement (a finger was
//!    added or lifted, so the centroid moved), call
//!    [`TranslationTracker::rebase`] with the new anchor position. The total
//!    translation carries over unchanged.
//! 4) Call [`TranslationTracker::end`] when the sequence finishes.

use kurbo::{Point, Vec2};

/// Total-translation tracker with rebasing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranslationTracker {
    start: Option<Point>,
    last: Option<Point>,
}

impl TranslationTracker {
    /// Starts tracking from `pos`.
    pub fn begin(&mut self, pos: Point) {
        self.start = Some(pos);
        self.last = Some(pos);
    }

    /// Records a new anchor position and returns the total translation.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start?;
        self.last = Some(pos);
        Some(pos - start)
    }

    /// Moves the anchor to `pos` without changing the total translation.
    pub fn rebase(&mut self, pos: Point) {
        let total = self.translation().unwrap_or(Vec2::ZERO);
        self.start = Some(pos - total);
        self.last = Some(pos);
    }

    /// Total translation at the last recorded position.
    #[must_use]
    pub fn translation(&self) -> Option<Vec2> {
        Some(self.last? - self.start?)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start = None;
        self.last = None;
    }

    /// Returns `true` between `begin` and `end`.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let mut tracker = TranslationTracker::default();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.update(Point::new(5.0, 5.0)), None);
        assert_eq!(tracker.translation(), None);
    }

    #[test]
    fn update_reports_total_not_delta() {
        let mut tracker = TranslationTracker::default();
        tracker.begin(Point::new(10.0, 20.0));
        assert_eq!(tracker.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(tracker.update(Point::new(20.0, 20.0)), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(tracker.translation(), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn rebase_keeps_translation_continuous() {
        let mut tracker = TranslationTracker::default();
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(Point::new(30.0, 0.0));
        // A second finger lands; the centroid jumps to (80, 40).
        tracker.rebase(Point::new(80.0, 40.0));
        assert_eq!(tracker.translation(), Some(Vec2::new(30.0, 0.0)));
        assert_eq!(tracker.update(Point::new(90.0, 40.0)), Some(Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn end_resets() {
        let mut tracker = TranslationTracker::default();
        tracker.begin(Point::ZERO);
        tracker.end();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.translation(), None);
    }
}
