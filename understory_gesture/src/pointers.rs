// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input and the set of pointers currently down.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Identifies one finger for the duration of its contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// One pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Which pointer this sample belongs to.
    pub id: PointerId,
    /// Position in viewport coordinates.
    pub position: Point,
    /// Timestamp in milliseconds from an arbitrary monotonic epoch.
    pub time_ms: u64,
}

impl TouchPoint {
    /// Creates a sample.
    #[must_use]
    pub const fn new(id: u64, position: Point, time_ms: u64) -> Self {
        Self {
            id: PointerId(id),
            position,
            time_ms,
        }
    }
}

/// A raw touch event, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    /// A pointer touched down.
    Down(TouchPoint),
    /// A pointer moved.
    Move(TouchPoint),
    /// A pointer lifted.
    Up(TouchPoint),
    /// The system took the touch sequence away (incoming call, scroll parent, ...).
    Cancel {
        /// When the cancellation happened.
        time_ms: u64,
    },
}

impl TouchEvent {
    /// Timestamp of the event.
    #[must_use]
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => p.time_ms,
            Self::Cancel { time_ms } => *time_ms,
        }
    }

    /// The pointer sample carried by the event, if any.
    #[must_use]
    pub fn point(&self) -> Option<&TouchPoint> {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => Some(p),
            Self::Cancel { .. } => None,
        }
    }
}

/// Pointers currently in contact, in touch-down order.
#[derive(Clone, Debug, Default)]
pub struct ActivePointers {
    pointers: SmallVec<[(PointerId, Point); 4]>,
}

impl ActivePointers {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event to the set.
    ///
    /// A `Down` for an id already present replaces its position; a `Move` for
    /// an unknown id is ignored; `Cancel` clears everything.
    pub fn apply(&mut self, event: &TouchEvent) {
        match event {
            TouchEvent::Down(p) => {
                if let Some(slot) = self.slot_mut(p.id) {
                    *slot = p.position;
                } else {
                    self.pointers.push((p.id, p.position));
                }
            }
            TouchEvent::Move(p) => {
                if let Some(slot) = self.slot_mut(p.id) {
                    *slot = p.position;
                }
            }
            TouchEvent::Up(p) => self.pointers.retain(|(id, _)| *id != p.id),
            TouchEvent::Cancel { .. } => self.pointers.clear(),
        }
    }

    /// Number of pointers down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` if no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Position of the given pointer.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, pos)| *pos)
    }

    /// The earliest pointer still down.
    #[must_use]
    pub fn primary(&self) -> Option<(PointerId, Point)> {
        self.pointers.first().copied()
    }

    /// Average position of all pointers.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.pointers.is_empty() {
            return None;
        }
        let sum = self
            .pointers
            .iter()
            .fold(Vec2::ZERO, |acc, (_, pos)| acc + pos.to_vec2());
        Some((sum / self.pointers.len() as f64).to_point())
    }

    /// Average distance of the pointers from their centroid.
    ///
    /// Needs at least two pointers. For two pointers this is half their
    /// distance.
    #[must_use]
    pub fn span(&self) -> Option<f64> {
        if self.pointers.len() < 2 {
            return None;
        }
        let centroid = self.centroid()?;
        let total: f64 = self
            .pointers
            .iter()
            .map(|(_, pos)| pos.distance(centroid))
            .sum();
        Some(total / self.pointers.len() as f64)
    }

    /// Removes all pointers.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    fn slot_mut(&mut self, id: PointerId) -> Option<&mut Point> {
        self.pointers
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, pos)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(id: u64, x: f64, y: f64) -> TouchEvent {
        TouchEvent::Down(TouchPoint::new(id, Point::new(x, y), 0))
    }

    #[test]
    fn tracks_down_move_up() {
        let mut pointers = ActivePointers::new();
        pointers.apply(&down(1, 0.0, 0.0));
        pointers.apply(&down(2, 10.0, 0.0));
        assert_eq!(pointers.len(), 2);
        assert_eq!(pointers.centroid(), Some(Point::new(5.0, 0.0)));
        assert_eq!(pointers.span(), Some(5.0));

        pointers.apply(&TouchEvent::Move(TouchPoint::new(2, Point::new(20.0, 0.0), 5)));
        assert_eq!(pointers.span(), Some(10.0));

        pointers.apply(&TouchEvent::Up(TouchPoint::new(1, Point::ZERO, 9)));
        assert_eq!(pointers.primary(), Some((PointerId(2), Point::new(20.0, 0.0))));
        assert_eq!(pointers.span(), None);
    }

    #[test]
    fn unknown_move_is_ignored_and_cancel_clears() {
        let mut pointers = ActivePointers::new();
        pointers.apply(&TouchEvent::Move(TouchPoint::new(7, Point::ZERO, 0)));
        assert!(pointers.is_empty());
        pointers.apply(&down(1, 1.0, 1.0));
        pointers.apply(&down(1, 2.0, 2.0));
        assert_eq!(pointers.len(), 1);
        assert_eq!(pointers.position(PointerId(1)), Some(Point::new(2.0, 2.0)));
        pointers.apply(&TouchEvent::Cancel { time_ms: 3 });
        assert!(pointers.is_empty());
        assert_eq!(pointers.centroid(), None);
    }
}
