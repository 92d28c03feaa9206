// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusive arbitration between a page's gesture groups.
//!
//! A viewer page runs three groups against one touch stream, highest priority
//! first:
//! 1) the parent's dismiss swipe,
//! 2) the transform group, where pan and pinch run simultaneously,
//! 3) taps (double tap, then single tap once the double tap fails).
//!
//! The first group whose activation predicate holds on an event wins the whole
//! touch sequence; the others are reset without reporting anything. Tap
//! results that belong to an earlier sequence (a single tap flushed because
//! the next press turned into something else) are still reported.

use alloc::vec::Vec;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::dismiss::{Activation, DismissEvent, DismissGesture, GestureContext};
use crate::pan::{PanConfig, PanEvent, PanRecognizer};
use crate::pinch::{PinchConfig, PinchEvent, PinchRecognizer};
use crate::pointers::{ActivePointers, PointerId, TouchEvent};
use crate::tap::{TapConfig, TapEvent, TapRecognizer};
use crate::tracker::TranslationTracker;

/// The mutually exclusive gesture groups of a viewer page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureGroup {
    /// The parent's swipe-to-dismiss.
    DismissSwipe,
    /// Pan and pinch, recognized simultaneously.
    Transform,
    /// Single and double tap.
    Tap,
}

/// Priority order used by [`GestureArbiter::new`].
pub const DEFAULT_PRIORITY: [GestureGroup; 3] = [
    GestureGroup::DismissSwipe,
    GestureGroup::Transform,
    GestureGroup::Tap,
];

/// An ordered set of alternatives of which at most one may win.
#[derive(Clone, Debug)]
pub struct Exclusive<G> {
    order: SmallVec<[G; 4]>,
}

impl<G: Copy> Exclusive<G> {
    /// Creates the composition, highest priority first.
    #[must_use]
    pub fn new(order: impl IntoIterator<Item = G>) -> Self {
        Self {
            order: order.into_iter().collect(),
        }
    }

    /// Alternatives in priority order.
    #[must_use]
    pub fn order(&self) -> &[G] {
        &self.order
    }

    /// The highest-priority alternative for which `is_active` holds.
    pub fn first_active(&self, mut is_active: impl FnMut(G) -> bool) -> Option<G> {
        self.order.iter().copied().find(|g| is_active(*g))
    }
}

/// Everything the arbiter reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutput {
    /// Forward to the parent's dismiss gesture.
    Dismiss(DismissEvent),
    /// Pan update for the zoom strategy.
    Pan(PanEvent),
    /// Pinch update for the zoom strategy.
    Pinch(PinchEvent),
    /// A recognized tap.
    Tap(TapEvent),
}

/// Tuning for all recognizers the arbiter owns.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Pan tuning.
    pub pan: PanConfig,
    /// Pinch tuning.
    pub pinch: PinchConfig,
    /// Tap tuning.
    pub tap: TapConfig,
}

/// Runs the page's recognizers over a touch stream and picks one winner per
/// touch sequence.
#[derive(Clone, Debug)]
pub struct GestureArbiter {
    exclusive: Exclusive<GestureGroup>,
    pointers: ActivePointers,
    dismiss_pointer: Option<PointerId>,
    dismiss_tracker: TranslationTracker,
    dismiss_failed: bool,
    pan: PanRecognizer,
    pinch: PinchRecognizer,
    tap: TapRecognizer,
    winner: Option<GestureGroup>,
    transform_enabled: bool,
    taps_enabled: bool,
}

impl GestureArbiter {
    /// Creates an arbiter with [`DEFAULT_PRIORITY`].
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self::with_priority(config, DEFAULT_PRIORITY)
    }

    /// Creates an arbiter with a custom priority order.
    ///
    /// Groups missing from `priority` never win.
    #[must_use]
    pub fn with_priority(
        config: GestureConfig,
        priority: impl IntoIterator<Item = GestureGroup>,
    ) -> Self {
        let exclusive = Exclusive::new(priority);
        let taps_enabled = exclusive.order().contains(&GestureGroup::Tap);
        Self {
            exclusive,
            pointers: ActivePointers::new(),
            dismiss_pointer: None,
            dismiss_tracker: TranslationTracker::default(),
            dismiss_failed: false,
            pan: PanRecognizer::new(config.pan),
            pinch: PinchRecognizer::new(config.pinch),
            tap: TapRecognizer::new(config.tap),
            winner: None,
            transform_enabled: true,
            taps_enabled,
        }
    }

    /// Enables or disables the pan + pinch group.
    ///
    /// Hosts that zoom natively handle pan and pinch themselves.
    pub fn set_transform_enabled(&mut self, enabled: bool) {
        self.transform_enabled = enabled;
    }

    /// The group that owns the current touch sequence.
    #[must_use]
    pub fn winner(&self) -> Option<GestureGroup> {
        self.winner
    }

    /// Pointers currently down.
    #[must_use]
    pub fn pointers(&self) -> &ActivePointers {
        &self.pointers
    }

    /// Priority order in use.
    #[must_use]
    pub fn priority(&self) -> &[GestureGroup] {
        self.exclusive.order()
    }

    /// Processes one touch event, appending any results to `out`.
    pub fn handle(
        &mut self,
        event: &TouchEvent,
        context: &GestureContext,
        dismiss: &dyn DismissGesture,
        out: &mut Vec<GestureOutput>,
    ) {
        if matches!(event, TouchEvent::Cancel { .. }) {
            self.cancel(out);
            return;
        }
        if self.pointers.is_empty() {
            let TouchEvent::Down(point) = event else {
                // Stray move or lift from a sequence we never saw start.
                return;
            };
            self.dismiss_pointer = Some(point.id);
            self.dismiss_tracker.begin(point.position);
            self.dismiss_failed = false;
            self.winner = None;
        }
        self.pointers.apply(event);
        // Unzoomed, one finger belongs to the dismiss swipe or the pager.
        self.pan.set_min_pointers(if context.is_scaled { 1 } else { 2 });

        match self.winner {
            None => self.arbitrate(event, context, dismiss, out),
            Some(group) => self.route(group, event, out),
        }
        if self.pointers.is_empty() {
            self.end_sequence(out);
        }
    }

    /// Advances time-based recognition (the single-tap timeout).
    pub fn poll(&mut self, now_ms: u64, out: &mut Vec<GestureOutput>) {
        if !self.taps_enabled {
            return;
        }
        if let Some(tap) = self.tap.poll(now_ms) {
            out.push(GestureOutput::Tap(tap));
        }
    }

    fn arbitrate(
        &mut self,
        event: &TouchEvent,
        context: &GestureContext,
        dismiss: &dyn DismissGesture,
        out: &mut Vec<GestureOutput>,
    ) {
        let dismiss_ready = self.dismiss_candidate(context, dismiss);

        let mut transform_events: SmallVec<[GestureOutput; 2]> = SmallVec::new();
        if self.transform_enabled {
            if let Some(pinch) = self.pinch.update(&self.pointers) {
                transform_events.push(GestureOutput::Pinch(pinch));
            }
            if let Some(pan) = self.pan.update(&self.pointers) {
                transform_events.push(GestureOutput::Pan(pan));
            }
        }
        let transform_ready = self.pan.is_active() || self.pinch.is_active();

        if self.taps_enabled
            && let Some(tap) = self.tap.handle(event, self.pointers.len())
        {
            out.push(GestureOutput::Tap(tap));
        }
        let tap_ready = self.tap.claimed();

        let Some(winner) = self.exclusive.first_active(|group| match group {
            GestureGroup::DismissSwipe => dismiss_ready,
            GestureGroup::Transform => transform_ready,
            GestureGroup::Tap => tap_ready,
        }) else {
            return;
        };
        log::debug!("{winner:?} won the touch sequence");
        self.winner = Some(winner);

        match winner {
            GestureGroup::DismissSwipe => {
                self.pan.reset();
                self.pinch.reset();
                if let Some(tap) = self.tap.fail() {
                    out.push(GestureOutput::Tap(tap));
                }
                let translation = self.dismiss_tracker.translation().unwrap_or(Vec2::ZERO);
                out.push(GestureOutput::Dismiss(DismissEvent::Began { translation }));
            }
            GestureGroup::Transform => {
                self.dismiss_failed = true;
                if let Some(tap) = self.tap.fail() {
                    out.push(GestureOutput::Tap(tap));
                }
                out.extend(transform_events);
            }
            GestureGroup::Tap => {
                self.dismiss_failed = true;
                self.pan.reset();
                self.pinch.reset();
            }
        }
    }

    fn dismiss_candidate(
        &mut self,
        context: &GestureContext,
        dismiss: &dyn DismissGesture,
    ) -> bool {
        if self.dismiss_failed {
            return false;
        }
        if !dismiss.is_enabled(context) {
            self.dismiss_failed = true;
            return false;
        }
        let Some(position) = self.dismiss_pointer.and_then(|id| self.pointers.position(id)) else {
            return false;
        };
        let translation = self.dismiss_tracker.update(position).unwrap_or(Vec2::ZERO);
        match dismiss.activation(translation, self.pointers.len()) {
            Activation::Activate => true,
            Activation::Fail => {
                self.dismiss_failed = true;
                false
            }
            Activation::Pending => false,
        }
    }

    fn route(&mut self, group: GestureGroup, event: &TouchEvent, out: &mut Vec<GestureOutput>) {
        match group {
            GestureGroup::DismissSwipe => {
                let Some(point) = event.point() else {
                    return;
                };
                if Some(point.id) != self.dismiss_pointer {
                    return;
                }
                match event {
                    TouchEvent::Move(_) => {
                        if let Some(translation) = self.dismiss_tracker.update(point.position) {
                            out.push(GestureOutput::Dismiss(DismissEvent::Changed {
                                translation,
                            }));
                        }
                    }
                    TouchEvent::Up(_) => self.finish_dismiss(out),
                    _ => {}
                }
            }
            GestureGroup::Transform => {
                if let Some(pinch) = self.pinch.update(&self.pointers) {
                    out.push(GestureOutput::Pinch(pinch));
                }
                if let Some(pan) = self.pan.update(&self.pointers) {
                    out.push(GestureOutput::Pan(pan));
                }
            }
            GestureGroup::Tap => {
                if let Some(tap) = self.tap.handle(event, self.pointers.len()) {
                    out.push(GestureOutput::Tap(tap));
                }
            }
        }
    }

    fn finish_dismiss(&mut self, out: &mut Vec<GestureOutput>) {
        if self.dismiss_pointer.take().is_some() {
            let translation = self.dismiss_tracker.translation().unwrap_or(Vec2::ZERO);
            out.push(GestureOutput::Dismiss(DismissEvent::Ended { translation }));
        }
    }

    fn end_sequence(&mut self, out: &mut Vec<GestureOutput>) {
        match self.winner {
            Some(GestureGroup::DismissSwipe) => self.finish_dismiss(out),
            Some(GestureGroup::Transform) => {
                // Pinch first: it folds into the committed transform before the pan does.
                if let Some(pinch) = self.pinch.finish() {
                    out.push(GestureOutput::Pinch(pinch));
                }
                if let Some(pan) = self.pan.finish() {
                    out.push(GestureOutput::Pan(pan));
                }
            }
            Some(GestureGroup::Tap) | None => {}
        }
        self.reset_sequence();
        self.tap.end_sequence();
    }

    fn cancel(&mut self, out: &mut Vec<GestureOutput>) {
        match self.winner {
            Some(GestureGroup::DismissSwipe) => {
                if self.dismiss_pointer.is_some() {
                    out.push(GestureOutput::Dismiss(DismissEvent::Cancelled));
                }
            }
            Some(GestureGroup::Transform) => {
                if let Some(pinch) = self.pinch.cancel() {
                    out.push(GestureOutput::Pinch(pinch));
                }
                if let Some(pan) = self.pan.cancel() {
                    out.push(GestureOutput::Pan(pan));
                }
            }
            Some(GestureGroup::Tap) | None => {}
        }
        log::trace!("touch sequence cancelled");
        self.pointers.clear();
        self.reset_sequence();
        self.tap.reset();
    }

    fn reset_sequence(&mut self) {
        self.pan.reset();
        self.pinch.reset();
        self.dismiss_pointer = None;
        self.dismiss_tracker.end();
        self.dismiss_failed = false;
        self.winner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dismiss::VerticalDismissSwipe;
    use crate::pointers::TouchPoint;
    use alloc::vec;
    use kurbo::Point;

    const UNSCALED: GestureContext = GestureContext { is_scaled: false };
    const SCALED: GestureContext = GestureContext { is_scaled: true };

    struct Harness {
        arbiter: GestureArbiter,
        dismiss: VerticalDismissSwipe,
        context: GestureContext,
    }

    impl Harness {
        fn new(context: GestureContext) -> Self {
            Self {
                arbiter: GestureArbiter::new(GestureConfig::default()),
                dismiss: VerticalDismissSwipe::default(),
                context,
            }
        }

        fn send(&mut self, event: TouchEvent) -> Vec<GestureOutput> {
            let mut out = Vec::new();
            self.arbiter
                .handle(&event, &self.context, &self.dismiss, &mut out);
            out
        }
    }

    fn down(id: u64, x: f64, y: f64, t: u64) -> TouchEvent {
        TouchEvent::Down(TouchPoint::new(id, Point::new(x, y), t))
    }
    fn mv(id: u64, x: f64, y: f64, t: u64) -> TouchEvent {
        TouchEvent::Move(TouchPoint::new(id, Point::new(x, y), t))
    }
    fn up(id: u64, x: f64, y: f64, t: u64) -> TouchEvent {
        TouchEvent::Up(TouchPoint::new(id, Point::new(x, y), t))
    }

    #[test]
    fn exclusive_picks_highest_priority() {
        let exclusive = Exclusive::new([3, 1, 2]);
        assert_eq!(exclusive.first_active(|g| g < 3), Some(1));
        assert_eq!(exclusive.first_active(|_| true), Some(3));
        assert_eq!(exclusive.first_active(|_| false), None);
    }

    #[test]
    fn vertical_drag_goes_to_dismiss_when_unscaled() {
        let mut h = Harness::new(UNSCALED);
        assert!(h.send(down(1, 100.0, 100.0, 0)).is_empty());
        assert!(h.send(mv(1, 101.0, 105.0, 10)).is_empty());
        assert_eq!(
            h.send(mv(1, 102.0, 125.0, 20)),
            vec![GestureOutput::Dismiss(DismissEvent::Began {
                translation: Vec2::new(2.0, 25.0)
            })]
        );
        assert_eq!(h.arbiter.winner(), Some(GestureGroup::DismissSwipe));
        assert_eq!(
            h.send(mv(1, 102.0, 200.0, 30)),
            vec![GestureOutput::Dismiss(DismissEvent::Changed {
                translation: Vec2::new(2.0, 100.0)
            })]
        );
        assert_eq!(
            h.send(up(1, 102.0, 200.0, 40)),
            vec![GestureOutput::Dismiss(DismissEvent::Ended {
                translation: Vec2::new(2.0, 100.0)
            })]
        );
        assert_eq!(h.arbiter.winner(), None);
    }

    #[test]
    fn zoomed_one_finger_drag_pans() {
        let mut h = Harness::new(SCALED);
        h.send(down(1, 100.0, 100.0, 0));
        assert_eq!(
            h.send(mv(1, 100.0, 130.0, 10)),
            vec![GestureOutput::Pan(PanEvent::Began {
                translation: Vec2::new(0.0, 30.0)
            })]
        );
        assert_eq!(h.arbiter.winner(), Some(GestureGroup::Transform));
        assert_eq!(
            h.send(up(1, 100.0, 130.0, 20)),
            vec![GestureOutput::Pan(PanEvent::Ended {
                translation: Vec2::new(0.0, 30.0)
            })]
        );
    }

    #[test]
    fn unzoomed_one_finger_horizontal_drag_goes_nowhere() {
        let mut h = Harness::new(UNSCALED);
        h.send(down(1, 100.0, 100.0, 0));
        assert!(h.send(mv(1, 160.0, 100.0, 10)).is_empty());
        assert!(h.send(up(1, 160.0, 100.0, 20)).is_empty());
        assert_eq!(h.arbiter.winner(), None);
    }

    #[test]
    fn two_fingers_pinch_and_pan_together() {
        let mut h = Harness::new(UNSCALED);
        h.send(down(1, 100.0, 100.0, 0));
        h.send(down(2, 200.0, 100.0, 10));
        let out = h.send(mv(2, 260.0, 100.0, 20));
        assert_eq!(
            out,
            vec![
                GestureOutput::Pinch(PinchEvent::Began {
                    origin: Point::new(180.0, 100.0),
                    scale: 1.6,
                }),
                GestureOutput::Pan(PanEvent::Began {
                    translation: Vec2::new(30.0, 0.0)
                }),
            ]
        );
        // Lifting one finger ends the pinch but keeps the pan.
        let out = h.send(up(2, 260.0, 100.0, 30));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], GestureOutput::Pinch(PinchEvent::Ended { scale: 1.6 }));
        assert!(matches!(out[1], GestureOutput::Pan(PanEvent::Changed { .. })));
        let out = h.send(up(1, 100.0, 100.0, 40));
        assert!(matches!(out[..], [GestureOutput::Pan(PanEvent::Ended { .. })]));
    }

    #[test]
    fn double_tap_then_single_tap_timeout() {
        let mut h = Harness::new(UNSCALED);
        h.send(down(1, 50.0, 50.0, 0));
        assert!(h.send(up(1, 50.0, 50.0, 60)).is_empty());
        h.send(down(1, 52.0, 51.0, 150));
        assert_eq!(
            h.send(up(1, 52.0, 51.0, 200)),
            vec![GestureOutput::Tap(TapEvent::Double {
                position: Point::new(52.0, 51.0)
            })]
        );

        h.send(down(1, 10.0, 10.0, 1000));
        h.send(up(1, 10.0, 10.0, 1040));
        let mut out = Vec::new();
        h.arbiter.poll(1200, &mut out);
        assert!(out.is_empty());
        h.arbiter.poll(1341, &mut out);
        assert_eq!(
            out,
            vec![GestureOutput::Tap(TapEvent::Single {
                position: Point::new(10.0, 10.0)
            })]
        );
    }

    #[test]
    fn pending_single_tap_flushes_when_next_press_dismisses() {
        let mut h = Harness::new(UNSCALED);
        h.send(down(1, 50.0, 50.0, 0));
        h.send(up(1, 50.0, 50.0, 40));
        h.send(down(1, 50.0, 50.0, 100));
        let out = h.send(mv(1, 50.0, 80.0, 120));
        assert_eq!(
            out,
            vec![
                GestureOutput::Tap(TapEvent::Single {
                    position: Point::new(50.0, 50.0)
                }),
                GestureOutput::Dismiss(DismissEvent::Began {
                    translation: Vec2::new(0.0, 30.0)
                }),
            ]
        );
    }

    #[test]
    fn cancel_reports_to_winner_and_resets() {
        let mut h = Harness::new(SCALED);
        h.send(down(1, 0.0, 0.0, 0));
        h.send(mv(1, 40.0, 0.0, 10));
        assert_eq!(
            h.send(TouchEvent::Cancel { time_ms: 20 }),
            vec![GestureOutput::Pan(PanEvent::Cancelled)]
        );
        assert_eq!(h.arbiter.winner(), None);
        assert!(h.arbiter.pointers().is_empty());
        // Stray events after a cancel are ignored.
        assert!(h.send(mv(1, 80.0, 0.0, 30)).is_empty());
        assert!(h.send(up(1, 80.0, 0.0, 40)).is_empty());
    }

    #[test]
    fn disabled_transform_group_never_wins() {
        let mut h = Harness::new(SCALED);
        h.arbiter.set_transform_enabled(false);
        h.send(down(1, 0.0, 0.0, 0));
        assert!(h.send(mv(1, 0.0, 60.0, 10)).is_empty());
        assert_eq!(h.arbiter.winner(), None);
    }
}
