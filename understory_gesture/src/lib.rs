// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: headless touch gesture recognition.
//!
//! This crate turns a raw touch stream ([`TouchEvent`]) into gesture events
//! for a zoomable image page:
//! - [`PanRecognizer`]: movement of the centroid of all fingers.
//! - [`PinchRecognizer`]: change of the fingers' average span.
//! - [`TapRecognizer`]: single and double taps, with the single tap held back
//!   until a double tap is ruled out.
//! - [`DismissGesture`]: the contract for a parent-owned swipe-to-dismiss,
//!   with [`VerticalDismissSwipe`] as a ready-made implementation.
//! - [`GestureArbiter`]: runs all of the above and lets exactly one group own
//!   each touch sequence.
//!
//! It does not render, animate or own any transform. Callers forward the
//! [`GestureOutput`]s to whatever applies them.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureArbiter, GestureConfig, GestureContext, GestureGroup, GestureOutput, PinchEvent,
//!     TouchEvent, TouchPoint, VerticalDismissSwipe,
//! };
//!
//! let mut arbiter = GestureArbiter::new(GestureConfig::default());
//! let dismiss = VerticalDismissSwipe::default();
//! let context = GestureContext { is_scaled: false };
//! let mut out = Vec::new();
//!
//! for event in [
//!     TouchEvent::Down(TouchPoint::new(1, Point::new(100.0, 100.0), 0)),
//!     TouchEvent::Down(TouchPoint::new(2, Point::new(200.0, 100.0), 10)),
//!     TouchEvent::Move(TouchPoint::new(2, Point::new(260.0, 100.0), 20)),
//! ] {
//!     arbiter.handle(&event, &context, &dismiss, &mut out);
//! }
//!
//! assert_eq!(arbiter.winner(), Some(GestureGroup::Transform));
//! assert!(matches!(
//!     out[0],
//!     GestureOutput::Pinch(PinchEvent::Began { .. })
//! ));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod dismiss;
mod pan;
mod phase;
mod pinch;
mod pointers;
mod tap;
mod tracker;

pub use arbiter::{
    DEFAULT_PRIORITY, Exclusive, GestureArbiter, GestureConfig, GestureGroup, GestureOutput,
};
pub use dismiss::{
    Activation, DEFAULT_DISMISS_ACTIVE_OFFSET_Y, DEFAULT_DISMISS_FAIL_OFFSET_X, DismissConfig,
    DismissEvent, DismissGesture, GestureContext, VerticalDismissSwipe,
};
pub use pan::{DEFAULT_PAN_SLOP, PanConfig, PanEvent, PanRecognizer};
pub use phase::RecognizerPhase;
pub use pinch::{DEFAULT_PINCH_SPAN_SLOP, PinchConfig, PinchEvent, PinchRecognizer};
pub use pointers::{ActivePointers, PointerId, TouchEvent, TouchPoint};
pub use tap::{
    DEFAULT_DOUBLE_TAP_SLOP, DEFAULT_DOUBLE_TAP_WINDOW_MS, DEFAULT_MAX_PRESS_MS, DEFAULT_TAP_SLOP,
    TapConfig, TapEvent, TapRecognizer,
};
pub use tracker::TranslationTracker;
