// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Lightbox: the zoomable page of a full-screen image viewer.
//!
//! A [`ViewerPage`] ties together:
//! - gesture recognition and arbitration from `understory_gesture`,
//! - transform math, bounds and zoom limits from `understory_zoom_transform`,
//! - a [`CommitProtocol`] that layers in-flight pan and pinch on top of the
//!   committed transform and folds them in when the fingers lift,
//! - a [`SpringAnimation`] for double-tap zoom,
//! - a [`ZoomStateNotifier`] that reports the zoom flag on transitions only,
//! - a [`ZoomStrategy`]: transform math ([`CustomMatrixStrategy`]) or a host
//!   scroll surface that zooms by itself ([`NativeSurfaceStrategy`]).
//!
//! Owner callbacks never run on the gesture path. They are posted through a
//! [`UiDispatcher`]; with the `std` feature, [`ui_channel`] provides one backed
//! by a channel the primary thread drains.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::{Point, Size};
//! use understory_gesture::{TouchEvent, TouchPoint, VerticalDismissSwipe};
//! use understory_lightbox::{
//!     HostCapabilities, ImageSource, PageProps, ViewerConfig, ViewerPage, ui_channel,
//! };
//! use understory_zoom_transform::TransformMatrix;
//!
//! let (ui, queue) = ui_channel();
//! let image = ImageSource::new("https://example.com/panorama.jpg").with_natural_size(800.0, 400.0);
//! let mut page = ViewerPage::new(
//!     PageProps::new(image),
//!     Size::new(400.0, 800.0),
//!     HostCapabilities::MatrixOnly,
//!     &ViewerConfig::default(),
//!     VerticalDismissSwipe::default(),
//!     Arc::new(ui),
//! )
//! .unwrap();
//!
//! // Double tap in the middle of the screen.
//! let at = |t| TouchPoint::new(1, Point::new(200.0, 400.0), t);
//! for event in [
//!     TouchEvent::Down(at(0)),
//!     TouchEvent::Up(at(40)),
//!     TouchEvent::Down(at(120)),
//!     TouchEvent::Up(at(160)),
//! ] {
//!     page.handle_touch(&event);
//! }
//!
//! let mut now = 160;
//! while page.is_animating() {
//!     page.advance_frame(now);
//!     now += 16;
//! }
//! queue.run_pending();
//!
//! // A 2:1 image on a 1:2 screen zooms until it fills the height.
//! assert_eq!(page.committed_transform(), TransformMatrix::new(0.0, 0.0, 4.0));
//! assert!(page.is_scaled());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod commit;
mod config;
mod notifier;
mod page;
mod spring;
mod strategy;
mod ui;

pub use commit::{CommitProtocol, PanState, PinchState, compose};
pub use config::{ConfigError, NativeZoomRange, ViewerConfig};
pub use notifier::{EdgeSampler, ZoomStateNotifier};
pub use page::{ImageSource, PageCallbacks, PageProps, ViewerPage};
pub use spring::{SpringAnimation, SpringConfig};
pub use strategy::{
    CustomMatrixStrategy, HostCapabilities, NativeSurfaceStrategy, NativeZoomSurface,
    StrategyKind, ZoomStrategy, select_strategy,
};
pub use ui::{UiDispatcher, UiTask};

#[cfg(feature = "std")]
pub use ui::{UiQueue, UiSender, ui_channel};
