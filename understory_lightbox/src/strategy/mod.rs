// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! How a page turns gestures into zoom.
//!
//! Hosts without a zoomable surface get [`CustomMatrixStrategy`], which does
//! all transform math itself. Hosts that provide one get
//! [`NativeSurfaceStrategy`], which forwards zoom to the surface and only
//! observes it. The page talks to either through [`ZoomStrategy`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Size};
use understory_gesture::{PanEvent, PinchEvent};
use understory_zoom_transform::{ImageGeometry, TransformMatrix};

use crate::config::ViewerConfig;

mod custom;
mod native;

pub use custom::CustomMatrixStrategy;
pub use native::{NativeSurfaceStrategy, NativeZoomSurface};

/// Which [`ZoomStrategy`] a page runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// [`CustomMatrixStrategy`].
    CustomMatrix,
    /// [`NativeSurfaceStrategy`].
    NativeSurface,
}

/// The common contract of both zoom strategies.
///
/// Positions passed in are in viewport coordinates (origin at the top-left).
pub trait ZoomStrategy: Send + fmt::Debug {
    /// Which implementation this is.
    fn kind(&self) -> StrategyKind;

    /// Whether the page should recognize pan and pinch for this strategy.
    fn handles_transform_gestures(&self) -> bool;

    /// Updates the image geometry. `None` while it is unknown.
    fn set_geometry(&mut self, geometry: Option<ImageGeometry>);

    /// Applies a pan update.
    fn pan(&mut self, event: PanEvent);

    /// Applies a pinch update.
    fn pinch(&mut self, event: PinchEvent);

    /// Responds to a double tap at `position`.
    fn double_tap(&mut self, position: Point);

    /// Drops in-flight gesture state without committing it.
    fn cancel_gestures(&mut self);

    /// Advances animations by `dt` seconds.
    fn advance(&mut self, dt: f64);

    /// Returns `true` while an animation is running.
    fn is_animating(&self) -> bool {
        false
    }

    /// The current zoom flag.
    fn is_scaled(&self) -> bool;

    /// Called once per zoom flag transition.
    fn zoom_changed(&mut self, is_scaled: bool) {
        let _ = is_scaled;
    }

    /// The transform to apply to the image this frame.
    fn render_transform(&self) -> TransformMatrix;

    /// The committed transform.
    fn committed_transform(&self) -> TransformMatrix;
}

/// What the host can offer for zooming.
pub enum HostCapabilities {
    /// Only a transform can be applied to the image layer.
    MatrixOnly,
    /// A platform scroll surface that zooms by itself.
    NativeZoomSurface(Box<dyn NativeZoomSurface>),
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatrixOnly => f.write_str("MatrixOnly"),
            Self::NativeZoomSurface(_) => f.write_str("NativeZoomSurface(..)"),
        }
    }
}

/// Picks the strategy for a page.
#[must_use]
pub fn select_strategy(
    host: HostCapabilities,
    viewport: Size,
    config: &ViewerConfig,
) -> Box<dyn ZoomStrategy> {
    match host {
        HostCapabilities::MatrixOnly => Box::new(CustomMatrixStrategy::new(viewport, config)),
        HostCapabilities::NativeZoomSurface(surface) => {
            Box::new(NativeSurfaceStrategy::new(surface, viewport, config))
        }
    }
}
