// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom delegated to a platform scroll surface.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Size};
use understory_gesture::{PanEvent, PinchEvent};
use understory_zoom_transform::{ImageGeometry, TransformMatrix, native_zoom_rect};

use super::{StrategyKind, ZoomStrategy};
use crate::config::{NativeZoomRange, ViewerConfig};

/// A host scroll surface with built-in pinch zoom.
///
/// The surface owns its own pan, pinch, bounds and bounce behavior. The page
/// only configures it, asks it to zoom to a rectangle on double tap, and
/// reads its zoom factor.
pub trait NativeZoomSurface: Send {
    /// Current zoom factor, `1.0` at rest.
    fn zoom_scale(&self) -> f64;

    /// Sets the allowed zoom range.
    fn configure(&mut self, min_zoom: f64, max_zoom: f64);

    /// Zooms so that `rect` (viewport coordinates at zoom 1) fills the surface.
    fn zoom_to_rect(&mut self, rect: Rect, animated: bool);

    /// Enables or disables rubber-banding at the content edges.
    fn set_bounces(&mut self, bounces: bool);
}

/// Forwards zoom to a [`NativeZoomSurface`].
///
/// No transform math happens here; the rendered transform is always identity
/// because the surface draws its own zoom.
pub struct NativeSurfaceStrategy {
    surface: Box<dyn NativeZoomSurface>,
    viewport: Size,
    geometry: Option<ImageGeometry>,
    min_screen_zoom: f64,
    range: NativeZoomRange,
}

impl NativeSurfaceStrategy {
    /// Wraps `surface`, configuring its zoom range and turning bounce off
    /// until the image is zoomed.
    pub fn new(
        mut surface: Box<dyn NativeZoomSurface>,
        viewport: Size,
        config: &ViewerConfig,
    ) -> Self {
        let range = config.native_zoom;
        surface.configure(range.min, range.max);
        surface.set_bounces(false);
        Self {
            surface,
            viewport,
            geometry: None,
            min_screen_zoom: config.limits.min_screen_zoom,
            range,
        }
    }
}

impl fmt::Debug for NativeSurfaceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeSurfaceStrategy")
            .field("zoom_scale", &self.surface.zoom_scale())
            .field("viewport", &self.viewport)
            .field("geometry", &self.geometry)
            .field("min_screen_zoom", &self.min_screen_zoom)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl ZoomStrategy for NativeSurfaceStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NativeSurface
    }

    fn handles_transform_gestures(&self) -> bool {
        false
    }

    fn set_geometry(&mut self, geometry: Option<ImageGeometry>) {
        self.geometry = geometry;
    }

    fn pan(&mut self, event: PanEvent) {
        log::trace!("native surface ignores {event:?}");
    }

    fn pinch(&mut self, event: PinchEvent) {
        log::trace!("native surface ignores {event:?}");
    }

    fn double_tap(&mut self, position: Point) {
        let rect = if self.is_scaled() {
            self.viewport.to_rect()
        } else {
            native_zoom_rect(
                self.geometry.as_ref().and_then(ImageGeometry::aspect_ratio),
                position,
                self.viewport,
                self.min_screen_zoom,
                self.range.max,
            )
        };
        log::debug!("double tap at {position:?} zooming surface to {rect:?}");
        self.surface.zoom_to_rect(rect, true);
    }

    fn cancel_gestures(&mut self) {}

    fn advance(&mut self, _dt: f64) {}

    fn is_scaled(&self) -> bool {
        self.surface.zoom_scale() > 1.0
    }

    fn zoom_changed(&mut self, is_scaled: bool) {
        self.surface.set_bounces(is_scaled);
    }

    fn render_transform(&self) -> TransformMatrix {
        TransformMatrix::IDENTITY
    }

    fn committed_transform(&self) -> TransformMatrix {
        TransformMatrix::IDENTITY
    }
}
