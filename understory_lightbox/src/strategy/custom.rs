// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom done entirely with transform math.

use kurbo::{Point, Size, Vec2};
use understory_gesture::{PanEvent, PinchEvent};
use understory_zoom_transform::{
    BoundsClamper, ImageGeometry, TransformMatrix, ZoomLimits, double_tap_target,
};

use super::{StrategyKind, ZoomStrategy};
use crate::commit::{CommitProtocol, PanState, PinchState, compose};
use crate::config::ViewerConfig;
use crate::spring::{SpringAnimation, SpringConfig};

/// Pinch, pan and double tap on a [`TransformMatrix`].
///
/// Every update is corrected into bounds before it is stored: the pinch
/// factor is clamped so the cumulative scale stays within [`ZoomLimits`], and
/// the translation correction from [`BoundsClamper`] is folded into the
/// channel that produced the overshoot. Without known geometry neither
/// correction applies.
#[derive(Clone, Debug)]
pub struct CustomMatrixStrategy {
    clamper: BoundsClamper,
    limits: ZoomLimits,
    spring: SpringConfig,
    geometry: Option<ImageGeometry>,
    protocol: CommitProtocol,
    animation: Option<SpringAnimation>,
}

impl CustomMatrixStrategy {
    /// Creates a strategy for `viewport` at identity.
    #[must_use]
    pub fn new(viewport: Size, config: &ViewerConfig) -> Self {
        Self {
            clamper: BoundsClamper::new(viewport),
            limits: config.limits,
            spring: config.spring,
            geometry: None,
            protocol: CommitProtocol::new(),
            animation: None,
        }
    }

    /// The commit protocol, for inspection.
    #[must_use]
    pub fn protocol(&self) -> &CommitProtocol {
        &self.protocol
    }

    fn center(&self) -> Vec2 {
        let viewport = self.clamper.viewport();
        Vec2::new(viewport.width / 2.0, viewport.height / 2.0)
    }

    /// A gesture takes over from a running animation where it currently is.
    fn interrupt_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            let value = animation.value();
            log::debug!("animation interrupted at {value:?}");
            self.protocol.replace_committed(value);
        }
    }

    fn update_pinch(&mut self, raw_scale: f64) {
        let committed = self.protocol.committed();
        let scale = self.limits.clamp_pinch_scale(
            raw_scale,
            committed.scale,
            self.geometry.as_ref(),
            self.clamper.viewport(),
        );
        let pinch = self.protocol.pinch();
        let candidate = compose(self.protocol.pan(), PinchState { scale, ..pinch }, committed);
        let correction = self.clamper.correction(candidate, self.geometry.as_ref());
        self.protocol.set_pinch(scale, pinch.translation + correction);
    }

    fn update_pan(&mut self, translation: Vec2) {
        let candidate = compose(
            PanState { translation },
            self.protocol.pinch(),
            self.protocol.committed(),
        );
        let correction = self.clamper.correction(candidate, self.geometry.as_ref());
        self.protocol.set_pan(translation + correction);
    }
}

impl ZoomStrategy for CustomMatrixStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CustomMatrix
    }

    fn handles_transform_gestures(&self) -> bool {
        true
    }

    fn set_geometry(&mut self, geometry: Option<ImageGeometry>) {
        self.geometry = geometry;
    }

    fn pan(&mut self, event: PanEvent) {
        match event {
            PanEvent::Began { translation } => {
                self.interrupt_animation();
                self.update_pan(translation);
            }
            PanEvent::Changed { translation } => self.update_pan(translation),
            PanEvent::Ended { translation } => {
                self.update_pan(translation);
                self.protocol.commit_pan();
            }
            PanEvent::Cancelled => self.protocol.cancel_pan(),
        }
    }

    fn pinch(&mut self, event: PinchEvent) {
        match event {
            PinchEvent::Began { origin, scale } => {
                self.interrupt_animation();
                let origin = origin - self.center();
                self.protocol.begin_pinch(origin);
                self.update_pinch(scale);
            }
            PinchEvent::Changed { scale, .. } => self.update_pinch(scale),
            PinchEvent::Ended { scale } => {
                self.update_pinch(scale);
                self.protocol.commit_pinch();
            }
            PinchEvent::Cancelled => self.protocol.cancel_pinch(),
        }
    }

    fn double_tap(&mut self, position: Point) {
        let (from, base) = match &self.animation {
            Some(animation) => (animation.value(), animation.target()),
            None => (self.protocol.committed(), self.protocol.committed()),
        };
        let tap = position - self.center();
        let Some(target) = double_tap_target(
            base,
            tap,
            self.geometry.as_ref(),
            &self.clamper,
            &self.limits,
        ) else {
            log::trace!("double tap ignored, geometry unknown");
            return;
        };
        log::debug!("double tap at {tap:?} animating to {target:?}");
        self.protocol.cancel();
        self.protocol.replace_committed(from);
        self.animation = Some(SpringAnimation::new(from, target, self.spring));
    }

    fn cancel_gestures(&mut self) {
        self.protocol.cancel();
    }

    fn advance(&mut self, dt: f64) {
        let Some(animation) = &mut self.animation else {
            return;
        };
        let value = animation.step(dt);
        if animation.is_finished() {
            let target = animation.target().rounded();
            self.protocol.replace_committed(target);
            self.animation = None;
            log::debug!("animation settled at {target:?}");
        } else {
            self.protocol.replace_committed(value);
        }
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn is_scaled(&self) -> bool {
        self.protocol.is_scaled()
    }

    fn render_transform(&self) -> TransformMatrix {
        self.protocol.render()
    }

    fn committed_transform(&self) -> TransformMatrix {
        self.protocol.committed()
    }
}
