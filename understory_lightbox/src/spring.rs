// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Critically damped spring animation between two transforms.

use understory_zoom_transform::TransformMatrix;

/// Longest frame the spring will simulate; longer gaps are truncated.
const MAX_FRAME_SECONDS: f64 = 1.0;

/// Spring tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Natural angular frequency in radians per second. Higher is snappier.
    pub angular_frequency: f64,
    /// Distance from the target below which a component may come to rest.
    pub rest_displacement: f64,
    /// Speed below which a component may come to rest.
    pub rest_velocity: f64,
    /// Longest single integration step, in seconds.
    pub max_step: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            angular_frequency: 20.0,
            rest_displacement: 1e-3,
            rest_velocity: 1e-3,
            max_step: 1.0 / 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SpringAxis {
    value: f64,
    velocity: f64,
    target: f64,
}

impl SpringAxis {
    fn new(from: f64, target: f64) -> Self {
        Self {
            value: from,
            velocity: 0.0,
            target,
        }
    }

    fn step(&mut self, omega: f64, h: f64) {
        let before = self.value - self.target;
        let accel = -omega * omega * before - 2.0 * omega * self.velocity;
        self.velocity += accel * h;
        self.value += self.velocity * h;
        // Never cross the target.
        if before * (self.value - self.target) < 0.0 {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn at_rest(&self, config: &SpringConfig) -> bool {
        (self.value - self.target).abs() < config.rest_displacement
            && self.velocity.abs() < config.rest_velocity
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }
}

/// Animates every component of a [`TransformMatrix`] toward a target with a
/// critically damped spring.
///
/// Integration is semi-implicit Euler in sub-steps of at most
/// [`SpringConfig::max_step`]. Components never overshoot their target. Once
/// all components are at rest the animation snaps exactly onto the target and
/// reports itself finished.
#[derive(Clone, Debug)]
pub struct SpringAnimation {
    config: SpringConfig,
    axes: [SpringAxis; 3],
    finished: bool,
}

impl SpringAnimation {
    /// Starts an animation from `from` to `target` at rest.
    #[must_use]
    pub fn new(from: TransformMatrix, target: TransformMatrix, config: SpringConfig) -> Self {
        Self {
            config,
            axes: [
                SpringAxis::new(from.translation.x, target.translation.x),
                SpringAxis::new(from.translation.y, target.translation.y),
                SpringAxis::new(from.scale, target.scale),
            ],
            finished: from == target,
        }
    }

    /// Current animated value.
    #[must_use]
    pub fn value(&self) -> TransformMatrix {
        let [x, y, scale] = self.axes;
        TransformMatrix::new(x.value, y.value, scale.value)
    }

    /// Where the animation ends.
    #[must_use]
    pub fn target(&self) -> TransformMatrix {
        let [x, y, scale] = self.axes;
        TransformMatrix::new(x.target, y.target, scale.target)
    }

    /// Returns `true` once the value sits exactly on the target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances by `dt` seconds and returns the new value.
    pub fn step(&mut self, dt: f64) -> TransformMatrix {
        if self.finished || !dt.is_finite() || dt <= 0.0 {
            return self.value();
        }
        let max_step = if self.config.max_step > 0.0 {
            self.config.max_step
        } else {
            dt
        };
        let omega = self.config.angular_frequency;
        let mut remaining = dt.min(MAX_FRAME_SECONDS);
        while remaining > 0.0 {
            let h = remaining.min(max_step);
            for axis in &mut self.axes {
                axis.step(omega, h);
            }
            remaining -= h;
            if self.axes.iter().all(|axis| axis.at_rest(&self.config)) {
                self.axes.iter_mut().for_each(SpringAxis::settle);
                self.finished = true;
                break;
            }
        }
        self.value()
    }
}
