// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer configuration and its validation.

use core::fmt;

use understory_gesture::GestureConfig;
use understory_zoom_transform::ZoomLimits;

use crate::spring::SpringConfig;

/// Zoom range handed to a native zoom surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NativeZoomRange {
    /// Smallest zoom factor.
    pub min: f64,
    /// Largest zoom factor.
    pub max: f64,
}

impl Default for NativeZoomRange {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

/// Everything tunable about a viewer page.
///
/// With the `serde` feature, missing fields deserialize to their defaults, so
/// a document only needs to name what it changes:
///
/// ```rust
/// # #[cfg(feature = "serde")] {
/// use understory_lightbox::ViewerConfig;
///
/// let config: ViewerConfig =
///     serde_json::from_str(r#"{ "limits": { "max_original_zoom": 4.0 } }"#).unwrap();
/// assert_eq!(config.limits.max_original_zoom, 4.0);
/// assert_eq!(config.native_zoom.max, 3.0);
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Scale limits for the matrix strategy.
    pub limits: ZoomLimits,
    /// Recognizer thresholds.
    pub gestures: GestureConfig,
    /// Double-tap animation.
    pub spring: SpringConfig,
    /// Zoom range for native surfaces.
    pub native_zoom: NativeZoomRange,
}

impl ViewerConfig {
    /// Checks the values a page cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if !limits.min_scale.is_finite() || limits.min_scale <= 0.0 {
            return Err(ConfigError::MinScale(limits.min_scale));
        }
        if limits.min_screen_zoom.is_nan() || limits.min_screen_zoom < limits.min_scale {
            return Err(ConfigError::MinScreenZoom {
                min_screen_zoom: limits.min_screen_zoom,
                min_scale: limits.min_scale,
            });
        }
        if limits.max_original_zoom.is_nan() || limits.max_original_zoom <= 0.0 {
            return Err(ConfigError::MaxOriginalZoom(limits.max_original_zoom));
        }
        let native = self.native_zoom;
        if native.min.is_nan() || native.max.is_nan() || native.min <= 0.0 || native.min > native.max
        {
            return Err(ConfigError::NativeZoomRange {
                min: native.min,
                max: native.max,
            });
        }
        let spring = &self.spring;
        if !spring.angular_frequency.is_finite() || spring.angular_frequency <= 0.0 {
            return Err(ConfigError::SpringFrequency(spring.angular_frequency));
        }
        if !spring.max_step.is_finite() || spring.max_step <= 0.0 {
            return Err(ConfigError::SpringStep(spring.max_step));
        }
        Ok(())
    }
}

/// A [`ViewerConfig`] value that cannot work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `limits.min_scale` must be finite and positive.
    MinScale(f64),
    /// `limits.min_screen_zoom` must not be below `limits.min_scale`.
    MinScreenZoom {
        /// Offending value.
        min_screen_zoom: f64,
        /// The minimum it was compared against.
        min_scale: f64,
    },
    /// `limits.max_original_zoom` must be positive.
    MaxOriginalZoom(f64),
    /// The native range needs `0 < min <= max`.
    NativeZoomRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The spring frequency must be finite and positive.
    SpringFrequency(f64),
    /// The spring's integration step must be finite and positive.
    SpringStep(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinScale(v) => write!(f, "min_scale must be finite and positive, got {v}"),
            Self::MinScreenZoom {
                min_screen_zoom,
                min_scale,
            } => write!(
                f,
                "min_screen_zoom {min_screen_zoom} is below min_scale {min_scale}"
            ),
            Self::MaxOriginalZoom(v) => {
                write!(f, "max_original_zoom must be positive, got {v}")
            }
            Self::NativeZoomRange { min, max } => {
                write!(f, "native zoom range {min}..{max} is empty or non-positive")
            }
            Self::SpringFrequency(v) => {
                write!(f, "spring angular_frequency must be finite and positive, got {v}")
            }
            Self::SpringStep(v) => {
                write!(f, "spring max_step must be finite and positive, got {v}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ViewerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_native_range() {
        let config = ViewerConfig {
            native_zoom: NativeZoomRange { min: 3.0, max: 1.0 },
            ..ViewerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NativeZoomRange { min: 3.0, max: 1.0 })
        );
    }

    #[test]
    fn rejects_screen_zoom_below_min_scale() {
        let mut config = ViewerConfig::default();
        config.limits.min_screen_zoom = 0.5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "min_screen_zoom 0.5 is below min_scale 1");
    }

    #[test]
    fn rejects_bad_spring() {
        let mut config = ViewerConfig::default();
        config.spring.angular_frequency = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::SpringFrequency(0.0)));
        config.spring.angular_frequency = 20.0;
        config.spring.max_step = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::SpringStep(_))));
    }

    #[test]
    fn rejects_nan_min_scale() {
        let mut config = ViewerConfig::default();
        config.limits.min_scale = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::MinScale(_))));
    }
}
