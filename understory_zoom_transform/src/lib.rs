// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Zoom Transform: scale + translate math for image viewers.
//!
//! This crate holds the pure, allocation-free pieces of a zoomable image
//! viewport:
//! - [`TransformMatrix`]: a uniform scale plus translation with composers for
//!   pan, pinch and nested transforms, and a rounding step for commits.
//! - [`BoundsClamper`]: the translation correction that keeps a zoomed image
//!   covering the viewport.
//! - [`ZoomLimits`]: the committed-scale range, derived from the image's
//!   natural resolution.
//! - Double-tap targeting for both matrix-driven viewports
//!   ([`double_tap_target`]) and native zoom surfaces ([`native_zoom_rect`]).
//!
//! Translations and pinch origins are relative to the viewport centre; the
//! image is assumed to be laid out aspect-fit and centred before the transform
//! applies. Image geometry is optional everywhere: until it is known no bounds
//! are enforced and the upper zoom limit is open.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_zoom_transform::{BoundsClamper, ImageGeometry, TransformMatrix};
//!
//! let clamper = BoundsClamper::new(Size::new(390.0, 844.0));
//! let geometry = ImageGeometry::new(1000.0, 500.0);
//!
//! // Pinch to 4x about a point right of centre.
//! let origin = Point::new(250.0, 0.0);
//! let candidate = TransformMatrix::IDENTITY.prepend_pinch(4.0, origin, Vec2::ZERO);
//!
//! // The image would expose the right edge; the clamper says how far to move it back.
//! let correction = clamper.correction(candidate, Some(&geometry));
//! assert_eq!(correction, Vec2::new(165.0, 0.0));
//!
//! let committed = TransformMatrix::IDENTITY
//!     .prepend_pinch(4.0, origin, correction)
//!     .rounded();
//! assert_eq!(committed, TransformMatrix::new(-585.0, 0.0, 4.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod bounds;
mod double_tap;
mod geometry;
mod limits;
mod matrix;

pub use bounds::BoundsClamper;
pub use double_tap::{double_tap_target, fill_zoom, native_zoom_rect};
pub use geometry::{ImageGeometry, fitted_size, viewport_aspect};
pub use limits::{
    DEFAULT_MAX_ORIGINAL_ZOOM, DEFAULT_MIN_SCALE, DEFAULT_MIN_SCREEN_ZOOM, ZoomLimits,
};
pub use matrix::{ROUNDING_STEPS, TransformMatrix};
