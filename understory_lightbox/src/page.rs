// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One full-screen image page: gestures in, a transform out.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use kurbo::{Affine, Rect, Size};
use understory_gesture::{
    DismissGesture, GestureArbiter, GestureContext, GestureGroup, GestureOutput, TapEvent,
    TouchEvent, VerticalDismissSwipe,
};
use understory_zoom_transform::{ImageGeometry, TransformMatrix};

use crate::config::{ConfigError, ViewerConfig};
use crate::notifier::ZoomStateNotifier;
use crate::strategy::{HostCapabilities, StrategyKind, ZoomStrategy, select_strategy};
use crate::ui::UiDispatcher;

/// The image shown on a page.
///
/// Bytes are loaded elsewhere. The natural size is optional because it often
/// arrives after the page is mounted; see [`ViewerPage::set_image_geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSource {
    /// Full-resolution image location.
    pub uri: String,
    /// Low-resolution placeholder location.
    pub thumbnail_url: Option<String>,
    /// Natural width in pixels, if known.
    pub natural_width: Option<f64>,
    /// Natural height in pixels, if known.
    pub natural_height: Option<f64>,
}

impl ImageSource {
    /// An image with unknown size and no thumbnail.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            thumbnail_url: None,
            natural_width: None,
            natural_height: None,
        }
    }

    /// Sets the natural size.
    #[must_use]
    pub fn with_natural_size(mut self, width: f64, height: f64) -> Self {
        self.natural_width = Some(width);
        self.natural_height = Some(height);
        self
    }

    /// Sets the thumbnail location.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Geometry once both dimensions are known.
    #[must_use]
    pub fn geometry(&self) -> Option<ImageGeometry> {
        ImageGeometry::from_dimensions(self.natural_width, self.natural_height)
    }
}

/// Callbacks into the page's owner. Both run on the primary thread, via the
/// page's [`UiDispatcher`].
#[derive(Clone)]
pub struct PageCallbacks {
    /// A single tap (usually toggles the chrome).
    pub on_tap: Arc<dyn Fn() + Send + Sync>,
    /// The zoom flag changed.
    pub on_zoom: Arc<dyn Fn(bool) + Send + Sync>,
}

impl PageCallbacks {
    /// Callbacks that do nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            on_tap: Arc::new(|| {}),
            on_zoom: Arc::new(|_| {}),
        }
    }
}

impl Default for PageCallbacks {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for PageCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCallbacks").finish_non_exhaustive()
    }
}

/// Inputs a page is mounted with.
#[derive(Clone, Debug)]
pub struct PageProps {
    /// The image.
    pub image: ImageSource,
    /// Where the thumbnail sat before opening, for the owner's open animation.
    pub initial_position: Option<Rect>,
    /// Owner callbacks.
    pub callbacks: PageCallbacks,
}

impl PageProps {
    /// Props with no initial position and no-op callbacks.
    #[must_use]
    pub fn new(image: ImageSource) -> Self {
        Self {
            image,
            initial_position: None,
            callbacks: PageCallbacks::noop(),
        }
    }
}

/// A full-screen, zoomable image page.
///
/// Feed it touch events with [`handle_touch`](Self::handle_touch) and tick it
/// once per display frame with [`advance_frame`](Self::advance_frame); read
/// [`render_transform`](Self::render_transform) (or
/// [`render_affine`](Self::render_affine)) whenever drawing.
///
/// The page owns its transform state exclusively. The parent's dismiss
/// gesture competes with the page's own gestures and wins a touch sequence
/// only when it activates first.
pub struct ViewerPage<D: DismissGesture = VerticalDismissSwipe> {
    image: ImageSource,
    initial_position: Option<Rect>,
    viewport: Size,
    arbiter: GestureArbiter,
    strategy: Box<dyn ZoomStrategy>,
    notifier: ZoomStateNotifier,
    dismiss: D,
    on_tap: Arc<dyn Fn() + Send + Sync>,
    ui: Arc<dyn UiDispatcher>,
    last_frame_ms: Option<u64>,
    outputs: Vec<GestureOutput>,
}

impl<D: DismissGesture> ViewerPage<D> {
    /// Mounts a page.
    ///
    /// Fails only if `config` is invalid.
    pub fn new(
        props: PageProps,
        viewport: Size,
        host: HostCapabilities,
        config: &ViewerConfig,
        dismiss: D,
        ui: Arc<dyn UiDispatcher>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut strategy = select_strategy(host, viewport, config);
        strategy.set_geometry(props.image.geometry());
        let mut arbiter = GestureArbiter::new(config.gestures);
        arbiter.set_transform_enabled(strategy.handles_transform_gestures());

        let on_zoom = props.callbacks.on_zoom;
        let zoom_ui = Arc::clone(&ui);
        let notifier = ZoomStateNotifier::new(move |is_scaled| {
            let on_zoom = Arc::clone(&on_zoom);
            zoom_ui.dispatch(Box::new(move || on_zoom(is_scaled)));
        });
        log::debug!(
            "mounted {:?} page for {} in {viewport:?}",
            strategy.kind(),
            props.image.uri
        );

        Ok(Self {
            image: props.image,
            initial_position: props.initial_position,
            viewport,
            arbiter,
            strategy,
            notifier,
            dismiss,
            on_tap: props.callbacks.on_tap,
            ui,
            last_frame_ms: None,
            outputs: Vec::new(),
        })
    }

    /// Processes one touch event.
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        let context = GestureContext {
            is_scaled: self.strategy.is_scaled(),
        };
        let was_animating = self.strategy.is_animating();
        let mut outputs = mem::take(&mut self.outputs);
        self.arbiter.handle(event, &context, &self.dismiss, &mut outputs);
        if matches!(event, TouchEvent::Cancel { .. }) {
            self.strategy.cancel_gestures();
        }
        self.apply_outputs(&mut outputs);
        self.outputs = outputs;
        // A new animation's first frame is timed from the touch that started it.
        if !was_animating && self.strategy.is_animating() {
            self.last_frame_ms = Some(event.time_ms());
        }
        self.sample_zoom();
    }

    /// Advances time to `now_ms`: delivers timed-out single taps, steps
    /// animations and samples the zoom flag.
    pub fn advance_frame(&mut self, now_ms: u64) {
        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| millis_to_seconds(now_ms.saturating_sub(last)));
        self.last_frame_ms = Some(now_ms);

        let mut outputs = mem::take(&mut self.outputs);
        self.arbiter.poll(now_ms, &mut outputs);
        self.apply_outputs(&mut outputs);
        self.outputs = outputs;

        self.strategy.advance(dt);
        self.sample_zoom();
    }

    /// Records the image's natural size. Safe mid-gesture: clamping engages
    /// on the next update without resetting anything.
    pub fn set_image_geometry(&mut self, width: f64, height: f64) {
        self.image.natural_width = Some(width);
        self.image.natural_height = Some(height);
        self.strategy.set_geometry(self.image.geometry());
    }

    /// The transform to draw with, relative to the viewport centre.
    #[must_use]
    pub fn render_transform(&self) -> TransformMatrix {
        self.strategy.render_transform()
    }

    /// [`render_transform`](Self::render_transform) as an [`Affine`] in
    /// viewport coordinates, to apply to the aspect-fit image layer.
    #[must_use]
    pub fn render_affine(&self) -> Affine {
        self.render_transform().to_affine(self.viewport.to_rect().center())
    }

    /// The committed transform.
    #[must_use]
    pub fn committed_transform(&self) -> TransformMatrix {
        self.strategy.committed_transform()
    }

    /// The zoom flag as last reported to the owner.
    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.notifier.is_scaled()
    }

    /// Whether a native surface may rubber-band; only while zoomed.
    #[must_use]
    pub fn permits_bounce(&self) -> bool {
        self.strategy.kind() == StrategyKind::NativeSurface && self.notifier.is_scaled()
    }

    /// Returns `true` while a double-tap animation runs.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.strategy.is_animating()
    }

    /// The gesture group owning the current touch sequence.
    #[must_use]
    pub fn active_gesture(&self) -> Option<GestureGroup> {
        self.arbiter.winner()
    }

    /// Which zoom strategy this page runs.
    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// The image.
    #[must_use]
    pub fn image(&self) -> &ImageSource {
        &self.image
    }

    /// Where the thumbnail sat before opening.
    #[must_use]
    pub fn initial_position(&self) -> Option<Rect> {
        self.initial_position
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The parent's dismiss gesture.
    #[must_use]
    pub fn dismiss_gesture(&self) -> &D {
        &self.dismiss
    }

    /// The parent's dismiss gesture, mutably.
    pub fn dismiss_gesture_mut(&mut self) -> &mut D {
        &mut self.dismiss
    }

    fn apply_outputs(&mut self, outputs: &mut Vec<GestureOutput>) {
        for output in outputs.drain(..) {
            match output {
                GestureOutput::Dismiss(event) => self.dismiss.on_event(event),
                GestureOutput::Pan(event) => self.strategy.pan(event),
                GestureOutput::Pinch(event) => self.strategy.pinch(event),
                GestureOutput::Tap(TapEvent::Single { .. }) => {
                    let on_tap = Arc::clone(&self.on_tap);
                    self.ui.dispatch(Box::new(move || on_tap()));
                }
                GestureOutput::Tap(TapEvent::Double { position }) => {
                    self.strategy.double_tap(position);
                }
            }
        }
    }

    fn sample_zoom(&mut self) {
        let is_scaled = self.strategy.is_scaled();
        if self.notifier.sample(is_scaled) {
            self.strategy.zoom_changed(is_scaled);
        }
    }
}

impl<D: DismissGesture + fmt::Debug> fmt::Debug for ViewerPage<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerPage")
            .field("image", &self.image)
            .field("initial_position", &self.initial_position)
            .field("viewport", &self.viewport)
            .field("arbiter", &self.arbiter)
            .field("strategy", &self.strategy)
            .field("notifier", &self.notifier)
            .field("dismiss", &self.dismiss)
            .field("last_frame_ms", &self.last_frame_ms)
            .finish_non_exhaustive()
    }
}

fn millis_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
