// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-triggered observation of derived state.

use alloc::boxed::Box;
use core::fmt;

/// Remembers the last sampled value and reports only changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSampler<T> {
    previous: T,
}

impl<T: PartialEq + Copy> EdgeSampler<T> {
    /// Starts with `initial` as the previously seen value.
    #[must_use]
    pub const fn new(initial: T) -> Self {
        Self { previous: initial }
    }

    /// The last sampled value.
    #[must_use]
    pub fn previous(&self) -> T {
        self.previous
    }

    /// Records `value`, returning it if it differs from the previous sample.
    pub fn sample(&mut self, value: T) -> Option<T> {
        if value == self.previous {
            return None;
        }
        self.previous = value;
        Some(value)
    }
}

/// Fires a callback whenever the zoom flag flips.
///
/// The flag starts out `false` (a freshly mounted page is unscaled), so
/// sampling `false` repeatedly never fires.
pub struct ZoomStateNotifier {
    sampler: EdgeSampler<bool>,
    on_change: Box<dyn FnMut(bool) + Send>,
}

impl ZoomStateNotifier {
    /// Creates a notifier that calls `on_change` on every transition.
    pub fn new(on_change: impl FnMut(bool) + Send + 'static) -> Self {
        Self {
            sampler: EdgeSampler::new(false),
            on_change: Box::new(on_change),
        }
    }

    /// The last sampled zoom flag.
    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.sampler.previous()
    }

    /// Samples the current flag. Returns `true` if the callback fired.
    pub fn sample(&mut self, is_scaled: bool) -> bool {
        let Some(flag) = self.sampler.sample(is_scaled) else {
            return false;
        };
        log::debug!("zoom flag changed to {flag}");
        (self.on_change)(flag);
        true
    }
}

impl fmt::Debug for ZoomStateNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomStateNotifier")
            .field("is_scaled", &self.is_scaled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn sampler_reports_changes_only() {
        let mut sampler = EdgeSampler::new(0_u8);
        assert_eq!(sampler.sample(0), None);
        assert_eq!(sampler.sample(3), Some(3));
        assert_eq!(sampler.sample(3), None);
        assert_eq!(sampler.previous(), 3);
    }

    #[test]
    fn fires_once_per_transition() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut notifier = ZoomStateNotifier::new(move |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        let fired: Vec<bool> = [false, true, true, true, false, false, true]
            .into_iter()
            .map(|flag| notifier.sample(flag))
            .collect();
        assert_eq!(fired, [false, true, false, false, true, false, true]);
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert!(notifier.is_scaled());
    }
}
