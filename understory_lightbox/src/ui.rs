// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-way hand-off from the gesture path to the primary (UI) thread.
//!
//! Page callbacks never run inline on the gesture path. They are wrapped in a
//! [`UiTask`] and handed to a [`UiDispatcher`], which must not block. When the
//! task eventually runs relative to later touch events is unspecified.

use alloc::boxed::Box;

/// A unit of work for the primary thread.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Submits work to the primary thread without waiting for it.
pub trait UiDispatcher: Send + Sync {
    /// Enqueues `task`. Must return promptly.
    fn dispatch(&self, task: UiTask);
}

#[cfg(feature = "std")]
pub use channel::{UiQueue, UiSender, ui_channel};

#[cfg(feature = "std")]
mod channel {
    use std::sync::mpsc::{Receiver, Sender, channel};

    use super::{UiDispatcher, UiTask};

    /// Creates a connected dispatcher and queue.
    ///
    /// The sender goes to viewer pages; the queue stays with the primary
    /// thread's event loop, which calls [`UiQueue::run_pending`] once per turn.
    #[must_use]
    pub fn ui_channel() -> (UiSender, UiQueue) {
        let (tx, rx) = channel();
        (UiSender { tx }, UiQueue { rx })
    }

    /// Sending half of [`ui_channel`].
    #[derive(Debug)]
    pub struct UiSender {
        tx: Sender<UiTask>,
    }

    impl UiDispatcher for UiSender {
        fn dispatch(&self, task: UiTask) {
            if self.tx.send(task).is_err() {
                log::debug!("UI queue closed, dropping task");
            }
        }
    }

    /// Receiving half of [`ui_channel`].
    #[derive(Debug)]
    pub struct UiQueue {
        rx: Receiver<UiTask>,
    }

    impl UiQueue {
        /// Runs every task queued so far and returns how many ran.
        pub fn run_pending(&self) -> usize {
            let mut ran = 0;
            while let Ok(task) = self.rx.try_recv() {
                task();
                ran += 1;
            }
            ran
        }
    }
}
