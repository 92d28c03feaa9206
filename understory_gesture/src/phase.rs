// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Lifecycle of a continuous recognizer within one touch sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecognizerPhase {
    /// No touch sequence is in progress.
    #[default]
    Idle,
    /// Watching pointers, activation criteria not yet met.
    Possible,
    /// Recognized; updates are being reported.
    Active,
}
