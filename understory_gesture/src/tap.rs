// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single and double tap recognition.
//!
//! A single tap is only reported once a double tap has become impossible:
//! the second-tap window expired, the next press landed too late or too far
//! away, or the next press turned into some other gesture. This is the
//! "single tap waits for double tap to fail" relationship.

use kurbo::Point;

use crate::pointers::TouchEvent;

/// Default movement tolerated during a tap, in viewport units.
pub const DEFAULT_TAP_SLOP: f64 = 10.0;
/// Default longest press that still counts as a tap.
pub const DEFAULT_MAX_PRESS_MS: u64 = 500;
/// Default time allowed between the first tap's release and the second press.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;
/// Default distance allowed between the two taps of a double tap.
pub const DEFAULT_DOUBLE_TAP_SLOP: f64 = 40.0;

/// Tap recognizer tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TapConfig {
    /// Movement that turns a press into something other than a tap.
    pub slop: f64,
    /// Longest press that still counts as a tap.
    pub max_press_ms: u64,
    /// Time from first release to second press for a double tap.
    pub double_tap_window_ms: u64,
    /// Distance between first and second press for a double tap.
    pub double_tap_slop: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            slop: DEFAULT_TAP_SLOP,
            max_press_ms: DEFAULT_MAX_PRESS_MS,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
            double_tap_slop: DEFAULT_DOUBLE_TAP_SLOP,
        }
    }
}

/// A recognized tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapEvent {
    /// A tap that was not followed by a second one.
    Single {
        /// Where the tap landed, in viewport coordinates.
        position: Point,
    },
    /// Two taps in quick succession.
    Double {
        /// Where the second tap landed, in viewport coordinates.
        position: Point,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TapPhase {
    Idle,
    Pressed {
        down: Point,
        time_ms: u64,
        first_tap: Option<Point>,
    },
    AwaitingSecond {
        position: Point,
        released_ms: u64,
    },
    Failed,
}

/// Recognizes single and double taps.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    config: TapConfig,
    phase: TapPhase,
    claimed: bool,
}

impl TapRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            phase: TapPhase::Idle,
            claimed: false,
        }
    }

    /// Returns `true` if a tap completed during the current touch sequence.
    ///
    /// This is the tap group's activation predicate for arbitration.
    #[must_use]
    pub fn claimed(&self) -> bool {
        self.claimed
    }

    /// Returns `true` while a first tap waits for a possible second one.
    #[must_use]
    pub fn is_awaiting_second(&self) -> bool {
        matches!(self.phase, TapPhase::AwaitingSecond { .. })
    }

    /// Feeds a touch event. `pointer_count` is the number of pointers down
    /// after the event.
    pub fn handle(&mut self, event: &TouchEvent, pointer_count: usize) -> Option<TapEvent> {
        match *event {
            TouchEvent::Down(p) => {
                if pointer_count > 1 {
                    return self.fail();
                }
                match self.phase {
                    TapPhase::AwaitingSecond {
                        position,
                        released_ms,
                    } => {
                        let in_time = p.time_ms.saturating_sub(released_ms)
                            <= self.config.double_tap_window_ms;
                        let near = p.position.distance(position) <= self.config.double_tap_slop;
                        if in_time && near {
                            self.phase = TapPhase::Pressed {
                                down: p.position,
                                time_ms: p.time_ms,
                                first_tap: Some(position),
                            };
                            None
                        } else {
                            self.press(p.position, p.time_ms);
                            Some(TapEvent::Single { position })
                        }
                    }
                    TapPhase::Idle => {
                        self.press(p.position, p.time_ms);
                        None
                    }
                    TapPhase::Pressed { .. } | TapPhase::Failed => None,
                }
            }
            TouchEvent::Move(p) => match self.phase {
                TapPhase::Pressed { down, .. }
                    if p.position.distance(down) > self.config.slop =>
                {
                    self.fail()
                }
                _ => None,
            },
            TouchEvent::Up(p) => {
                let TapPhase::Pressed {
                    down,
                    time_ms,
                    first_tap,
                } = self.phase
                else {
                    return None;
                };
                if p.time_ms.saturating_sub(time_ms) > self.config.max_press_ms {
                    return self.fail();
                }
                self.claimed = true;
                if first_tap.is_some() {
                    self.phase = TapPhase::Idle;
                    Some(TapEvent::Double { position: down })
                } else {
                    self.phase = TapPhase::AwaitingSecond {
                        position: down,
                        released_ms: p.time_ms,
                    };
                    None
                }
            }
            TouchEvent::Cancel { .. } => {
                self.reset();
                None
            }
        }
    }

    /// Reports a pending single tap once the double-tap window has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<TapEvent> {
        match self.phase {
            TapPhase::AwaitingSecond {
                position,
                released_ms,
            } if now_ms.saturating_sub(released_ms) > self.config.double_tap_window_ms => {
                self.phase = TapPhase::Idle;
                Some(TapEvent::Single { position })
            }
            _ => None,
        }
    }

    /// Gives up on the current press, for example because another gesture
    /// won. A first tap that was waiting for its second is reported now.
    pub fn fail(&mut self) -> Option<TapEvent> {
        let pending = match self.phase {
            TapPhase::Pressed {
                first_tap: Some(position),
                ..
            }
            | TapPhase::AwaitingSecond { position, .. } => Some(TapEvent::Single { position }),
            _ => None,
        };
        self.phase = TapPhase::Failed;
        pending
    }

    fn press(&mut self, down: Point, time_ms: u64) {
        self.phase = TapPhase::Pressed {
            down,
            time_ms,
            first_tap: None,
        };
    }

    /// Marks the end of a touch sequence.
    ///
    /// A failed press becomes idle again; a first tap keeps waiting.
    pub fn end_sequence(&mut self) {
        self.claimed = false;
        if self.phase == TapPhase::Failed {
            self.phase = TapPhase::Idle;
        }
    }

    /// Forgets everything, including a pending first tap.
    pub fn reset(&mut self) {
        self.phase = TapPhase::Idle;
        self.claimed = false;
    }
}
