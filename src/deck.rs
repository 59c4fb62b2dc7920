//! Card-deck swipe engine.
//!
//! Pure state machine behind the deck view: it owns the current index, the
//! raw drag offset and the undo history, and decides whether a released drag
//! commits or settles back. It knows nothing about the DOM; the view feeds
//! it pointer deltas and `transitionend` completions and renders whatever it
//! reports. Keeping it DOM-free is what makes the swipe semantics testable
//! natively.

use crate::data::Profile;
use crate::feedback::progress_for_offset;
use crate::history::{SwipeDirection, SwipeHistory, SwipeRecord};

/// Commit threshold as a fraction of the viewport width.
pub const SWIPE_THRESHOLD_RATIO: f64 = 0.28;
/// Pointer travel (either axis) below which a gesture is not yet a drag.
pub const DRAG_DEAD_ZONE: f64 = 6.0;
/// Released offsets within this distance of the origin rest in place: a
/// zero-length CSS transition never fires `transitionend`, so animating
/// from here would leave the gate stuck.
const REST_EPSILON: f64 = 1.0;
/// Rotation at a full viewport-width offset, clamped beyond.
pub const MAX_ROTATION_DEG: f64 = 12.0;
/// Fly-off target as a multiple of the viewport width.
pub const FLY_OFF_FACTOR: f64 = 1.2;
/// Fly-off transition duration.
pub const FLY_OFF_MS: u32 = 200;
/// Settle (spring-back) transition duration.
pub const SETTLE_MS: u32 = 250;
/// Preview card scale and vertical offset beneath the top card.
pub const PREVIEW_SCALE: f64 = 0.96;
pub const PREVIEW_OFFSET_PX: f64 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    FlyOff(SwipeDirection),
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Idle,
    Dragging,
    Animating(Animation),
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeckConfig {
    /// Wrap the index modulo the deck length instead of exhausting.
    pub looping: bool,
    /// Rejects new gestures and programmatic swipes entirely.
    pub disabled: bool,
}

/// What a released drag decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Past the threshold; a fly-off animation is now in flight.
    Commit(SwipeDirection),
    /// Below the threshold; springing back to the origin.
    Settle,
    /// At the origin (or not dragging at all); back to rest immediately.
    Rest,
}

/// Produced once per committed swipe, after the fly-off completes.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub profile: Profile,
    pub direction: SwipeDirection,
    pub new_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckEngine {
    profiles: Vec<Profile>,
    config: DeckConfig,
    viewport_width: f64,
    current_index: usize,
    drag_offset: (f64, f64),
    phase: DeckPhase,
    history: SwipeHistory,
}

impl DeckEngine {
    pub fn new(profiles: Vec<Profile>, config: DeckConfig, viewport_width: f64) -> Self {
        let phase = if profiles.is_empty() {
            DeckPhase::Exhausted
        } else {
            DeckPhase::Idle
        };
        Self {
            profiles,
            config,
            viewport_width,
            current_index: 0,
            drag_offset: (0.0, 0.0),
            phase,
            history: SwipeHistory::new(),
        }
    }

    /// Replaces the deck wholesale and starts a fresh session: index zero,
    /// empty history, offset reset.
    pub fn replace_profiles(&mut self, profiles: Vec<Profile>) {
        *self = Self::new(profiles, self.config, self.viewport_width);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn threshold(&self) -> f64 {
        self.viewport_width * SWIPE_THRESHOLD_RATIO
    }

    /// Feeds a pointer delta relative to the gesture origin. Starts the drag
    /// once the dead zone is exceeded on either axis; ignored while an
    /// animation is in flight, when exhausted, or when disabled. Returns
    /// whether the engine consumed the movement.
    pub fn drag_move(&mut self, dx: f64, dy: f64) -> bool {
        if self.config.disabled {
            return false;
        }
        match self.phase {
            DeckPhase::Idle => {
                if dx.abs() > DRAG_DEAD_ZONE || dy.abs() > DRAG_DEAD_ZONE {
                    self.phase = DeckPhase::Dragging;
                    self.drag_offset = (dx, dy);
                    true
                } else {
                    false
                }
            }
            DeckPhase::Dragging => {
                self.drag_offset = (dx, dy);
                true
            }
            DeckPhase::Animating(_) | DeckPhase::Exhausted => false,
        }
    }

    /// Ends the gesture. Past the threshold the card flies off toward
    /// 1.2x the viewport width; otherwise it springs back. The decision uses
    /// only the horizontal offset.
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.phase != DeckPhase::Dragging {
            return ReleaseOutcome::Rest;
        }
        let (x, y) = self.drag_offset;
        let threshold = self.threshold();

        if x > threshold {
            self.begin_fly_off(SwipeDirection::Right);
            ReleaseOutcome::Commit(SwipeDirection::Right)
        } else if x < -threshold {
            self.begin_fly_off(SwipeDirection::Left);
            ReleaseOutcome::Commit(SwipeDirection::Left)
        } else if x.abs() <= REST_EPSILON && y.abs() <= REST_EPSILON {
            self.drag_offset = (0.0, 0.0);
            self.phase = DeckPhase::Idle;
            ReleaseOutcome::Rest
        } else {
            self.drag_offset = (0.0, 0.0);
            self.phase = DeckPhase::Animating(Animation::Settle);
            ReleaseOutcome::Settle
        }
    }

    /// Aborts a drag without animating (pointer capture lost mid-gesture).
    pub fn cancel_drag(&mut self) {
        if self.phase == DeckPhase::Dragging {
            self.drag_offset = (0.0, 0.0);
            self.phase = DeckPhase::Idle;
        }
    }

    /// Programmatic swipe, from rest or mid-drag. No-op while animating,
    /// when exhausted, or when disabled. Returns whether it was accepted.
    pub fn trigger_swipe(&mut self, direction: SwipeDirection) -> bool {
        if self.config.disabled || self.top_index().is_none() {
            return false;
        }
        match self.phase {
            DeckPhase::Idle | DeckPhase::Dragging => {
                self.begin_fly_off(direction);
                true
            }
            DeckPhase::Animating(_) | DeckPhase::Exhausted => false,
        }
    }

    fn begin_fly_off(&mut self, direction: SwipeDirection) {
        let (_, y) = self.drag_offset;
        self.drag_offset = (self.fly_off_x(direction), y);
        self.phase = DeckPhase::Animating(Animation::FlyOff(direction));
    }

    pub fn fly_off_x(&self, direction: SwipeDirection) -> f64 {
        match direction {
            SwipeDirection::Right => self.viewport_width * FLY_OFF_FACTOR,
            SwipeDirection::Left => -self.viewport_width * FLY_OFF_FACTOR,
        }
    }

    /// Completion callback for whichever animation is in flight; the gate
    /// reopens only here. A finished fly-off appends the history entry,
    /// advances the index and hands back the commit for the caller's
    /// swipe/index callbacks. A finished settle just returns to rest.
    pub fn finish_animation(&mut self) -> Option<CommitRecord> {
        match self.phase {
            DeckPhase::Animating(Animation::Settle) => {
                self.drag_offset = (0.0, 0.0);
                self.phase = DeckPhase::Idle;
                None
            }
            DeckPhase::Animating(Animation::FlyOff(direction)) => {
                let top = self.top_index()?;
                let profile = self.profiles[top].clone();
                self.history.push(SwipeRecord {
                    profile: profile.clone(),
                    direction,
                    index: self.current_index,
                });
                self.drag_offset = (0.0, 0.0);
                if self.config.looping {
                    self.current_index = (self.current_index + 1) % self.profiles.len();
                    self.phase = DeckPhase::Idle;
                } else {
                    self.current_index += 1;
                    self.phase = if self.current_index >= self.profiles.len() {
                        DeckPhase::Exhausted
                    } else {
                        DeckPhase::Idle
                    };
                }
                Some(CommitRecord {
                    profile,
                    direction,
                    new_index: self.current_index,
                })
            }
            _ => None,
        }
    }

    /// Undoes the newest commit: restores the exact index the swipe departed
    /// from (which also exits exhaustion) and returns what was committed.
    /// Rejected mid-drag and mid-animation; `None` with empty history.
    pub fn rewind(&mut self) -> Option<SwipeRecord> {
        match self.phase {
            DeckPhase::Idle | DeckPhase::Exhausted => {}
            DeckPhase::Dragging | DeckPhase::Animating(_) => return None,
        }
        let record = self.history.pop()?;
        self.drag_offset = (0.0, 0.0);
        self.current_index = record.index;
        self.phase = DeckPhase::Idle;
        Some(record)
    }

    // Render selection. Top card is `profiles[current_index]` (modulo the
    // deck length when looping); at most one preview card beneath it.

    pub fn top_index(&self) -> Option<usize> {
        if self.profiles.is_empty() {
            return None;
        }
        if self.config.looping {
            Some(self.current_index % self.profiles.len())
        } else if self.current_index < self.profiles.len() {
            Some(self.current_index)
        } else {
            None
        }
    }

    pub fn top_profile(&self) -> Option<&Profile> {
        self.top_index().map(|index| &self.profiles[index])
    }

    pub fn preview_profile(&self) -> Option<&Profile> {
        let top = self.top_index()?;
        if self.config.looping {
            if self.profiles.len() > 1 {
                Some(&self.profiles[(top + 1) % self.profiles.len()])
            } else {
                None
            }
        } else {
            self.profiles.get(top + 1)
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn drag_offset(&self) -> (f64, f64) {
        self.drag_offset
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, DeckPhase::Animating(_))
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == DeckPhase::Exhausted
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_rewind(&self) -> bool {
        !self.history.is_empty()
    }

    /// Linear in the horizontal offset, +/-12 degrees at a full viewport
    /// width, clamped beyond.
    pub fn rotation_deg(&self) -> f64 {
        if self.viewport_width <= 0.0 {
            return 0.0;
        }
        (self.drag_offset.0 / self.viewport_width * MAX_ROTATION_DEG)
            .clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG)
    }

    /// `(like, nope)` progress for the current offset.
    pub fn feedback(&self) -> (f64, f64) {
        progress_for_offset(self.drag_offset.0, self.threshold())
    }
}
