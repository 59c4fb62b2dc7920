//! Shared swipe-feedback channel.
//!
//! Two scalars in [0, 1] derived from the horizontal drag offset. The deck
//! view is the only writer; the action bar (and anything else interested)
//! subscribes through a context without being wired into the drag handler.

use std::rc::Rc;
use yew::prelude::{Reducible, UseReducerHandle};

/// Maps a signed horizontal offset to `(like, nope)` progress. At most one
/// of the two is nonzero because both derive from the same signed offset.
pub fn progress_for_offset(offset_x: f64, threshold: f64) -> (f64, f64) {
    if threshold <= 0.0 {
        return (0.0, 0.0);
    }
    let like = (offset_x / threshold).clamp(0.0, 1.0);
    let nope = (-offset_x / threshold).clamp(0.0, 1.0);
    (like, nope)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeFeedback {
    pub like_progress: f64,
    pub nope_progress: f64,
}

pub enum FeedbackAction {
    Drag { like: f64, nope: f64 },
    Reset,
}

impl Reducible for SwipeFeedback {
    type Action = FeedbackAction;

    fn reduce(self: Rc<Self>, action: FeedbackAction) -> Rc<Self> {
        match action {
            FeedbackAction::Drag { like, nope } => Rc::new(SwipeFeedback {
                like_progress: like.clamp(0.0, 1.0),
                nope_progress: nope.clamp(0.0, 1.0),
            }),
            FeedbackAction::Reset => Rc::new(SwipeFeedback::default()),
        }
    }
}

pub type FeedbackHandle = UseReducerHandle<SwipeFeedback>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_mutually_exclusive() {
        let (like, nope) = progress_for_offset(40.0, 100.0);
        assert_eq!((like, nope), (0.4, 0.0));

        let (like, nope) = progress_for_offset(-40.0, 100.0);
        assert_eq!((like, nope), (0.0, 0.4));

        let (like, nope) = progress_for_offset(0.0, 100.0);
        assert_eq!((like, nope), (0.0, 0.0));
    }

    #[test]
    fn progress_saturates_at_one() {
        assert_eq!(progress_for_offset(250.0, 100.0), (1.0, 0.0));
        assert_eq!(progress_for_offset(-9999.0, 100.0), (0.0, 1.0));
    }

    #[test]
    fn degenerate_threshold_yields_zero() {
        assert_eq!(progress_for_offset(40.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn reducer_clamps_and_resets() {
        let state = Rc::new(SwipeFeedback::default());
        let state = state.reduce(FeedbackAction::Drag {
            like: 1.7,
            nope: -0.2,
        });
        assert_eq!(state.like_progress, 1.0);
        assert_eq!(state.nope_progress, 0.0);

        let state = state.reduce(FeedbackAction::Reset);
        assert_eq!(*state, SwipeFeedback::default());
    }
}
