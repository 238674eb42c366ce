//! Gesture state machine shared by drag and resize controllers.
//!
//! ## State Transitions
//!
//! ```text
//! Idle    -> Armed     (pointer down on the element or one of its handles)
//! Armed   -> Started   (pointer moved past the dead-zone after the delay)
//! Armed   -> Idle      (pointer up, or dead-zone passed before the delay)
//! Started -> Idle      (pointer up or disposal)
//! ```

use crate::input::tracker::PointerTracker;

/// Where a controller is in its pointer-down-to-pointer-up sequence.
#[derive(Debug, Clone, Copy, Default)]
pub enum GestureState {
    /// No pointer is down on the controller.
    #[default]
    Idle,

    /// Pointer is down; movement has not yet passed the start threshold.
    Armed { tracker: PointerTracker },

    /// The gesture has started: placeholder inserted, events flowing.
    Started { tracker: PointerTracker },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed { .. })
    }

    /// Returns true once the start threshold was passed.
    pub fn has_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    pub fn tracker(&self) -> Option<&PointerTracker> {
        match self {
            Self::Armed { tracker } | Self::Started { tracker } => Some(tracker),
            Self::Idle => None,
        }
    }

    pub fn tracker_mut(&mut self) -> Option<&mut PointerTracker> {
        match self {
            Self::Armed { tracker } | Self::Started { tracker } => Some(tracker),
            Self::Idle => None,
        }
    }

    pub fn arm(&mut self, tracker: PointerTracker) {
        *self = Self::Armed { tracker };
    }

    /// Promote an armed gesture. Returns `false` if nothing was armed.
    pub fn start(&mut self) -> bool {
        match *self {
            Self::Armed { tracker } => {
                *self = Self::Started { tracker };
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
