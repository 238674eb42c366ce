//! Pointer and scroll input handling for drag and resize gestures.
//!
//! The host adapter forwards element-level pointer-down events to
//! [`crate::DragDrop::pointer_down_on_drag`] /
//! [`crate::DragDrop::pointer_down_on_resize`], and the document-level events
//! bound by the registry to the `dispatch_*` entry points.
//!
//! ## Architecture
//!
//! Each controller carries an explicit state machine ([`GestureState`])
//! instead of scattered flags: a gesture is idle, armed (pointer down, still
//! inside the dead-zone) or started.
//!
//! ## Modules
//!
//! - `state` - Gesture state machine
//! - `tracker` - Pickup position, dead-zone, delay and direction tracking
//! - `coords` - Constrain hook, axis lock and boundary clamping
//! - `pointer_down` - Arming drag and resize gestures
//! - `drag` - Pointer-move handling (start, move, container transfer, resize)
//! - `pointer_up` - Finishing gestures (drop, free-drag end, resize commit)
//! - `scroll` - Scroll, select-start, touch-move and animation frames

pub mod coords;
mod drag;
mod pointer_down;
mod pointer_up;
mod scroll;
mod state;
mod tracker;

pub use state::GestureState;
pub use tracker::{PointerTracker, ThresholdCheck};
