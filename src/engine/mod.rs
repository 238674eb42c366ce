//! Engine module - the [`DragDrop`] context and its bookkeeping.
//!
//! This module is organized into several submodules:
//! - `state` - The DragDrop struct definition and accessors
//! - `lifecycle` - Creating, configuring and disposing controllers and containers
//! - `containers` - Sibling resolution and container-to-container effects
//!
//! Pointer handling lives in [`crate::input`] as further `impl DragDrop`
//! blocks.

mod containers;
mod lifecycle;
mod state;

pub use state::DragDrop;
