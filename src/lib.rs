//! dragkit - a headless pointer drag, sort and resize engine.
//!
//! The engine owns no element tree. A host adapter implements [`host::Host`]
//! for its own nodes and forwards pointer, scroll and animation-frame
//! callbacks into a [`DragDrop`] context, which drives:
//!
//! - **Drag controllers** ([`drag::DragRef`]): free dragging, or dragging
//!   inside a drop container with a placeholder and a floating preview
//! - **Drop containers** ([`drop_list::DropListRef`]): list and grid sorting,
//!   transfer between connected containers, auto-scrolling
//! - **Resizables** ([`resize::ResizeRef`]): eight-handle resizing with size
//!   limits, aspect ratio and boundaries
//! - **The pointer registry** ([`registry::PointerRegistry`]): one set of
//!   document listeners shared by every gesture
//!
//! Every controller and container reports what happens through
//! [`events::EventStream`] notification points.

pub mod config;
pub mod constants;
pub mod drag;
pub mod drop_list;
pub mod engine;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod input;
pub mod logging;
pub mod perf;
pub mod registry;
pub mod resize;
pub mod scroll_tracker;
pub mod spatial_index;
pub mod types;

pub use config::{DragDropConfig, DragStartDelay};
pub use engine::DragDrop;
pub use error::{DragDropError, DragDropResult};
