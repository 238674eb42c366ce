//! Integration tests for dragkit.
//!
//! These tests drive complete gestures through `DragDrop` against the
//! in-memory `FakeDom` host and check both the notifications and what ends
//! up in the element tree.

mod lifecycle_tests;
mod sort_tests;
