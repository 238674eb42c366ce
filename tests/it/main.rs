//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead to a single link step.
//!
//! Structure:
//! - helpers: `FakeDom` host, event tracing and engine fixtures
//! - integration: Full gesture workflows driven through `DragDrop`
//! - unit: Single-component unit tests

mod integration;
mod unit;
