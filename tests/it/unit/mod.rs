//! Unit tests for dragkit.

mod config_tests;
mod event_stream_tests;
mod geometry_props;
mod perf_tests;
