//! Unit tests for perf module.

use dragkit::perf::{PerfMonitor, ScopedTimer};

use crate::helpers::{add_list, move_to, new_engine, release, start_drag};
use dragkit::geometry::{Rect, Size};
use dragkit::types::Orientation;

#[test]
fn test_perf_monitor_basic() {
    let mut monitor = PerfMonitor::new();

    monitor.begin_frame();
    let time = monitor.end_frame();

    assert!(time.is_some());
    assert!(time.unwrap() >= 0.0);
    assert_eq!(monitor.total_frames(), 1);
}

#[test]
fn test_end_frame_without_begin_records_nothing() {
    let mut monitor = PerfMonitor::new();
    assert!(monitor.end_frame().is_none());
    assert_eq!(monitor.total_frames(), 0);
    assert_eq!(monitor.average_frame_time(), 0.0);
}

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping the timer must not warn.
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_operation_stats_recording() {
    let mut monitor = PerfMonitor::new();

    monitor.record_operation("test_op", 5.0);
    monitor.record_operation("test_op", 10.0);
    monitor.record_operation("test_op", 15.0);

    let stats = monitor.get_operation_stats("test_op").unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.average() - 10.0).abs() < 0.001);
    assert_eq!(stats.min_ms, 5.0);
    assert_eq!(stats.max_ms, 15.0);
}

#[test]
fn test_reset_clears_everything() {
    let mut monitor = PerfMonitor::new();
    monitor.begin_frame();
    monitor.end_frame();
    monitor.record_operation("op", 1.0);

    monitor.reset();
    assert_eq!(monitor.total_frames(), 0);
    assert!(monitor.get_operation_stats("op").is_none());
    assert_eq!(monitor.slow_frame_percentage(), 0.0);
}

#[test]
fn test_engine_records_pointer_moves_and_frames() {
    let (dom, mut dd) = new_engine();
    let list = add_list(
        &dom,
        &mut dd,
        Rect::new(200.0, 200.0, 100.0, 150.0),
        Orientation::Vertical,
        Size::new(100.0, 50.0),
        3,
    );

    start_drag(&mut dd, list.items[0], list.nodes[0], 250.0, 225.0);
    move_to(&mut dd, 250.0, 240.0);
    release(&mut dd, 250.0, 240.0);
    dd.on_animation_frame();

    let moves = dd.perf().get_operation_stats("pointer_move").unwrap();
    assert_eq!(moves.count, 2);
    assert!(dd.perf().get_operation_stats("animation_frame").is_some());
    assert_eq!(dd.perf().total_frames(), 1);
}
