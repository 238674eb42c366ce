//! Performance monitoring for gesture hot paths.
//!
//! Pointer-move and animation-frame callbacks can fire 60+ times per second
//! while a gesture is active. This module provides:
//!
//! - **Frame timing**: auto-scroll frames measured with rolling averages
//! - **Operation statistics**: per-operation timing (pointer move, sorting)
//! - **Scoped timers**: RAII timing for code blocks
//! - **Conditional compilation**: `profile_scope!` is zero-cost unless the
//!   `profiling` feature is enabled
//!
//! ```ignore
//! fn sort_item(&mut self) {
//!     profile_scope!("sort_item");
//!     // ... work ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};

use crate::constants::TARGET_FRAME_MS;

/// Number of samples to keep for rolling averages
const SAMPLE_COUNT: usize = 60;

/// Threshold multiplier for warning (e.g., 2.0 = warn if frame takes 2x target)
const WARN_THRESHOLD: f64 = 2.0;

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;

// ============================================================================
// Frame Performance Monitor
// ============================================================================

/// Tracks animation-frame times and per-operation statistics.
#[derive(Debug)]
pub struct PerfMonitor {
    /// Recent frame times in milliseconds
    frame_times: VecDeque<f64>,
    /// When the current frame started
    frame_start: Option<Instant>,
    /// Count of frames that exceeded the warning threshold
    slow_frame_count: u64,
    /// Total frames tracked
    total_frames: u64,
    /// Per-operation timing statistics
    operation_stats: HashMap<&'static str, OperationStats>,
}

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    pub count: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Running sum over `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average time over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over recent samples.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(SAMPLE_COUNT),
            frame_start: None,
            slow_frame_count: 0,
            total_frames: 0,
            operation_stats: HashMap::new(),
        }
    }

    /// Mark the start of an animation frame.
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and record its duration.
    /// Returns the frame time in milliseconds.
    pub fn end_frame(&mut self) -> Option<f64> {
        let start = self.frame_start.take()?;
        let ms = start.elapsed().as_secs_f64() * 1000.0;

        if self.frame_times.len() >= SAMPLE_COUNT {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(ms);
        self.total_frames += 1;

        if ms > TARGET_FRAME_MS * WARN_THRESHOLD {
            self.slow_frame_count += 1;
            warn!(
                frame_time_ms = format!("{:.2}", ms),
                target_ms = format!("{:.2}", TARGET_FRAME_MS),
                "Slow auto-scroll frame"
            );
        }

        Some(ms)
    }

    /// Record one invocation of a named operation.
    pub fn record_operation(&mut self, name: &'static str, elapsed_ms: f64) {
        self.operation_stats.entry(name).or_default().record(elapsed_ms);
    }

    /// Average frame time over recent samples.
    pub fn average_frame_time(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
    }

    /// Maximum frame time in recent samples.
    pub fn max_frame_time(&self) -> f64 {
        self.frame_times.iter().copied().fold(0.0, f64::max)
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Percentage of frames that were slow.
    pub fn slow_frame_percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        (self.slow_frame_count as f64 / self.total_frames as f64) * 100.0
    }

    pub fn get_operation_stats(&self, name: &str) -> Option<&OperationStats> {
        self.operation_stats.get(name)
    }

    /// Log the slowest operations at debug level.
    pub fn log_summary(&self) {
        let mut ops: Vec<_> = self.operation_stats.iter().collect();
        ops.sort_by(|a, b| {
            b.1.average()
                .partial_cmp(&a.1.average())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (name, stats) in ops.iter().take(5) {
            debug!(
                "{}: avg={:.2}ms, p95={:.2}ms, max={:.2}ms, count={}",
                name,
                stats.average(),
                stats.p95(),
                stats.max_ms,
                stats.count
            );
        }
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.frame_start = None;
        self.slow_frame_count = 0;
        self.total_frames = 0;
        self.operation_stats.clear();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs its duration on drop when it exceeds a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer used by `profile_scope!` (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}
