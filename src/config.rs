//! Engine configuration.
//!
//! Every field has a default from [`crate::constants`]; partial JSON files
//! only need to name the values they override.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTO_SCROLL_STEP, DRAG_START_DELAY_MOUSE_MS, DRAG_START_DELAY_TOUCH_MS, DRAG_START_THRESHOLD,
    DROP_PROXIMITY_THRESHOLD, MIN_RESIZE_SIZE, POINTER_DIRECTION_CHANGE_THRESHOLD,
    SCROLL_PROXIMITY_THRESHOLD,
};
use crate::error::{DragDropError, DragDropResult};
use crate::types::PointerKind;

/// Start delays per input device, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragStartDelay {
    pub mouse: f64,
    pub touch: f64,
}

impl Default for DragStartDelay {
    fn default() -> Self {
        Self {
            mouse: DRAG_START_DELAY_MOUSE_MS,
            touch: DRAG_START_DELAY_TOUCH_MS,
        }
    }
}

impl DragStartDelay {
    /// Same delay for every device.
    pub fn uniform(ms: f64) -> Self {
        Self { mouse: ms, touch: ms }
    }

    pub fn for_kind(&self, kind: PointerKind) -> f64 {
        match kind {
            PointerKind::Mouse => self.mouse,
            PointerKind::Touch => self.touch,
        }
    }
}

/// Tunables shared by every controller and container of a [`crate::DragDrop`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragDropConfig {
    /// Pixels of pointer travel before a drag starts.
    pub drag_start_threshold: f64,
    /// Pixels of travel before the reported direction flips.
    pub pointer_direction_change_threshold: f64,
    /// Default start delay for new drag items.
    pub drag_start_delay: DragStartDelay,
    /// Fraction of a container's size used as its sorting proximity band.
    pub drop_proximity_threshold: f64,
    /// Fraction of a viewport/container size used as its auto-scroll band.
    pub scroll_proximity_threshold: f64,
    /// Default per-frame auto-scroll step for new containers.
    pub auto_scroll_step: f64,
    /// Whether free-floating drags scroll the viewport near its edges.
    pub auto_scroll_free_drag: bool,
    /// Smallest width/height a resizable may shrink to.
    pub min_resize_size: f64,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            drag_start_threshold: DRAG_START_THRESHOLD,
            pointer_direction_change_threshold: POINTER_DIRECTION_CHANGE_THRESHOLD,
            drag_start_delay: DragStartDelay::default(),
            drop_proximity_threshold: DROP_PROXIMITY_THRESHOLD,
            scroll_proximity_threshold: SCROLL_PROXIMITY_THRESHOLD,
            auto_scroll_step: AUTO_SCROLL_STEP,
            auto_scroll_free_drag: false,
            min_resize_size: MIN_RESIZE_SIZE,
        }
    }
}

impl DragDropConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading drag/drop config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("parsing drag/drop config {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from JSON text.
    pub fn from_json_str(text: &str) -> DragDropResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| DragDropError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the engine misbehave.
    pub fn validate(&self) -> DragDropResult<()> {
        let non_negative = [
            ("drag_start_threshold", self.drag_start_threshold),
            (
                "pointer_direction_change_threshold",
                self.pointer_direction_change_threshold,
            ),
            ("drag_start_delay.mouse", self.drag_start_delay.mouse),
            ("drag_start_delay.touch", self.drag_start_delay.touch),
            ("drop_proximity_threshold", self.drop_proximity_threshold),
            ("scroll_proximity_threshold", self.scroll_proximity_threshold),
            ("auto_scroll_step", self.auto_scroll_step),
            ("min_resize_size", self.min_resize_size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DragDropError::Config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if self.scroll_proximity_threshold >= 0.5 {
            return Err(DragDropError::Config(
                "scroll_proximity_threshold must be below 0.5 so opposite bands cannot overlap"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
