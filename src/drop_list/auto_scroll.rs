//! Proximity-triggered scrolling while a drag is active.
//!
//! The scroller resolves a (target, vertical, horizontal) triple from the
//! pointer position. Whenever that triple changes, the running frame task is
//! cancelled and, if any direction is set, a new one is scheduled that
//! scrolls the target by a fixed step on every animation frame.

use std::rc::Rc;

use tracing::trace;

use crate::frame::{CancellationToken, FrameScheduler};
use crate::geometry::{
    element_scroll_directions, horizontal_scroll_direction, vertical_scroll_direction,
    HorizontalScroll, Rect, VerticalScroll,
};
use crate::host::Host;
use crate::types::{NodeId, ScrollTarget};

/// What is currently being scrolled, and in which directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub target: ScrollTarget,
    pub vertical: VerticalScroll,
    pub horizontal: HorizontalScroll,
}

#[derive(Debug)]
struct ActiveScroll {
    state: ScrollState,
    token: CancellationToken,
}

pub struct AutoScroller {
    host: Rc<dyn Host>,
    frames: Rc<FrameScheduler>,
    /// Pixels per frame on each axis.
    pub step: f64,
    /// Fraction of the viewport/element size forming each edge band.
    pub scroll_threshold: f64,
    /// Fraction by which an element's rect is grown before it is considered.
    pub proximity_threshold: f64,
    active: Option<ActiveScroll>,
}

impl std::fmt::Debug for AutoScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoScroller")
            .field("step", &self.step)
            .field("active", &self.active)
            .finish()
    }
}

impl AutoScroller {
    pub fn new(
        host: Rc<dyn Host>,
        frames: Rc<FrameScheduler>,
        step: f64,
        scroll_threshold: f64,
        proximity_threshold: f64,
    ) -> Self {
        Self {
            host,
            frames,
            step,
            scroll_threshold,
            proximity_threshold,
            active: None,
        }
    }

    /// Classify the pointer against the viewport edges first, then against
    /// each scrollable element (nearest first) the pointer is close to, and
    /// retarget the frame loop if the result changed.
    ///
    /// `elements` carries cached client rects; the host is not re-measured.
    pub fn start_scrolling_if_necessary(&mut self, x: f64, y: f64, elements: &[(NodeId, Rect)]) {
        let viewport = Rect::from_viewport(self.host.viewport_size());
        let mut vertical = vertical_scroll_direction(&viewport, self.scroll_threshold, y);
        let mut horizontal = horizontal_scroll_direction(&viewport, self.scroll_threshold, x);
        let mut target = ScrollTarget::Document;

        if vertical == VerticalScroll::None && horizontal == HorizontalScroll::None {
            for (node, rect) in elements {
                if !rect.is_pointer_near(self.proximity_threshold, x, y) {
                    continue;
                }
                let metrics = self.host.scroll_metrics(ScrollTarget::Node(*node));
                let (v, h) = element_scroll_directions(&metrics, rect, self.scroll_threshold, x, y);
                if v != VerticalScroll::None || h != HorizontalScroll::None {
                    vertical = v;
                    horizontal = h;
                    target = ScrollTarget::Node(*node);
                    break;
                }
            }
        }

        self.retarget(ScrollState { target, vertical, horizontal });
    }

    fn retarget(&mut self, next: ScrollState) {
        let idle = next.vertical == VerticalScroll::None && next.horizontal == HorizontalScroll::None;

        match &self.active {
            Some(active) if active.state == next => return,
            None if idle => return,
            _ => {}
        }

        self.stop_scrolling();
        if idle {
            return;
        }

        trace!(target = ?next.target, vertical = ?next.vertical, horizontal = ?next.horizontal, "auto-scroll retargeted");

        let host = self.host.clone();
        let step = self.step;
        let dy = match next.vertical {
            VerticalScroll::Up => -step,
            VerticalScroll::Down => step,
            VerticalScroll::None => 0.0,
        };
        let dx = match next.horizontal {
            HorizontalScroll::Left => -step,
            HorizontalScroll::Right => step,
            HorizontalScroll::None => 0.0,
        };
        let token = self
            .frames
            .schedule_repeating(move || host.scroll_by(next.target, dx, dy));
        self.active = Some(ActiveScroll { state: next, token });
    }

    /// Cancel the frame loop. Safe to call when nothing is running.
    pub fn stop_scrolling(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<ScrollState> {
        self.active.as_ref().map(|a| a.state)
    }
}

impl Drop for AutoScroller {
    fn drop(&mut self) {
        self.stop_scrolling();
    }
}
