//! Engine state - the DragDrop struct definition.

use std::rc::Rc;

use indexmap::IndexSet;
use slotmap::SlotMap;

use crate::config::DragDropConfig;
use crate::drag::DragRef;
use crate::drop_list::{AutoScroller, DropListRef};
use crate::frame::FrameScheduler;
use crate::host::Host;
use crate::perf::PerfMonitor;
use crate::registry::PointerRegistry;
use crate::resize::ResizeRef;
use crate::types::{DragId, DropListId, GroupId, ResizeId};

/// The process-wide drag/drop context.
///
/// Owns every drag controller, drop container and resizable, the registry
/// holding the shared document listeners, and the frame scheduler that drives
/// auto-scrolling. A host adapter creates one per document and forwards
/// pointer, scroll and frame callbacks into it.
pub struct DragDrop {
    /// Element tree, viewport and listener host
    pub(crate) host: Rc<dyn Host>,
    pub(crate) config: DragDropConfig,
    pub(crate) registry: PointerRegistry,

    pub(crate) drags: SlotMap<DragId, DragRef>,
    pub(crate) drops: SlotMap<DropListId, DropListRef>,
    pub(crate) resizes: SlotMap<ResizeId, ResizeRef>,
    /// Containers that are implicitly connected to each other
    pub(crate) groups: SlotMap<GroupId, IndexSet<DropListId>>,

    /// Repeating tasks run from [`DragDrop::on_animation_frame`]
    pub(crate) frames: Rc<FrameScheduler>,
    /// Scrolls the viewport during free drags
    pub(crate) viewport_scroller: AutoScroller,
    pub(crate) perf: PerfMonitor,
}

impl std::fmt::Debug for DragDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDrop")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("drags", &self.drags.len())
            .field("drops", &self.drops.len())
            .field("resizes", &self.resizes.len())
            .field("groups", &self.groups.len())
            .field("frames", &self.frames)
            .finish()
    }
}

impl DragDrop {
    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    pub fn registry(&self) -> &PointerRegistry {
        &self.registry
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    pub fn perf_mut(&mut self) -> &mut PerfMonitor {
        &mut self.perf
    }

    pub fn drag(&self, id: DragId) -> Option<&DragRef> {
        self.drags.get(id)
    }

    pub fn drag_mut(&mut self, id: DragId) -> Option<&mut DragRef> {
        self.drags.get_mut(id)
    }

    pub fn drop_list(&self, id: DropListId) -> Option<&DropListRef> {
        self.drops.get(id)
    }

    pub fn drop_list_mut(&mut self, id: DropListId) -> Option<&mut DropListRef> {
        self.drops.get_mut(id)
    }

    pub fn resizable(&self, id: ResizeId) -> Option<&ResizeRef> {
        self.resizes.get(id)
    }

    pub fn resizable_mut(&mut self, id: ResizeId) -> Option<&mut ResizeRef> {
        self.resizes.get_mut(id)
    }

    pub fn group_members(&self, group: GroupId) -> impl Iterator<Item = DropListId> + '_ {
        self.groups.get(group).into_iter().flat_map(|g| g.iter().copied())
    }

    /// Whether the viewport is being auto-scrolled for a free drag.
    pub fn is_viewport_auto_scrolling(&self) -> bool {
        self.viewport_scroller.is_scrolling()
    }

    /// Whether any drag or resize is between pointer-down and pointer-up.
    pub fn has_active_gesture(&self) -> bool {
        self.registry.has_active_gesture()
    }
}
