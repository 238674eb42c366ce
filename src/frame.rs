//! Animation-frame task scheduling.
//!
//! The engine has no clock of its own. The host calls
//! [`crate::DragDrop::on_animation_frame`] once per display frame and every
//! live repeating task runs exactly once. Tasks stop when their
//! [`CancellationToken`] is cancelled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared flag that stops a scheduled task.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task. Safe to call repeatedly or after the task is gone.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

type FrameTask = Box<dyn FnMut()>;

/// Repeating per-frame tasks.
#[derive(Default)]
pub struct FrameScheduler {
    tasks: RefCell<Vec<(CancellationToken, FrameTask)>>,
    frame: Cell<u64>,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending())
            .field("frame", &self.frame.get())
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on every frame until the returned token is cancelled.
    pub fn schedule_repeating(&self, task: impl FnMut() + 'static) -> CancellationToken {
        let token = CancellationToken::new();
        self.tasks.borrow_mut().push((token.clone(), Box::new(task)));
        token
    }

    /// Run one frame. Returns how many tasks ran.
    ///
    /// Tasks scheduled while the frame is running first run on the next frame.
    pub fn run_frame(&self) -> usize {
        self.frame.set(self.frame.get() + 1);

        let mut running = std::mem::take(&mut *self.tasks.borrow_mut());
        let mut ran = 0;
        for (token, task) in running.iter_mut() {
            if token.is_cancelled() {
                continue;
            }
            task();
            ran += 1;
        }

        let mut tasks = self.tasks.borrow_mut();
        running.retain(|(token, _)| !token.is_cancelled());
        running.append(&mut tasks);
        *tasks = running;
        ran
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|(token, _)| !token.is_cancelled())
            .count()
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame.get()
    }

    /// Cancel and drop every task.
    pub fn clear(&self) {
        for (token, _) in self.tasks.borrow_mut().drain(..) {
            token.cancel();
        }
    }
}
