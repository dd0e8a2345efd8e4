use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::contacts::surface::{FeedbackSurface, MessageKind, ScheduledTask, Scheduler};

pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_millis(3000);

/// Transient status line for the add form. A new message cancels the
/// pending clear of the previous one.
pub struct Feedback {
    surface: Rc<dyn FeedbackSurface>,
    scheduler: Rc<dyn Scheduler>,
    clear_after: Duration,
    pending: Rc<RefCell<Option<Box<dyn ScheduledTask>>>>,
}

impl Feedback {
    pub fn new(surface: Rc<dyn FeedbackSurface>, scheduler: Rc<dyn Scheduler>, clear_after: Duration) -> Self {
        Self {
            surface,
            scheduler,
            clear_after,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn show(&self, text: &str, kind: MessageKind) {
        let previous = self.pending.borrow_mut().take();
        if let Some(task) = previous {
            task.cancel();
        }
        self.surface.set_message(text, kind);

        let surface = Rc::clone(&self.surface);
        let pending = Rc::clone(&self.pending);
        let task = self.scheduler.schedule(
            self.clear_after,
            Box::new(move || {
                // Fired tasks must not be cancelled later.
                pending.borrow_mut().take();
                surface.clear_text();
            }),
        );
        *self.pending.borrow_mut() = Some(task);
    }
}
