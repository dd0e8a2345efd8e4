use gtk4 as gtk;
use gtk4::prelude::*;

use crate::contacts::surface::{FeedbackSurface, MessageKind, Region, ScheduledTask, Scheduler};

impl Region for gtk::Label {
    fn replace(&self, markup: &str) {
        self.set_markup(markup);
    }
}

impl FeedbackSurface for gtk::Label {
    fn set_message(&self, text: &str, kind: MessageKind) {
        self.set_text(text);
        self.set_css_classes(&["message", kind.css_class()]);
    }

    fn clear_text(&self) {
        self.set_text("");
    }
}

/// Schedules on the default main context via `timeout_add_local_once`.
pub struct GlibScheduler;

struct GlibTimeout(glib::SourceId);

impl ScheduledTask for GlibTimeout {
    fn cancel(self: Box<Self>) {
        self.0.remove();
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&self, delay: std::time::Duration, task: Box<dyn FnOnce()>) -> Box<dyn ScheduledTask> {
        Box::new(GlibTimeout(glib::timeout_add_local_once(delay, task)))
    }
}
