//! Widget-facing seams of the contact page. The GTK implementations live in
//! `crate::ui::regions`; the recording fakes below back the controller tests.

use std::time::Duration;

use crate::api::models::{ContactUpdate, NewContact};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// A display area whose whole content is replaced on each render.
pub trait Region {
    fn replace(&self, markup: &str);
}

pub trait FeedbackSurface {
    fn set_message(&self, text: &str, kind: MessageKind);
    /// Empties the text, leaving the style classes in place.
    fn clear_text(&self);
}

pub trait ContactForm {
    fn values(&self) -> NewContact;
    fn reset(&self);
}

pub trait ContactEditForm {
    /// Name of the stored contact to change.
    fn target(&self) -> String;
    /// Only the fields the user filled in.
    fn changes(&self) -> ContactUpdate;
    fn reset(&self);
}

pub trait ScheduledTask {
    fn cancel(self: Box<Self>);
}

pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Box<dyn ScheduledTask>;
}
