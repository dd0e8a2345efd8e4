use gtk4::prelude::*;
use gtk4 as gtk;

use crate::api::models::{ContactUpdate, NewContact};
use crate::contacts::surface::{ContactEditForm, ContactForm};

pub struct ContactFormWidgets {
    root: gtk::Box,
    pub name: gtk::Entry,
    pub phone: gtk::Entry,
    pub email: gtk::Entry,
    pub add_button: gtk::Button,
}

impl ContactFormWidgets {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);

        let title = gtk::Label::new(Some("Add contact"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let entry = |placeholder: &str| {
            let entry = gtk::Entry::new();
            entry.set_placeholder_text(Some(placeholder));
            entry.set_hexpand(true);
            root.append(&entry);
            entry
        };
        let name = entry("Name");
        let phone = entry("Phone");
        let email = entry("Email (optional)");

        let add_button = gtk::Button::with_label("Add");
        add_button.add_css_class("suggested-action");
        add_button.set_halign(gtk::Align::End);
        root.append(&add_button);

        Self { root, name, phone, email, add_button }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn entries(&self) -> [&gtk::Entry; 3] {
        [&self.name, &self.phone, &self.email]
    }
}

impl ContactForm for ContactFormWidgets {
    fn values(&self) -> NewContact {
        NewContact {
            name: self.name.text().to_string(),
            phone: self.phone.text().to_string(),
            email: self.email.text().to_string(),
        }
    }

    fn reset(&self) {
        for entry in self.entries() {
            entry.set_text("");
        }
    }
}

/// Change an existing contact. Blank fields keep their stored value.
pub struct EditFormWidgets {
    root: gtk::Box,
    pub target: gtk::Entry,
    pub name: gtk::Entry,
    pub phone: gtk::Entry,
    pub email: gtk::Entry,
    pub update_button: gtk::Button,
}

fn filled(entry: &gtk::Entry) -> Option<String> {
    let text = entry.text();
    (!text.is_empty()).then(|| text.to_string())
}

impl EditFormWidgets {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);

        let title = gtk::Label::new(Some("Update contact"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let entry = |placeholder: &str| {
            let entry = gtk::Entry::new();
            entry.set_placeholder_text(Some(placeholder));
            entry.set_hexpand(true);
            root.append(&entry);
            entry
        };
        let target = entry("Current name");
        let name = entry("New name (blank keeps current)");
        let phone = entry("New phone (blank keeps current)");
        let email = entry("New email (blank keeps current)");

        let update_button = gtk::Button::with_label("Update");
        update_button.set_halign(gtk::Align::End);
        root.append(&update_button);

        Self { root, target, name, phone, email, update_button }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn entries(&self) -> [&gtk::Entry; 4] {
        [&self.target, &self.name, &self.phone, &self.email]
    }
}

impl ContactEditForm for EditFormWidgets {
    fn target(&self) -> String {
        self.target.text().to_string()
    }

    fn changes(&self) -> ContactUpdate {
        ContactUpdate {
            name: filled(&self.name),
            phone: filled(&self.phone),
            email: filled(&self.email),
        }
    }

    fn reset(&self) {
        for entry in self.entries() {
            entry.set_text("");
        }
    }
}
