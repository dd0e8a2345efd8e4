use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::rc::Rc;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::app::Settings;
use crate::contacts::feedback::Feedback;
use crate::contacts::service::ContactService;
use crate::contacts::{ContactsController, ContactsView};
use crate::ui::contact_form::{ContactFormWidgets, EditFormWidgets};
use crate::ui::regions::GlibScheduler;

const STYLE: &str = "
.message.success { color: @success_color; }
.message.error { color: @error_color; }
";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE);
    match gtk::gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!("No display available, message styles not loaded"),
    }
}

/// Widgets the contact controller reads from and renders into.
pub struct ContactsPage {
    pub form: Rc<ContactFormWidgets>,
    pub edit_form: Rc<EditFormWidgets>,
    pub message: gtk::Label,
    pub search: gtk::SearchEntry,
    pub list: gtk::Label,
    pub results: gtk::Label,
}

fn region_label() -> gtk::Label {
    gtk::Label::builder()
        .xalign(0.0)
        .yalign(0.0)
        .wrap(true)
        .selectable(true)
        .build()
}

fn section(title: &str, body: &gtk::Label) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
    let heading = gtk::Label::new(Some(title));
    heading.add_css_class("heading");
    heading.set_halign(gtk::Align::Start);
    root.append(&heading);
    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .child(body)
        .build();
    root.append(&scroller);
    root
}

impl ContactsPage {
    pub fn new() -> (Self, gtk::Widget) {
        let columns = gtk::Box::new(gtk::Orientation::Horizontal, 24);
        columns.set_margin_top(12);
        columns.set_margin_bottom(12);
        columns.set_margin_start(12);
        columns.set_margin_end(12);

        let left = gtk::Box::new(gtk::Orientation::Vertical, 12);
        left.set_hexpand(true);
        let form = Rc::new(ContactFormWidgets::new());
        left.append(&form.widget());
        let message = gtk::Label::new(None);
        message.set_halign(gtk::Align::Start);
        left.append(&message);
        let list = region_label();
        left.append(&section("All contacts", &list));
        let edit_form = Rc::new(EditFormWidgets::new());
        left.append(&edit_form.widget());

        let right = gtk::Box::new(gtk::Orientation::Vertical, 12);
        right.set_hexpand(true);
        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search by name"));
        right.append(&search);
        let results = region_label();
        right.append(&section("Search results", &results));

        columns.append(&left);
        columns.append(&right);

        let page = Self { form, edit_form, message, search, list, results };
        (page, columns.upcast())
    }
}

/// Hook the page's signals up to a controller and run the first load.
pub fn init_contacts_page<S>(page: &ContactsPage, service: S, clear_after: Duration) -> Rc<ContactsController<S>>
where
    S: ContactService + 'static,
{
    let view = ContactsView {
        list: Rc::new(page.list.clone()),
        results: Rc::new(page.results.clone()),
        form: page.form.clone(),
        edit_form: page.edit_form.clone(),
        feedback: Feedback::new(Rc::new(page.message.clone()), Rc::new(GlibScheduler), clear_after),
    };
    let controller = Rc::new(ContactsController::new(service, view));

    {
        let controller = controller.clone();
        page.search.connect_changed(move |entry| {
            let controller = controller.clone();
            let text = entry.text().to_string();
            crate::utils::spawn_local(async move { controller.search(&text).await });
        });
    }

    let submit: Rc<dyn Fn()> = {
        let controller = controller.clone();
        Rc::new(move || {
            let controller = controller.clone();
            crate::utils::spawn_local(async move { controller.submit().await });
        })
    };
    {
        let submit = submit.clone();
        page.form.add_button.connect_clicked(move |_| (submit)());
    }
    // Enter in any field submits, like a web form.
    for entry in page.form.entries() {
        let submit = submit.clone();
        entry.connect_activate(move |_| (submit)());
    }

    let submit_edit: Rc<dyn Fn()> = {
        let controller = controller.clone();
        Rc::new(move || {
            let controller = controller.clone();
            crate::utils::spawn_local(async move { controller.submit_edit().await });
        })
    };
    {
        let submit_edit = submit_edit.clone();
        page.edit_form.update_button.connect_clicked(move |_| (submit_edit)());
    }
    for entry in page.edit_form.entries() {
        let submit_edit = submit_edit.clone();
        entry.connect_activate(move |_| (submit_edit)());
    }

    {
        let controller = controller.clone();
        crate::utils::spawn_local(async move { controller.load_contacts().await });
    }
    controller
}

pub fn show_main_window(app: &Application, settings: &Settings) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Contacts")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();
    let (page, content) = ContactsPage::new();
    overlay.set_child(Some(&content));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Contacts"));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    match ApiClient::new(&settings.base_url, settings.request_timeout()) {
        Ok(client) => {
            log::info!("Using contact server at {}", client.base_url());
            // Handlers hold the controller; the page widgets keep it alive.
            let _controller = init_contacts_page(&page, client, settings.feedback_delay());
        }
        Err(err) => {
            log::error!("Cannot start contact page: {err}");
            overlay.add_toast(adw::Toast::new(&format!("Cannot reach contacts: {}", err)));
        }
    }
}
