mod api;
mod app;
mod contacts;
mod logging;
mod ui;
mod utils;

use adw::prelude::*;
use adw::Application;

const APP_ID: &str = "com.example.ContactBook";

fn main() -> glib::ExitCode {
    logging::init();
    log::info!("Contact book starting");

    let app = Application::builder()
        .application_id(APP_ID)
        .build();
    app.connect_startup(|_| crate::ui::main_window::load_css());
    app.connect_activate(|app| {
        crate::app::build_ui(app);
    });
    app.run()
}
