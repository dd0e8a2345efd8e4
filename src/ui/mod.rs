pub mod contact_form;
pub mod main_window;
pub mod regions;
