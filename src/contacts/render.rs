use glib::markup_escape_text;

use crate::api::models::Contact;

pub const EMPTY_PLACEHOLDER: &str = "No contacts found";

/// Pango markup for a whole region: one block per contact, blank line
/// between blocks. Every server-supplied field is escaped.
pub fn render(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    contacts.iter().map(render_block).collect::<Vec<_>>().join("\n\n")
}

fn render_block(contact: &Contact) -> String {
    let mut block = format!(
        "<b>{}</b>\nPhone: {}",
        markup_escape_text(contact.name.as_str()),
        markup_escape_text(contact.phone.as_str())
    );
    if let Some(email) = contact.email.as_deref().filter(|e| !e.is_empty()) {
        block.push_str(&format!("\nEmail: {}", markup_escape_text(email)));
    }
    block
}
