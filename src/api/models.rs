use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Raw add-contact form values, sent to the server as typed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Body of a create reply. The server uses `message` on success and
/// `error` on validation failures.
#[derive(Debug, Deserialize, Default)]
pub struct ServerReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerReply {
    pub fn into_text(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Fields to change on an existing contact. Unset fields keep their value.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Verdict of a create or update: HTTP success plus the server's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub ok: bool,
    pub message: String,
}
