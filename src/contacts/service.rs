use std::future::Future;

use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactUpdate, NewContact, ReplyOutcome};

/// The calls the contact page makes against the server.
pub trait ContactService {
    fn list(&self) -> impl Future<Output = Result<Vec<Contact>, ApiError>>;

    /// `term` is sent as given; callers normalize it first.
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<Contact>, ApiError>>;

    fn create(&self, contact: &NewContact) -> impl Future<Output = Result<ReplyOutcome, ApiError>>;

    /// `name` identifies the stored contact, matched case-insensitively by the server.
    fn update(&self, name: &str, changes: &ContactUpdate) -> impl Future<Output = Result<ReplyOutcome, ApiError>>;
}
