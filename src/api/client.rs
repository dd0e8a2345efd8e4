use std::future::Future;
use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactUpdate, NewContact, ReplyOutcome, ServerReply};
use crate::contacts::service::ContactService;

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let normalized = crate::utils::normalize_url(base_url);
        let base = Url::parse(&normalized)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{normalized}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(normalized));
        }
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/contacts`, with `search` form-encoded into the query when given.
    pub fn contacts_url(&self, search: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("contacts");
        if let Some(term) = search {
            url.query_pairs_mut().append_pair("search", term);
        }
        Ok(url)
    }

    /// `<base>/contacts/<name>`, with `name` percent-encoded as one path segment.
    pub fn contact_url(&self, name: &str) -> Result<Url, ApiError> {
        let mut url = self.contacts_url(None)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .push(name);
        Ok(url)
    }

    async fn read_outcome(resp: reqwest::Response) -> Result<ReplyOutcome, ApiError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        let reply: ServerReply = serde_json::from_slice(&body)?;
        let message = reply.into_text().unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("Unknown response").to_string()
        });
        Ok(ReplyOutcome { ok: status.is_success(), message })
    }

    async fn fetch_contacts(&self, url: Url) -> Result<Vec<Contact>, ApiError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the whole contact collection.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let url = self.contacts_url(None)?;
        self.fetch_contacts(url).await
    }

    /// Fetch the contacts the server matches against `term`.
    pub async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
        let url = self.contacts_url(Some(term))?;
        self.fetch_contacts(url).await
    }

    /// Post a new contact. A non-success status with a JSON body is a
    /// normal outcome (`ok == false`); only transport and decode failures
    /// are errors.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<ReplyOutcome, ApiError> {
        let url = self.contacts_url(None)?;
        let resp = self.http.post(url).json(contact).send().await?;
        Self::read_outcome(resp).await
    }

    /// Change the stored contact called `name`. Same outcome rules as create.
    pub async fn update_contact(&self, name: &str, changes: &ContactUpdate) -> Result<ReplyOutcome, ApiError> {
        let url = self.contact_url(name)?;
        let resp = self.http.put(url).json(changes).send().await?;
        Self::read_outcome(resp).await
    }
}

// reqwest needs the tokio reactor, so each call is moved onto the shared
// runtime and only the join handle is awaited by the caller's executor.
impl ContactService for ApiClient {
    fn list(&self) -> impl Future<Output = Result<Vec<Contact>, ApiError>> {
        let client = self.clone();
        async move { crate::utils::run_on_runtime(async move { client.list_contacts().await }).await? }
    }

    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<Contact>, ApiError>> {
        let client = self.clone();
        let term = term.to_string();
        async move {
            crate::utils::run_on_runtime(async move { client.search_contacts(&term).await }).await?
        }
    }

    fn create(&self, contact: &NewContact) -> impl Future<Output = Result<ReplyOutcome, ApiError>> {
        let client = self.clone();
        let contact = contact.clone();
        async move {
            crate::utils::run_on_runtime(async move { client.create_contact(&contact).await }).await?
        }
    }

    fn update(&self, name: &str, changes: &ContactUpdate) -> impl Future<Output = Result<ReplyOutcome, ApiError>> {
        let client = self.clone();
        let name = name.to_string();
        let changes = changes.clone();
        async move {
            crate::utils::run_on_runtime(async move { client.update_contact(&name, &changes).await }).await?
        }
    }
}
