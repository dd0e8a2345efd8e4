pub mod feedback;
pub mod render;
pub mod service;
pub mod surface;

use std::cell::Cell;
use std::rc::Rc;

use crate::api::error::ApiError;
use crate::api::models::{Contact, ReplyOutcome};
use feedback::Feedback;
use service::ContactService;
use surface::{ContactEditForm, ContactForm, MessageKind, Region};

pub const CREATE_FAILED_MESSAGE: &str = "Error adding contact";
pub const UPDATE_FAILED_MESSAGE: &str = "Error updating contact";

/// Per-region request counter. Only the newest ticket may render.
#[derive(Default)]
struct RequestSeq(Cell<u64>);

impl RequestSeq {
    fn issue(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

pub struct ContactsView {
    pub list: Rc<dyn Region>,
    pub results: Rc<dyn Region>,
    pub form: Rc<dyn ContactForm>,
    pub edit_form: Rc<dyn ContactEditForm>,
    pub feedback: Feedback,
}

pub struct ContactsController<S> {
    service: S,
    view: ContactsView,
    list_seq: RequestSeq,
    results_seq: RequestSeq,
}

impl<S: ContactService> ContactsController<S> {
    pub fn new(service: S, view: ContactsView) -> Self {
        Self {
            service,
            view,
            list_seq: RequestSeq::default(),
            results_seq: RequestSeq::default(),
        }
    }

    /// Re-fetch the full collection into the primary list.
    pub async fn load_contacts(&self) {
        let ticket = self.list_seq.issue();
        match self.service.list().await {
            Ok(contacts) => apply(&self.list_seq, ticket, self.view.list.as_ref(), &contacts),
            Err(err) => log::error!("Error loading contacts: {err}"),
        }
    }

    /// React to the search field changing to `text`.
    pub async fn search(&self, text: &str) {
        let term = text.to_lowercase();
        if term.is_empty() {
            // Drop any filtered response still on its way.
            self.results_seq.issue();
            self.load_contacts().await;
            return;
        }
        let ticket = self.results_seq.issue();
        match self.service.search(&term).await {
            Ok(contacts) => apply(&self.results_seq, ticket, self.view.results.as_ref(), &contacts),
            Err(err) => log::error!("Search error for {term:?}: {err}"),
        }
    }

    /// Post the add form and report the server's verdict.
    pub async fn submit(&self) {
        let contact = self.view.form.values();
        let result = self.service.create(&contact).await;
        if self.report(result, CREATE_FAILED_MESSAGE) {
            self.view.form.reset();
            self.load_contacts().await;
        }
    }

    /// Send the edit form's changes for its target contact.
    pub async fn submit_edit(&self) {
        let name = self.view.edit_form.target();
        let changes = self.view.edit_form.changes();
        let result = self.service.update(&name, &changes).await;
        if self.report(result, UPDATE_FAILED_MESSAGE) {
            self.view.edit_form.reset();
            self.load_contacts().await;
        }
    }

    /// Shows the outcome in the feedback line; true when the server accepted.
    fn report(&self, result: Result<ReplyOutcome, ApiError>, failed: &str) -> bool {
        match result {
            Ok(outcome) => {
                let kind = if outcome.ok { MessageKind::Success } else { MessageKind::Error };
                self.view.feedback.show(&outcome.message, kind);
                outcome.ok
            }
            Err(err) => {
                log::warn!("{failed}: {err}");
                self.view.feedback.show(failed, MessageKind::Error);
                false
            }
        }
    }
}

fn apply(seq: &RequestSeq, ticket: u64, region: &dyn Region, contacts: &[Contact]) {
    if !seq.is_current(ticket) {
        log::debug!("discarding stale response #{ticket}");
        return;
    }
    region.replace(&render::render(contacts));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ContactUpdate, NewContact};
    use crate::contacts::feedback::DEFAULT_CLEAR_AFTER;
    use crate::contacts::surface::testing::{
        FakeEditForm, FakeForm, ManualScheduler, RecordingFeedback, RecordingRegion,
    };
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use tokio::sync::oneshot;

    enum CreateReply {
        Status { ok: bool, message: &'static str },
        Garbled,
    }

    #[derive(Default)]
    struct FakeService {
        contacts: RefCell<Vec<Contact>>,
        list_calls: Cell<usize>,
        search_terms: RefCell<Vec<String>>,
        gates: RefCell<HashMap<String, oneshot::Receiver<Vec<Contact>>>>,
        list_gates: RefCell<VecDeque<oneshot::Receiver<Vec<Contact>>>>,
        created: RefCell<Vec<NewContact>>,
        updated: RefCell<Vec<(String, ContactUpdate)>>,
        reply: RefCell<Option<CreateReply>>,
        fail_reads: Cell<bool>,
    }

    fn garbled() -> ApiError {
        ApiError::Decode(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
    }

    impl ContactService for Rc<FakeService> {
        async fn list(&self) -> Result<Vec<Contact>, ApiError> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.fail_reads.get() {
                return Err(garbled());
            }
            let gate = self.list_gates.borrow_mut().pop_front();
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or_default()),
                None => Ok(self.contacts.borrow().clone()),
            }
        }

        async fn search(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
            self.search_terms.borrow_mut().push(term.to_string());
            if self.fail_reads.get() {
                return Err(garbled());
            }
            let gate = self.gates.borrow_mut().remove(term);
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or_default()),
                None => Ok(self
                    .contacts
                    .borrow()
                    .iter()
                    .filter(|c| c.name.to_lowercase().contains(term))
                    .cloned()
                    .collect()),
            }
        }

        async fn create(&self, contact: &NewContact) -> Result<ReplyOutcome, ApiError> {
            self.created.borrow_mut().push(contact.clone());
            match self.reply.borrow_mut().take() {
                Some(CreateReply::Status { ok, message }) => Ok(ReplyOutcome { ok, message: message.into() }),
                Some(CreateReply::Garbled) | None => Err(garbled()),
            }
        }

        async fn update(&self, name: &str, changes: &ContactUpdate) -> Result<ReplyOutcome, ApiError> {
            self.updated.borrow_mut().push((name.to_string(), changes.clone()));
            match self.reply.borrow_mut().take() {
                Some(CreateReply::Status { ok, message }) => Ok(ReplyOutcome { ok, message: message.into() }),
                Some(CreateReply::Garbled) | None => Err(garbled()),
            }
        }
    }

    fn contact(name: &str, phone: &str) -> Contact {
        Contact { name: name.into(), phone: phone.into(), email: None }
    }

    struct Harness {
        service: Rc<FakeService>,
        list: Rc<RecordingRegion>,
        results: Rc<RecordingRegion>,
        form: Rc<FakeForm>,
        edit_form: Rc<FakeEditForm>,
        feedback: Rc<RecordingFeedback>,
        clock: ManualScheduler,
        controller: Rc<ContactsController<Rc<FakeService>>>,
    }

    fn harness() -> Harness {
        let service = Rc::new(FakeService::default());
        *service.contacts.borrow_mut() = vec![contact("Ada", "5550101"), contact("Brian", "5550102")];
        let list = Rc::new(RecordingRegion::default());
        let results = Rc::new(RecordingRegion::default());
        let form = Rc::new(FakeForm::default());
        let edit_form = Rc::new(FakeEditForm::default());
        let feedback = Rc::new(RecordingFeedback::default());
        let clock = ManualScheduler::default();
        let view = ContactsView {
            list: list.clone(),
            results: results.clone(),
            form: form.clone(),
            edit_form: edit_form.clone(),
            feedback: Feedback::new(feedback.clone(), Rc::new(clock.clone()), DEFAULT_CLEAR_AFTER),
        };
        let controller = Rc::new(ContactsController::new(service.clone(), view));
        Harness { service, list, results, form, edit_form, feedback, clock, controller }
    }

    fn fill_form(h: &Harness) {
        *h.form.fields.borrow_mut() = NewContact {
            name: "Cleo".into(),
            phone: "5550103".into(),
            email: "cleo@example.com".into(),
        };
    }

    #[tokio::test]
    async fn load_renders_into_primary_list() {
        let h = harness();
        h.controller.load_contacts().await;
        assert_eq!(h.list.last().unwrap(), "<b>Ada</b>\nPhone: 5550101\n\n<b>Brian</b>\nPhone: 5550102");
        assert!(h.results.writes().is_empty());
    }

    #[tokio::test]
    async fn failed_load_leaves_previous_render() {
        let h = harness();
        h.controller.load_contacts().await;
        h.service.fail_reads.set(true);
        h.controller.load_contacts().await;
        assert_eq!(h.list.writes().len(), 1);
    }

    #[tokio::test]
    async fn empty_search_falls_back_to_full_list() {
        let h = harness();
        h.controller.search("").await;
        assert_eq!(h.service.list_calls.get(), 1);
        assert!(h.service.search_terms.borrow().is_empty());
        assert_eq!(h.list.writes().len(), 1);
        assert!(h.results.writes().is_empty());
    }

    #[tokio::test]
    async fn whitespace_search_is_not_trimmed() {
        let h = harness();
        h.controller.search("  ").await;
        assert_eq!(h.service.list_calls.get(), 0);
        assert_eq!(*h.service.search_terms.borrow(), vec!["  ".to_string()]);
    }

    #[tokio::test]
    async fn search_is_lowercased_and_rendered_into_results() {
        let h = harness();
        h.controller.search("BRI").await;
        assert_eq!(*h.service.search_terms.borrow(), vec!["bri".to_string()]);
        assert_eq!(h.results.last().unwrap(), "<b>Brian</b>\nPhone: 5550102");
        assert!(h.list.writes().is_empty());
    }

    #[tokio::test]
    async fn search_without_matches_shows_placeholder() {
        let h = harness();
        h.controller.search("zed").await;
        assert_eq!(h.results.last().unwrap(), render::EMPTY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn failed_search_leaves_results_untouched() {
        let h = harness();
        h.service.fail_reads.set(true);
        h.controller.search("ada").await;
        assert!(h.results.writes().is_empty());
    }

    async fn wait_until(mut done: impl FnMut() -> bool) {
        while !done() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn stale_search_response_is_discarded() {
        let h = harness();
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_ab, rx_ab) = oneshot::channel();
        h.service.gates.borrow_mut().insert("a".into(), rx_a);
        h.service.gates.borrow_mut().insert("ab".into(), rx_ab);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let first = {
                    let c = h.controller.clone();
                    tokio::task::spawn_local(async move { c.search("a").await })
                };
                wait_until(|| h.service.search_terms.borrow().len() == 1).await;
                let second = {
                    let c = h.controller.clone();
                    tokio::task::spawn_local(async move { c.search("ab").await })
                };
                wait_until(|| h.service.search_terms.borrow().len() == 2).await;

                tx_ab.send(vec![contact("Abby", "5550104")]).unwrap();
                second.await.unwrap();
                tx_a.send(vec![contact("Ada", "5550101"), contact("Abby", "5550104")]).unwrap();
                first.await.unwrap();
            })
            .await;

        assert_eq!(h.results.writes(), vec!["<b>Abby</b>\nPhone: 5550104".to_string()]);
    }

    #[tokio::test]
    async fn older_list_load_does_not_overwrite_newer_one() {
        let h = harness();
        let (tx_old, rx_old) = oneshot::channel();
        let (tx_new, rx_new) = oneshot::channel();
        h.service.list_gates.borrow_mut().extend([rx_old, rx_new]);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let older = {
                    let c = h.controller.clone();
                    tokio::task::spawn_local(async move { c.load_contacts().await })
                };
                wait_until(|| h.service.list_calls.get() == 1).await;
                // An empty search reloads the list while the first load is pending.
                let newer = {
                    let c = h.controller.clone();
                    tokio::task::spawn_local(async move { c.search("").await })
                };
                wait_until(|| h.service.list_calls.get() == 2).await;

                tx_new.send(vec![contact("Cleo", "5550103")]).unwrap();
                newer.await.unwrap();
                tx_old.send(vec![contact("Ada", "5550101")]).unwrap();
                older.await.unwrap();
            })
            .await;

        assert_eq!(h.list.writes(), vec!["<b>Cleo</b>\nPhone: 5550103".to_string()]);
    }

    #[tokio::test]
    async fn clearing_search_discards_in_flight_results() {
        let h = harness();
        let (tx, rx) = oneshot::channel();
        h.service.gates.borrow_mut().insert("ad".into(), rx);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let pending = {
                    let c = h.controller.clone();
                    tokio::task::spawn_local(async move { c.search("ad").await })
                };
                wait_until(|| h.service.search_terms.borrow().len() == 1).await;
                h.controller.search("").await;
                tx.send(vec![contact("Ada", "5550101")]).unwrap();
                pending.await.unwrap();
            })
            .await;

        assert!(h.results.writes().is_empty());
        assert_eq!(h.list.writes().len(), 1);
    }

    #[tokio::test]
    async fn successful_create_reports_resets_and_reloads() {
        let h = harness();
        fill_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: true, message: "Contact added" });

        h.controller.submit().await;

        assert_eq!(h.service.created.borrow()[0].email, "cleo@example.com");
        assert_eq!(*h.feedback.text.borrow(), "Contact added");
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Success));
        assert_eq!(h.form.resets.get(), 1);
        assert_eq!(h.form.values(), NewContact::default());
        assert_eq!(h.service.list_calls.get(), 1);
        assert_eq!(h.list.writes().len(), 1);
    }

    #[tokio::test]
    async fn rejected_create_keeps_form_and_list() {
        let h = harness();
        fill_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: false, message: "Phone required" });

        h.controller.submit().await;

        assert_eq!(*h.feedback.text.borrow(), "Phone required");
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Error));
        assert_eq!(h.form.resets.get(), 0);
        assert_eq!(h.form.values().name, "Cleo");
        assert_eq!(h.service.list_calls.get(), 0);
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let h = harness();
        fill_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Garbled);

        h.controller.submit().await;

        assert_eq!(*h.feedback.text.borrow(), CREATE_FAILED_MESSAGE);
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Error));
        assert_eq!(h.form.resets.get(), 0);
        assert_eq!(h.service.list_calls.get(), 0);
    }

    #[tokio::test]
    async fn form_values_are_sent_verbatim() {
        let h = harness();
        *h.form.fields.borrow_mut() = NewContact {
            name: "  Dee ".into(),
            phone: " 555 ".into(),
            email: String::new(),
        };
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: true, message: "ok" });
        h.controller.submit().await;
        assert_eq!(h.service.created.borrow()[0].name, "  Dee ");
        assert_eq!(h.service.created.borrow()[0].phone, " 555 ");
    }

    #[tokio::test]
    async fn create_feedback_clears_after_delay() {
        let h = harness();
        fill_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: true, message: "Contact added" });
        h.controller.submit().await;
        h.clock.advance(DEFAULT_CLEAR_AFTER);
        assert_eq!(*h.feedback.text.borrow(), "");
    }

    fn fill_edit_form(h: &Harness) {
        *h.edit_form.target.borrow_mut() = "Ada".into();
        *h.edit_form.changes.borrow_mut() = ContactUpdate {
            phone: Some("5550199".into()),
            ..ContactUpdate::default()
        };
    }

    #[tokio::test]
    async fn accepted_edit_reports_resets_and_reloads() {
        let h = harness();
        fill_edit_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: true, message: "Contact updated successfully!" });

        h.controller.submit_edit().await;

        let updated = h.service.updated.borrow();
        assert_eq!(updated[0].0, "Ada");
        assert_eq!(updated[0].1.phone.as_deref(), Some("5550199"));
        assert_eq!(*h.feedback.text.borrow(), "Contact updated successfully!");
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Success));
        assert_eq!(h.edit_form.resets.get(), 1);
        assert_eq!(h.form.resets.get(), 0);
        assert_eq!(h.service.list_calls.get(), 1);
    }

    #[tokio::test]
    async fn rejected_edit_keeps_form_and_list() {
        let h = harness();
        fill_edit_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Status { ok: false, message: "Contact not found!" });

        h.controller.submit_edit().await;

        assert_eq!(*h.feedback.text.borrow(), "Contact not found!");
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Error));
        assert_eq!(h.edit_form.resets.get(), 0);
        assert_eq!(h.edit_form.target(), "Ada");
        assert_eq!(h.service.list_calls.get(), 0);
    }

    #[tokio::test]
    async fn failed_edit_request_shows_generic_message() {
        let h = harness();
        fill_edit_form(&h);
        *h.service.reply.borrow_mut() = Some(CreateReply::Garbled);

        h.controller.submit_edit().await;

        assert_eq!(*h.feedback.text.borrow(), UPDATE_FAILED_MESSAGE);
        assert_eq!(h.feedback.kind.get(), Some(MessageKind::Error));
        assert_eq!(h.service.list_calls.get(), 0);
    }
}
