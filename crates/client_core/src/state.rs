//! View state and the reducer that drives it.
//!
//! Every user event and every completed remote call is an [`Action`].
//! [`ViewState::apply`] folds an action into the state and returns the next
//! remote call to perform, if any, as an [`Effect`]. The reducer performs no
//! I/O: callers execute the effect and feed its completion back in.

use std::fmt;

use shared::domain::BookRecord;
use tracing::{debug, error, warn};

use crate::{
    error::TransportError,
    form::{FormField, FormState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
}

/// Fixed-template outcome messages shown in the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    BookAdded,
    MissingRequiredFields,
    BookUpdated,
    BookDeleted,
    BookNotFound,
}

impl StatusMessage {
    pub fn kind(self) -> StatusKind {
        match self {
            StatusMessage::BookAdded | StatusMessage::BookUpdated | StatusMessage::BookDeleted => {
                StatusKind::Success
            }
            StatusMessage::MissingRequiredFields | StatusMessage::BookNotFound => {
                StatusKind::Failure
            }
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            StatusMessage::BookAdded => "Book added successfully!",
            StatusMessage::MissingRequiredFields => "Please enter at least ID and Title",
            StatusMessage::BookUpdated => "Book updated successfully!",
            StatusMessage::BookDeleted => "Book deleted!",
            StatusMessage::BookNotFound => "No book found with this ID!",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Mount,
    EditField { field: FormField, value: String },
    EditSearchId(String),
    Submit,
    SelectForEdit(BookRecord),
    CancelEdit,
    Delete(String),
    Fetch,
    ListLoaded {
        generation: u64,
        result: Result<Vec<BookRecord>, TransportError>,
    },
    LookupFinished(Result<Option<BookRecord>, TransportError>),
    CreateFinished(Result<(), TransportError>),
    UpdateFinished(Result<(), TransportError>),
    DeleteFinished(Result<(), TransportError>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Mount => "mount",
            Action::EditField { .. } => "edit_field",
            Action::EditSearchId(_) => "edit_search_id",
            Action::Submit => "submit",
            Action::SelectForEdit(_) => "select_for_edit",
            Action::CancelEdit => "cancel_edit",
            Action::Delete(_) => "delete",
            Action::Fetch => "fetch",
            Action::ListLoaded { .. } => "list_loaded",
            Action::LookupFinished(_) => "lookup_finished",
            Action::CreateFinished(_) => "create_finished",
            Action::UpdateFinished(_) => "update_finished",
            Action::DeleteFinished(_) => "delete_finished",
        }
    }
}

/// A single remote call requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `generation` increases with every list request; the completion echoes it.
    ListAll { generation: u64 },
    GetById(String),
    Create(BookRecord),
    Update { id: String, record: BookRecord },
    Delete(String),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::ListAll { .. } => "list_all",
            Effect::GetById(_) => "get_by_id",
            Effect::Create(_) => "create",
            Effect::Update { .. } => "update",
            Effect::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub records: Vec<BookRecord>,
    pub form: FormState,
    pub search_id: String,
    pub search_result: Option<BookRecord>,
    pub status: Option<StatusMessage>,
    lists_requested: u64,
    list_shown: u64,
}

impl ViewState {
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Mount => Some(self.request_list()),
            Action::EditField { field, value } => {
                self.form.set_field(field, value);
                None
            }
            Action::EditSearchId(value) => {
                self.search_id = value;
                None
            }
            Action::Submit => self.submit(),
            Action::SelectForEdit(record) => {
                self.form.begin_edit(&record);
                None
            }
            Action::CancelEdit => {
                self.form.reset();
                None
            }
            Action::Delete(id) => Some(Effect::Delete(id)),
            Action::Fetch => Some(Effect::GetById(self.search_id.clone())),
            Action::ListLoaded { generation, result } => {
                self.finish_list(generation, result);
                None
            }
            Action::LookupFinished(Ok(Some(record))) => {
                self.search_result = Some(record);
                None
            }
            Action::LookupFinished(Ok(None)) => {
                self.search_result = None;
                self.status = Some(StatusMessage::BookNotFound);
                None
            }
            Action::LookupFinished(Err(err)) => {
                warn!(error = %err, search_id = %self.search_id, "book lookup failed");
                self.search_result = None;
                self.status = Some(StatusMessage::BookNotFound);
                None
            }
            Action::CreateFinished(result) => {
                self.finish_mutation(result, StatusMessage::BookAdded, true)
            }
            Action::UpdateFinished(result) => {
                self.finish_mutation(result, StatusMessage::BookUpdated, true)
            }
            Action::DeleteFinished(result) => {
                self.finish_mutation(result, StatusMessage::BookDeleted, false)
            }
        }
    }

    fn request_list(&mut self) -> Effect {
        self.lists_requested += 1;
        Effect::ListAll {
            generation: self.lists_requested,
        }
    }

    /// Reloads may complete out of order; a list older than the one on
    /// display is discarded.
    fn finish_list(&mut self, generation: u64, result: Result<Vec<BookRecord>, TransportError>) {
        if generation <= self.list_shown {
            debug!(generation, shown = self.list_shown, "discarding out-of-date book list");
            return;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.list_shown = generation;
            }
            Err(err) => warn!(error = %err, "failed to load books; keeping previous list"),
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.form.is_editing() {
            // The update path deliberately skips the create-path presence check.
            let record = self.form.draft().to_record();
            return Some(Effect::Update {
                id: record.id.clone(),
                record,
            });
        }

        if let Err(err) = self.form.validate_for_create() {
            warn!(error = %err, "rejected book submission");
            self.status = Some(StatusMessage::MissingRequiredFields);
            return None;
        }
        Some(Effect::Create(self.form.draft().to_record()))
    }

    /// Success reports, optionally resets the form, and reloads; failure is
    /// logged and leaves every piece of state as it was.
    fn finish_mutation(
        &mut self,
        result: Result<(), TransportError>,
        message: StatusMessage,
        resets_form: bool,
    ) -> Option<Effect> {
        match result {
            Ok(()) => {
                self.status = Some(message);
                if resets_form {
                    self.form.reset();
                }
                Some(self.request_list())
            }
            Err(err) => {
                error!(operation = %err.operation(), error = %err, "book mutation failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
