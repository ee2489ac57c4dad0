use std::sync::Arc;

use tracing::debug;

pub mod config;
pub mod error;
pub mod form;
pub mod state;
pub mod store;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::{StoreOperation, StoreSetupError, TransportError, ValidationError};
pub use form::{coerce_year, BookDraft, FormField, FormMode, FormState};
pub use state::{Action, Effect, StatusKind, StatusMessage, ViewState};
pub use store::{HttpRecordStore, RecordStore};
pub use view::{project, ViewModel};

/// Runs one effect against the store and wraps the outcome as the matching
/// completion action.
pub async fn execute(store: &dyn RecordStore, effect: Effect) -> Action {
    debug!(effect = effect.name(), "executing effect");
    match effect {
        Effect::ListAll { generation } => Action::ListLoaded {
            generation,
            result: store.list_all().await,
        },
        Effect::GetById(id) => Action::LookupFinished(store.get_by_id(&id).await),
        Effect::Create(record) => Action::CreateFinished(store.create(&record).await),
        Effect::Update { id, record } => {
            Action::UpdateFinished(store.update(&id, &record).await)
        }
        Effect::Delete(id) => Action::DeleteFinished(store.delete(&id).await),
    }
}

/// Owns the view state and runs each action's effect chain to completion
/// before returning.
pub struct BookManager {
    store: Arc<dyn RecordStore>,
    state: ViewState,
}

impl BookManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> ViewModel {
        project(&self.state)
    }

    /// Applies `action`, then executes every effect it leads to, one after
    /// another (a mutation's reload starts only after the mutation succeeded).
    pub async fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "dispatching action");
        let mut next = self.state.apply(action);
        while let Some(effect) = next {
            let completion = execute(self.store.as_ref(), effect).await;
            next = self.state.apply(completion);
        }
    }

    pub async fn mount(&mut self) {
        self.dispatch(Action::Mount).await;
    }

    pub async fn edit_field(&mut self, field: FormField, value: impl Into<String>) {
        self.dispatch(Action::EditField {
            field,
            value: value.into(),
        })
        .await;
    }

    pub async fn submit(&mut self) {
        self.dispatch(Action::Submit).await;
    }

    pub async fn select_for_edit(&mut self, record: shared::domain::BookRecord) {
        self.dispatch(Action::SelectForEdit(record)).await;
    }

    pub async fn cancel_edit(&mut self) {
        self.dispatch(Action::CancelEdit).await;
    }

    pub async fn delete(&mut self, id: impl Into<String>) {
        self.dispatch(Action::Delete(id.into())).await;
    }

    pub async fn fetch(&mut self, id: impl Into<String>) {
        self.dispatch(Action::EditSearchId(id.into())).await;
        self.dispatch(Action::Fetch).await;
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
