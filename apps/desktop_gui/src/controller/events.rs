//! Events flowing from the backend worker to the UI thread.

use client_core::Action;

pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    /// Completion of a previously queued effect, ready to feed back into the reducer.
    Completed(Action),
}
