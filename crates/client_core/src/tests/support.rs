//! In-memory [`RecordStore`] double used by the reducer and manager tests.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use shared::domain::BookRecord;

use crate::{
    error::{StoreOperation, TransportError},
    store::RecordStore,
};

#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Mutex<BTreeMap<String, BookRecord>>,
    calls: Mutex<Vec<StoreOperation>>,
    failing: Mutex<HashSet<StoreOperation>>,
    reject_unknown_delete: bool,
}

impl MemoryStore {
    pub(crate) fn with_records(records: impl IntoIterator<Item = BookRecord>) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .expect("records lock")
            .extend(records.into_iter().map(|r| (r.id.clone(), r)));
        store
    }

    /// Deleting an id that is not stored fails with HTTP 404 instead of
    /// being a no-op.
    pub(crate) fn rejecting_unknown_delete(mut self) -> Self {
        self.reject_unknown_delete = true;
        self
    }

    pub(crate) fn fail(&self, operation: StoreOperation) {
        self.failing.lock().expect("failing lock").insert(operation);
    }

    pub(crate) fn recover(&self, operation: StoreOperation) {
        self.failing.lock().expect("failing lock").remove(&operation);
    }

    pub(crate) fn calls(&self) -> Vec<StoreOperation> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().expect("calls lock").clear();
    }

    pub(crate) fn snapshot(&self) -> Vec<BookRecord> {
        self.records
            .lock()
            .expect("records lock")
            .values()
            .cloned()
            .collect()
    }

    fn record_call(&self, operation: StoreOperation) -> Result<(), TransportError> {
        self.calls.lock().expect("calls lock").push(operation);
        if self.failing.lock().expect("failing lock").contains(&operation) {
            return Err(TransportError::Request {
                operation,
                message: "connection refused".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<BookRecord>, TransportError> {
        self.record_call(StoreOperation::ListAll)?;
        Ok(self.snapshot())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BookRecord>, TransportError> {
        self.record_call(StoreOperation::GetById)?;
        Ok(self.records.lock().expect("records lock").get(id).cloned())
    }

    async fn create(&self, record: &BookRecord) -> Result<(), TransportError> {
        self.record_call(StoreOperation::Create)?;
        self.records
            .lock()
            .expect("records lock")
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, id: &str, record: &BookRecord) -> Result<(), TransportError> {
        self.record_call(StoreOperation::Update)?;
        if let Some(stored) = self.records.lock().expect("records lock").get_mut(id) {
            *stored = BookRecord {
                id: id.to_string(),
                ..record.clone()
            };
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        self.record_call(StoreOperation::Delete)?;
        let removed = self.records.lock().expect("records lock").remove(id);
        if removed.is_none() && self.reject_unknown_delete {
            return Err(TransportError::Status {
                operation: StoreOperation::Delete,
                status: 404,
                detail: None,
            });
        }
        Ok(())
    }
}

pub(crate) fn book(id: &str, title: &str, author: &str, year: i32) -> BookRecord {
    BookRecord {
        id: id.into(),
        title: title.into(),
        author: author.into(),
        publisher: String::new(),
        year,
        genre: String::new(),
    }
}
