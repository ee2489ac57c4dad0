//! Record store proxy: typed calls over the remote `bookapi` resource.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::BookRecord,
    error::ApiError,
    protocol::{ADD_SEGMENT, BOOK_API_SEGMENT, DELETE_SEGMENT, LIST_SEGMENT, UPDATE_SEGMENT},
};
use tracing::debug;
use url::Url;

use crate::error::{StoreOperation, StoreSetupError, TransportError};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<BookRecord>, TransportError>;
    /// `Ok(None)` when the store has no record under `id`.
    async fn get_by_id(&self, id: &str) -> Result<Option<BookRecord>, TransportError>;
    async fn create(&self, record: &BookRecord) -> Result<(), TransportError>;
    async fn update(&self, id: &str, record: &BookRecord) -> Result<(), TransportError>;
    async fn delete(&self, id: &str) -> Result<(), TransportError>;
}

/// [`RecordStore`] speaking JSON over HTTP to `<base>/bookapi`.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    http: Client,
    api_root: Url,
}

impl HttpRecordStore {
    pub fn new(base_url: &str) -> Result<Self, StoreSetupError> {
        Self::with_client(Client::builder().build()?, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, StoreSetupError> {
        let mut api_root =
            Url::parse(base_url.trim()).map_err(|source| StoreSetupError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })?;
        api_root
            .path_segments_mut()
            .map_err(|()| StoreSetupError::CannotBeABase(base_url.to_string()))?
            .pop_if_empty()
            .push(BOOK_API_SEGMENT);
        Ok(Self { http, api_root })
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // The root was checked to be a base URL at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    async fn send(
        &self,
        operation: StoreOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, TransportError> {
        request
            .send()
            .await
            .map_err(|err| TransportError::Request {
                operation,
                message: err.to_string(),
            })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_all(&self) -> Result<Vec<BookRecord>, TransportError> {
        let operation = StoreOperation::ListAll;
        let url = self.endpoint(&[LIST_SEGMENT]);
        debug!(%operation, %url, "record store call");
        let response = ensure_success(operation, self.send(operation, self.http.get(url)).await?)
            .await?;
        response
            .json::<Vec<BookRecord>>()
            .await
            .map_err(|err| TransportError::Decode {
                operation,
                message: err.to_string(),
            })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BookRecord>, TransportError> {
        let operation = StoreOperation::GetById;
        if id.is_empty() {
            return Ok(None);
        }
        ensure_addressable(operation, id)?;
        let url = self.endpoint(&[id]);
        debug!(%operation, %url, "record store call");
        let response = self.send(operation, self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = ensure_success(operation, response)
            .await?
            .text()
            .await
            .map_err(|err| TransportError::Decode {
                operation,
                message: err.to_string(),
            })?;
        decode_optional_record(operation, &body)
    }

    async fn create(&self, record: &BookRecord) -> Result<(), TransportError> {
        let operation = StoreOperation::Create;
        // A record whose id cannot be addressed later could never be removed.
        ensure_addressable(operation, &record.id)?;
        let url = self.endpoint(&[ADD_SEGMENT]);
        debug!(%operation, %url, book_id = %record.id, "record store call");
        ensure_success(
            operation,
            self.send(operation, self.http.post(url).json(record)).await?,
        )
        .await?;
        Ok(())
    }

    async fn update(&self, id: &str, record: &BookRecord) -> Result<(), TransportError> {
        let operation = StoreOperation::Update;
        ensure_addressable(operation, id)?;
        let url = self.endpoint(&[UPDATE_SEGMENT, id]);
        debug!(%operation, %url, "record store call");
        ensure_success(
            operation,
            self.send(operation, self.http.put(url).json(record)).await?,
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let operation = StoreOperation::Delete;
        ensure_addressable(operation, id)?;
        let url = self.endpoint(&[DELETE_SEGMENT, id]);
        debug!(%operation, %url, "record store call");
        ensure_success(operation, self.send(operation, self.http.delete(url)).await?).await?;
        Ok(())
    }
}

/// `PathSegmentsMut` drops `.` and `..`, and WHATWG parsing folds `%2e` back
/// into a dot, so these ids would silently address a different endpoint.
fn ensure_addressable(operation: StoreOperation, id: &str) -> Result<(), TransportError> {
    if matches!(id, "" | "." | "..") {
        return Err(TransportError::UnaddressableId {
            operation,
            id: id.to_string(),
        });
    }
    Ok(())
}

async fn ensure_success(
    operation: StoreOperation,
    response: Response,
) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ApiError>(&body).ok())
        .map(|api_error| api_error.message);
    Err(TransportError::Status {
        operation,
        status: status.as_u16(),
        detail,
    })
}

/// An empty body or a JSON `null` both mean "no such record".
fn decode_optional_record(
    operation: StoreOperation,
    body: &str,
) -> Result<Option<BookRecord>, TransportError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<BookRecord>>(body).map_err(|err| TransportError::Decode {
        operation,
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
