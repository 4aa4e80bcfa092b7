//! Boundary facade over [`DocumentService`].
//!
//! Each operation returns `Ok` or an [`ApiError`] whose kind is one of
//! NotFound, Internal or InvalidInput. Input parsing and pagination defaults
//! live here; the service below sees only validated values.

use std::sync::Arc;

use docshield_core::{Document, ErrorKind, PageRequest};
use docshield_storage::DocumentStorage;

use crate::error::{ApiError, ApiResult};
use crate::service::DocumentService;
use crate::types::DocumentRequest;

/// Message returned for a non-NotFound update failure.
pub const UPDATE_ERROR_MESSAGE: &str = "document update error";

/// Cloneable handle exposing the document CRUD surface.
#[derive(Debug)]
pub struct DocumentApi<S> {
    service: Arc<DocumentService<S>>,
}

impl<S> Clone for DocumentApi<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: DocumentStorage> DocumentApi<S> {
    pub fn new(service: Arc<DocumentService<S>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &DocumentService<S> {
        &self.service
    }

    /// Create a document from a request body. Returns the stored document so
    /// the caller learns its assigned id.
    pub async fn create(&self, request: DocumentRequest) -> ApiResult<Document> {
        let document = request.into_document();
        self.service
            .create(&document)
            .await
            .map_err(|_| ApiError::internal())?;
        Ok(document)
    }

    /// Create a document from a raw JSON body.
    pub async fn create_json(&self, body: &[u8]) -> ApiResult<Document> {
        let request: DocumentRequest = parse_body(body)?;
        self.create(request).await
    }

    /// List one sanitized page. Missing values default to limit 50, offset 0.
    pub async fn find_all(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ApiResult<Vec<Document>> {
        let page = PageRequest::new(limit, offset)?;
        self.service
            .find_all(page.limit, page.offset)
            .await
            .map_err(|_| ApiError::internal())
    }

    pub async fn find_by_id(&self, id: &str) -> ApiResult<Document> {
        Ok(self.service.find_by_id(id).await?)
    }

    /// Replace a document, keyed by its own id.
    pub async fn update(&self, document: Document) -> ApiResult<()> {
        self.service.update(&document).await.map_err(|err| {
            if err.is_not_found() {
                ApiError::not_found()
            } else {
                ApiError::with_message(ErrorKind::Internal, UPDATE_ERROR_MESSAGE)
            }
        })
    }

    /// Replace a document from a raw JSON body.
    pub async fn update_json(&self, body: &[u8]) -> ApiResult<()> {
        let document: Document = parse_body(body)?;
        self.update(document).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        Ok(self.service.delete(id).await?)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed body");
        ApiError::invalid_input()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshield_core::ServiceConfig;
    use docshield_storage::InMemoryStorage;

    fn api() -> DocumentApi<InMemoryStorage> {
        let service = DocumentService::new(InMemoryStorage::new(), ServiceConfig::default());
        DocumentApi::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let api = api();
        let created = api
            .create(DocumentRequest {
                title: "t".into(),
                description: "hidden".into(),
                level1: Vec::new(),
            })
            .await
            .unwrap();

        let found = api.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.title, "t");
        assert!(found.description.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_input() {
        let api = api();
        let err = api.create_json(b"{not json").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.message, "cannot parse data, please check provided data");

        let err = api.update_json(br#""plain string""#).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_negative_page_is_invalid_input() {
        let err = api().find_all(Some(-1), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_missing_document_kinds() {
        let api = api();
        assert_eq!(api.find_by_id("x").await.unwrap_err(), ApiError::not_found());
        assert_eq!(api.delete("x").await.unwrap_err(), ApiError::not_found());
        assert_eq!(
            api.update(Document::new("x", "t")).await.unwrap_err(),
            ApiError::not_found()
        );
    }
}
