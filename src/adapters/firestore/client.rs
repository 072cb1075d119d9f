//! Firestore REST client
//!
//! This module provides the Firestore implementation of the document store
//! trait over the v1 REST API. All calls are reads; the client never issues
//! a write RPC.

use super::models::{DocumentResource, ListCollectionIdsResponse, ListDocumentsResponse};
use crate::adapters::store::{DocumentStore, StoredDocument};
use crate::config::{FirestoreConfig, SecretString};
use crate::domain::ids::{CollectionId, DocumentId};
use crate::domain::{QuarryError, Result, StoreError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Firestore REST API client
///
/// # Example
///
/// ```no_run
/// use quarry::adapters::firestore::FirestoreClient;
/// use quarry::adapters::store::DocumentStore;
/// use quarry::config::FirestoreConfig;
///
/// # async fn example() -> quarry::domain::Result<()> {
/// let config = FirestoreConfig {
///     project_id: "my-project".to_string(),
///     ..Default::default()
/// };
///
/// let client = FirestoreClient::new(&config)?;
/// client.verify_connection().await?;
/// # Ok(())
/// # }
/// ```
pub struct FirestoreClient {
    /// HTTP client for making requests
    client: Client,

    /// Base URL of the REST API
    base_url: String,

    /// Resource root: `projects/{project}/databases/{database}`
    root: String,

    /// Static bearer token, attached to every request when present
    access_token: Option<SecretString>,

    /// Documents requested per list page
    page_size: u32,
}

impl FirestoreClient {
    /// Create a new Firestore client
    ///
    /// # Arguments
    ///
    /// * `config` - Firestore connection configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &FirestoreConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| QuarryError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            root: format!(
                "projects/{}/databases/{}",
                config.project_id, config.database
            ),
            access_token: config.access_token.clone(),
            page_size: config.page_size,
        })
    }

    /// Resource root this client reads from
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> Option<String> {
        match &self.access_token {
            Some(token) if !token.expose_secret().is_empty() => {
                Some(format!("Bearer {}", token.expose_secret()))
            }
            _ => None,
        }
    }

    /// Send a GET request, mapping transport failures to store errors
    async fn send_get(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let mut request = self.client.get(url).query(query);

        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }

        request.send().await.map_err(map_transport_error)
    }

    /// Fetch every page of a `documents.list` call
    async fn list_pages(&self, url: &str, show_missing: bool) -> Result<Vec<DocumentResource>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("pageSize", self.page_size.to_string())];
            if show_missing {
                query.push(("showMissing", "true".to_string()));
            }
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let resp = self.send_get(url, &query).await?;
            let status = resp.status();

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(match status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => QuarryError::Store(
                        StoreError::AuthenticationFailed(format!("{status}: {body}")),
                    ),
                    _ => QuarryError::Store(StoreError::RequestFailed {
                        status: status.as_u16(),
                        message: body,
                    }),
                });
            }

            let page: ListDocumentsResponse = resp
                .json()
                .await
                .map_err(|e| QuarryError::Store(StoreError::InvalidResponse(e.to_string())))?;

            tracing::debug!(
                url = %url,
                page_documents = page.documents.len(),
                "Fetched document page"
            );

            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn verify_connection(&self) -> Result<()> {
        // listCollectionIds is the cheapest read-only RPC that exercises
        // both the credentials and the database path
        let url = format!("{}/{}/documents:listCollectionIds", self.base_url, self.root);

        tracing::debug!(url = %url, "Verifying Firestore connection");

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "pageSize": 1 }));

        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }

        let resp = request.send().await.map_err(map_transport_error)?;

        match resp.status() {
            StatusCode::OK => {
                resp.json::<ListCollectionIdsResponse>()
                    .await
                    .map_err(|e| QuarryError::Store(StoreError::InvalidResponse(e.to_string())))?;
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                Err(QuarryError::Store(StoreError::AuthenticationFailed(
                    format!("{status}: {body}"),
                )))
            }
            StatusCode::NOT_FOUND => Err(QuarryError::Store(StoreError::NotFound(format!(
                "database {} not found",
                self.root
            )))),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(QuarryError::Store(StoreError::RequestFailed {
                    status: status.as_u16(),
                    message: body,
                }))
            }
        }
    }

    async fn list_children(&self, collection: &CollectionId) -> Result<Vec<DocumentId>> {
        let url = format!("{}/{}/documents/{}", self.base_url, self.root, collection);

        // showMissing includes parents that exist only as subcollection
        // anchors; those arrive without fields
        let resources = self.list_pages(&url, true).await?;

        let mut ids = Vec::with_capacity(resources.len());
        for resource in resources {
            match resource.document_id() {
                Ok(id) => ids.push(id),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping document with unusable resource name");
                }
            }
        }

        tracing::debug!(collection = %collection, count = ids.len(), "Listed collection");

        Ok(ids)
    }

    async fn fetch_documents(
        &self,
        collection: &CollectionId,
        parent: &DocumentId,
        subcollection: &CollectionId,
    ) -> Result<Vec<StoredDocument>> {
        let url = format!(
            "{}/{}/documents/{}/{}/{}",
            self.base_url, self.root, collection, parent, subcollection
        );

        let resources = self.list_pages(&url, false).await?;

        let mut documents = Vec::with_capacity(resources.len());
        for resource in resources {
            let id = match resource.document_id() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping document with unusable resource name");
                    continue;
                }
            };

            match resource.decode_fields() {
                Ok(fields) => documents.push(StoredDocument::new(id, fields)),
                Err(e) => {
                    tracing::warn!(
                        document_id = %id,
                        error = %e,
                        "Skipping document with undecodable fields"
                    );
                }
            }
        }

        Ok(documents)
    }

    async fn read_node(
        &self,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>> {
        let url = format!(
            "{}/{}/documents/{}/{}",
            self.base_url, self.root, collection, id
        );

        let resp = self.send_get(&url, &[]).await?;

        match resp.status() {
            StatusCode::OK => {
                let resource: DocumentResource = resp
                    .json()
                    .await
                    .map_err(|e| QuarryError::Store(StoreError::InvalidResponse(e.to_string())))?;

                let document_id = resource.document_id()?;
                let fields = resource.decode_fields()?;
                Ok(Some(StoredDocument::new(document_id, fields)))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                Err(QuarryError::Store(StoreError::AuthenticationFailed(
                    format!("{status}: {body}"),
                )))
            }
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(QuarryError::Store(StoreError::RequestFailed {
                    status: status.as_u16(),
                    message: body,
                }))
            }
        }
    }
}

/// Map a reqwest transport failure to the matching store error
fn map_transport_error(e: reqwest::Error) -> QuarryError {
    if e.is_timeout() {
        QuarryError::Store(StoreError::Timeout(e.to_string()))
    } else {
        QuarryError::Store(StoreError::ConnectionFailed(e.to_string()))
    }
}
