//! In-memory repository implementations.
//!
//! Each store is an `RwLock`-protected map keyed by id plus an insertion-order
//! index, so concurrent requests see atomic mutations and `list` preserves
//! creation order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use docuweave_core::models::{DocumentRequest, Recipient, UpdateRecipient, UploadToken};
use docuweave_core::AppError;

use crate::traits::{
    DocumentRequestRepository, RecipientRepository, RequestMutation, UploadTokenRepository,
};

/// Map plus insertion-order index; the unit both stores are built from.
struct Table<T> {
    rows: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, id: Uuid, row: T) {
        if self.rows.insert(id, row).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: Uuid) -> Option<T> {
        let removed = self.rows.remove(&id);
        if removed.is_some() {
            self.order.retain(|existing| *existing != id);
        }
        removed
    }

    fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect()
    }
}

#[derive(Clone)]
pub struct InMemoryRecipientRepository {
    table: Arc<RwLock<Table<Recipient>>>,
}

impl InMemoryRecipientRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::new())),
        }
    }
}

impl Default for InMemoryRecipientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipientRepository for InMemoryRecipientRepository {
    async fn create(&self, recipient: Recipient) -> Result<Recipient, AppError> {
        let mut table = self.table.write().await;
        table.insert(recipient.id, recipient.clone());
        Ok(recipient)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Recipient>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Recipient>, AppError> {
        Ok(self.table.read().await.in_order())
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateRecipient,
    ) -> Result<Option<Recipient>, AppError> {
        let mut table = self.table.write().await;
        let Some(recipient) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = update.email {
            recipient.email = email;
        }
        if let Some(name) = update.name {
            recipient.name = name;
        }
        if update.organization.is_some() {
            recipient.organization = update.organization;
        }
        if update.phone.is_some() {
            recipient.phone = update.phone;
        }
        recipient.updated_at = Utc::now();
        Ok(Some(recipient.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.table.write().await.remove(id).is_some())
    }
}

#[derive(Clone)]
pub struct InMemoryDocumentRequestRepository {
    table: Arc<RwLock<Table<DocumentRequest>>>,
}

impl InMemoryDocumentRequestRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::new())),
        }
    }
}

impl Default for InMemoryDocumentRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRequestRepository for InMemoryDocumentRequestRepository {
    async fn create(&self, request: DocumentRequest) -> Result<DocumentRequest, AppError> {
        let mut table = self.table.write().await;
        table.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get(&self, id: Uuid) -> Result<Option<DocumentRequest>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<DocumentRequest>, AppError> {
        Ok(self.table.read().await.in_order())
    }

    async fn update_with(
        &self,
        id: Uuid,
        mutation: RequestMutation,
    ) -> Result<Option<DocumentRequest>, AppError> {
        let mut table = self.table.write().await;
        let Some(stored) = table.rows.get(&id) else {
            return Ok(None);
        };
        // Mutate a copy so a failed mutation leaves the store untouched.
        let mut draft = stored.clone();
        mutation(&mut draft)?;
        table.rows.insert(id, draft.clone());
        Ok(Some(draft))
    }
}

#[derive(Clone)]
pub struct InMemoryUploadTokenRepository {
    table: Arc<RwLock<Table<UploadToken>>>,
}

impl InMemoryUploadTokenRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::new())),
        }
    }
}

impl Default for InMemoryUploadTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadTokenRepository for InMemoryUploadTokenRepository {
    async fn create(&self, token: UploadToken) -> Result<UploadToken, AppError> {
        let mut table = self.table.write().await;
        table.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_valid(
        &self,
        token_value: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UploadToken>, AppError> {
        let table = self.table.read().await;
        for token in table.rows.values() {
            let matches: bool = token
                .token
                .as_bytes()
                .ct_eq(token_value.as_bytes())
                .into();
            if matches && token.is_valid(now) {
                return Ok(Some(token.clone()));
            }
        }
        Ok(None)
    }

    async fn mark_used_for_request(
        &self,
        document_request_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let mut table = self.table.write().await;
        let mut consumed = 0;
        for token in table.rows.values_mut() {
            if token.document_request_id == document_request_id && token.used_at.is_none() {
                token.used_at = Some(now);
                consumed += 1;
            }
        }
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use docuweave_core::models::{RequestedDocument, UploadToken};

    fn recipient(name: &str) -> Recipient {
        Recipient::new(format!("{}@example.com", name), name.to_string(), None, None)
    }

    fn token_for(request_id: Uuid, value: &str, expires_at: DateTime<Utc>) -> UploadToken {
        UploadToken {
            id: Uuid::new_v4(),
            token: value.to_string(),
            recipient_id: Uuid::new_v4(),
            document_request_id: request_id,
            expires_at,
            used_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recipients_list_in_insertion_order() {
        let repo = InMemoryRecipientRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(recipient(name)).await.unwrap();
        }
        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_recipient_update_and_delete() {
        let repo = InMemoryRecipientRepository::new();
        let created = repo.create(recipient("a")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateRecipient {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("recipient exists");
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.email, created.email);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_request_untouched() {
        let repo = InMemoryDocumentRequestRepository::new();
        let request = DocumentRequest::new(
            Uuid::new_v4(),
            "p".to_string(),
            "c".to_string(),
            vec![RequestedDocument::new("a".to_string(), None, true)],
            None,
            None,
        );
        let id = request.id;
        repo.create(request).await.unwrap();

        let result = repo
            .update_with(
                id,
                Box::new(|draft| {
                    draft.project_name = "mutated".to_string();
                    Err(AppError::Validation("boom".to_string()))
                }),
            )
            .await;
        assert!(result.is_err());

        let stored = repo.get(id).await.unwrap().expect("request exists");
        assert_eq!(stored.project_name, "p");
    }

    #[tokio::test]
    async fn test_update_with_unknown_id_is_none() {
        let repo = InMemoryDocumentRequestRepository::new();
        let result = repo
            .update_with(Uuid::new_v4(), Box::new(|_| Ok(())))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_token_lookup_rejects_expired_and_used_alike() {
        let repo = InMemoryUploadTokenRepository::new();
        let now = Utc::now();
        let request_id = Uuid::new_v4();

        let live = token_for(request_id, "live-token", now + Duration::days(7));
        let expired = token_for(request_id, "expired-token", now - Duration::seconds(1));
        let mut used = token_for(request_id, "used-token", now + Duration::days(7));
        used.used_at = Some(now);

        repo.create(live.clone()).await.unwrap();
        repo.create(expired).await.unwrap();
        repo.create(used).await.unwrap();

        assert!(repo.find_valid("live-token", now).await.unwrap().is_some());
        // Expired, used, and never-issued are indistinguishable: all None.
        assert!(repo.find_valid("expired-token", now).await.unwrap().is_none());
        assert!(repo.find_valid("used-token", now).await.unwrap().is_none());
        assert!(repo.find_valid("never-issued", now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_used_consumes_all_request_tokens() {
        let repo = InMemoryUploadTokenRepository::new();
        let now = Utc::now();
        let request_id = Uuid::new_v4();
        repo.create(token_for(request_id, "one", now + Duration::days(7)))
            .await
            .unwrap();
        repo.create(token_for(request_id, "two", now + Duration::days(7)))
            .await
            .unwrap();
        repo.create(token_for(Uuid::new_v4(), "other", now + Duration::days(7)))
            .await
            .unwrap();

        assert_eq!(repo.mark_used_for_request(request_id, now).await.unwrap(), 2);
        assert!(repo.find_valid("one", now).await.unwrap().is_none());
        assert!(repo.find_valid("two", now).await.unwrap().is_none());
        assert!(repo.find_valid("other", now).await.unwrap().is_some());
    }
}
