//! Locally held copy of an entity collection.
//!
//! Every successful mutation is followed by a re-fetch of the whole
//! collection, replacing local state with the backend's. Only one mutation
//! runs at a time: a second submit while one is in flight is refused with
//! [`ClientError::SubmitInFlight`].

use std::sync::atomic::{AtomicBool, Ordering};

use planboard_core::attachment::Attachment;
use planboard_core::entities::{Entity, HasAttachment, Record, UploadConfirmable, UploadLinkForm};
use planboard_core::listing::{paginate, Page, Searchable};
use planboard_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::resource::Resource;

pub struct Collection<E: Entity> {
    resource: Resource<E>,
    records: RwLock<Vec<Record<E::Form>>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, however it ends.
#[derive(Debug)]
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ClientError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| SubmitGuard(flag))
            .map_err(|_| ClientError::SubmitInFlight)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<E: Entity> Collection<E> {
    /// An empty collection; call [`refresh`](Self::refresh) to load it.
    pub fn new(resource: Resource<E>) -> Self {
        Self {
            resource,
            records: RwLock::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create and load in one step.
    pub async fn load(resource: Resource<E>) -> Result<Self, ClientError> {
        let collection = Self::new(resource);
        collection.refresh().await?;
        Ok(collection)
    }

    pub fn resource(&self) -> &Resource<E> {
        &self.resource
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Re-fetch the collection and replace the local copy.
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let fresh = self.resource.list().await?;
        let count = fresh.len();
        *self.records.write().await = fresh;
        tracing::debug!(entity = E::NAME, count, "Collection refreshed");
        Ok(count)
    }

    /// Snapshot of the local records.
    pub async fn records(&self) -> Vec<Record<E::Form>> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, id: DbId) -> Option<Record<E::Form>> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Filter by `query` and return one page of the result.
    pub async fn page(&self, query: &str, page: usize, per_page: usize) -> Page<Record<E::Form>> {
        let records = self.records.read().await;
        let matching: Vec<Record<E::Form>> = records
            .iter()
            .filter(|r| r.matches(query))
            .cloned()
            .collect();
        paginate(&matching, page, per_page)
    }

    pub async fn create(&self, form: &E::Form) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        self.resource.create(form).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Edit an item, validating against its locally held stored version.
    pub async fn update(&self, id: DbId, form: &E::Form) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        let previous = self.get(id).await.map(|r| r.fields);
        self.resource.update(id, form, previous.as_ref()).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        self.resource.delete(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

impl<E: UploadConfirmable> Collection<E> {
    pub async fn confirm_upload(&self, id: DbId, link: &UploadLinkForm) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        self.resource.confirm_upload(id, link).await?;
        self.refresh().await?;
        Ok(())
    }
}

impl<E: HasAttachment> Collection<E> {
    pub async fn create_with_attachment(
        &self,
        form: &E::Form,
        attachment: Option<&Attachment>,
    ) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        self.resource.create_with_attachment(form, attachment).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn update_with_attachment(
        &self,
        id: DbId,
        form: &E::Form,
        attachment: Option<&Attachment>,
    ) -> Result<(), ClientError> {
        let _guard = SubmitGuard::acquire(&self.in_flight)?;
        let previous = self.get(id).await.map(|r| r.fields);
        self.resource
            .update_with_attachment(id, form, previous.as_ref(), attachment)
            .await?;
        self.refresh().await?;
        Ok(())
    }
}
