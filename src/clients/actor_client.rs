use crate::framework::{ActorEntity, FrameworkError, ResourceClient, Versioned};
use async_trait::async_trait;

/// Shared reads and deletes for typed store clients.
///
/// Implementors only say where their [`ResourceClient`] lives and how store errors
/// become their own error type.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError<T::Error>) -> Self::Error;

    /// `None` when nothing is stored under `id`.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, Self::Error> {
        tracing::debug!("Reading entity");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot of every entity, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Versioned<T>>, Self::Error> {
        tracing::debug!("Reading snapshot");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Removes the entity and returns its final state. The entity may veto.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<Versioned<T>, Self::Error> {
        tracing::debug!("Requesting delete");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
