use tokio::sync::RwLock;

use crate::models::{DataCard, DataSource, Dimension, Metric, Report};
use crate::utils::{ApiError, ApiResult, IdGenerator};

/// Record kept in an [`EntityStore`]
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind, used in error messages
    const KIND: &'static str;

    fn id(&self) -> i64;
}

/// Ordered in-memory collection for one entity kind.
///
/// Items keep insertion order. Mutations resolve the entity's current index
/// and splice or replace it under the same write lock.
#[derive(Debug)]
pub struct EntityStore<T: Entity> {
    items: RwLock<Vec<T>>,
    ids: IdGenerator,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        let ids = IdGenerator::new();
        for item in &items {
            ids.observe(item.id());
        }
        Self { items: RwLock::new(items), ids }
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn find(&self, id: i64) -> Option<T> {
        self.items.read().await.iter().find(|item| item.id() == id).cloned()
    }

    pub async fn get(&self, id: i64) -> ApiResult<T> {
        self.find(id).await.ok_or_else(|| not_found::<T>(id))
    }

    /// Append the item built from a freshly allocated id
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let mut items = self.items.write().await;
        let item = build(self.ids.next_id());
        items.push(item.clone());
        item
    }

    /// Replace the entity with the one `update` derives from it.
    /// Nothing changes when `update` fails.
    pub async fn update_by_id<F>(&self, id: i64, update: F) -> ApiResult<T>
    where
        F: FnOnce(&T) -> ApiResult<T>,
    {
        let mut items = self.items.write().await;
        let index = position_of(&items, id)?;
        let updated = update(&items[index])?;
        items[index] = updated.clone();
        Ok(updated)
    }

    pub async fn remove_by_id(&self, id: i64) -> ApiResult<T> {
        let mut items = self.items.write().await;
        let index = position_of(&items, id)?;
        Ok(items.remove(index))
    }
}

fn position_of<T: Entity>(items: &[T], id: i64) -> ApiResult<usize> {
    items.iter().position(|item| item.id() == id).ok_or_else(|| not_found::<T>(id))
}

fn not_found<T: Entity>(id: i64) -> ApiError {
    ApiError::not_found(format!("{} {} not found", T::KIND, id))
}

impl Entity for DataSource {
    const KIND: &'static str = "Data source";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for Metric {
    const KIND: &'static str = "Metric";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for Dimension {
    const KIND: &'static str = "Dimension";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for DataCard {
    const KIND: &'static str = "Data card";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for Report {
    const KIND: &'static str = "Report";

    fn id(&self) -> i64 {
        self.id
    }
}
