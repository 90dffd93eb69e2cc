use std::sync::Arc;

/// A key-value cache the service keeps its snapshot in.
///
/// Each operation is atomic for a single key; concurrent writers to the
/// same key resolve as last-write-wins. Expiry and capacity are the
/// store's business, so a value that was `set` may later read as `None`.
#[async_trait::async_trait]
pub trait CacheStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V>;

    async fn set(&self, key: &str, value: V);

    async fn delete(&self, key: &str);
}

#[async_trait::async_trait]
impl<V, T> CacheStore<V> for Arc<T>
where
    V: Clone + Send + Sync + 'static,
    T: CacheStore<V> + ?Sized,
{
    async fn get(&self, key: &str) -> Option<V> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: V) {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) {
        (**self).delete(key).await
    }
}
