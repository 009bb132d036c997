use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;

/// Screen name to user ID lookups, shared by every clone of a scraper.
///
/// Entries are never invalidated. Screen names are matched case-insensitively, the same way
/// upstream resolves them.
#[derive(Debug, Clone, Default)]
pub struct ScreenNameCache {
    ids: Arc<DashMap<String, String>>,
}

impl ScreenNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, screen_name: &str) -> Option<String> {
        self.ids
            .get(&key(screen_name))
            .map(|entry| entry.value().clone())
    }

    /// Stores `user_id` unless an ID is already cached, and returns whichever ID ends up cached.
    pub fn insert(&self, screen_name: &str, user_id: String) -> String {
        self.ids
            .entry(key(screen_name))
            .or_insert(user_id)
            .value()
            .clone()
    }

    /// Returns the cached ID or resolves and caches it. No shard lock is held while `resolve`
    /// runs, so concurrent misses may both resolve; the first one to finish wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        screen_name: &str,
        resolve: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(id) = self.get(screen_name) {
            return Ok(id);
        }
        let id = resolve().await?;
        Ok(self.insert(screen_name, id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&self) {
        self.ids.clear()
    }
}

fn key(screen_name: &str) -> String {
    screen_name.to_lowercase()
}
