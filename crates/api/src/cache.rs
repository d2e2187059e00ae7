//! Tag-invalidated cache for public reads.
//!
//! Entries live in a [`moka::future::Cache`] with a fixed TTL. Every tag has
//! a generation counter, and an entry's key embeds the generation of each
//! of its tags at the time it was computed. Invalidating a tag bumps its
//! generation, so entries written under the old generation are never looked
//! up again and age out on their own.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;

use moka::future::{Cache, CacheBuilder};
use serde_json::Value;

pub struct TagCache {
    entries: Cache<String, Value>,
    generations: RwLock<HashMap<String, u64>>,
}

impl TagCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let entries = CacheBuilder::new(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            entries,
            generations: RwLock::new(HashMap::new()),
        }
    }

    fn generation(generations: &HashMap<String, u64>, tag: &str) -> u64 {
        generations.get(tag).copied().unwrap_or(0)
    }

    /// Build the lookup key for `name` under the current tag generations.
    fn key(&self, name: &str, tags: &[&str]) -> String {
        let generations = match self.generations.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut key = String::from(name);
        for tag in tags {
            key.push('|');
            key.push_str(tag);
            key.push('@');
            key.push_str(&Self::generation(&generations, tag).to_string());
        }
        key
    }

    /// Return the cached value for `name`, or run `load` and cache its result.
    ///
    /// The key is computed before `load` runs, so a write that invalidates
    /// one of `tags` while the load is in flight leaves the stale result
    /// under a key no later read will use. Errors are never cached.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        name: &str,
        tags: &[&str],
        load: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        let key = self.key(name, tags);
        if let Some(hit) = self.entries.get(&key).await {
            tracing::trace!(key = %key, "Cache hit");
            return Ok(hit);
        }

        let value = load().await?;
        self.entries.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Approximate number of live entries, including unreachable ones that
    /// have not aged out yet.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Make every entry tagged with `tag` unreachable.
    pub fn invalidate(&self, tag: &str) {
        let mut generations = match self.generations.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = Self::generation(&generations, tag) + 1;
        generations.insert(tag.to_string(), next);
        tracing::debug!(tag, generation = next, "Cache tag invalidated");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    fn cache() -> TagCache {
        TagCache::new(Duration::from_secs(60), 100)
    }

    async fn load_counting(
        cache: &TagCache,
        name: &str,
        tags: &[&str],
        calls: &AtomicUsize,
    ) -> Value {
        cache
            .get_or_load(name, tags, || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(json!({ "call": n }))
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        let first = load_counting(&cache, "hero:az", &["hero"], &calls).await;
        let second = load_counting(&cache, "hero:az", &["hero"], &calls).await;

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidating_a_tag_forces_a_reload() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        load_counting(&cache, "blogs:az:1", &["blogs", "contact"], &calls).await;
        cache.invalidate("contact");
        let reloaded = load_counting(&cache, "blogs:az:1", &["blogs", "contact"], &calls).await;

        assert_eq!(reloaded, json!({ "call": 1 }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unrelated_tags_are_left_alone() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        load_counting(&cache, "hero:en", &["hero"], &calls).await;
        cache.invalidate("blogs");
        load_counting(&cache, "hero:en", &["hero"], &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = cache();

        let failed: Result<Value, &str> = cache
            .get_or_load("about:ru", &["about"], || async { Err("db down") })
            .await;
        assert_eq!(failed, Err("db down"));

        let ok: Result<Value, &str> = cache
            .get_or_load("about:ru", &["about"], || async { Ok(json!("fresh")) })
            .await;
        assert_eq!(ok, Ok(json!("fresh")));
    }
}
