//! Read-through cache of topic lists.
//!
//! Entries live for the lifetime of the cache and are never evicted. Each key
//! has its own async mutex, held while the entry is populated, so concurrent
//! misses on one key run the population once while other keys proceed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::Topic;

/// Cache key for the trending list.
pub const TRENDING_KEY: &str = "topics";

type Slot = Arc<Mutex<Option<Arc<Vec<Topic>>>>>;

/// Process-lifetime map from cache key to an ordered topic list.
#[derive(Default)]
pub struct TopicCache {
    slots: StdMutex<HashMap<String, Slot>>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list for `key`, populating it on a miss.
    ///
    /// Only a non-empty `Ok` result is stored. Errors and empty lists are
    /// handed back to the caller and the next call tries again.
    pub async fn get_or_populate<F, Fut>(&self, key: &str, populate: F) -> Result<Arc<Vec<Topic>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Topic>>>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock().await;

        if let Some(topics) = entry.as_ref() {
            log::debug!("Cache hit for '{key}' ({} topics)", topics.len());
            return Ok(Arc::clone(topics));
        }

        log::debug!("Cache miss for '{key}'");
        let topics = Arc::new(populate().await?);
        if topics.is_empty() {
            log::warn!("Not caching empty result for '{key}'");
        } else {
            *entry = Some(Arc::clone(&topics));
        }
        Ok(topics)
    }

    /// Cached list for `key`, if populated.
    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Topic>>> {
        let slot = self.existing_slot(key)?;
        let entry = slot.lock().await;
        entry.clone()
    }

    /// Number of populated keys.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.all_slots();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(slots.entry(key.to_string()).or_default())
    }

    #[cfg(test)]
    fn existing_slot(&self, key: &str) -> Option<Slot> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(key).cloned()
    }

    #[cfg(test)]
    fn all_slots(&self) -> Vec<Slot> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.values().cloned().collect()
    }
}
