//! Shared item cache with explicit publish/subscribe invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use portal_core::Item;

/// Callback invoked with the new version of a cached item.
pub type ItemHandler = Box<dyn Fn(&Arc<Item>) + Send + Sync>;

/// Handle returned by [`ItemCache::subscribe`]; pass it back to
/// [`ItemCache::unsubscribe`] when the consumer goes away.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    key: String,
    id: u64,
}

impl SubscriptionToken {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Items keyed by business id, shared as `Arc<Item>`.
#[derive(Default)]
pub struct ItemCache {
    items: HashMap<String, Arc<Item>>,
    subscribers: HashMap<String, Vec<(u64, ItemHandler)>>,
    next_id: u64,
}

impl std::fmt::Debug for ItemCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCache")
            .field("items", &self.items.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ItemCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Item>> {
        self.items.get(key).cloned()
    }

    /// Store `item` under `key`. Subscribers are notified when the entry is
    /// new or its content changed.
    pub fn add(&mut self, key: impl Into<String>, item: Item) -> Arc<Item> {
        let key = key.into();
        if let Some(existing) = self.items.get(&key) {
            if **existing == item {
                return Arc::clone(existing);
            }
        }
        let item = Arc::new(item);
        self.items.insert(key.clone(), Arc::clone(&item));
        self.notify(&key, &item);
        item
    }

    /// Replace the entry under `key` and notify subscribers unconditionally.
    pub fn publish(&mut self, key: impl Into<String>, item: Arc<Item>) {
        let key = key.into();
        self.items.insert(key.clone(), Arc::clone(&item));
        self.notify(&key, &item);
    }

    pub fn subscribe(&mut self, key: impl Into<String>, handler: ItemHandler) -> SubscriptionToken {
        let key = key.into();
        self.next_id += 1;
        let id = self.next_id;
        self.subscribers
            .entry(key.clone())
            .or_default()
            .push((id, handler));
        SubscriptionToken { key, id }
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, token: &SubscriptionToken) -> bool {
        let Some(handlers) = self.subscribers.get_mut(&token.key) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != token.id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            self.subscribers.remove(&token.key);
        }
        removed
    }

    /// Forget the item under `key`. Subscriptions stay in place.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Item>> {
        self.items.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }

    fn notify(&self, key: &str, item: &Arc<Item>) {
        if let Some(handlers) = self.subscribers.get(key) {
            tracing::debug!(key, handlers = handlers.len(), "publishing item update");
            for (_, handler) in handlers {
                handler(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, ItemHandler) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: ItemHandler = Box::new(move |item: &Arc<Item>| {
            sink.lock().unwrap().push(item.item_id.clone());
        });
        (seen, handler)
    }

    #[test]
    fn add_then_get_shares_item() {
        let mut cache = ItemCache::new();
        let stored = cache.add("B-1", Item::new("1", "book", "B-1"));
        let fetched = cache.get("B-1").unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
        assert!(cache.get("B-2").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn add_of_changed_item_notifies() {
        let mut cache = ItemCache::new();
        let (seen, handler) = recorder();
        cache.subscribe("B-1", handler);

        cache.add("B-1", Item::new("1", "book", "B-1"));
        cache.add("B-1", Item::new("1", "book", "B-1"));
        cache.add("B-1", Item::new("1v2", "book", "B-1"));
        cache.add("B-2", Item::new("2", "book", "B-2"));

        assert_eq!(*seen.lock().unwrap(), vec!["1", "1v2"]);
    }

    #[test]
    fn publish_always_notifies() {
        let mut cache = ItemCache::new();
        let (seen, handler) = recorder();
        cache.subscribe("B-1", handler);
        let item = Arc::new(Item::new("1", "book", "B-1"));
        cache.publish("B-1", Arc::clone(&item));
        cache.publish("B-1", item);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut cache = ItemCache::new();
        let (seen, handler) = recorder();
        let token = cache.subscribe("B-1", handler);
        assert_eq!(token.key(), "B-1");
        assert_eq!(cache.subscriber_count(), 1);

        assert!(cache.unsubscribe(&token));
        assert!(!cache.unsubscribe(&token));
        assert_eq!(cache.subscriber_count(), 0);

        cache.add("B-1", Item::new("1", "book", "B-1"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn tokens_are_distinct_per_subscription() {
        let mut cache = ItemCache::new();
        let (_, first) = recorder();
        let (seen, second) = recorder();
        let a = cache.subscribe("B-1", first);
        let b = cache.subscribe("B-1", second);
        assert_ne!(a, b);

        cache.unsubscribe(&a);
        cache.add("B-1", Item::new("1", "book", "B-1"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
