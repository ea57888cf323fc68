use crate::item::CacheItem;
use crate::policy::order_list::{Iter, OrderList};

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use ahash::RandomState;
use generational_arena::Index;

/// A mapping entry: the stored item plus the handle of its node in the order.
#[derive(Debug)]
pub(crate) struct Slot {
  pub(crate) item: Arc<CacheItem>,
  pub(crate) handle: Index,
}

/// A node in the eviction order: the key it tracks plus policy metadata
/// (`()` for pure queues, an access count for LFU).
#[derive(Debug)]
pub(crate) struct Tracked<M> {
  pub(crate) key: String,
  pub(crate) meta: M,
}

/// The mapping and the eviction order of one cache instance.
///
/// Both halves are only ever mutated together through the methods below, so
/// the key set of `map` and the key set of `order` stay identical. Callers
/// hold the instance lock around every call.
pub(crate) struct OrderedStore<M> {
  map: HashMap<String, Slot, RandomState>,
  order: OrderList<Tracked<M>>,
}

impl<M> fmt::Debug for OrderedStore<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OrderedStore")
      .field("len", &self.map.len())
      .finish_non_exhaustive()
  }
}

impl<M> OrderedStore<M> {
  pub(crate) fn new() -> Self {
    Self {
      map: HashMap::with_hasher(RandomState::new()),
      order: OrderList::new(),
    }
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.map.len()
  }

  #[inline]
  pub(crate) fn lookup(&self, key: &str) -> Option<&Slot> {
    self.map.get(key)
  }

  /// Replaces the payload of an existing entry in place, returning the
  /// entry's order handle. A new key hands the item back untouched.
  pub(crate) fn overwrite(&mut self, item: CacheItem) -> Result<Index, CacheItem> {
    match self.map.get_mut(item.key()) {
      Some(slot) => {
        slot.item = Arc::new(item);
        Ok(slot.handle)
      }
      None => Err(item),
    }
  }

  /// Inserts a key that is known to be absent at the back of the order.
  pub(crate) fn push_back(&mut self, item: CacheItem, meta: M) {
    let key = item.key().to_owned();
    let handle = self.order.push_back(Tracked {
      key: key.clone(),
      meta,
    });
    self.map.insert(
      key,
      Slot {
        item: Arc::new(item),
        handle,
      },
    );
    debug_assert_eq!(self.map.len(), self.order.len());
  }

  #[inline]
  pub(crate) fn promote(&mut self, handle: Index) {
    self.order.move_to_back(handle);
  }

  #[inline]
  pub(crate) fn meta_mut(&mut self, handle: Index) -> Option<&mut M> {
    self.order.get_mut(handle).map(|tracked| &mut tracked.meta)
  }

  #[inline]
  pub(crate) fn front(&self) -> Option<Index> {
    self.order.front()
  }

  /// Walks the order from the next victim to the most recent entry.
  #[inline]
  pub(crate) fn iter_order(&self) -> Iter<'_, Tracked<M>> {
    self.order.iter()
  }

  /// Removes the entry whose order node is `handle`, returning its key.
  pub(crate) fn evict(&mut self, handle: Index) -> Option<String> {
    let tracked = self.order.remove(handle)?;
    self.map.remove(&tracked.key);
    debug_assert_eq!(self.map.len(), self.order.len());
    Some(tracked.key)
  }

  pub(crate) fn remove(&mut self, key: &str) -> Option<Arc<CacheItem>> {
    let slot = self.map.remove(key)?;
    self.order.remove(slot.handle);
    debug_assert_eq!(self.map.len(), self.order.len());
    Some(slot.item)
  }

  pub(crate) fn clear(&mut self) {
    self.map.clear();
    self.order.clear();
  }

  // Test helper: keys from next victim to most recent.
  #[cfg(test)]
  pub(crate) fn keys_in_order(&self) -> Vec<String> {
    self.order.iter().map(|(_, t)| t.key.clone()).collect()
  }

  // Test helper: the mapping and the order track exactly the same keys.
  #[cfg(test)]
  pub(crate) fn is_consistent(&self) -> bool {
    self.map.len() == self.order.len()
      && self.order.iter().all(|(index, tracked)| {
        self
          .map
          .get(&tracked.key)
          .is_some_and(|slot| slot.handle == index)
      })
  }
}
