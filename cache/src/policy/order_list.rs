use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node<T> {
  value: T,
  prev: Option<Index>,
  next: Option<Index>,
}

/// An arena-backed doubly-linked list used as an eviction order.
///
/// The front is the next victim and the back is the most recently inserted
/// or promoted element. Every element is addressed by the `Index` handed out
/// by `push_back`, which makes removal and relocation O(1).
#[derive(Debug)]
pub(crate) struct OrderList<T> {
  // Arena stores all nodes contiguously.
  nodes: Arena<Node<T>>,
  front: Option<Index>,
  back: Option<Index>,
}

impl<T> Default for OrderList<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> OrderList<T> {
  pub fn new() -> Self {
    Self {
      nodes: Arena::new(),
      front: None,
      back: None,
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn front(&self) -> Option<Index> {
    self.front
  }

  #[inline]
  pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
    self.nodes.get_mut(index).map(|node| &mut node.value)
  }

  // Detaches a node from its neighbours. Arena storage is left untouched.
  fn unlink(&mut self, index: Index) {
    let (prev, next) = match self.nodes.get(index) {
      Some(node) => (node.prev, node.next),
      None => return,
    };

    match prev {
      Some(prev_idx) => self.nodes[prev_idx].next = next,
      None => self.front = next,
    }

    match next {
      Some(next_idx) => self.nodes[next_idx].prev = prev,
      None => self.back = prev,
    }
  }

  // Links a node that is already in the arena as the new back.
  fn link_back(&mut self, index: Index) {
    let old_back = self.back;
    self.nodes[index].prev = old_back;
    self.nodes[index].next = None;
    self.back = Some(index);

    match old_back {
      Some(old) => self.nodes[old].next = Some(index),
      None => self.front = Some(index),
    }
  }

  pub fn push_back(&mut self, value: T) -> Index {
    let index = self.nodes.insert(Node {
      value,
      prev: None,
      next: None,
    });
    self.link_back(index);
    index
  }

  /// Relocates an element to the back. Stale handles are ignored.
  pub fn move_to_back(&mut self, index: Index) {
    if self.back == Some(index) || !self.nodes.contains(index) {
      return;
    }
    self.unlink(index);
    self.link_back(index);
  }

  pub fn remove(&mut self, index: Index) -> Option<T> {
    if !self.nodes.contains(index) {
      return None;
    }
    self.unlink(index);
    self.nodes.remove(index).map(|node| node.value)
  }

  pub fn clear(&mut self) {
    self.nodes.clear();
    self.front = None;
    self.back = None;
  }

  /// Walks the list from front (next victim) to back.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      list: self,
      cursor: self.front,
    }
  }
}

pub(crate) struct Iter<'a, T> {
  list: &'a OrderList<T>,
  cursor: Option<Index>,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = (Index, &'a T);

  fn next(&mut self) -> Option<Self::Item> {
    let index = self.cursor?;
    let node = self.list.nodes.get(index)?;
    self.cursor = node.next;
    Some((index, &node.value))
  }
}
