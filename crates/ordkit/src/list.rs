//! Arena-backed doubly-linked list
//!
//! Nodes live in a slot vector and link to each other by slot index, so
//! pushing, unlinking and relocating a node are all O(1) given its
//! [`Handle`]. Vacated slots go on a free list and are reused. Each slot
//! carries a generation counter that is bumped whenever the slot is vacated;
//! a handle remembers the generation it was issued with, which makes a
//! handle to a removed node stale rather than an alias for whatever node
//! reuses the slot.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use crate::error::{Error, Result};

/// Stable reference to a node in a [`LinkedList`]
///
/// Generations are 64-bit, so a slot would have to be reused 2^64 times
/// before a stale handle could match again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

/// Node in the doubly-linked list
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// Doubly-linked list with O(1) handle-based removal and relocation
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every node
    ///
    /// Handles issued before the clear become stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Append a value, returning the handle of its node
    pub fn push_back(&mut self, value: T) -> Handle {
        let idx = self.alloc_node(value);
        self.link_back(idx);
        self.len += 1;
        self.handle(idx)
    }

    /// Prepend a value, returning the handle of its node
    pub fn push_front(&mut self, value: T) -> Handle {
        let idx = self.alloc_node(value);
        self.link_front(idx);
        self.len += 1;
        self.handle(idx)
    }

    /// Detach a node and return its value
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let idx = self.resolve(handle)?;
        self.unlink(idx);
        self.len -= 1;
        self.free_node(idx)
    }

    /// Relocate a node to the back of the list
    ///
    /// Returns `false` if the handle is stale.
    pub fn move_to_back(&mut self, handle: Handle) -> bool {
        let Some(idx) = self.resolve(handle) else {
            return false;
        };
        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
        true
    }

    /// Relocate a node to the front of the list
    ///
    /// Returns `false` if the handle is stale.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        let Some(idx) = self.resolve(handle) else {
            return false;
        };
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
        true
    }

    /// Remove the head node, returning its (now stale) handle and value
    pub fn pop_head(&mut self) -> Result<(Handle, T)> {
        let idx = self.head.ok_or(Error::NoSuchElement)?;
        let handle = self.handle(idx);
        self.unlink(idx);
        self.len -= 1;
        let value = self.free_node(idx).ok_or(Error::NoSuchElement)?;
        Ok((handle, value))
    }

    /// Remove the tail node, returning its (now stale) handle and value
    pub fn pop_tail(&mut self) -> Result<(Handle, T)> {
        let idx = self.tail.ok_or(Error::NoSuchElement)?;
        let handle = self.handle(idx);
        self.unlink(idx);
        self.len -= 1;
        let value = self.free_node(idx).ok_or(Error::NoSuchElement)?;
        Ok((handle, value))
    }

    /// Remove and return the first value
    pub fn pop_front(&mut self) -> Result<T> {
        self.pop_head().map(|(_, value)| value)
    }

    /// Remove and return the last value
    pub fn pop_back(&mut self) -> Result<T> {
        self.pop_tail().map(|(_, value)| value)
    }

    /// First value
    pub fn peek_front(&self) -> Result<&T> {
        self.head
            .and_then(|idx| self.value(idx))
            .ok_or(Error::NoSuchElement)
    }

    /// Last value
    pub fn peek_back(&self) -> Result<&T> {
        self.tail
            .and_then(|idx| self.value(idx))
            .ok_or(Error::NoSuchElement)
    }

    /// Handle of the first node
    pub fn front_handle(&self) -> Option<Handle> {
        self.head.map(|idx| self.handle(idx))
    }

    /// Handle of the last node
    pub fn back_handle(&self) -> Option<Handle> {
        self.tail.map(|idx| self.handle(idx))
    }

    /// Check whether a handle still refers to a live node
    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Value behind a handle
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.resolve(handle).and_then(|idx| self.value(idx))
    }

    /// Mutable value behind a handle
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let idx = self.resolve(handle)?;
        self.slots[idx].node.as_mut().map(|node| &mut node.value)
    }

    /// Value at a position
    pub fn get_at(&self, index: usize) -> Result<&T> {
        self.index_at(index)
            .and_then(|idx| self.value(idx))
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Overwrite the value at a position, returning the old value
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let err = self.out_of_bounds(index);
        let idx = self.index_at(index).ok_or(err)?;
        match &mut self.slots[idx].node {
            Some(node) => Ok(mem::replace(&mut node.value, value)),
            None => Err(err),
        }
    }

    /// Insert values so the first of them lands at `index`
    ///
    /// `index == len()` appends.
    pub fn insert<I>(&mut self, index: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        match self.index_at(index) {
            Some(at) => {
                for value in values {
                    let idx = self.alloc_node(value);
                    self.link_before(idx, at);
                    self.len += 1;
                }
            }
            None => {
                for value in values {
                    self.push_back(value);
                }
            }
        }
        Ok(())
    }

    /// Remove and return the value at a position
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let err = self.out_of_bounds(index);
        let idx = self.index_at(index).ok_or(err)?;
        self.unlink(idx);
        self.len -= 1;
        self.free_node(idx).ok_or(err)
    }

    /// Iterate front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn handle(&self, idx: usize) -> Handle {
        Handle {
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation == handle.generation && slot.node.is_some() {
            Some(handle.index)
        } else {
            None
        }
    }

    fn value(&self, idx: usize) -> Option<&T> {
        self.slots[idx].node.as_ref().map(|node| &node.value)
    }

    fn out_of_bounds(&self, index: usize) -> Error {
        Error::IndexOutOfBounds {
            index,
            len: self.len,
        }
    }

    /// Slot index of the node at a position, walking from the nearer end
    fn index_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            let mut cursor = self.head;
            for _ in 0..index {
                cursor = cursor.and_then(|idx| self.slots[idx].node.as_ref()?.next);
            }
            cursor
        } else {
            let mut cursor = self.tail;
            for _ in 0..(self.len - 1 - index) {
                cursor = cursor.and_then(|idx| self.slots[idx].node.as_ref()?.prev);
            }
            cursor
        }
    }

    fn alloc_node(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx].node = Some(node);
            idx
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    fn free_node(&mut self, idx: usize) -> Option<T> {
        let slot = &mut self.slots[idx];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(idx);
        Some(node.value)
    }

    fn set_prev(&mut self, idx: usize, prev: Option<usize>) {
        if let Some(node) = &mut self.slots[idx].node {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, idx: usize, next: Option<usize>) {
        if let Some(node) = &mut self.slots[idx].node {
            node.next = next;
        }
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        self.set_prev(idx, old_tail);
        self.set_next(idx, None);
        match old_tail {
            Some(tail_idx) => self.set_next(tail_idx, Some(idx)),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.set_prev(idx, None);
        self.set_next(idx, old_head);
        match old_head {
            Some(head_idx) => self.set_prev(head_idx, Some(idx)),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn link_before(&mut self, idx: usize, at: usize) {
        let prev = self.slots[at].node.as_ref().and_then(|node| node.prev);
        self.set_prev(idx, prev);
        self.set_next(idx, Some(at));
        match prev {
            Some(prev_idx) => self.set_next(prev_idx, Some(idx)),
            None => self.head = Some(idx),
        }
        self.set_prev(at, Some(idx));
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx].node {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => self.set_next(prev_idx, next),
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.set_prev(next_idx, prev),
            None => self.tail = prev,
        }

        self.set_prev(idx, None);
        self.set_next(idx, None);
    }

    /// Walk the links in both directions and assert they agree with `len`
    #[cfg(test)]
    pub(crate) fn check_links(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut steps = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.slots[idx].node.as_ref().expect("linked slot is vacant");
            assert_eq!(node.prev, last);
            last = Some(idx);
            cursor = node.next;
            steps += 1;
            assert!(steps <= self.len, "cycle in next links");
        }
        assert_eq!(steps, self.len);
        assert_eq!(last, self.tail);

        let mut steps = 0;
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            cursor = self.slots[idx].node.as_ref().expect("linked slot is vacant").prev;
            steps += 1;
            assert!(steps <= self.len, "cycle in prev links");
        }
        assert_eq!(steps, self.len);
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Position of the first node equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Check whether any node equals `value`
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Remove the first node equal to `value`
    pub fn remove_value(&mut self, value: &T) -> bool {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let (matches, next) = match &self.slots[idx].node {
                Some(node) => (node.value == *value, node.next),
                None => break,
            };
            if matches {
                self.unlink(idx);
                self.len -= 1;
                self.free_node(idx);
                return true;
            }
            cursor = next;
        }
        false
    }
}

impl<T: Clone> LinkedList<T> {
    /// Copy the values out, front to back
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// Borrowing iterator over a [`LinkedList`]
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let node = list.slots[self.front?].node.as_ref()?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let node = list.slots[self.back?].node.as_ref()?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`LinkedList`]
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
