//! Collection interfaces
//!
//! [`LinkedList`] implements every trait here, so callers can accept the
//! narrowest surface they need (a FIFO queue, a LIFO stack, ...) without
//! naming the concrete list.

use crate::error::Result;
use crate::list::LinkedList;

/// A group of elements
pub trait Collection<T> {
    /// Append an element
    fn add(&mut self, value: T);

    /// Remove every element
    fn clear(&mut self);

    /// Check whether an element equal to `value` is present
    fn contains(&self, value: &T) -> bool;

    /// Remove the first element equal to `value`
    fn remove_value(&mut self, value: &T) -> bool;

    /// Number of elements
    fn len(&self) -> usize;

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every element of `values`
    fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Check whether every element of `values` is present
    fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        Self: Sized,
    {
        values.into_iter().all(|value| self.contains(value))
    }
}

/// An ordered collection addressable by position
pub trait Sequence<T>: Collection<T> {
    /// Element at `index`
    fn get_at(&self, index: usize) -> Result<&T>;

    /// Overwrite the element at `index`, returning the old one
    fn set(&mut self, index: usize, value: T) -> Result<T>;

    /// Insert an element at `index`, shifting later ones back
    fn insert_at(&mut self, index: usize, value: T) -> Result<()>;

    /// Remove and return the element at `index`
    fn remove_at(&mut self, index: usize) -> Result<T>;

    /// Position of the first element equal to `value`
    fn index_of(&self, value: &T) -> Option<usize>;
}

/// First-in first-out access
pub trait Queue<T>: Collection<T> {
    /// First element
    fn peek_front(&self) -> Result<&T>;

    /// Remove and return the first element
    fn pop_front(&mut self) -> Result<T>;
}

/// Last-in first-out access
pub trait Stack<T>: Collection<T> {
    /// Last element
    fn peek_back(&self) -> Result<&T>;

    /// Remove and return the last element
    fn pop_back(&mut self) -> Result<T>;
}

/// Double-ended queue
pub trait Deque<T>: Queue<T> + Stack<T> {
    /// Prepend an element
    fn push_front(&mut self, value: T);
}

impl<T: PartialEq> Collection<T> for LinkedList<T> {
    fn add(&mut self, value: T) {
        self.push_back(value);
    }

    fn clear(&mut self) {
        LinkedList::clear(self)
    }

    fn contains(&self, value: &T) -> bool {
        LinkedList::contains(self, value)
    }

    fn remove_value(&mut self, value: &T) -> bool {
        LinkedList::remove_value(self, value)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

impl<T: PartialEq> Sequence<T> for LinkedList<T> {
    fn get_at(&self, index: usize) -> Result<&T> {
        LinkedList::get_at(self, index)
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        LinkedList::set(self, index, value)
    }

    fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
        self.insert(index, std::iter::once(value))
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        LinkedList::remove_at(self, index)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        LinkedList::index_of(self, value)
    }
}

impl<T: PartialEq> Queue<T> for LinkedList<T> {
    fn peek_front(&self) -> Result<&T> {
        LinkedList::peek_front(self)
    }

    fn pop_front(&mut self) -> Result<T> {
        LinkedList::pop_front(self)
    }
}

impl<T: PartialEq> Stack<T> for LinkedList<T> {
    fn peek_back(&self) -> Result<&T> {
        LinkedList::peek_back(self)
    }

    fn pop_back(&mut self) -> Result<T> {
        LinkedList::pop_back(self)
    }
}

impl<T: PartialEq> Deque<T> for LinkedList<T> {
    fn push_front(&mut self, value: T) {
        LinkedList::push_front(self, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn drain_queue<Q: Queue<i32>>(queue: &mut Q) -> Vec<i32> {
        let mut out = Vec::new();
        while let Ok(value) = queue.pop_front() {
            out.push(value);
        }
        out
    }

    fn drain_stack<S: Stack<i32>>(stack: &mut S) -> Vec<i32> {
        let mut out = Vec::new();
        while let Ok(value) = stack.pop_back() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_collection() {
        let mut collection: LinkedList<i32> = LinkedList::new();

        Collection::clear(&mut collection);
        assert!(!Collection::contains(&collection, &0));
        assert!(Collection::is_empty(&collection));
        assert!(!Collection::remove_value(&mut collection, &0));

        collection.add_all([5, 3, 8, 4, 2, 6, 9]);
        assert_eq!(Collection::len(&collection), 7);
        assert!(collection.contains_all(&[5, 9]));
        assert!(!collection.contains_all(&[5, 10]));
    }

    #[test]
    fn test_queue() {
        let mut queue: LinkedList<i32> = LinkedList::new();

        assert_eq!(Queue::peek_front(&queue), Err(Error::NoSuchElement));
        assert_eq!(Queue::pop_front(&mut queue), Err(Error::NoSuchElement));

        queue.add_all(0..4);
        assert_eq!(Queue::peek_front(&queue), Ok(&0));
        assert_eq!(drain_queue(&mut queue), vec![0, 1, 2, 3]);
        assert!(Collection::is_empty(&queue));
    }

    #[test]
    fn test_stack() {
        let mut stack: LinkedList<i32> = LinkedList::new();

        assert_eq!(Stack::pop_back(&mut stack), Err(Error::NoSuchElement));

        stack.add_all(0..4);
        assert_eq!(Stack::peek_back(&stack), Ok(&3));
        assert_eq!(drain_stack(&mut stack), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_deque() {
        let mut deque: LinkedList<i32> = LinkedList::new();

        assert_eq!(Stack::peek_back(&deque), Err(Error::NoSuchElement));

        for value in 0..4 {
            Deque::push_front(&mut deque, value);
        }
        assert_eq!(deque.to_vec(), vec![3, 2, 1, 0]);

        for expected in 0..4 {
            assert_eq!(Stack::peek_back(&deque), Ok(&expected));
            assert_eq!(Stack::pop_back(&mut deque), Ok(expected));
        }
        assert!(Collection::is_empty(&deque));
    }

    #[test]
    fn test_sequence() {
        let mut seq: LinkedList<i32> = LinkedList::new();

        assert_eq!(
            seq.insert_at(1, 4),
            Err(Error::IndexOutOfBounds { index: 1, len: 0 })
        );
        seq.insert_at(0, 4).unwrap();
        seq.insert_at(0, 2).unwrap();
        seq.insert_at(1, 3).unwrap();
        assert_eq!(Sequence::get_at(&seq, 1), Ok(&3));
        assert_eq!(Sequence::index_of(&seq, &4), Some(2));
        assert_eq!(Sequence::set(&mut seq, 2, 5), Ok(4));
        assert_eq!(Sequence::remove_at(&mut seq, 0), Ok(2));
        assert_eq!(seq.to_vec(), vec![3, 5]);
    }
}
