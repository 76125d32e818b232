//! Stable node handles.
//!
//! A [`NodeHandle`] is a copyable token naming one node of one [`List`].
//! Unlike an index, it keeps naming the same element while other elements
//! are inserted, removed, or the list is re-ordered by a sort; unlike a
//! reference, it does not borrow the list, so it can be stored freely and
//! outlive any number of mutations.
//!
//! A handle confers no access on its own. Every operation that accepts one
//! first verifies that the handle still names a live member of *this* list,
//! by scanning the chain for the node and comparing its never-reused id.
//! Three things can make a handle invalid, and all are detected:
//!
//! - the node was removed (the id died with it);
//! - the node belongs to a different list;
//! - the allocation was reused by a newer node (the id differs).
//!
//! Operations that contractually require a member ([`insert_before`],
//! [`remove_node`], [`index_of_node`] and friends) report an invalid
//! handle as [`ListError::NodeNotFound`]. Pure queries ([`contains_node`],
//! [`find_node`]) answer with `bool`/`Option` instead.
//!
//! The membership scan makes every handle-accepting operation *O*(*n*); the
//! relinking that follows is *O*(1).
//!
//! [`List`]: crate::List
//! [`insert_before`]: crate::List::insert_before
//! [`remove_node`]: crate::List::remove_node
//! [`index_of_node`]: crate::List::index_of_node
//! [`contains_node`]: crate::List::contains_node
//! [`find_node`]: crate::List::find_node

use std::fmt;
use std::ptr::NonNull;

use crate::list::error::ListError;
use crate::list::{List, Node};

/// A handle to one node of a [`List`].
///
/// Obtained from the insertion operations ([`push_front`], [`push_back`],
/// [`insert`], [`insert_before`], [`insert_after`]) and the lookups
/// ([`front_handle`], [`back_handle`], [`handle_at`], [`find_node`]).
///
/// Handles are plain values: `Copy`, comparable, and hashable. Two handles
/// are equal iff they name the same node. A handle does not keep its node
/// alive and does not borrow the list; presenting a stale handle is safe
/// and answered with [`ListError::NodeNotFound`].
///
/// # Examples
///
/// ```
/// use anchor_list::List;
///
/// let mut list = List::new();
/// let b = list.push_back("b");
/// list.push_back("c");
/// list.insert_before(&b, "a").unwrap();
///
/// assert_eq!(list.to_vec(), vec!["a", "b", "c"]);
/// assert_eq!(list.index_of_node(&b), Ok(1));
///
/// list.remove_node(&b).unwrap();
/// assert!(!list.contains_node(&b));
/// ```
///
/// [`List`]: crate::List
/// [`push_front`]: crate::List::push_front
/// [`push_back`]: crate::List::push_back
/// [`insert`]: crate::List::insert
/// [`insert_before`]: crate::List::insert_before
/// [`insert_after`]: crate::List::insert_after
/// [`front_handle`]: crate::List::front_handle
/// [`back_handle`]: crate::List::back_handle
/// [`handle_at`]: crate::List::handle_at
/// [`find_node`]: crate::List::find_node
pub struct NodeHandle<T> {
    pub(crate) ptr: NonNull<Node<T>>,
    pub(crate) nid: u64,
}

impl<T> NodeHandle<T> {
    /// `ptr` must point at a live payload node.
    pub(crate) fn of(ptr: NonNull<Node<T>>) -> Self {
        let nid = unsafe { ptr.as_ref().nid };
        Self { ptr, nid }
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeHandle<T> {}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.nid == other.nid
    }
}

impl<T> Eq for NodeHandle<T> {}

impl<T> std::hash::Hash for NodeHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.nid.hash(state);
    }
}

impl<T> fmt::Debug for NodeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeHandle").field(&self.nid).finish()
    }
}

// private methods
impl<T> List<T> {
    /// Resolve a handle to its node, or `None` if the handle does not name
    /// a live member of this list.
    ///
    /// A stale handle may dangle, so it is never dereferenced: the chain is
    /// scanned by address first, and only a node actually linked into this
    /// list, which is therefore alive, is read to compare ids. An address
    /// hit with a different id means the allocation was reused by a newer
    /// node.
    pub(crate) fn locate(&self, handle: &NodeHandle<T>) -> Option<NonNull<Node<T>>> {
        let anchor = self.anchor_ptr();
        let mut cur = self.front_ptr();
        while cur != anchor {
            if cur == handle.ptr {
                // SAFETY: `cur` is linked into this list, so it is alive.
                return if unsafe { cur.as_ref().nid } == handle.nid {
                    Some(cur)
                } else {
                    None
                };
            }
            cur = unsafe { cur.as_ref().next };
        }
        None
    }
}

impl<T> List<T> {
    /// Returns a handle to the first node, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list: List<i32> = List::new();
    /// assert_eq!(list.front_handle(), None);
    ///
    /// let list = List::from_iter([1, 2]);
    /// let front = list.front_handle().unwrap();
    /// assert_eq!(list.payload(&front), Ok(&1));
    /// ```
    pub fn front_handle(&self) -> Option<NodeHandle<T>> {
        if self.is_empty() {
            return None;
        }
        Some(NodeHandle::of(self.front_ptr()))
    }

    /// Returns a handle to the last node, or `None` if the list is empty.
    pub fn back_handle(&self) -> Option<NodeHandle<T>> {
        if self.is_empty() {
            return None;
        }
        Some(NodeHandle::of(self.back_ptr()))
    }

    /// Returns a handle to the node at the given index, walking from the
    /// nearer end of the list.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfBounds`] if `at >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let handle = list.handle_at(1).unwrap();
    /// assert_eq!(list.payload(&handle), Ok(&2));
    /// assert!(list.handle_at(3).is_err());
    /// ```
    pub fn handle_at(&self, at: usize) -> Result<NodeHandle<T>, ListError> {
        if at >= self.len {
            return Err(ListError::OutOfBounds {
                index: at,
                len: self.len,
            });
        }
        Ok(NodeHandle::of(self.node_ptr_at(at)))
    }

    /// Returns a handle to the first node matched by the caller-supplied
    /// equality test, scanning from the front.
    ///
    /// Absence is an answer here, not a contract violation, so a miss
    /// yields `None` rather than an error (contrast [`index_where`], whose
    /// contract requires a match).
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    ///
    /// let found = list.find_node(|e| e % 2 == 0).unwrap();
    /// assert_eq!(list.payload(&found), Ok(&2));
    ///
    /// assert!(list.find_node(|e| *e > 9).is_none());
    /// ```
    ///
    /// [`index_where`]: List::index_where
    pub fn find_node<F>(&self, mut is_match: F) -> Option<NodeHandle<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let anchor = self.anchor_ptr();
        let mut cur = self.front_ptr();
        while cur != anchor {
            // SAFETY: `cur` is a payload node until it reaches the anchor.
            if is_match(unsafe { &cur.as_ref().payload }) {
                return Some(NodeHandle::of(cur));
            }
            cur = unsafe { cur.as_ref().next };
        }
        None
    }

    /// Returns `true` if the handle names a live node of this list.
    ///
    /// A query, never an error: stale and foreign handles simply answer
    /// `false`.
    pub fn contains_node(&self, handle: &NodeHandle<T>) -> bool {
        self.locate(handle).is_some()
    }

    /// Returns the index of the node named by the handle.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// list.push_back('a');
    /// let b = list.push_back('b');
    ///
    /// assert_eq!(list.index_of_node(&b), Ok(1));
    ///
    /// list.remove_node(&b).unwrap();
    /// assert_eq!(list.index_of_node(&b), Err(ListError::NodeNotFound));
    /// ```
    pub fn index_of_node(&self, handle: &NodeHandle<T>) -> Result<usize, ListError> {
        let anchor = self.anchor_ptr();
        let mut cur = self.front_ptr();
        let mut at = 0;
        while cur != anchor {
            if cur == handle.ptr {
                // SAFETY: `cur` is linked into this list, so it is alive.
                if unsafe { cur.as_ref().nid } == handle.nid {
                    return Ok(at);
                }
                break;
            }
            cur = unsafe { cur.as_ref().next };
            at += 1;
        }
        Err(ListError::NodeNotFound)
    }

    /// Provides a reference to the payload of the node named by the handle.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    pub fn payload(&self, handle: &NodeHandle<T>) -> Result<&T, ListError> {
        let node = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `locate` only returns members, which are alive.
        Ok(unsafe { &node.as_ref().payload })
    }

    /// Provides a mutable reference to the payload of the node named by the
    /// handle.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    ///
    /// let mut list = List::new();
    /// let h = list.push_back(1);
    /// *list.payload_mut(&h).unwrap() += 10;
    /// assert_eq!(list.payload(&h), Ok(&11));
    /// ```
    pub fn payload_mut(&mut self, handle: &NodeHandle<T>) -> Result<&mut T, ListError> {
        let mut node = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `locate` only returns members, which are alive.
        Ok(unsafe { &mut node.as_mut().payload })
    }

    /// Returns a handle to the successor of the node named by the handle,
    /// or `Ok(None)` if it is the last node.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    ///
    /// let mut list = List::new();
    /// let a = list.push_back('a');
    /// let b = list.push_back('b');
    ///
    /// assert_eq!(list.next_handle(&a), Ok(Some(b)));
    /// assert_eq!(list.next_handle(&b), Ok(None));
    /// ```
    pub fn next_handle(&self, handle: &NodeHandle<T>) -> Result<Option<NodeHandle<T>>, ListError> {
        let node = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `node` is a member, so its `next` is valid.
        let next = unsafe { node.as_ref().next };
        Ok(if next == self.anchor_ptr() {
            None
        } else {
            Some(NodeHandle::of(next))
        })
    }

    /// Returns a handle to the predecessor of the node named by the handle,
    /// or `Ok(None)` if it is the first node.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    pub fn prev_handle(&self, handle: &NodeHandle<T>) -> Result<Option<NodeHandle<T>>, ListError> {
        let node = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `node` is a member, so its `prev` is valid.
        let prev = unsafe { node.as_ref().prev };
        Ok(if prev == self.anchor_ptr() {
            None
        } else {
            Some(NodeHandle::of(prev))
        })
    }

    /// Adds an element immediately before the node named by the handle and
    /// returns a handle to the new node.
    ///
    /// If the named node is the head, the new node becomes the head.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list; in particular, handles of *another* list are
    /// rejected rather than silently corrupting either list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([2, 4]);
    /// let four = list.handle_at(1).unwrap();
    ///
    /// list.insert_before(&four, 3).unwrap();
    /// assert_eq!(list.to_vec(), vec![2, 3, 4]);
    /// ```
    pub fn insert_before(
        &mut self,
        handle: &NodeHandle<T>,
        payload: T,
    ) -> Result<NodeHandle<T>, ListError> {
        let next = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `next` is a member, so its `prev` is valid and adjacent.
        let prev = unsafe { next.as_ref().prev };
        let node = Node::new_detached(payload);
        unsafe { self.attach_node(prev, next, node) };
        Ok(NodeHandle::of(node))
    }

    /// Adds an element immediately after the node named by the handle and
    /// returns a handle to the new node.
    ///
    /// If the named node is the tail, the new node becomes the tail.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([2, 4]);
    /// let four = list.handle_at(1).unwrap();
    ///
    /// list.insert_after(&four, 5).unwrap();
    /// assert_eq!(list.to_vec(), vec![2, 4, 5]);
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    pub fn insert_after(
        &mut self,
        handle: &NodeHandle<T>,
        payload: T,
    ) -> Result<NodeHandle<T>, ListError> {
        let prev = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `prev` is a member, so its `next` is valid and adjacent.
        let next = unsafe { prev.as_ref().next };
        let node = Node::new_detached(payload);
        unsafe { self.attach_node(prev, next, node) };
        Ok(NodeHandle::of(node))
    }

    /// Removes the node named by the handle and returns its payload.
    ///
    /// The handle, and every copy of it, is invalid afterwards.
    ///
    /// # Errors
    ///
    /// [`ListError::NodeNotFound`] if the handle does not name a live
    /// member of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mid = list.handle_at(1).unwrap();
    ///
    /// assert_eq!(list.remove_node(&mid), Ok(2));
    /// assert_eq!(list.to_vec(), vec![1, 3]);
    /// assert_eq!(list.remove_node(&mid), Err(ListError::NodeNotFound));
    /// ```
    pub fn remove_node(&mut self, handle: &NodeHandle<T>) -> Result<T, ListError> {
        let node = self.locate(handle).ok_or(ListError::NodeNotFound)?;
        // SAFETY: `locate` only returns members of this list.
        Ok(unsafe { self.detach_node(node) }.payload)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::error::ListError;
    use crate::list::List;
    use std::iter::FromIterator;

    #[test]
    fn handles_from_every_inserter() {
        let mut list = List::new();
        let b = list.push_back('b');
        let a = list.push_front('a');
        let d = list.insert(2, 'd').unwrap();
        let c = list.insert_before(&d, 'c').unwrap();
        let e = list.insert_after(&d, 'e').unwrap();

        assert_eq!(list.to_vec(), vec!['a', 'b', 'c', 'd', 'e']);
        for (i, h) in [a, b, c, d, e].iter().enumerate() {
            assert_eq!(list.index_of_node(h), Ok(i));
        }
        assert!(list.is_sound());
    }

    #[test]
    fn handle_is_stable_across_unrelated_mutations() {
        let mut list = List::from_iter(0..5);
        let two = list.handle_at(2).unwrap();

        list.push_front(-1);
        list.push_back(5);
        list.remove(0).unwrap();
        list.pop_back();

        assert_eq!(list.payload(&two), Ok(&2));
        assert_eq!(list.index_of_node(&two), Ok(2));
    }

    #[test]
    fn handle_dies_with_its_node() {
        let mut list = List::from_iter([1, 2, 3]);
        let front = list.front_handle().unwrap();
        let copy = front;

        assert_eq!(list.pop_front(), Some(1));
        assert!(!list.contains_node(&front));
        assert_eq!(list.payload(&copy), Err(ListError::NodeNotFound));
        assert_eq!(list.remove_node(&front), Err(ListError::NodeNotFound));
        assert_eq!(list.to_vec(), vec![2, 3]);
    }

    #[test]
    fn stale_handle_does_not_match_reused_allocation() {
        let mut list = List::new();
        let stale = list.push_back(1);
        list.pop_back();

        // Churn until some new node reuses the freed allocation, then make
        // sure the stale handle still does not resolve to it.
        for i in 0..64 {
            list.push_back(i);
        }
        assert!(!list.contains_node(&stale));
        assert_eq!(list.payload(&stale), Err(ListError::NodeNotFound));
        assert_eq!(list.len(), 64);
    }

    #[test]
    fn cross_list_handles_are_rejected() {
        let mut a = List::from_iter([1, 2, 3]);
        let mut b = List::from_iter([1, 2, 3]);
        let node_of_a = a.handle_at(1).unwrap();

        assert_eq!(b.remove_node(&node_of_a), Err(ListError::NodeNotFound));
        assert_eq!(b.insert_before(&node_of_a, 0), Err(ListError::NodeNotFound));
        assert_eq!(b.insert_after(&node_of_a, 0), Err(ListError::NodeNotFound));
        assert_eq!(b.index_of_node(&node_of_a), Err(ListError::NodeNotFound));
        assert!(!b.contains_node(&node_of_a));

        // Both lists are untouched by the rejected calls.
        assert_eq!(a.to_vec(), vec![1, 2, 3]);
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
        assert!(a.is_sound() && b.is_sound());

        // The handle still works against its own list.
        assert_eq!(a.remove_node(&node_of_a), Ok(2));
    }

    #[test]
    fn handles_follow_moved_nodes() {
        let mut a = List::from_iter([1, 2]);
        let mut b = List::from_iter([3, 4]);
        let three = b.front_handle().unwrap();

        a.append(&mut b);

        // The node now lives in `a`; the old owner no longer knows it.
        assert_eq!(a.index_of_node(&three), Ok(2));
        assert_eq!(b.index_of_node(&three), Err(ListError::NodeNotFound));
    }

    #[test]
    fn insert_around_endpoints_updates_them() {
        let mut list = List::new();
        let mid = list.push_back(2);

        list.insert_before(&mid, 1).unwrap();
        list.insert_after(&mid, 3).unwrap();

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert!(list.is_sound());
    }

    #[test]
    fn neighbor_navigation() {
        let mut list = List::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert_eq!(list.next_handle(&a), Ok(Some(b)));
        assert_eq!(list.prev_handle(&c), Ok(Some(b)));
        assert_eq!(list.prev_handle(&a), Ok(None));
        assert_eq!(list.next_handle(&c), Ok(None));

        list.remove_node(&b).unwrap();
        assert_eq!(list.next_handle(&a), Ok(Some(c)));
        assert_eq!(list.next_handle(&b), Err(ListError::NodeNotFound));
    }

    #[test]
    fn find_node_is_a_query() {
        let list = List::from_iter([1, 2, 3]);
        let before = list.to_vec();

        assert!(list.find_node(|e| *e == 2).is_some());
        assert!(list.find_node(|e| *e == 9).is_none());

        // Queries do not mutate.
        assert_eq!(list.to_vec(), before);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn payload_mut_reaches_the_node() {
        let mut list = List::from_iter([1, 2, 3]);
        let mid = list.handle_at(1).unwrap();
        *list.payload_mut(&mid).unwrap() = 20;
        assert_eq!(list.to_vec(), vec![1, 20, 3]);
    }

    #[test]
    fn handle_value_semantics() {
        let mut list = List::new();
        let a = list.push_back(1);
        let b = list.push_back(1);
        let a_again = list.front_handle().unwrap();

        assert_eq!(a, a_again);
        assert_ne!(a, b); // same payload, different nodes
        assert_eq!(format!("{:?}", a), format!("{:?}", a_again));
    }
}
