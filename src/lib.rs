//! This crate provides a doubly-linked list with owned nodes and stable
//! node handles, implemented as a cyclic list.
//!
//! The [`List`] allows inserting and removing elements at any known
//! position in constant time. In compromise, locating a position by index
//! or by handle takes *O*(*n*) time.
//!
//! What sets it apart from an array is node identity: every insertion
//! returns a [`NodeHandle`], and a handle keeps naming the same element
//! while unrelated elements come and go, even across a [`sort`], which
//! re-orders the list by relinking nodes rather than moving payloads.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use anchor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let three = list.handle_at(2).unwrap(); // remember a node
//! list.push_front(0); // mutate around it
//! list.remove(1).unwrap();
//! assert_eq!(list.payload(&three), Ok(&3)); // the handle still holds
//!
//! assert_eq!(list.remove_node(&three), Ok(3));
//! assert_eq!(list.to_vec(), vec![0, 2, 4]);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────┐
//!          ↓                                              Anchor node    │
//!    ╔═══════════╗           ╔═══════════╗               ┌───────────┐   │
//!    ║   next    ║ ────────→ ║   next    ║ ──→ ┄┄ ─────→ │   next    │ ──┘
//!    ╟───────────╢           ╟───────────╢               ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←── ┄┄ ←───── │   prev    │
//! │  ╟───────────╢           ╟───────────╢               ├───────────┤
//! │  ║  nid: 17  ║           ║  nid: 42  ║               │  nid: 0   │
//! │  ╟───────────╢           ╟───────────╢               ├───────────┤
//! │  ║ payload T ║           ║ payload T ║               ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝               └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                      ↑   ↑
//! └──────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                  │
//! ║  anchor   ║ ─────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//!
//! The `List` contains a pointer to the payload-less *anchor* node that
//! closes the ring, and a length field `len`. `anchor.next` is the first
//! element and `anchor.prev` is the last; in an empty list both point at
//! the anchor itself. The forward chain owns the nodes; `prev` links are
//! non-owning back-references.
//!
//! Each payload node additionally carries `nid`, an id drawn from a
//! process-wide counter and never reused. Handles are validated against it,
//! so a handle whose node is long gone cannot be fooled by a newer node in
//! the same allocation.
//!
//! # Fallible operations
//!
//! Operations with contractual preconditions return `Result` carrying a
//! [`ListError`]:
//!
//! - indices out of range report [`ListError::OutOfBounds`];
//! - handles that are stale or belong to another list report
//!   [`ListError::NodeNotFound`];
//! - required-match searches report [`ListError::ElementNotFound`];
//! - [`audit`] reports [`ListError::Inconsistent`] for internal invariant
//!   violations (a bug in the list, never caller misuse).
//!
//! Queries where absence is a legitimate answer ([`find_node`],
//! [`contains`], [`front`], [`pop_front`], ...) return `Option` or `bool`
//! instead.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended, fused, exact-size iterators walking the list
//! front to back, and each call to [`iter`] starts fresh from the front.
//! [`IterMut`] provides mutability of the elements (but not of the linked
//! structure of the list). Mutating the list *while* an iterator is alive
//! is rejected by the borrow checker rather than at runtime.
//!
//! ## Examples
//!
//! ```
//! use anchor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // fused
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Sorting
//!
//! [`sort`], [`sort_by`] and [`sort_by_key`] run a stable merge sort that
//! relinks the existing nodes in place: *O*(*n* log *n*) time, no extra
//! node allocation, and every held handle survives with its payload.
//!
//! ```
//! use anchor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([3, 1, 2]);
//! let h = list.front_handle().unwrap(); // names the node holding 3
//!
//! list.sort();
//!
//! assert_eq!(list.to_vec(), vec![1, 2, 3]);
//! assert_eq!(list.index_of_node(&h), Ok(2)); // the node moved to the back
//! ```
//!
//! # Thread safety
//!
//! `List<T>` is `Send`/`Sync` exactly when `T` is, like the standard
//! containers, but a single list must not be mutated from several threads
//! without external synchronization. [`NodeHandle`]s are confined to the
//! thread of their list.
//!
//! [`List`]: crate::List
//! [`NodeHandle`]: crate::NodeHandle
//! [`ListError`]: crate::ListError
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`iter`]: crate::List::iter
//! [`sort`]: crate::List::sort
//! [`sort_by`]: crate::List::sort_by
//! [`sort_by_key`]: crate::List::sort_by_key
//! [`audit`]: crate::List::audit
//! [`find_node`]: crate::List::find_node
//! [`contains`]: crate::List::contains
//! [`front`]: crate::List::front
//! [`pop_front`]: crate::List::pop_front

#[doc(inline)]
pub use list::error::ListError;
#[doc(inline)]
pub use list::handle::NodeHandle;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod list;

mod experiments;
