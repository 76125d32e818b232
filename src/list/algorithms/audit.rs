//! Structural self-check.
//!
//! [`List::audit`] re-derives the element count by two independent walks
//! (forward along `next`, backward along `prev`) and verifies the link
//! invariants on the way. It is a diagnostic for callers and tests, not a
//! precondition gate: a violation is *reported*, never panicked on.

use crate::list::error::ListError;
use crate::list::List;

impl<T> List<T> {
    /// Verifies the structural invariants of the list.
    ///
    /// The check walks the ring forward and backward, confirming that:
    ///
    /// 1. the recorded length matches the number of nodes reachable in
    ///    each direction (which also ties the empty state to an empty
    ///    ring);
    /// 2. every adjacent pair of nodes agrees (`n.next.prev == n` and
    ///    `n.prev.next == n`), anchor boundaries included;
    /// 3. no node is visited twice (both walks are bounded by the recorded
    ///    length, so a mislinked ring cannot loop forever).
    ///
    /// Returns the first violation found as
    /// [`ListError::Inconsistent`]. A violation can only arise from a bug
    /// in the list itself, never from misuse of the public API.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and never mutates
    /// the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.audit(), Ok(()));
    /// ```
    pub fn audit(&self) -> Result<(), ListError> {
        let anchor = self.anchor_ptr();

        let mut walked = 0_usize;
        let mut prev = anchor;
        let mut cur = self.front_ptr();
        while cur != anchor {
            if walked == self.len {
                return Err(ListError::Inconsistent(
                    "forward walk exceeds the recorded length",
                ));
            }
            // SAFETY: `cur` was reached by a `next` link and is not the
            // anchor, so it is a live payload node.
            let node = unsafe { cur.as_ref() };
            if node.prev != prev {
                return Err(ListError::Inconsistent(
                    "a node disagrees with its predecessor about adjacency",
                ));
            }
            prev = cur;
            cur = node.next;
            walked += 1;
        }
        // SAFETY: the anchor is owned by the list and always alive.
        if unsafe { anchor.as_ref() }.prev != prev {
            return Err(ListError::Inconsistent(
                "the anchor does not point back at the last node",
            ));
        }
        if walked != self.len {
            return Err(ListError::Inconsistent(
                "forward walk disagrees with the recorded length",
            ));
        }

        let mut walked_back = 0_usize;
        let mut next = anchor;
        let mut cur = self.back_ptr();
        while cur != anchor {
            if walked_back == self.len {
                return Err(ListError::Inconsistent(
                    "backward walk exceeds the recorded length",
                ));
            }
            // SAFETY: `cur` was reached by a `prev` link and is not the
            // anchor, so it is a live payload node.
            let node = unsafe { cur.as_ref() };
            if node.next != next {
                return Err(ListError::Inconsistent(
                    "a node disagrees with its successor about adjacency",
                ));
            }
            next = cur;
            cur = node.prev;
            walked_back += 1;
        }
        if walked_back != self.len {
            return Err(ListError::Inconsistent(
                "backward walk disagrees with the recorded length",
            ));
        }

        Ok(())
    }

    /// Returns `true` if [`audit`](List::audit) finds no violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// assert!(list.is_sound());
    /// ```
    #[inline]
    pub fn is_sound(&self) -> bool {
        self.audit().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::list::error::ListError;
    use crate::list::List;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::iter::FromIterator;

    #[test]
    fn audit_accepts_well_formed_lists() {
        assert!(List::<i32>::new().is_sound());
        assert!(List::from_iter(0..1).is_sound());
        assert!(List::from_iter(0..2).is_sound());
        assert!(List::from_iter(0..1000).is_sound());
    }

    #[test]
    fn audit_holds_after_random_operation_sequences() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut list = List::new();
        let mut net = 0_usize;
        for _ in 0..500 {
            match rng.gen_range(0..6) {
                0 => {
                    list.push_front(rng.gen::<i32>());
                    net += 1;
                }
                1 => {
                    list.push_back(rng.gen::<i32>());
                    net += 1;
                }
                2 => {
                    let at = rng.gen_range(0..=list.len());
                    list.insert(at, rng.gen::<i32>()).unwrap();
                    net += 1;
                }
                3 => {
                    if list.pop_front().is_some() {
                        net -= 1;
                    }
                }
                4 => {
                    if list.pop_back().is_some() {
                        net -= 1;
                    }
                }
                _ => {
                    if !list.is_empty() {
                        let at = rng.gen_range(0..list.len());
                        list.remove(at).unwrap();
                        net -= 1;
                    }
                }
            }
            assert!(list.is_sound());
            assert_eq!(list.len(), net);
        }
    }

    #[test]
    fn audit_detects_a_severed_back_link() {
        let mut list = List::from_iter([1, 2, 3]);
        let first = list.node_ptr_at(0);
        let mut third = list.node_ptr_at(2);

        // Deliberately corrupt the ring, check the report, then repair it
        // so the list can be dropped safely.
        let second = unsafe { third.as_ref().prev };
        unsafe { third.as_mut().prev = first };
        assert_eq!(
            list.audit(),
            Err(ListError::Inconsistent(
                "a node disagrees with its predecessor about adjacency",
            )),
        );
        assert!(!list.is_sound());

        unsafe { third.as_mut().prev = second };
        assert!(list.is_sound());
    }

    #[test]
    fn audit_detects_a_wrong_length() {
        let mut list = List::from_iter([1, 2, 3]);

        list.len = 4;
        assert_eq!(
            list.audit(),
            Err(ListError::Inconsistent(
                "forward walk disagrees with the recorded length",
            )),
        );

        list.len = 2;
        assert_eq!(
            list.audit(),
            Err(ListError::Inconsistent(
                "forward walk exceeds the recorded length",
            )),
        );

        list.len = 3;
        assert!(list.is_sound());
    }
}
