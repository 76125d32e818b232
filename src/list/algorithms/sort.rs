//! Stable in-place merge sort over the node ring.
//!
//! The sort re-orders the list purely by relinking existing nodes, never by
//! moving payloads between nodes, so node identity (and with it every held
//! [`NodeHandle`](crate::NodeHandle)) survives the call.

use crate::list::{connect, List, Node};
use std::ptr::NonNull;

/// Ranges at or below this length are insertion-sorted instead of split
/// further.
const INSERTION_SORT_THRESHOLD: usize = 8;

/// Sort the whole list so that `less(a, b)` implies `a` precedes `b`.
///
/// `less` must be a strict ordering test ("a sorts before b"); elements it
/// ranks equal keep their relative order.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (start, end) = (list.front_ptr(), list.anchor_ptr());
    if list.len() < 2 {
    } else if list.len() <= INSERTION_SORT_THRESHOLD {
        unsafe { insertion_sort_range(start, end, &mut less) };
    } else {
        unsafe { merge_sort_range(start, end, &mut less) };
    }
}

/// Find the middle node of `start..end` with the two-speed walk, returning
/// it together with the range length.
unsafe fn mid_of_range<T>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
) -> (NonNull<Node<T>>, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = start.as_ref().next;
        if start != end {
            len += 1;
            start = start.as_ref().next;
            mid = mid.as_ref().next;
        }
    }
    (mid, len)
}

/// Sort `start..end` recursively and return the new start of the range.
unsafe fn merge_sort_range<T, F>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut mid, len) = mid_of_range(start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(start, end, less);
    }

    if start != mid && start.as_ref().next != mid {
        start = merge_sort_range(start, mid, less);
    }
    if mid != end && mid.as_ref().next != end {
        mid = merge_sort_range(mid, end, less);
    }

    if start != mid && mid != end {
        start = merge_range(start, mid, end, less);
    }
    start
}

/// Merge two adjacent sorted runs, `start..mid` and `mid..end`, and return
/// the new start of the merged range.
unsafe fn merge_range<T, F>(
    mut start: NonNull<Node<T>>,
    mid: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    // `dst` scans the already-merged run `start..mid`; `src` is the next
    // node of the pending run `mid..end` waiting to be merged in.
    let (mut dst, dst_back, mut src) = (start, mid.as_ref().prev, mid);
    // Once the back of the merged run sorts before the front of the pending
    // run, the whole range is in order and the merge stops.
    while src != end && less(&src.as_ref().payload, &dst_back.as_ref().payload) {
        // Advance `dst` to the first node that sorts after `*src`. Using a
        // strict test keeps equal elements in their original runs, which is
        // what makes the sort stable.
        while dst != src && !less(&src.as_ref().payload, &dst.as_ref().payload) {
            dst = dst.as_ref().next;
        }
        if dst == src {
            break;
        }

        // Take the longest prefix `src..src_stop` of the pending run that
        // sorts before `*dst`, and move it over in one splice.
        let mut src_stop = src.as_ref().next;
        while src_stop != end && less(&src_stop.as_ref().payload, &dst.as_ref().payload) {
            src_stop = src_stop.as_ref().next;
        }
        if dst == start {
            start = src;
        }
        move_nodes(src, src_stop.as_ref().prev, dst);
        src = src_stop;
    }
    start
}

/// Insertion-sort `start..end` and return the new start of the range.
unsafe fn insertion_sort_range<T, F>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut run_back, mut probe) = (start, start.as_ref().next);
    loop {
        // Nodes already in order extend the sorted run without any
        // relinking.
        while probe != end && !less(&probe.as_ref().payload, &run_back.as_ref().payload) {
            run_back = probe;
            probe = probe.as_ref().next;
        }
        if probe == end {
            break;
        }
        // Find the insertion slot: the first sorted node that `*probe`
        // sorts before. The strict test lands equal elements after their
        // earlier twins, keeping the sort stable.
        let mut slot = start;
        while slot != probe && !less(&probe.as_ref().payload, &slot.as_ref().payload) {
            slot = slot.as_ref().next;
        }
        if slot == start {
            start = probe;
        }
        let next = probe.as_ref().next;
        move_node(std::mem::replace(&mut probe, next), slot);
    }
    start
}

/// Relink the single node `from` to sit immediately before `to`.
unsafe fn move_node<T>(from: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    move_nodes(from, from, to);
}

/// Relink the chain `from_front..=from_back` to sit immediately before
/// `to`. The chain must not contain `to`.
unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::iter::FromIterator;

    #[test]
    fn sort_short_and_long_ranges() {
        // Exercise the empty and single-element fast paths, the insertion
        // sort, and the recursive merge path.
        for len in [0usize, 1, 2, 7, 8, 9, 64, 257].iter().copied() {
            let mut list = List::from_iter((0..len as i32).rev());
            list.sort();
            assert_eq!(list.to_vec(), Vec::from_iter(0..len as i32));
            assert!(list.is_sound());
        }
    }

    #[test]
    fn sort_already_sorted() {
        let mut list = List::from_iter(0..100);
        list.sort();
        assert_eq!(list.to_vec(), Vec::from_iter(0..100));
        assert!(list.is_sound());
    }

    #[test]
    fn sort_by_reverse_comparator() {
        let mut list = List::from_iter([3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list.to_vec(), vec![9, 6, 5, 5, 5, 4, 3, 3, 2, 1, 1]);
        assert!(list.is_sound());
    }

    #[test]
    fn sort_is_stable() {
        // Sort pairs by key only; the sequence number must keep the
        // original relative order within each key.
        let pairs: Vec<(i32, usize)> = [3, 1, 2, 1, 3, 2, 1, 3, 2, 1, 3, 2, 1]
            .iter()
            .copied()
            .enumerate()
            .map(|(seq, key)| (key, seq))
            .collect();
        let mut list = List::from_iter(pairs.clone());
        list.sort_by(|a, b| a.0.cmp(&b.0));

        let mut expected = pairs;
        expected.sort_by_key(|p| p.0); // Vec sort is stable
        assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn sort_matches_vec_sort_on_random_input() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let len = rng.gen_range(0..200);
            let values: Vec<i8> = (0..len).map(|_| rng.gen()).collect();

            let mut list = List::from_iter(values.clone());
            list.sort();

            let mut expected = values;
            expected.sort();
            assert_eq!(list.to_vec(), expected);
            assert!(list.is_sound());
        }
    }

    #[test]
    fn sort_preserves_node_identity() {
        let mut list = List::new();
        let handles: Vec<_> = (0..50).map(|i| list.push_back((i * 7919) % 101)).collect();
        let payloads: Vec<_> = list.to_vec();

        list.sort();

        // Every handle taken before the sort is still a member and still
        // carries its payload; only its position changed.
        for (handle, payload) in handles.iter().zip(&payloads) {
            assert!(list.contains_node(handle));
            assert_eq!(list.payload(handle), Ok(payload));
        }
        assert!(list.is_sound());
    }

    #[test]
    fn sort_by_key_with_duplicate_keys() {
        let mut list = List::from_iter(["bb", "a", "ccc", "dd", "e"]);
        list.sort_by_key(|s| s.len());
        assert_eq!(list.to_vec(), vec!["a", "e", "bb", "dd", "ccc"]);
    }
}
