use crate::list::error::ListError;
use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod audit;
mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns `true` if any element is matched by the caller-supplied
    /// equality test.
    pub fn contains_where<F>(&self, is_match: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(is_match)
    }

    /// Returns the index of the first element matched by the caller-supplied
    /// equality test, scanning from the front.
    ///
    /// # Errors
    ///
    /// [`ListError::ElementNotFound`] if no element matches. Use
    /// [`find_node`](List::find_node) when absence is an expected answer
    /// rather than a contract violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([10, 20, 30]);
    /// assert_eq!(list.index_where(|e| e / 10 == 2), Ok(1));
    /// assert_eq!(
    ///     list.index_where(|e| *e < 0),
    ///     Err(ListError::ElementNotFound),
    /// );
    /// ```
    pub fn index_where<F>(&self, mut is_match: F) -> Result<usize, ListError>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .position(|e| is_match(e))
            .ok_or(ListError::ElementNotFound)
    }

    /// Returns the index of the first element equal to `x`.
    ///
    /// Equivalent to `index_where(|e| e == x)`.
    ///
    /// # Errors
    ///
    /// [`ListError::ElementNotFound`] if no element equals `x`.
    pub fn index_of(&self, x: &T) -> Result<usize, ListError>
    where
        T: PartialEq,
    {
        self.index_where(|e| e == x)
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements), and it
    /// re-orders the list by relinking the existing nodes, so held
    /// [`NodeHandle`]s stay valid and simply report new positions.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1)
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    ///
    /// [`NodeHandle`]: crate::NodeHandle
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements), and it
    /// re-orders the list by relinking the existing nodes, so held
    /// [`NodeHandle`]s stay valid and simply report new positions.
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order of the
    /// elements is unspecified. An order is a total order if it is (for all
    /// `a`, `b` and `c`):
    /// - total and antisymmetric: exactly one of `a < b`, `a == b` or
    ///   `a > b` is true, and
    /// - transitive: `a < b` and `b < c` implies `a < c`. The same must
    ///   hold for both `==` and `>`.
    ///
    /// For example, while [`f64`] doesn't implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function when we
    /// know the list doesn't contain a `NaN`.
    ///
    /// ```
    /// use anchor_list::List;
    /// let mut floats = List::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats.into_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1)
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// let mut v = List::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.to_vec(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    ///
    /// [`NodeHandle`]: crate::NodeHandle
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements) and
    /// *O*(*m* \* *n* \* log(*n*)) worst-case, where the key function is
    /// *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use anchor_list::List;
    /// let mut v = List::from([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v.into_vec(), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}
