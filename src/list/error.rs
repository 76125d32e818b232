use thiserror::Error;

/// The error taxonomy of fallible [`List`] operations.
///
/// Every variant signals a violated caller precondition (or, for
/// [`Inconsistent`], an internal bug) that is surfaced immediately at the
/// point of detection. None of them are retried or swallowed internally.
///
/// Operations that model a *legitimately* absent result ([`find_node`],
/// the `contains` family, [`front`], [`pop_front`] and friends) return
/// `Option` or `bool` instead of an error, so callers can tell "absence is
/// an answer" apart from "absence breaks the contract".
///
/// [`List`]: crate::List
/// [`Inconsistent`]: ListError::Inconsistent
/// [`find_node`]: crate::List::find_node
/// [`front`]: crate::List::front
/// [`pop_front`]: crate::List::pop_front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// An index or range argument lies outside the list.
    ///
    /// Insertion positions range over `0..=len`, element indices over
    /// `0..len`.
    #[error("index {index} out of bounds for a list of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// [`audit`] found a broken structural invariant.
    ///
    /// This can never be produced by misusing the public API; seeing it
    /// means the list itself has a bug. The message names the first
    /// violated invariant.
    ///
    /// [`audit`]: crate::List::audit
    #[error("list structure is inconsistent: {0}")]
    Inconsistent(&'static str),

    /// A payload search found no match where the contract requires one.
    #[error("no element in the list matched the search")]
    ElementNotFound,

    /// The supplied handle does not refer to a live node of this list.
    ///
    /// Raised both for handles whose node has since been removed and for
    /// handles that belong to a different list.
    #[error("node is not a member of this list")]
    NodeNotFound,
}

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn messages_carry_context() {
        let err = ListError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 out of bounds for a list of length 3"
        );
        assert_eq!(
            ListError::NodeNotFound.to_string(),
            "node is not a member of this list"
        );
    }
}
