//! A compile-time-checked rendition of the same container, kept as a
//! design probe and differential test fixture.
//!
//! Instead of raw pointers and `unsafe`, each node's ownership is split
//! into two [`StaticRc`] halves, one held by the neighbor (or list end)
//! on each side, and interior mutation goes through a [`GhostToken`], so
//! the borrow checker itself rules out the aliasing bugs the main list
//! must argue about in `SAFETY` comments.
//!
//! The probe stays deliberately small: push/pop at both ends, length, and
//! materialization. A list dropped while non-empty leaks its nodes (the
//! halves are never re-joined), so tests drain it first.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;

type Half<'id, T> = StaticRc<GhostCell<'id, ProbeNode<'id, T>>, 1, 2>;
type Full<'id, T> = StaticRc<GhostCell<'id, ProbeNode<'id, T>>, 2, 2>;

struct ProbeNode<'id, T> {
    prev: Option<Half<'id, T>>,
    next: Option<Half<'id, T>>,
    payload: T,
}

impl<'id, T> ProbeNode<'id, T> {
    fn new(payload: T) -> Self {
        Self {
            prev: None,
            next: None,
            payload,
        }
    }

    fn alloc(payload: T) -> (Half<'id, T>, Half<'id, T>) {
        Full::split(Full::new(GhostCell::new(ProbeNode::new(payload))))
    }

    fn free(a: Half<'id, T>, b: Half<'id, T>) -> T {
        Full::into_box(Full::join(a, b)).into_inner().payload
    }
}

pub struct ProbeList<'id, T> {
    head: Option<Half<'id, T>>,
    tail: Option<Half<'id, T>>,
    len: usize,
}

impl<'id, T> Default for ProbeList<'id, T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<'id, T> ProbeList<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.head.as_ref().map(|cell| &cell.borrow(token).payload)
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.tail.as_ref().map(|cell| &cell.borrow(token).payload)
    }

    pub fn push_front(&mut self, payload: T, token: &mut GhostToken<'id>) {
        let (near, far) = ProbeNode::alloc(payload);
        self.len += 1;
        match self.head.take() {
            Some(old) => {
                // The old head keeps one half of the new node in `prev`;
                // the new node keeps the list's old half of the head.
                old.borrow_mut(token).prev = Some(near);
                far.borrow_mut(token).next = Some(old);
                self.head = Some(far);
            }
            None => {
                self.head = Some(near);
                self.tail = Some(far);
            }
        }
    }

    pub fn push_back(&mut self, payload: T, token: &mut GhostToken<'id>) {
        let (near, far) = ProbeNode::alloc(payload);
        self.len += 1;
        match self.tail.take() {
            Some(old) => {
                old.borrow_mut(token).next = Some(near);
                far.borrow_mut(token).prev = Some(old);
                self.tail = Some(far);
            }
            None => {
                self.head = Some(near);
                self.tail = Some(far);
            }
        }
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let near = self.head.take()?;
        let far = match near.borrow_mut(token).next.take() {
            Some(second) => {
                // The second node holds the other half of the old head in
                // its `prev`; reclaim it and promote the second node.
                let far = second.borrow_mut(token).prev.take().unwrap();
                self.head = Some(second);
                far
            }
            None => self.tail.take().unwrap(),
        };
        self.len -= 1;
        Some(ProbeNode::free(near, far))
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let far = self.tail.take()?;
        let near = match far.borrow_mut(token).prev.take() {
            Some(penultimate) => {
                let near = penultimate.borrow_mut(token).next.take().unwrap();
                self.tail = Some(penultimate);
                near
            }
            None => self.head.take().unwrap(),
        };
        self.len -= 1;
        Some(ProbeNode::free(near, far))
    }

    pub fn clear(&mut self, token: &mut GhostToken<'id>) {
        while self.pop_front(token).is_some() {}
    }

    pub fn to_vec(&self, token: &GhostToken<'id>) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head.as_ref();
        while let Some(cell) = cur {
            let node = cell.borrow(token);
            out.push(node.payload.clone());
            cur = node.next.as_ref();
        }
        out
    }
}
